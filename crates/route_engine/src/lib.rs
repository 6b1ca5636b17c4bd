//! Trade route enumeration and ranking.
//!
//! Enumerates every (commodity, buy location, sell location) candidate
//! under an investment and cargo budget, computes its economics, and
//! returns a ranked, filterable list. Purely a function of its inputs —
//! no internal state, so results are deterministic and testable.

mod ranker;
mod types;

pub use ranker::{rank_routes, rank_routes_with};
pub use types::{RiskTier, RouteCandidate, RouteQuery, SortKey};
