//! Genetic-algorithm portfolio optimizer.
//!
//! Searches the simplex of asset-weight allocations for the allocation
//! maximizing a return-versus-risk fitness, under investment, risk, and
//! diversification constraints. The whole search is driven by one seeded
//! RNG, so a run is fully reproducible from its configuration.

pub mod config;
mod ga;

pub use config::{Constraints, GaConfig};
pub use ga::{optimize_portfolio, AssetProfile, Chromosome, OptimizationOutcome};
