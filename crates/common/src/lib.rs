//! Shared types, config, and error definitions for the tradewind engine.

pub mod config;
pub mod error;
pub mod pricing;
pub mod series;
pub mod types;

pub use config::MarketConfig;
pub use error::Error;
pub use pricing::{PricingEntry, PricingTable};
pub use series::PriceSeries;
pub use types::*;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
