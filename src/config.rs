//! CLI configuration loader.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use common::MarketConfig;
use optimizer::{Constraints, GaConfig};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Market universe: commodities, locations, price modifiers.
    #[serde(default)]
    pub market: MarketConfig,

    /// Synthetic feed parameters.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Genetic algorithm parameters.
    #[serde(default)]
    pub optimizer: GaConfig,

    /// Portfolio constraints.
    #[serde(default)]
    pub constraints: Constraints,

    /// Seed for the predictive scorer.
    #[serde(default = "default_prediction_seed")]
    pub prediction_seed: u64,
}

/// Synthetic feed parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base RNG seed; each commodity derives its own stream from it.
    #[serde(default = "default_feed_seed")]
    pub seed: u64,

    /// Samples generated per commodity series.
    #[serde(default = "default_feed_samples")]
    pub samples: usize,
}

fn default_prediction_seed() -> u64 {
    1
}

fn default_feed_seed() -> u64 {
    7
}

fn default_feed_samples() -> usize {
    48
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            seed: default_feed_seed(),
            samples: default_feed_samples(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            feed: FeedConfig::default(),
            optimizer: GaConfig::default(),
            constraints: Constraints::default(),
            prediction_seed: default_prediction_seed(),
        }
    }
}

/// Load configuration from a TOML file, falling back to defaults when
/// the file does not exist.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        debug!("no config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config =
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.feed.samples, 48);
        assert_eq!(config.optimizer.generations, 50);
        assert!(!config.market.commodities.is_empty());
    }

    #[test]
    fn test_partial_override() {
        let config: AppConfig = toml::from_str(
            r#"
            [feed]
            seed = 99

            [optimizer]
            generations = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.feed.seed, 99);
        assert_eq!(config.feed.samples, 48);
        assert_eq!(config.optimizer.generations, 5);
        assert_eq!(config.optimizer.population_size, 100);
    }
}
