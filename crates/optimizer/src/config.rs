//! Optimizer configuration and pre-run constraint validation.

use serde::{Deserialize, Serialize};

use common::{Error, Result};

use crate::ga::AssetProfile;

/// Genetic algorithm parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Chromosomes per generation.
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// Generations to run before terminating.
    #[serde(default = "default_generations")]
    pub generations: u32,

    /// Fraction of the population carried unchanged into the next
    /// generation.
    #[serde(default = "default_elitism_rate")]
    pub elitism_rate: f64,

    /// Probability a child inherits parent 1's weight per asset.
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,

    /// Per-asset mutation probability.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,

    /// Mutation perturbation is drawn from [-step, step].
    #[serde(default = "default_mutation_step")]
    pub mutation_step: f64,

    /// Invoke the progress callback every this many generations.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,

    /// RNG seed — the entire run is reproducible from it.
    #[serde(default)]
    pub seed: u64,
}

/// Allocation constraints, validated against the initial asset list
/// before a run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraints {
    /// Budget the allocation must fit in.
    #[serde(default = "default_max_investment")]
    pub max_investment: f64,

    /// Highest acceptable overall risk of the resulting allocation.
    #[serde(default = "default_max_risk")]
    pub max_risk: f64,

    /// Lowest acceptable liquidity among usable assets.
    #[serde(default = "default_min_liquidity")]
    pub min_liquidity: f64,

    /// Minimum number of assets with non-negligible weight.
    #[serde(default = "default_diversification_min")]
    pub diversification_min: usize,
}

impl Constraints {
    /// Check that the constraints are satisfiable at all for the given
    /// assets. Unsatisfiable configurations are caller programming
    /// errors and fail fast with a typed error.
    pub fn validate(&self, assets: &[AssetProfile]) -> Result<()> {
        if assets.is_empty() {
            return Err(Error::InvalidInput("empty asset list".into()));
        }
        if !(self.max_investment > 0.0) {
            return Err(Error::ConstraintViolation(format!(
                "max investment must be positive, got {}",
                self.max_investment
            )));
        }
        if self.diversification_min > assets.len() {
            return Err(Error::ConstraintViolation(format!(
                "diversification minimum {} exceeds asset count {}",
                self.diversification_min,
                assets.len()
            )));
        }

        let min_risk = assets.iter().map(|a| a.risk).fold(f64::INFINITY, f64::min);
        if min_risk > self.max_risk {
            return Err(Error::ConstraintViolation(format!(
                "every asset exceeds the risk ceiling: min risk {:.3} > {:.3}",
                min_risk, self.max_risk
            )));
        }

        let max_liquidity = assets
            .iter()
            .map(|a| a.liquidity)
            .fold(f64::NEG_INFINITY, f64::max);
        if max_liquidity < self.min_liquidity {
            return Err(Error::ConstraintViolation(format!(
                "every asset is below the liquidity floor: max liquidity {:.3} < {:.3}",
                max_liquidity, self.min_liquidity
            )));
        }

        Ok(())
    }
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_population_size() -> usize {
    100
}
fn default_generations() -> u32 {
    50
}
fn default_elitism_rate() -> f64 {
    0.1
}
fn default_crossover_rate() -> f64 {
    0.8
}
fn default_mutation_rate() -> f64 {
    0.1
}
fn default_mutation_step() -> f64 {
    0.05
}
fn default_progress_interval() -> u32 {
    10
}
fn default_max_investment() -> f64 {
    10_000.0
}
fn default_max_risk() -> f64 {
    0.7
}
fn default_min_liquidity() -> f64 {
    0.1
}
fn default_diversification_min() -> usize {
    1
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generations: default_generations(),
            elitism_rate: default_elitism_rate(),
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            mutation_step: default_mutation_step(),
            progress_interval: default_progress_interval(),
            seed: 0,
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            max_investment: default_max_investment(),
            max_risk: default_max_risk(),
            min_liquidity: default_min_liquidity(),
            diversification_min: default_diversification_min(),
        }
    }
}
