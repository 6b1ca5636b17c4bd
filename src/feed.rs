//! Deterministic synthetic price feed.
//!
//! Stands in for the external price-feed collaborator during local
//! runs: a seeded random walk around each commodity's base price. Lives
//! in the host binary — the engine crates never depend on it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use common::{Commodity, PriceSample, PriceSeries, Result, Trend};

/// Relative move below which a step counts as stable.
const STABLE_BAND: f64 = 0.002;

pub struct SyntheticFeed {
    seed: u64,
}

impl SyntheticFeed {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Per-commodity stream seed so every commodity gets an independent
    /// but reproducible walk.
    fn commodity_seed(&self, code: &str) -> u64 {
        code.bytes()
            .fold(self.seed, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64))
    }

    /// Generate a full series for one commodity.
    pub fn series_for(
        &self,
        commodity: &Commodity,
        samples: usize,
        capacity: usize,
    ) -> Result<PriceSeries> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.commodity_seed(&commodity.code));
        let mut series = PriceSeries::with_capacity(capacity);
        let mut price = commodity.base_price;

        for t in 0..samples {
            let swing = rng.gen_range(-commodity.volatility..=commodity.volatility) * 0.25;
            // Floor the walk so a long losing streak cannot cross zero.
            let next = (price * (1.0 + swing)).max(commodity.base_price * 0.2);
            let delta = (next - price) / price;
            let trend = if delta > STABLE_BAND {
                Trend::Up
            } else if delta < -STABLE_BAND {
                Trend::Down
            } else {
                Trend::Stable
            };
            price = next;

            series.push(PriceSample {
                timestamp: t as u64,
                price,
                volume: rng.gen_range(50.0..500.0),
                trend,
                liquidity: Some(rng.gen_range(0.3..0.9)),
            })?;
        }

        Ok(series)
    }
}
