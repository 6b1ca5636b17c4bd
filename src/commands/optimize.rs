//! Portfolio optimization command.
//!
//! Derives one asset profile per commodity from the feed series, then
//! runs the genetic optimizer against the configured constraints.

use anyhow::Result;
use tracing::{info, warn};

use optimizer::AssetProfile;

use crate::config::AppConfig;
use crate::feed::SyntheticFeed;

pub fn run(config: &AppConfig) -> Result<()> {
    let feed = SyntheticFeed::new(config.feed.seed);
    let concentration = 1.0 / config.market.commodities.len().max(1) as f64;

    let mut assets = Vec::with_capacity(config.market.commodities.len());
    for commodity in &config.market.commodities {
        let series = feed.series_for(
            commodity,
            config.feed.samples,
            config.market.series_capacity,
        )?;
        let samples = series.as_slice();

        let expected_return = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) if first.price > 0.0 => {
                (last.price - first.price) / first.price
            }
            _ => 0.0,
        };
        // Fall back to the configured volatility if scoring degrades.
        let risk = match risk_core::assess_risk(samples, concentration) {
            Ok(assessment) => assessment.overall_risk,
            Err(e) => {
                warn!("{}: risk scoring failed ({}), using volatility", commodity.code, e);
                commodity.volatility
            }
        };
        let liquidity = if samples.is_empty() {
            0.5
        } else {
            samples.iter().map(|s| s.liquidity.unwrap_or(0.5)).sum::<f64>()
                / samples.len() as f64
        };

        assets.push(AssetProfile {
            id: commodity.code.clone(),
            expected_return,
            risk,
            liquidity,
        });
    }

    let mut on_progress = |generation: u32, best: f64| {
        info!("generation {}: best fitness {:.6}", generation, best);
    };
    let outcome = optimizer::optimize_portfolio(
        &assets,
        |asset| (asset.expected_return, asset.risk),
        &config.constraints,
        &config.optimizer,
        Some(&mut on_progress),
    )?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
