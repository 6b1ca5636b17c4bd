//! Per-commodity analysis: indicators, risk score, prediction.

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use indicators::IndicatorSet;
use prediction::{Prediction, Predictor};
use risk_core::RiskAssessment;

use crate::config::AppConfig;
use crate::feed::SyntheticFeed;

#[derive(Serialize)]
struct CommodityReport {
    code: String,
    name: String,
    latest_price: f64,
    indicators: IndicatorSet,
    /// Absent when the series was too short to score.
    risk: Option<RiskAssessment>,
    prediction: Prediction,
}

pub fn run(config: &AppConfig) -> Result<()> {
    let feed = SyntheticFeed::new(config.feed.seed);
    let mut predictor = Predictor::new(config.prediction_seed);
    let concentration = 1.0 / config.market.commodities.len().max(1) as f64;

    let mut reports = Vec::with_capacity(config.market.commodities.len());
    for commodity in &config.market.commodities {
        let series = feed.series_for(
            commodity,
            config.feed.samples,
            config.market.series_capacity,
        )?;
        let prices = series.prices();
        let volumes = series.volumes();

        let indicators = indicators::compute_indicators(&prices, &volumes);

        // A failure for one commodity must not block the rest of the
        // report.
        let risk = match risk_core::assess_risk(series.as_slice(), concentration) {
            Ok(assessment) => Some(assessment),
            Err(e) => {
                warn!("{}: risk scoring skipped: {}", commodity.code, e);
                None
            }
        };

        let prediction = predictor.predict(series.as_slice());

        reports.push(CommodityReport {
            code: commodity.code.clone(),
            name: commodity.name.clone(),
            latest_price: series.latest().map(|s| s.price).unwrap_or(0.0),
            indicators,
            risk,
            prediction,
        });
    }

    info!("analyzed {} commodities", reports.len());
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
