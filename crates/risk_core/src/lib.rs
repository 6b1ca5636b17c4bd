//! Multi-factor commodity risk scoring.
//!
//! Combines volatility, liquidity, market-trend, and concentration
//! signals for one commodity into a single overall risk score and a
//! discrete category. Stateless: the caller owns the series and any
//! assessment history.

use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{Error, PriceSample, Result};

/// Samples considered for the return-volatility window.
const VOLATILITY_WINDOW: usize = 10;

/// Liquidity assumed when the feed does not report one.
const NEUTRAL_LIQUIDITY: f64 = 0.5;

// ── Public Types ──────────────────────────────────────────────────────

/// Discrete risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Category thresholds — fixed for compatibility with downstream
    /// consumers.
    pub fn from_score(score: f64) -> Self {
        if score < 0.2 {
            RiskLevel::Low
        } else if score < 0.4 {
            RiskLevel::Medium
        } else if score < 0.7 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
            RiskLevel::Critical => 3,
        }
    }
}

/// One risk scoring result. Produced per call; the caller owns
/// retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub volatility_risk: f64,
    pub liquidity_risk: f64,
    pub market_risk: f64,
    pub concentration_risk: f64,
    pub overall_risk: f64,
    pub risk_level: RiskLevel,
}

impl RiskAssessment {
    /// Weighted combination of the four component risks. Components are
    /// clamped to [0, 1] before weighting, so the overall score stays in
    /// [0, 1] for any inputs.
    pub fn from_components(
        volatility_risk: f64,
        liquidity_risk: f64,
        market_risk: f64,
        concentration_risk: f64,
    ) -> Self {
        let volatility_risk = volatility_risk.clamp(0.0, 1.0);
        let liquidity_risk = liquidity_risk.clamp(0.0, 1.0);
        let market_risk = market_risk.clamp(0.0, 1.0);
        let concentration_risk = concentration_risk.clamp(0.0, 1.0);
        let overall_risk = (0.3 * volatility_risk
            + 0.3 * liquidity_risk
            + 0.2 * market_risk
            + 0.2 * concentration_risk)
            .clamp(0.0, 1.0);
        Self {
            volatility_risk,
            liquidity_risk,
            market_risk,
            concentration_risk,
            overall_risk,
            risk_level: RiskLevel::from_score(overall_risk),
        }
    }
}

// ── Scoring ───────────────────────────────────────────────────────────

/// Assess risk for one commodity series.
///
/// `concentration` is the externally supplied allocation share of this
/// commodity, in [0, 1]. Fails only when fewer than 2 samples are
/// available; every other under-data case degrades to a neutral
/// component value.
pub fn assess_risk(series: &[PriceSample], concentration: f64) -> Result<RiskAssessment> {
    if series.len() < 2 {
        return Err(Error::InsufficientData(format!(
            "risk scoring needs at least 2 samples, got {}",
            series.len()
        )));
    }

    let volatility_risk = return_volatility(series);

    // Latest sample drives the liquidity and trend components.
    let latest = &series[series.len() - 1];
    let liquidity = latest.liquidity.unwrap_or_else(|| {
        debug!("no liquidity on latest sample, assuming neutral");
        NEUTRAL_LIQUIDITY
    });
    let liquidity_risk = 1.0 - liquidity.clamp(0.0, 1.0);
    let market_risk = latest.trend.signal().abs() * volatility_risk;

    Ok(RiskAssessment::from_components(
        volatility_risk,
        liquidity_risk,
        market_risk,
        concentration,
    ))
}

/// Population standard deviation of period-over-period returns across
/// the last `VOLATILITY_WINDOW` samples. 0.0 when fewer than 2 returns
/// are available.
fn return_volatility(series: &[PriceSample]) -> f64 {
    let start = series.len().saturating_sub(VOLATILITY_WINDOW);
    let window = &series[start..];
    let mut returns = Vec::with_capacity(window.len().saturating_sub(1));
    for pair in window.windows(2) {
        if pair[0].price > 0.0 {
            returns.push((pair[1].price - pair[0].price) / pair[0].price);
        }
    }
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance =
        returns.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / returns.len() as f64;
    variance.sqrt().clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Trend;

    fn make_sample(timestamp: u64, price: f64, trend: Trend) -> PriceSample {
        PriceSample {
            timestamp,
            price,
            volume: 100.0,
            trend,
            liquidity: Some(0.5),
        }
    }

    fn make_series(prices: &[f64]) -> Vec<PriceSample> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| make_sample(i as u64, p, Trend::Stable))
            .collect()
    }

    #[test]
    fn test_weighted_combination_scenario() {
        let assessment = RiskAssessment::from_components(0.1, 0.1, 0.1, 0.1);
        assert!((assessment.overall_risk - 0.1).abs() < 1e-10);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_overall_risk_bounded_for_wild_inputs() {
        let assessment = RiskAssessment::from_components(5.0, -3.0, 12.0, 99.0);
        assert!(assessment.overall_risk >= 0.0 && assessment.overall_risk <= 1.0);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0.19), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.2), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.39), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.4), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.69), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.7), RiskLevel::Critical);
    }

    #[test]
    fn test_too_few_samples_is_an_error() {
        let series = make_series(&[100.0]);
        let err = assess_risk(&series, 0.1).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_two_samples_degrade_to_zero_volatility() {
        // One return only — volatility degrades to 0, no error.
        let series = make_series(&[100.0, 105.0]);
        let assessment = assess_risk(&series, 0.0).unwrap();
        assert_eq!(assessment.volatility_risk, 0.0);
        assert_eq!(assessment.market_risk, 0.0);
    }

    #[test]
    fn test_constant_series_has_no_volatility_risk() {
        let series = make_series(&[50.0; 12]);
        let assessment = assess_risk(&series, 0.0).unwrap();
        assert_eq!(assessment.volatility_risk, 0.0);
    }

    #[test]
    fn test_missing_liquidity_defaults_neutral() {
        let mut series = make_series(&[100.0, 101.0, 102.0]);
        series.last_mut().unwrap().liquidity = None;
        let assessment = assess_risk(&series, 0.0).unwrap();
        assert!((assessment.liquidity_risk - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_stable_trend_zeroes_market_risk() {
        let mut series = make_series(&[100.0, 110.0, 95.0, 120.0, 90.0]);
        series.last_mut().unwrap().trend = Trend::Stable;
        let assessment = assess_risk(&series, 0.0).unwrap();
        assert_eq!(assessment.market_risk, 0.0);

        series.last_mut().unwrap().trend = Trend::Down;
        let assessment = assess_risk(&series, 0.0).unwrap();
        assert!(
            (assessment.market_risk - assessment.volatility_risk).abs() < 1e-10,
            "down trend carries full volatility into market risk"
        );
    }

    #[test]
    fn test_volatility_window_uses_last_ten_samples() {
        // Violent early history followed by a flat tail longer than the
        // window: the tail alone should drive the score.
        let mut prices = vec![100.0, 400.0, 50.0, 300.0];
        prices.extend([200.0; 11]);
        let series = make_series(&prices);
        let assessment = assess_risk(&series, 0.0).unwrap();
        assert_eq!(assessment.volatility_risk, 0.0);
    }
}
