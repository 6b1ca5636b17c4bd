//! Directional price prediction.
//!
//! Combines a moving-average trend score with a fixed heuristic scorer
//! into one prediction per commodity series. All randomness flows from
//! the seed supplied at construction, so two predictors built with the
//! same seed produce identical output for identical input.

mod scorer;

pub use scorer::{DirectionalScore, HeuristicScorer};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use common::PriceSample;

/// Minimum series length for a non-neutral prediction.
const MIN_SAMPLES: usize = 10;

/// Period of the primary trend moving average.
const TREND_SMA_PERIOD: usize = 10;

// ── Public Types ──────────────────────────────────────────────────────

/// Predicted price direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictedTrend {
    Bullish,
    Neutral,
    Bearish,
}

/// One prediction result. Produced per call; the caller owns retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub trend: PredictedTrend,
    /// Combined confidence in [0, 1].
    pub confidence: f64,
    /// Projected price.
    pub target: f64,
    /// Class scores for [bearish, neutral, bullish].
    pub probabilities: [f64; 3],
}

impl Prediction {
    /// The fail-soft default used whenever the series is too short.
    pub fn neutral(latest_price: f64) -> Self {
        Self {
            trend: PredictedTrend::Neutral,
            confidence: 0.5,
            target: latest_price,
            probabilities: [1.0 / 3.0; 3],
        }
    }
}

// ── Predictor ─────────────────────────────────────────────────────────

/// Stateful only in its RNG: the heuristic weights are fixed at
/// construction and never updated.
pub struct Predictor {
    scorer: HeuristicScorer,
    rng: ChaCha8Rng,
}

impl Predictor {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let scorer = HeuristicScorer::new(&mut rng);
        Self { scorer, rng }
    }

    /// Predict the next direction for one commodity series.
    ///
    /// Returns the neutral default instead of erroring when fewer than
    /// 10 samples are available.
    pub fn predict(&mut self, series: &[PriceSample]) -> Prediction {
        let latest_price = series.last().map(|s| s.price).unwrap_or(0.0);
        if series.len() < MIN_SAMPLES {
            debug!(
                "series too short for prediction ({} < {}), returning neutral",
                series.len(),
                MIN_SAMPLES
            );
            return Prediction::neutral(latest_price);
        }

        let prices: Vec<f64> = series.iter().map(|s| s.price).collect();

        // 1. Primary trend score: latest price vs the 10-sample average.
        let sma = indicators::sma(&prices, TREND_SMA_PERIOD);
        let primary_trend = if latest_price > sma {
            PredictedTrend::Bullish
        } else {
            PredictedTrend::Bearish
        };
        let divergence = if sma > 0.0 {
            (latest_price - sma).abs() / sma
        } else {
            0.0
        };
        let primary_confidence = (0.5 + divergence * 5.0).clamp(0.5, 0.95);

        // 2. Secondary directional score from the heuristic scorer.
        let secondary = self.scorer.score(&prices, &mut self.rng);

        // 3. Asymmetric combination: trend always from the primary
        //    score, target always from the secondary, confidence is the
        //    mean of both.
        Prediction {
            trend: primary_trend,
            confidence: (primary_confidence + secondary.confidence) / 2.0,
            target: secondary.target,
            probabilities: secondary.probabilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Trend;

    fn make_series(prices: &[f64]) -> Vec<PriceSample> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PriceSample {
                timestamp: i as u64,
                price: p,
                volume: 100.0,
                trend: Trend::Stable,
                liquidity: Some(0.5),
            })
            .collect()
    }

    #[test]
    fn test_short_series_returns_neutral_default() {
        let mut predictor = Predictor::new(1);
        let prediction = predictor.predict(&make_series(&[100.0, 101.0, 102.0]));
        assert_eq!(prediction.trend, PredictedTrend::Neutral);
        assert_eq!(prediction.confidence, 0.5);
        for p in prediction.probabilities {
            assert!((p - 1.0 / 3.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_rising_series_scores_bullish() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + 2.0 * i as f64).collect();
        let mut predictor = Predictor::new(1);
        let prediction = predictor.predict(&make_series(&prices));
        assert_eq!(prediction.trend, PredictedTrend::Bullish);
        assert!(prediction.confidence > 0.5 && prediction.confidence <= 1.0);
    }

    #[test]
    fn test_falling_series_scores_bearish() {
        let prices: Vec<f64> = (0..20).map(|i| 200.0 - 3.0 * i as f64).collect();
        let mut predictor = Predictor::new(1);
        let prediction = predictor.predict(&make_series(&prices));
        assert_eq!(prediction.trend, PredictedTrend::Bearish);
    }

    #[test]
    fn test_same_seed_same_prediction() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + ((i * 7) % 11) as f64).collect();
        let series = make_series(&prices);
        let a = Predictor::new(42).predict(&series);
        let b = Predictor::new(42).predict(&series);
        assert_eq!(a.trend, b.trend);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.target, b.target);
        assert_eq!(a.probabilities, b.probabilities);
    }

    #[test]
    fn test_confidence_stays_in_unit_interval() {
        // Extreme divergence from the average must not push the mean of
        // the two confidences past 1.
        let mut prices = vec![100.0; 19];
        prices.push(100_000.0);
        let mut predictor = Predictor::new(3);
        let prediction = predictor.predict(&make_series(&prices));
        assert!(prediction.confidence >= 0.0 && prediction.confidence <= 1.0);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let prices: Vec<f64> = (0..20).map(|i| 50.0 + (i % 7) as f64).collect();
        let mut predictor = Predictor::new(9);
        let prediction = predictor.predict(&make_series(&prices));
        let sum: f64 = prediction.probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "softmax output must sum to 1");
    }
}
