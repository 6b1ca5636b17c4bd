//! Fixed heuristic directional scorer.
//!
//! A small two-layer forward pass (tanh hidden layer, softmax output)
//! over the normalized recent returns of a series. The weights are
//! generated once from the injected RNG and never trained — this is a
//! deliberate fixed heuristic, not a learning model.

use rand::Rng;

/// Return-window length fed into the scorer.
const INPUTS: usize = 10;
const HIDDEN: usize = 6;
const CLASSES: usize = 3;

/// Raw output of one scoring pass.
#[derive(Debug, Clone)]
pub struct DirectionalScore {
    /// Class scores for [bearish, neutral, bullish]; sums to 1.
    pub probabilities: [f64; 3],
    /// Confidence drawn uniformly from [0.7, 0.9].
    pub confidence: f64,
    /// Projected price.
    pub target: f64,
}

pub struct HeuristicScorer {
    hidden_weights: [[f64; INPUTS]; HIDDEN],
    hidden_bias: [f64; HIDDEN],
    output_weights: [[f64; HIDDEN]; CLASSES],
    output_bias: [f64; CLASSES],
}

impl HeuristicScorer {
    /// Draw a fixed weight set from the RNG.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut hidden_weights = [[0.0; INPUTS]; HIDDEN];
        let mut hidden_bias = [0.0; HIDDEN];
        let mut output_weights = [[0.0; HIDDEN]; CLASSES];
        let mut output_bias = [0.0; CLASSES];
        for row in hidden_weights.iter_mut() {
            for w in row.iter_mut() {
                *w = rng.gen_range(-1.0..1.0);
            }
        }
        for b in hidden_bias.iter_mut() {
            *b = rng.gen_range(-1.0..1.0);
        }
        for row in output_weights.iter_mut() {
            for w in row.iter_mut() {
                *w = rng.gen_range(-1.0..1.0);
            }
        }
        for b in output_bias.iter_mut() {
            *b = rng.gen_range(-1.0..1.0);
        }
        Self {
            hidden_weights,
            hidden_bias,
            output_weights,
            output_bias,
        }
    }

    /// Score a price series. The RNG is used only for the confidence
    /// draw; the class scores are a pure function of the series and the
    /// fixed weights.
    pub fn score(&self, prices: &[f64], rng: &mut impl Rng) -> DirectionalScore {
        let (features, mean_abs_return) = Self::features(prices);

        // Forward pass: tanh hidden layer, softmax output.
        let mut hidden = [0.0; HIDDEN];
        for (h, (row, bias)) in hidden
            .iter_mut()
            .zip(self.hidden_weights.iter().zip(self.hidden_bias.iter()))
        {
            let sum: f64 = row.iter().zip(features.iter()).map(|(w, x)| w * x).sum();
            *h = (sum + bias).tanh();
        }
        let mut logits = [0.0; CLASSES];
        for (logit, (row, bias)) in logits
            .iter_mut()
            .zip(self.output_weights.iter().zip(self.output_bias.iter()))
        {
            let sum: f64 = row.iter().zip(hidden.iter()).map(|(w, h)| w * h).sum();
            *logit = sum + bias;
        }
        let probabilities = softmax(logits);

        let latest = prices.last().copied().unwrap_or(0.0);
        // Project the price by the bullish/bearish score spread scaled
        // by the recent mean absolute return.
        let drift = (probabilities[2] - probabilities[0]) * mean_abs_return;
        let target = latest * (1.0 + drift);

        DirectionalScore {
            probabilities,
            confidence: rng.gen_range(0.7..0.9),
            target,
        }
    }

    /// Last `INPUTS` period-over-period returns, normalized by the mean
    /// absolute return and left-padded with zeros on short input.
    fn features(prices: &[f64]) -> ([f64; INPUTS], f64) {
        let mut returns = Vec::with_capacity(INPUTS);
        let start = prices.len().saturating_sub(INPUTS + 1);
        for pair in prices[start..].windows(2) {
            if pair[0] > 0.0 {
                returns.push((pair[1] - pair[0]) / pair[0]);
            }
        }
        let mean_abs = if returns.is_empty() {
            0.0
        } else {
            returns.iter().map(|r| r.abs()).sum::<f64>() / returns.len() as f64
        };

        let mut features = [0.0; INPUTS];
        let offset = INPUTS - returns.len().min(INPUTS);
        for (slot, r) in features[offset..].iter_mut().zip(returns.iter()) {
            *slot = if mean_abs > 0.0 { r / mean_abs } else { 0.0 };
        }
        (features, mean_abs)
    }
}

fn softmax(logits: [f64; CLASSES]) -> [f64; CLASSES] {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut out = [0.0; CLASSES];
    let mut total = 0.0;
    for (o, logit) in out.iter_mut().zip(logits.iter()) {
        *o = (logit - max).exp();
        total += *o;
    }
    for o in out.iter_mut() {
        *o /= total;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_softmax_sums_to_one() {
        let out = softmax([1.0, -2.0, 0.5]);
        assert!((out.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(out.iter().all(|p| *p > 0.0));
    }

    #[test]
    fn test_score_is_deterministic_for_same_seed() {
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + ((i * 3) % 7) as f64).collect();
        let mut rng_a = ChaCha8Rng::seed_from_u64(5);
        let scorer_a = HeuristicScorer::new(&mut rng_a);
        let a = scorer_a.score(&prices, &mut rng_a);

        let mut rng_b = ChaCha8Rng::seed_from_u64(5);
        let scorer_b = HeuristicScorer::new(&mut rng_b);
        let b = scorer_b.score(&prices, &mut rng_b);

        assert_eq!(a.probabilities, b.probabilities);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.target, b.target);
    }

    #[test]
    fn test_confidence_bounds() {
        let prices: Vec<f64> = (0..15).map(|i| 10.0 + i as f64).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let scorer = HeuristicScorer::new(&mut rng);
        for _ in 0..50 {
            let score = scorer.score(&prices, &mut rng);
            assert!(score.confidence >= 0.7 && score.confidence < 0.9);
        }
    }

    #[test]
    fn test_flat_series_projects_latest_price() {
        // No returns — drift collapses and the target equals the input.
        let prices = vec![75.0; 12];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let scorer = HeuristicScorer::new(&mut rng);
        let score = scorer.score(&prices, &mut rng);
        assert!((score.target - 75.0).abs() < 1e-10);
    }
}
