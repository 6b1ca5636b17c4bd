//! Technical indicator library.
//!
//! Pure, stateless functions over an ordered price series (and, for the
//! bundled set, a parallel volume series). All functions are
//! deterministic and side-effect free; under-length inputs degrade to a
//! documented neutral value instead of erroring, so sparse feeds never
//! break the scoring pipeline.

use serde::{Deserialize, Serialize};

/// Window used for support/resistance and the bundled aggregates.
const LEVEL_WINDOW: usize = 20;

// ── Moving Averages ───────────────────────────────────────────────────

/// Arithmetic mean of the last `period` prices. Returns 0.0 when the
/// series is shorter than `period`.
pub fn sma(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period {
        return 0.0;
    }
    let window = &prices[prices.len() - period..];
    window.iter().sum::<f64>() / period as f64
}

/// Exponential moving average with multiplier `2 / (period + 1)`,
/// seeded with the first price and folded over the full series.
/// Returns 0.0 when the series is shorter than `period`.
pub fn ema(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() < period {
        return 0.0;
    }
    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut value = prices[0];
    for &price in &prices[1..] {
        value = price * multiplier + value * (1.0 - multiplier);
    }
    value
}

// ── Momentum ──────────────────────────────────────────────────────────

/// Relative strength index over the FIRST `period` deltas of the series.
///
/// The window is anchored at the start of the series rather than
/// rolling; downstream consumers depend on this exact behavior. Returns
/// the neutral 50.0 when fewer than `period + 1` prices are available,
/// and 100.0 when the average loss is exactly zero.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    if period == 0 || prices.len() <= period {
        return 50.0;
    }
    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..=period {
        let delta = prices[i] - prices[i - 1];
        if delta >= 0.0 {
            gains += delta;
        } else {
            losses += -delta;
        }
    }
    let average_gain = gains / period as f64;
    let average_loss = losses / period as f64;
    if average_loss == 0.0 {
        return 100.0;
    }
    let rs = average_gain / average_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Moving average convergence/divergence: `ema(12) - ema(26)`.
pub fn macd(prices: &[f64]) -> f64 {
    ema(prices, 12) - ema(prices, 26)
}

// ── Volatility ────────────────────────────────────────────────────────

/// Bollinger bands around the simple moving average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// `sma ± 2σ` where σ is the population standard deviation of the last
/// `period` prices. All-zero bands when the series is shorter than
/// `period`.
pub fn bollinger_bands(prices: &[f64], period: usize) -> BollingerBands {
    if period == 0 || prices.len() < period {
        return BollingerBands {
            upper: 0.0,
            middle: 0.0,
            lower: 0.0,
        };
    }
    let middle = sma(prices, period);
    let window = &prices[prices.len() - period..];
    let variance =
        window.iter().map(|p| (p - middle) * (p - middle)).sum::<f64>() / period as f64;
    let sigma = variance.sqrt();
    BollingerBands {
        upper: middle + 2.0 * sigma,
        middle,
        lower: middle - 2.0 * sigma,
    }
}

// ── Levels ────────────────────────────────────────────────────────────

/// Minimum of the last 20 prices (0.0 on an empty series).
pub fn support_level(prices: &[f64]) -> f64 {
    let start = prices.len().saturating_sub(LEVEL_WINDOW);
    let min = prices[start..].iter().copied().fold(f64::INFINITY, f64::min);
    if min.is_finite() {
        min
    } else {
        0.0
    }
}

/// Maximum of the last 20 prices (0.0 on an empty series).
pub fn resistance_level(prices: &[f64]) -> f64 {
    let start = prices.len().saturating_sub(LEVEL_WINDOW);
    let max = prices[start..]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if max.is_finite() {
        max
    } else {
        0.0
    }
}

// ── Bundle ────────────────────────────────────────────────────────────

/// The full indicator snapshot for one commodity series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub sma_10: f64,
    pub sma_20: f64,
    pub ema_12: f64,
    pub ema_26: f64,
    pub rsi_14: f64,
    pub macd: f64,
    pub bollinger: BollingerBands,
    pub support: f64,
    pub resistance: f64,
    /// Mean volume over the last 20 samples.
    pub average_volume: f64,
}

/// Compute the bundled indicator snapshot.
pub fn compute_indicators(prices: &[f64], volumes: &[f64]) -> IndicatorSet {
    IndicatorSet {
        sma_10: sma(prices, 10),
        sma_20: sma(prices, 20),
        ema_12: ema(prices, 12),
        ema_26: ema(prices, 26),
        rsi_14: rsi(prices, 14),
        macd: macd(prices),
        bollinger: bollinger_bands(prices, 20),
        support: support_level(prices),
        resistance: resistance_level(prices),
        average_volume: sma(volumes, LEVEL_WINDOW.min(volumes.len()).max(1)),
    }
}
