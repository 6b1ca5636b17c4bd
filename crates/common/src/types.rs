//! Domain types shared across the engine crates.

use serde::{Deserialize, Serialize};

// ── Reference Data ────────────────────────────────────────────────────

/// A tradeable commodity. Immutable reference data, created at
/// configuration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commodity {
    /// Unique symbol, e.g. "AGRI".
    pub code: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Reference price (> 0) before location modifiers.
    pub base_price: f64,
    /// Expected fractional price swing, in (0, 1).
    pub volatility: f64,
    /// Contraband goods carry the highest route risk tier.
    #[serde(default)]
    pub contraband: bool,
}

/// A trading location. Static reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// Position in 3D space, used for route distances.
    pub coordinates: [f64; 3],
}

impl Location {
    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.coordinates[0] - other.coordinates[0];
        let dy = self.coordinates[1] - other.coordinates[1];
        let dz = self.coordinates[2] - other.coordinates[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

// ── Market Data ───────────────────────────────────────────────────────

/// Short-term price direction reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Signal value in [-1, 1].
    pub fn signal(&self) -> f64 {
        match self {
            Trend::Up => 1.0,
            Trend::Down => -1.0,
            Trend::Stable => 0.0,
        }
    }
}

/// One observed price point for a commodity. Never mutated after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSample {
    /// Monotonic feed timestamp.
    pub timestamp: u64,
    /// Observed price (> 0).
    pub price: f64,
    /// Traded volume (>= 0).
    pub volume: f64,
    /// Direction versus the previous sample.
    pub trend: Trend,
    /// Market liquidity in [0, 1], when the feed supplies it.
    #[serde(default)]
    pub liquidity: Option<f64>,
}
