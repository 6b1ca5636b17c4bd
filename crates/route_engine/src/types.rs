//! Route ranking types.

use serde::{Deserialize, Serialize};

use common::Commodity;

/// Discrete route risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskTier {
    pub fn rank(&self) -> u8 {
        match self {
            RiskTier::Low => 0,
            RiskTier::Medium => 1,
            RiskTier::High => 2,
            RiskTier::Extreme => 3,
        }
    }

    /// Tier for a commodity: contraband always extreme, otherwise banded
    /// by historical volatility.
    pub fn for_commodity(commodity: &Commodity) -> Self {
        if commodity.contraband {
            RiskTier::Extreme
        } else if commodity.volatility > 0.6 {
            RiskTier::High
        } else if commodity.volatility > 0.3 {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

/// Ranking order selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Highest absolute profit first.
    Profit,
    /// Highest return on investment first.
    Roi,
    /// Shortest route first.
    Distance,
    /// Cheapest entry first.
    Investment,
}

/// Ranking request parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteQuery {
    /// Budget available for the buy leg.
    pub max_investment: f64,
    /// Cargo hold size in integer units.
    pub cargo_capacity: u32,
    /// Sort order of the result list.
    #[serde(default = "default_sort")]
    pub sort: SortKey,
    /// Drop candidates above this risk tier.
    #[serde(default)]
    pub max_risk: Option<RiskTier>,
    /// Drop candidates below this profit.
    #[serde(default)]
    pub min_profit: Option<f64>,
}

fn default_sort() -> SortKey {
    SortKey::Profit
}

/// One evaluated trade route. Derived fresh on every ranking call and
/// never persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub commodity: String,
    pub buy_location: String,
    pub sell_location: String,
    pub buy_price: f64,
    pub sell_price: f64,
    /// Units purchased, bounded by budget and cargo capacity.
    pub quantity: u32,
    pub investment: f64,
    pub revenue: f64,
    pub profit: f64,
    /// Return on investment, in percent.
    pub roi: f64,
    pub distance: f64,
    pub profit_per_unit: f64,
    pub profit_per_distance: f64,
    pub risk_tier: RiskTier,
}
