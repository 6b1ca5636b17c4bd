//! Market configuration types.

use serde::{Deserialize, Serialize};

use crate::pricing::PricingEntry;
use crate::types::{Commodity, Location};

/// Static market universe: commodities, locations, and price modifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Commodities to track.
    #[serde(default = "default_commodities")]
    pub commodities: Vec<Commodity>,

    /// Trading locations.
    #[serde(default = "default_locations")]
    pub locations: Vec<Location>,

    /// Explicit (commodity, location) price modifiers. Missing pairs use
    /// the default factors below.
    #[serde(default)]
    pub pricing: Vec<PricingEntry>,

    /// Buy factor applied when no explicit entry exists.
    #[serde(default = "default_buy_factor")]
    pub default_buy_factor: f64,

    /// Sell factor applied when no explicit entry exists.
    #[serde(default = "default_sell_factor")]
    pub default_sell_factor: f64,

    /// Bounded capacity of each per-commodity price series.
    #[serde(default = "default_series_capacity")]
    pub series_capacity: usize,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_buy_factor() -> f64 {
    0.95
}

fn default_sell_factor() -> f64 {
    1.05
}

fn default_series_capacity() -> usize {
    48
}

fn default_commodities() -> Vec<Commodity> {
    vec![
        Commodity {
            code: "AGRI".into(),
            name: "Agricium".into(),
            base_price: 25.8,
            volatility: 0.15,
            contraband: false,
        },
        Commodity {
            code: "LARA".into(),
            name: "Laranite".into(),
            base_price: 29.2,
            volatility: 0.25,
            contraband: false,
        },
        Commodity {
            code: "TITA".into(),
            name: "Titanium".into(),
            base_price: 8.1,
            volatility: 0.1,
            contraband: false,
        },
        Commodity {
            code: "MEDS".into(),
            name: "Medical Supplies".into(),
            base_price: 17.5,
            volatility: 0.35,
            contraband: false,
        },
        Commodity {
            code: "WIDO".into(),
            name: "WiDoW".into(),
            base_price: 110.0,
            volatility: 0.45,
            contraband: true,
        },
        Commodity {
            code: "SPIR".into(),
            name: "Distilled Spirits".into(),
            base_price: 5.2,
            volatility: 0.65,
            contraband: false,
        },
    ]
}

fn default_locations() -> Vec<Location> {
    vec![
        Location {
            name: "Port Olisar".into(),
            coordinates: [0.0, 0.0, 0.0],
        },
        Location {
            name: "Lorville".into(),
            coordinates: [120.0, -40.0, 15.0],
        },
        Location {
            name: "Area18".into(),
            coordinates: [-80.0, 60.0, -25.0],
        },
        Location {
            name: "New Babbage".into(),
            coordinates: [200.0, 110.0, -60.0],
        },
        Location {
            name: "Grim HEX".into(),
            coordinates: [15.0, 5.0, 8.0],
        },
    ]
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            commodities: default_commodities(),
            locations: default_locations(),
            pricing: Vec::new(),
            default_buy_factor: default_buy_factor(),
            default_sell_factor: default_sell_factor(),
            series_capacity: default_series_capacity(),
        }
    }
}
