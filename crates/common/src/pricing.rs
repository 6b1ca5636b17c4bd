//! Location price modifiers.
//!
//! Buy and sell prices are the commodity base price times a per
//! (commodity, location) multiplicative factor: buy-side factors are
//! <= 1, sell-side factors are >= 1. Pairs without an explicit entry
//! fall back to the table-wide defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{Commodity, Location};
use crate::Result;

/// One configured (commodity, location) price modifier pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingEntry {
    pub commodity: String,
    pub location: String,
    /// Buy price factor, in (0, 1].
    #[serde(default = "default_buy_factor")]
    pub buy_factor: f64,
    /// Sell price factor, >= 1.
    #[serde(default = "default_sell_factor")]
    pub sell_factor: f64,
}

pub(crate) fn default_buy_factor() -> f64 {
    0.95
}

pub(crate) fn default_sell_factor() -> f64 {
    1.05
}

/// Resolved per-pair price factors with defaults for missing pairs.
#[derive(Debug, Clone)]
pub struct PricingTable {
    factors: HashMap<(String, String), (f64, f64)>,
    default_buy: f64,
    default_sell: f64,
}

impl PricingTable {
    /// Build a table from configured entries, validating the factor
    /// bounds.
    pub fn from_entries(entries: &[PricingEntry]) -> Result<Self> {
        Self::with_defaults(entries, default_buy_factor(), default_sell_factor())
    }

    pub fn with_defaults(
        entries: &[PricingEntry],
        default_buy: f64,
        default_sell: f64,
    ) -> Result<Self> {
        let mut factors = HashMap::new();
        for entry in entries {
            Self::check_factors(entry.buy_factor, entry.sell_factor).map_err(|e| {
                Error::InvalidInput(format!(
                    "pricing entry {}@{}: {}",
                    entry.commodity, entry.location, e
                ))
            })?;
            factors.insert(
                (entry.commodity.clone(), entry.location.clone()),
                (entry.buy_factor, entry.sell_factor),
            );
        }
        Self::check_factors(default_buy, default_sell)
            .map_err(|e| Error::InvalidInput(format!("default pricing factors: {}", e)))?;
        Ok(Self {
            factors,
            default_buy,
            default_sell,
        })
    }

    fn check_factors(buy: f64, sell: f64) -> std::result::Result<(), String> {
        if !(buy > 0.0 && buy <= 1.0) {
            return Err(format!("buy factor {} outside (0, 1]", buy));
        }
        if !(sell >= 1.0) || !sell.is_finite() {
            return Err(format!("sell factor {} below 1", sell));
        }
        Ok(())
    }

    /// (buy price, sell price) for a commodity at a location.
    pub fn prices(&self, commodity: &Commodity, location: &Location) -> (f64, f64) {
        let (buy_factor, sell_factor) = self
            .factors
            .get(&(commodity.code.clone(), location.name.clone()))
            .copied()
            .unwrap_or((self.default_buy, self.default_sell));
        (
            commodity.base_price * buy_factor,
            commodity.base_price * sell_factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_commodity(code: &str, base_price: f64) -> Commodity {
        Commodity {
            code: code.into(),
            name: code.into(),
            base_price,
            volatility: 0.2,
            contraband: false,
        }
    }

    fn make_location(name: &str) -> Location {
        Location {
            name: name.into(),
            coordinates: [0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn test_explicit_entry_overrides_defaults() {
        let entries = vec![PricingEntry {
            commodity: "AGRI".into(),
            location: "Port Vex".into(),
            buy_factor: 0.8,
            sell_factor: 1.2,
        }];
        let table = PricingTable::from_entries(&entries).unwrap();
        let (buy, sell) = table.prices(&make_commodity("AGRI", 100.0), &make_location("Port Vex"));
        assert!((buy - 80.0).abs() < 1e-9);
        assert!((sell - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_pair_uses_defaults() {
        let table = PricingTable::from_entries(&[]).unwrap();
        let (buy, sell) = table.prices(&make_commodity("AGRI", 100.0), &make_location("Elsewhere"));
        assert!((buy - 95.0).abs() < 1e-9);
        assert!((sell - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_buy_factor_above_one() {
        let entries = vec![PricingEntry {
            commodity: "AGRI".into(),
            location: "Port Vex".into(),
            buy_factor: 1.1,
            sell_factor: 1.2,
        }];
        let err = PricingTable::from_entries(&entries).unwrap_err();
        assert!(err.to_string().contains("buy factor"));
    }

    #[test]
    fn test_rejects_sell_factor_below_one() {
        let entries = vec![PricingEntry {
            commodity: "AGRI".into(),
            location: "Port Vex".into(),
            buy_factor: 0.9,
            sell_factor: 0.9,
        }];
        let err = PricingTable::from_entries(&entries).unwrap_err();
        assert!(err.to_string().contains("sell factor"));
    }
}
