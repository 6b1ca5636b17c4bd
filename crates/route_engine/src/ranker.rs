//! Route candidate evaluation and ranking.

use std::cmp::Ordering;

use tracing::debug;

use common::{Commodity, Error, Location, PricingTable, Result};

use crate::types::{RiskTier, RouteCandidate, RouteQuery, SortKey};

/// Floor applied to route distances before the per-distance division,
/// so coincident locations do not divide by zero.
const DISTANCE_EPSILON: f64 = 1e-6;

/// Enumerate and rank all profitable routes using Euclidean distances.
///
/// Every commodity is paired with every ordered pair of distinct
/// locations. Candidates with non-positive profit are discarded, which
/// also removes every zero-quantity (and therefore zero-investment)
/// combination. The full ranked list is returned; truncating to a
/// display size is the caller's concern.
pub fn rank_routes(
    commodities: &[Commodity],
    locations: &[Location],
    pricing: &PricingTable,
    query: &RouteQuery,
) -> Result<Vec<RouteCandidate>> {
    rank_routes_with(commodities, locations, pricing, query, Location::distance_to)
}

/// Same as [`rank_routes`] with a caller-supplied distance model.
pub fn rank_routes_with<D>(
    commodities: &[Commodity],
    locations: &[Location],
    pricing: &PricingTable,
    query: &RouteQuery,
    distance_fn: D,
) -> Result<Vec<RouteCandidate>>
where
    D: Fn(&Location, &Location) -> f64,
{
    validate(commodities, locations, query)?;

    let mut candidates = Vec::new();
    let mut discarded = 0usize;

    for commodity in commodities {
        let risk_tier = RiskTier::for_commodity(commodity);

        for buy_location in locations {
            for sell_location in locations {
                if buy_location.name == sell_location.name {
                    continue;
                }

                let (buy_price, _) = pricing.prices(commodity, buy_location);
                let (_, sell_price) = pricing.prices(commodity, sell_location);

                // 1. Quantity bounded by budget and cargo hold.
                let affordable = (query.max_investment / buy_price).floor();
                let quantity = (affordable as u64).min(query.cargo_capacity as u64) as u32;

                // 2. Economics.
                let investment = quantity as f64 * buy_price;
                let revenue = quantity as f64 * sell_price;
                let profit = revenue - investment;

                // 3. Only profitable candidates survive; this also
                //    guarantees investment > 0 below.
                if profit <= 0.0 {
                    discarded += 1;
                    continue;
                }

                let roi = profit / investment * 100.0;
                let distance = distance_fn(buy_location, sell_location);

                candidates.push(RouteCandidate {
                    commodity: commodity.code.clone(),
                    buy_location: buy_location.name.clone(),
                    sell_location: sell_location.name.clone(),
                    buy_price,
                    sell_price,
                    quantity,
                    investment,
                    revenue,
                    profit,
                    roi,
                    distance,
                    profit_per_unit: profit / quantity as f64,
                    profit_per_distance: profit / distance.max(DISTANCE_EPSILON),
                    risk_tier,
                });
            }
        }
    }

    // 4. Caller-requested filters.
    if let Some(max_risk) = query.max_risk {
        candidates.retain(|c| c.risk_tier.rank() <= max_risk.rank());
    }
    if let Some(min_profit) = query.min_profit {
        candidates.retain(|c| c.profit >= min_profit);
    }

    debug!(
        "ranked {} candidates ({} discarded as unprofitable)",
        candidates.len(),
        discarded
    );

    candidates.sort_by(|a, b| compare(a, b, query.sort));
    Ok(candidates)
}

fn validate(commodities: &[Commodity], locations: &[Location], query: &RouteQuery) -> Result<()> {
    if commodities.is_empty() {
        return Err(Error::InvalidInput("empty commodity set".into()));
    }
    if locations.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "need at least 2 locations, got {}",
            locations.len()
        )));
    }
    if !query.max_investment.is_finite() || query.max_investment < 0.0 {
        return Err(Error::InvalidInput(format!(
            "negative max investment: {}",
            query.max_investment
        )));
    }
    for commodity in commodities {
        if !(commodity.base_price > 0.0) {
            return Err(Error::InvalidInput(format!(
                "commodity {} has non-positive base price {}",
                commodity.code, commodity.base_price
            )));
        }
    }
    Ok(())
}

/// Sort by the requested key, breaking ties by commodity code and then
/// location names so the output order is fully deterministic.
fn compare(a: &RouteCandidate, b: &RouteCandidate, sort: SortKey) -> Ordering {
    let primary = match sort {
        SortKey::Profit => b.profit.partial_cmp(&a.profit),
        SortKey::Roi => b.roi.partial_cmp(&a.roi),
        SortKey::Distance => a.distance.partial_cmp(&b.distance),
        SortKey::Investment => a.investment.partial_cmp(&b.investment),
    }
    .unwrap_or(Ordering::Equal);

    primary
        .then_with(|| a.commodity.cmp(&b.commodity))
        .then_with(|| a.buy_location.cmp(&b.buy_location))
        .then_with(|| a.sell_location.cmp(&b.sell_location))
}
