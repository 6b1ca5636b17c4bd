//! Route ranking command.

use anyhow::Result;
use tracing::info;

use common::PricingTable;
use route_engine::{RouteQuery, SortKey};

use crate::config::AppConfig;

pub fn run(
    config: &AppConfig,
    top: usize,
    sort: SortKey,
    max_investment: f64,
    cargo: u32,
) -> Result<()> {
    let pricing = PricingTable::with_defaults(
        &config.market.pricing,
        config.market.default_buy_factor,
        config.market.default_sell_factor,
    )?;

    let query = RouteQuery {
        max_investment,
        cargo_capacity: cargo,
        sort,
        max_risk: None,
        min_profit: None,
    };

    let mut candidates = route_engine::rank_routes(
        &config.market.commodities,
        &config.market.locations,
        &pricing,
        &query,
    )?;

    info!(
        "{} profitable routes, showing top {}",
        candidates.len(),
        top.min(candidates.len())
    );
    candidates.truncate(top);
    println!("{}", serde_json::to_string_pretty(&candidates)?);
    Ok(())
}
