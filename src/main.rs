//! Tradewind CLI entry point.
//!
//! The host loop for the engine crates: loads configuration, builds
//! price series from the synthetic feed, and invokes analysis, route
//! ranking, or portfolio optimization on demand. The engine itself has
//! no timers or I/O — all scheduling lives here.

mod commands;
mod config;
mod feed;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use route_engine::SortKey;

#[derive(Parser)]
#[command(
    name = "tradewind",
    about = "Decision-support engine for commodity trading runs"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "tradewind.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Indicators, risk scores, and predictions for every commodity.
    Analyze,

    /// Enumerate and rank profitable trade routes.
    Routes {
        /// Show only the best N routes.
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Ranking order.
        #[arg(long, value_enum, default_value_t = SortArg::Profit)]
        sort: SortArg,

        /// Budget for the buy leg.
        #[arg(long, default_value_t = 10_000.0)]
        max_investment: f64,

        /// Cargo hold size in units.
        #[arg(long, default_value_t = 96)]
        cargo: u32,
    },

    /// Search for a profit/risk-optimal portfolio allocation.
    Optimize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Profit,
    Roi,
    Distance,
    Investment,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Profit => SortKey::Profit,
            SortArg::Roi => SortKey::Roi,
            SortArg::Distance => SortKey::Distance,
            SortArg::Investment => SortKey::Investment,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Analyze => commands::analyze::run(&config),
        Command::Routes {
            top,
            sort,
            max_investment,
            cargo,
        } => commands::routes::run(&config, top, sort.into(), max_investment, cargo),
        Command::Optimize => commands::optimize::run(&config),
    }
}
