//! Thin driver for the sharded matching engine.
//!
//! Plays the role of the "external producer" the core engine assumes:
//! loads a JSON partition layout, builds the engine, feeds it orders
//! (either one explicit order or a bounded synthetic stream), and polls
//! the observability counters. No persistence, no wire protocol, no
//! authentication — those are explicitly out of scope for this core.

mod config;
mod error;
mod synth;
mod telemetry;

use clap::{Parser, Subcommand};
use config::Layout;
use engine::{ticks_from_price, Partition, Router, Side};
use error::DriverError;
use std::path::PathBuf;
use std::thread::sleep;
use std::time::{Duration, Instant};
use synth::Synthesizer;
use tracing::info;

#[derive(Parser)]
#[command(name = "driver")]
#[command(about = "Driver for the sharded limit-order matching engine")]
struct Cli {
    /// Path to a JSON partition layout file.
    #[arg(short, long, default_value = "layout.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submits a single limit order and reports the resulting counters.
    Submit {
        #[arg(short, long)]
        symbol: String,
        #[arg(long, value_parser = parse_side)]
        side: Side,
        /// Decimal limit price; converted to ticks at this boundary.
        #[arg(short, long)]
        price: f64,
        #[arg(short, long)]
        quantity: i64,
    },
    /// Feeds a bounded synthetic order stream through every configured symbol.
    Run {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 200)]
        orders_per_symbol: usize,
    },
}

fn parse_side(s: &str) -> Result<Side, String> {
    match s.to_lowercase().as_str() {
        "buy" | "bid" => Ok(Side::Buy),
        "sell" | "ask" => Ok(Side::Sell),
        _ => Err(format!("invalid side '{s}', expected buy|sell")),
    }
}

fn build_router(layout: &Layout) -> Result<Router, DriverError> {
    let partitions = layout
        .partitions
        .iter()
        .map(|p| {
            let symbols = p.symbols.iter().map(|s| s.symbol.clone()).collect();
            Partition::new(p.name.clone(), symbols, p.workers)
        })
        .collect();
    Router::new(partitions).map_err(DriverError::from)
}

fn wait_for_drain(router: &Router, expected: u64, symbol: &str) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while router
        .partition_for(symbol)
        .map(|p| p.orders_read())
        .unwrap_or(0)
        < expected
        && Instant::now() < deadline
    {
        sleep(Duration::from_millis(5));
    }
}

fn main() -> Result<(), DriverError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let layout = Layout::load(&cli.config)?;
    let mut router = build_router(&layout)?;

    info!(config = %cli.config.display(), partitions = layout.partitions.len(), "engine started");

    match cli.command {
        Commands::Submit { symbol, side, price, quantity } => {
            let price_ticks = ticks_from_price(price);
            let before = router.partition_for(&symbol).map(|p| p.orders_read()).unwrap_or(0);
            router.route(&symbol, side, price_ticks, quantity)?;
            wait_for_drain(&router, before + 1, &symbol);

            if let Some(partition) = router.partition_for(&symbol) {
                info!(
                    symbol = %symbol,
                    orders_read = partition.orders_read(),
                    total_trades = partition.total_trades(),
                    "order processed"
                );
            }
        }
        Commands::Run { seed, orders_per_symbol } => {
            let symbols = layout.all_symbols();
            let mut synth = Synthesizer::new(seed, &layout.price_ranges());
            synth.run(&router, &symbols, orders_per_symbol);

            for symbol in &symbols {
                wait_for_drain(&router, orders_per_symbol as u64, symbol);
            }
        }
    }

    telemetry::log_snapshot(&router);
    info!("shutting down");
    router.shutdown();

    Ok(())
}
