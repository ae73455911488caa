use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::DriverError;

/// External partition layout, loaded from JSON and never parsed by the
/// core — the driver converts it into `engine::Partition::new` calls
/// and keeps each symbol's price range to itself for seeding the
/// synthesizer (spec.md §6: "consumed only by the driver, not the
/// core").
///
/// ```json
/// {
///   "partitions": [
///     { "name": "p1", "symbols": [
///         { "symbol": "AAPL", "min_price": 150.0, "max_price": 200.0 },
///         { "symbol": "TSLA", "min_price": 200.0, "max_price": 260.0 }
///       ], "workers": 5 },
///     { "name": "p2", "symbols": [
///         { "symbol": "MSFT", "min_price": 300.0, "max_price": 340.0 }
///       ] }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct Layout {
    pub partitions: Vec<PartitionConfig>,
}

#[derive(Debug, Deserialize)]
pub struct PartitionConfig {
    pub name: String,
    pub symbols: Vec<SymbolConfig>,
    #[serde(default = "default_worker_count")]
    pub workers: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolConfig {
    pub symbol: String,
    pub min_price: f64,
    pub max_price: f64,
}

fn default_worker_count() -> usize {
    5
}

impl Layout {
    pub fn load(path: &Path) -> Result<Self, DriverError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DriverError::ReadConfig {
            path: path.display().to_string(),
            source,
        })?;
        let layout: Layout = serde_json::from_str(&raw).map_err(|source| DriverError::ParseConfig {
            path: path.display().to_string(),
            source,
        })?;
        Ok(layout)
    }

    /// The full, flattened set of symbols this layout covers, used only
    /// by the synthetic order generator to pick a symbol to trade.
    pub fn all_symbols(&self) -> Vec<String> {
        self.partitions
            .iter()
            .flat_map(|p| p.symbols.iter().map(|s| s.symbol.clone()))
            .collect()
    }

    /// Each symbol's configured `{min_price, max_price}` range, keyed by
    /// symbol. Never seen by `engine` — the driver uses this only to
    /// bound the synthetic order generator.
    pub fn price_ranges(&self) -> HashMap<String, (f64, f64)> {
        self.partitions
            .iter()
            .flat_map(|p| &p.symbols)
            .map(|s| (s.symbol.clone(), (s.min_price, s.max_price)))
            .collect()
    }
}
