use crate::error::EngineError;
use crate::id::OrderIdGenerator;
use crate::partition::Partition;
use crate::types::{Order, Side, Ticks};
use std::collections::HashMap;

/// O(1) static dispatch of an order to its owning partition.
///
/// Built once from the full partition list; construction fails fast if
/// two partitions claim the same symbol. Holds no mutable state of its
/// own beyond the order-id generator — the `symbol -> partition` table
/// is immutable and freely shared once built.
#[derive(Debug)]
pub struct Router {
    partitions: Vec<Partition>,
    symbol_to_partition: HashMap<String, usize>,
    ids: OrderIdGenerator,
}

impl Router {
    /// Builds the router from the full, disjoint partition cover. Returns
    /// `DuplicateSymbol` if any symbol is claimed by more than one
    /// partition in the list.
    pub fn new(partitions: Vec<Partition>) -> Result<Self, EngineError> {
        let mut symbol_to_partition = HashMap::new();
        for (idx, partition) in partitions.iter().enumerate() {
            for symbol in partition.symbols() {
                if symbol_to_partition.insert(symbol.clone(), idx).is_some() {
                    return Err(EngineError::DuplicateSymbol(symbol.clone()));
                }
            }
        }

        Ok(Self {
            partitions,
            symbol_to_partition,
            ids: OrderIdGenerator::new(),
        })
    }

    /// Builds and submits one order for `symbol`. Mints the order id from
    /// the router's own generator so callers never construct `OrderId`
    /// themselves.
    pub fn route(&self, symbol: &str, side: Side, price_ticks: Ticks, quantity: i64) -> Result<(), EngineError> {
        let order = Order::new(self.ids.next(), symbol, side, price_ticks, quantity);
        self.route_order(order)
    }

    /// Routes an already-constructed order (e.g. one with an explicit
    /// timestamp for deterministic tests/replay).
    pub fn route_order(&self, order: Order) -> Result<(), EngineError> {
        let idx = *self
            .symbol_to_partition
            .get(&order.symbol)
            .ok_or_else(|| EngineError::UnknownSymbol(order.symbol.clone()))?;
        self.partitions[idx].submit(order)
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn partition_for(&self, symbol: &str) -> Option<&Partition> {
        self.symbol_to_partition.get(symbol).map(|&idx| &self.partitions[idx])
    }

    /// Signals shutdown to every owned partition, joining their workers.
    pub fn shutdown(&mut self) {
        for partition in &mut self.partitions {
            partition.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_symbol_fails_construction() {
        let p1 = Partition::new("p1", vec!["AAA".into()], 1);
        let p2 = Partition::new("p2", vec!["AAA".into()], 1);
        let err = Router::new(vec![p1, p2]).unwrap_err();
        assert_eq!(err, EngineError::DuplicateSymbol("AAA".into()));
    }

    #[test]
    fn route_rejects_unknown_symbol() {
        let p1 = Partition::new("p1", vec!["AAA".into()], 1);
        let router = Router::new(vec![p1]).unwrap();
        let err = router.route("ZZZ", Side::Buy, 100, 1).unwrap_err();
        assert_eq!(err, EngineError::UnknownSymbol("ZZZ".into()));
    }

    #[test]
    fn cross_partition_isolation() {
        let p1 = Partition::new("p1", vec!["AAA".into()], 1);
        let p2 = Partition::new("p2", vec!["BBB".into()], 1);
        let mut router = Router::new(vec![p1, p2]).unwrap();

        router.route("AAA", Side::Buy, 2000, 10).unwrap();
        router.route("BBB", Side::Sell, 500, 5).unwrap();
        router.route("AAA", Side::Sell, 2000, 10).unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(2);
        while router.partition_for("AAA").unwrap().orders_read() < 2
            && std::time::Instant::now() < deadline
        {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        assert_eq!(router.partition_for("AAA").unwrap().orders_read(), 2);
        assert_eq!(router.partition_for("AAA").unwrap().total_trades(), 1);
        assert_eq!(router.partition_for("BBB").unwrap().orders_read(), 1);
        assert_eq!(router.partition_for("BBB").unwrap().total_trades(), 0);

        router.shutdown();
    }

    #[test]
    fn order_ids_are_unique_across_routes() {
        let p1 = Partition::new("p1", vec!["AAA".into()], 1);
        let mut router = Router::new(vec![p1]).unwrap();
        router.route("AAA", Side::Buy, 100, 1).unwrap();
        router.route("AAA", Side::Buy, 101, 1).unwrap();
        router.shutdown();
    }
}
