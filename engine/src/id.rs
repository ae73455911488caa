use crate::types::OrderId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Mints unique, monotonically increasing order identifiers.
///
/// Owned by a `Router` instance rather than a process-wide global, so
/// multiple engines can coexist (e.g. one per test). Strict global
/// ordering across threads is not required — uniqueness is.
#[derive(Debug, Default)]
pub struct OrderIdGenerator {
    next: AtomicU64,
}

impl OrderIdGenerator {
    pub fn new() -> Self {
        Self { next: AtomicU64::new(1) }
    }

    pub fn next(&self) -> OrderId {
        OrderId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let generator = OrderIdGenerator::new();
        let a = generator.next();
        let b = generator.next();
        assert_ne!(a, b);
        assert!(b.0 > a.0);
    }
}
