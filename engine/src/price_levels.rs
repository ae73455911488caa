use crate::types::{Order, Side, Ticks};
use std::collections::{BTreeMap, VecDeque};

/// One side of a book: a price-ordered map of FIFO queues.
///
/// - Asks: lowest price is best (front of the map).
/// - Bids: highest price is best (back of the map).
///
/// Every level is non-empty by construction; an emptied level is removed
/// immediately so `levels.len()` always reflects the number of distinct
/// prices currently resting.
pub struct PriceLevels {
    side: Side,
    levels: BTreeMap<Ticks, VecDeque<Order>>,
}

impl PriceLevels {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    /// Appends an order to the tail of its price level's FIFO, creating
    /// the level if it doesn't exist yet.
    pub fn push_back(&mut self, order: Order) {
        self.levels.entry(order.price_ticks).or_default().push_back(order);
    }

    /// Re-inserts a partially-filled maker at the head of its level's
    /// FIFO. Used only to restore an order popped by `pop_best` that
    /// still has quantity remaining after being decremented by a fill.
    pub fn push_front(&mut self, order: Order) {
        self.levels.entry(order.price_ticks).or_default().push_front(order);
    }

    pub fn get_price_levels(&self) -> &BTreeMap<Ticks, VecDeque<Order>> {
        &self.levels
    }

    /// The best (first-to-match) price on this side, or `None` if empty.
    pub fn best_price(&self) -> Option<Ticks> {
        match self.side {
            Side::Sell => self.levels.first_key_value().map(|(px, _)| *px),
            Side::Buy => self.levels.last_key_value().map(|(px, _)| *px),
        }
    }

    pub fn best_level_size(&self) -> usize {
        self.best_price()
            .and_then(|px| self.levels.get(&px))
            .map(VecDeque::len)
            .unwrap_or(0)
    }

    /// Pops the head order of the best price level, removing the level if
    /// it becomes empty. Returns `None` on an empty side.
    pub fn pop_best(&mut self) -> Option<Order> {
        let px = self.best_price()?;
        let queue = self.levels.get_mut(&px)?;
        let order = queue.pop_front();
        if queue.is_empty() {
            self.levels.remove(&px);
        }
        order
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterates levels best-first as `(price, total_quantity)` pairs.
    pub fn iter_levels_best_first(&self) -> Box<dyn Iterator<Item = (Ticks, i64)> + '_> {
        let qty = |q: &VecDeque<Order>| q.iter().map(|o| o.quantity).sum();
        match self.side {
            Side::Sell => Box::new(self.levels.iter().map(move |(px, q)| (*px, qty(q)))),
            Side::Buy => Box::new(self.levels.iter().rev().map(move |(px, q)| (*px, qty(q)))),
        }
    }
}
