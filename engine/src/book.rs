use crate::price_levels::PriceLevels;
use crate::types::{Order, Side, Ticks, Trade};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for a single book, held behind an `Arc` so a partition can
/// hand out read access to callers on other threads without exposing the
/// (single-writer) price-level maps themselves.
#[derive(Debug, Default)]
pub struct BookStats {
    total_orders: AtomicU64,
    total_trades: AtomicU64,
}

impl BookStats {
    pub fn total_orders(&self) -> u64 {
        self.total_orders.load(Ordering::Relaxed)
    }

    pub fn total_trades(&self) -> u64 {
        self.total_trades.load(Ordering::Relaxed)
    }
}

/// Per-symbol price-ordered two-sided ladder.
///
/// `bids` is ordered descending (best = highest), `asks` ascending
/// (best = lowest). The book is guaranteed uncrossed — `best_bid() <
/// best_ask()`, or one side empty — after every `process` call returns.
pub struct Book {
    bids: PriceLevels,
    asks: PriceLevels,
    stats: Arc<BookStats>,
}

impl Book {
    pub fn new() -> Self {
        Self::with_stats(Arc::new(BookStats::default()))
    }

    /// Builds a book sharing its counters with an already-held `Arc`, so
    /// a partition can keep a read-only handle to them after handing the
    /// book itself off to its owning worker thread.
    pub fn with_stats(stats: Arc<BookStats>) -> Self {
        Self {
            bids: PriceLevels::new(Side::Buy),
            asks: PriceLevels::new(Side::Sell),
            stats,
        }
    }

    pub fn best_bid(&self) -> Option<Ticks> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<Ticks> {
        self.asks.best_price()
    }

    pub fn stats(&self) -> Arc<BookStats> {
        self.stats.clone()
    }

    pub fn total_orders(&self) -> u64 {
        self.stats.total_orders()
    }

    pub fn total_trades(&self) -> u64 {
        self.stats.total_trades()
    }

    /// Resting orders grouped by side and price, best-first. Diagnostics
    /// and test use only — not part of the matching hot path.
    pub fn snapshot_resting(&self) -> (Vec<(Ticks, i64)>, Vec<(Ticks, i64)>) {
        (
            self.bids.iter_levels_best_first().collect(),
            self.asks.iter_levels_best_first().collect(),
        )
    }

    /// Matches an incoming order against the opposing side and rests any
    /// residual on its own side. Zero- or negative-quantity/price orders
    /// are a no-op (§7 `InvalidOrder`). `on_trade` is called once per
    /// fill step, in execution order, for callers that want to observe
    /// individual trades beyond the aggregate counter.
    pub fn process(&mut self, mut taker: Order, mut on_trade: impl FnMut(&Trade)) {
        self.stats.total_orders.fetch_add(1, Ordering::Relaxed);

        if !taker.is_valid() {
            return;
        }

        match taker.side {
            Side::Buy => {
                while taker.quantity > 0 {
                    let Some(best_ask) = self.asks.best_price() else {
                        break;
                    };
                    if taker.price_ticks < best_ask {
                        break;
                    }
                    self.cross(&mut taker, Side::Sell, best_ask, &mut on_trade);
                }
                if taker.quantity > 0 {
                    self.bids.push_back(taker);
                }
            }
            Side::Sell => {
                while taker.quantity > 0 {
                    let Some(best_bid) = self.bids.best_price() else {
                        break;
                    };
                    if taker.price_ticks > best_bid {
                        break;
                    }
                    self.cross(&mut taker, Side::Buy, best_bid, &mut on_trade);
                }
                if taker.quantity > 0 {
                    self.asks.push_back(taker);
                }
            }
        }
    }

    /// Consumes exactly one resting maker from the opposing side at the
    /// already-confirmed crossable price `level_price`, emitting one
    /// trade. Restores the maker to the head of its level if it still
    /// has residual quantity.
    fn cross(&mut self, taker: &mut Order, maker_side: Side, level_price: Ticks, on_trade: &mut impl FnMut(&Trade)) {
        let opposing = match maker_side {
            Side::Sell => &mut self.asks,
            Side::Buy => &mut self.bids,
        };

        let Some(mut maker) = opposing.pop_best() else {
            return;
        };

        let fill = taker.quantity.min(maker.quantity);
        taker.quantity -= fill;
        maker.quantity -= fill;

        let trade = Trade {
            maker: maker.id,
            taker: taker.id,
            symbol: taker.symbol.clone(),
            price_ticks: level_price,
            quantity: fill,
            timestamp_ns: taker.timestamp_ns,
        };
        self.stats.total_trades.fetch_add(1, Ordering::Relaxed);
        on_trade(&trade);

        if maker.quantity > 0 {
            opposing.push_front(maker);
        }
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderId;

    fn order(id: u64, side: Side, price_ticks: Ticks, quantity: i64) -> Order {
        Order {
            id: OrderId(id),
            symbol: "AAA".into(),
            side,
            price_ticks,
            quantity,
            timestamp_ns: id as u128,
        }
    }

    fn process(book: &mut Book, o: Order) -> Vec<Trade> {
        let mut trades = Vec::new();
        book.process(o, |t| trades.push(t.clone()));
        trades
    }

    #[test]
    fn empty_book_resting() {
        let mut book = Book::new();
        let trades = process(&mut book, order(1, Side::Buy, 2000, 10));
        assert!(trades.is_empty());
        assert_eq!(book.best_bid(), Some(2000));
        assert_eq!(book.best_ask(), None);
        assert_eq!(book.total_trades(), 0);
    }

    #[test]
    fn exact_cross_empties_both_sides() {
        let mut book = Book::new();
        process(&mut book, order(1, Side::Buy, 2000, 10));
        let trades = process(&mut book, order(2, Side::Sell, 2000, 10));
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, 10);
        assert_eq!(trades[0].price_ticks, 2000);
        assert_eq!(book.best_bid(), None);
        assert_eq!(book.best_ask(), None);
        assert_eq!(book.total_trades(), 1);
    }

    #[test]
    fn partial_fill_residual_rests() {
        let mut book = Book::new();
        process(&mut book, order(1, Side::Sell, 1000, 5));
        let trades = process(&mut book, order(2, Side::Buy, 1000, 12));
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, 5);
        assert!(book.best_ask().is_none());
        assert_eq!(book.best_bid(), Some(1000));
        assert_eq!(book.snapshot_resting().0, vec![(1000, 7)]);
        assert_eq!(book.total_trades(), 1);
    }

    #[test]
    fn walks_multiple_levels_in_price_order() {
        let mut book = Book::new();
        process(&mut book, order(1, Side::Sell, 200, 3));
        process(&mut book, order(2, Side::Sell, 201, 3));
        process(&mut book, order(3, Side::Sell, 202, 3));

        let trades = process(&mut book, order(10, Side::Buy, 201, 5));
        assert_eq!(trades.len(), 2);
        assert_eq!((trades[0].price_ticks, trades[0].quantity), (200, 3));
        assert_eq!((trades[1].price_ticks, trades[1].quantity), (201, 2));

        assert!(book.best_bid().is_none());
        assert_eq!(
            book.snapshot_resting().1,
            vec![(201, 1), (202, 3)]
        );
        assert_eq!(book.total_trades(), 2);
    }

    #[test]
    fn no_cross_at_unfavorable_price() {
        let mut book = Book::new();
        process(&mut book, order(1, Side::Sell, 400, 4));
        let trades = process(&mut book, order(2, Side::Buy, 399, 4));
        assert!(trades.is_empty());
        assert_eq!(book.best_ask(), Some(400));
        assert_eq!(book.best_bid(), Some(399));
    }

    #[test]
    fn fifo_within_level_respects_arrival_order() {
        let mut book = Book::new();
        process(&mut book, order(1, Side::Sell, 100, 50));
        process(&mut book, order(2, Side::Sell, 100, 40));

        let trades = process(&mut book, order(10, Side::Buy, 100, 70));
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].maker, OrderId(1));
        assert_eq!(trades[0].quantity, 50);
        assert_eq!(trades[1].maker, OrderId(2));
        assert_eq!(trades[1].quantity, 20);
        assert_eq!(book.snapshot_resting().1, vec![(100, 20)]);
    }

    #[test]
    fn zero_quantity_order_is_noop() {
        let mut book = Book::new();
        let trades = process(&mut book, order(1, Side::Buy, 100, 0));
        assert!(trades.is_empty());
        assert_eq!(book.best_bid(), None);
        assert_eq!(book.total_trades(), 0);
        assert_eq!(book.total_orders(), 1);
    }

    #[test]
    fn negative_price_order_is_noop() {
        let mut book = Book::new();
        let trades = process(&mut book, order(1, Side::Buy, -5, 10));
        assert!(trades.is_empty());
        assert_eq!(book.best_bid(), None);
    }

    #[test]
    fn total_orders_counts_every_call_including_noops() {
        let mut book = Book::new();
        process(&mut book, order(1, Side::Buy, 100, 10));
        process(&mut book, order(2, Side::Buy, 0, 0));
        assert_eq!(book.total_orders(), 2);
    }
}
