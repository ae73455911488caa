use crate::book::{Book, BookStats};
use crate::error::EngineError;
use crate::types::Order;
use crossbeam::channel::{self, Receiver, Select, Sender};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

/// Owns a disjoint set of symbols and the matching for those symbols.
///
/// Uses design (B) from the spec's Open Question: symbols are hashed to
/// one of `worker_count` sub-workers at construction, and each sub-worker
/// owns an exclusive `HashMap<String, Book>` for its share of symbols.
/// No book is ever touched by more than one thread, so no per-book lock
/// is needed and per-symbol FIFO is preserved end-to-end for a single
/// producer.
#[derive(Debug)]
pub struct Partition {
    name: String,
    symbols: Vec<String>,
    symbol_to_worker: HashMap<String, usize>,
    order_senders: Vec<Sender<Order>>,
    /// Held only to keep the shutdown channel open; dropping it closes
    /// the channel and wakes every worker blocked in `select!`.
    shutdown_tx: Option<Sender<()>>,
    stats: HashMap<String, Arc<BookStats>>,
    workers: Vec<JoinHandle<()>>,
}

impl Partition {
    /// Builds a partition with `worker_count` sub-workers (design default:
    /// 5) over `symbols`. An empty `symbols` set is allowed — the
    /// partition is simply idle, per §7 `EmptyPartition`.
    pub fn new(name: impl Into<String>, symbols: Vec<String>, worker_count: usize) -> Self {
        let name = name.into();
        let worker_count = if symbols.is_empty() { 0 } else { worker_count.max(1) };

        let mut symbol_to_worker = HashMap::new();
        let mut owned_symbols: Vec<Vec<String>> = vec![Vec::new(); worker_count];
        for symbol in &symbols {
            let idx = hash_symbol(symbol) % worker_count.max(1);
            symbol_to_worker.insert(symbol.clone(), idx);
            if worker_count > 0 {
                owned_symbols[idx].push(symbol.clone());
            }
        }

        let mut order_senders = Vec::with_capacity(worker_count);
        let mut stats = HashMap::new();
        let mut workers = Vec::with_capacity(worker_count);
        let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();

        for (idx, my_symbols) in owned_symbols.into_iter().enumerate() {
            let (order_tx, order_rx) = channel::unbounded::<Order>();
            order_senders.push(order_tx);

            let mut books = HashMap::new();
            for symbol in &my_symbols {
                let book = Book::new();
                stats.insert(symbol.clone(), book.stats());
                books.insert(symbol.clone(), book);
            }

            let worker_name = format!("partition-{name}-worker-{idx}");
            let shutdown_rx = shutdown_rx.clone();
            let handle = thread::Builder::new()
                .name(worker_name.clone())
                .spawn(move || worker_loop(worker_name, books, order_rx, shutdown_rx))
                .expect("failed to spawn partition worker thread");
            workers.push(handle);
        }

        Self {
            name,
            symbols,
            symbol_to_worker,
            order_senders,
            shutdown_tx: Some(shutdown_tx),
            stats,
            workers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.symbol_to_worker.contains_key(symbol)
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Enqueues an order for its symbol's sub-worker. Non-blocking: the
    /// per-worker queue is conceptually unbounded, so this never
    /// back-pressures the caller. Returns `UnknownSymbol` if called with
    /// a symbol this partition doesn't own — a defensive check, since a
    /// correctly wired `Router` should never do this.
    pub fn submit(&self, order: Order) -> Result<(), EngineError> {
        let idx = *self
            .symbol_to_worker
            .get(&order.symbol)
            .ok_or_else(|| EngineError::UnknownSymbol(order.symbol.clone()))?;
        // An unbounded crossbeam channel send only fails if every receiver
        // has been dropped, which only happens after `shutdown`.
        let _ = self.order_senders[idx].send(order);
        Ok(())
    }

    /// Total orders read (dequeued and processed, including no-ops) by
    /// this partition's workers so far. May lag a live worker by one
    /// increment.
    pub fn orders_read(&self) -> u64 {
        self.stats.values().map(|s| s.total_orders()).sum()
    }

    pub fn total_trades(&self) -> u64 {
        self.stats.values().map(|s| s.total_trades()).sum()
    }

    /// Signals every worker to stop, discarding whatever is still queued
    /// (policy: discard, not drain — already-resting orders remain in
    /// memory, inspectable via each book, but no further matching
    /// occurs). Joins all worker threads before returning.
    pub fn shutdown(&mut self) {
        info!(partition = %self.name, "shutting down");
        self.shutdown_tx.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for Partition {
    fn drop(&mut self) {
        if self.shutdown_tx.is_some() {
            self.shutdown();
        }
    }
}

fn hash_symbol(symbol: &str) -> usize {
    let mut hasher = DefaultHasher::new();
    symbol.hash(&mut hasher);
    hasher.finish() as usize
}

/// Body of one sub-worker: repeatedly dequeue one order and match it
/// against the book for that order's symbol. Blocks on `select!` between
/// the order channel and the shutdown channel so cancellation is
/// observed promptly even while idle.
fn worker_loop(
    worker_name: String,
    mut books: HashMap<String, Book>,
    order_rx: Receiver<Order>,
    shutdown_rx: Receiver<()>,
) {
    debug!(worker = %worker_name, "started");
    loop {
        let mut select = Select::new();
        let order_idx = select.recv(&order_rx);
        let shutdown_idx = select.recv(&shutdown_rx);
        let op = select.select();

        match op.index() {
            i if i == order_idx => match op.recv(&order_rx) {
                Ok(order) => {
                    if let Some(book) = books.get_mut(&order.symbol) {
                        book.process(order, |_trade| {});
                    }
                }
                Err(_) => break,
            },
            i if i == shutdown_idx => {
                let _ = op.recv(&shutdown_rx);
                break;
            }
            _ => unreachable!(),
        }
    }
    debug!(worker = %worker_name, "stopped");
}
