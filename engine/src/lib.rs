//! Sharded, in-memory continuous-limit-order matching engine.
//!
//! Three composed components, leaves first:
//! - [`book::Book`] — per-symbol price-ordered two-sided ladder and the
//!   price-time priority matching algorithm.
//! - [`partition::Partition`] — owns a disjoint symbol set, a pool of
//!   worker threads, and the books for its symbols.
//! - [`router::Router`] — static `symbol -> partition` dispatch.
//!
//! Data flow: `Router::route` → `Partition::submit` → worker thread →
//! `Book::process` → book mutation plus trade counters. Matching itself
//! never suspends; the only blocking points are a full bounded queue (not
//! used here — queues are unbounded) and a worker idling on an empty
//! queue.

pub mod book;
pub mod error;
pub mod id;
pub mod partition;
pub mod price_levels;
pub mod router;
pub mod types;

pub use book::{Book, BookStats};
pub use error::EngineError;
pub use id::OrderIdGenerator;
pub use partition::Partition;
pub use price_levels::PriceLevels;
pub use router::Router;
pub use types::{price_from_ticks, ticks_from_price, Order, OrderId, Side, Ticks, Trade};
