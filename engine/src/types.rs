use std::time::{SystemTime, UNIX_EPOCH};

/// One side of the book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order of this side matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Monotonic order identifier, unique within an engine instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(pub u64);

/// Price expressed as an integer count of 0.05 ticks.
///
/// Integer ticks give exact equality and ordering; a decimal price is
/// only ever materialized at the driver boundary.
pub type Ticks = i64;

pub const TICK_SIZE: f64 = 0.05;

/// Converts a decimal price to ticks, rounding to the nearest tick.
pub fn ticks_from_price(price: f64) -> Ticks {
    (price / TICK_SIZE).round() as Ticks
}

/// Converts a tick count back to a decimal price.
pub fn price_from_ticks(ticks: Ticks) -> f64 {
    ticks as f64 * TICK_SIZE
}

/// A limit order. Quantity decreases monotonically to zero as it fills;
/// once it reaches zero the order is dropped and never referenced again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub symbol: String,
    pub side: Side,
    pub price_ticks: Ticks,
    pub quantity: i64,
    pub timestamp_ns: u128,
}

impl Order {
    /// Builds an order with the current wall-clock timestamp. Callers that
    /// need deterministic timestamps (tests, replay) should set the field
    /// directly instead.
    pub fn new(id: OrderId, symbol: impl Into<String>, side: Side, price_ticks: Ticks, quantity: i64) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            side,
            price_ticks,
            quantity,
            timestamp_ns: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0),
        }
    }

    /// An order is well-formed only if it carries a positive price and
    /// quantity; malformed orders are a no-op at the book (§7 `InvalidOrder`).
    pub fn is_valid(&self) -> bool {
        self.price_ticks > 0 && self.quantity > 0
    }
}

/// A single fill produced by crossing a taker against one resting maker.
/// The execution price is always the maker's (passive side's) price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trade {
    pub maker: OrderId,
    pub taker: OrderId,
    pub symbol: String,
    pub price_ticks: Ticks,
    pub quantity: i64,
    pub timestamp_ns: u128,
}
