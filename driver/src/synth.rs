use engine::{ticks_from_price, Router, Side, Ticks};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use tracing::debug;

/// Thin, seeded synthetic order generator. Round-robins the configured
/// symbols and emits a bounded count of random-walk limit orders per
/// symbol, nudging each symbol's reference price by a small random step
/// clamped to that symbol's configured `{min_price, max_price}` range
/// (spec.md §6) so successive orders sometimes cross and sometimes rest
/// without drifting outside the configured band.
///
/// This is a demonstration harness to exercise the ingress API and
/// shutdown path end-to-end, not a benchmark or load-testing framework —
/// those are out of scope for the core (§1). The decimal-to-tick
/// conversion happens here, at the driver boundary; `engine` never sees
/// a decimal price.
pub struct Synthesizer {
    rng: ChaCha8Rng,
    ranges: HashMap<String, (Ticks, Ticks)>,
    reference_ticks: HashMap<String, Ticks>,
}

impl Synthesizer {
    /// `price_ranges` maps each tradeable symbol to its configured
    /// `(min_price, max_price)` decimal range. Each symbol's walk starts
    /// at the midpoint of its own range.
    pub fn new(seed: u64, price_ranges: &HashMap<String, (f64, f64)>) -> Self {
        let ranges: HashMap<String, (Ticks, Ticks)> = price_ranges
            .iter()
            .map(|(symbol, &(min_price, max_price))| {
                (symbol.clone(), (ticks_from_price(min_price), ticks_from_price(max_price)))
            })
            .collect();
        let reference_ticks = ranges
            .iter()
            .map(|(symbol, &(min_ticks, max_ticks))| (symbol.clone(), (min_ticks + max_ticks) / 2))
            .collect();

        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            ranges,
            reference_ticks,
        }
    }

    /// Feeds `orders_per_symbol` orders per symbol into `router`, in
    /// round-robin order across symbols. A symbol with no configured
    /// price range is skipped.
    pub fn run(&mut self, router: &Router, symbols: &[String], orders_per_symbol: usize) {
        for round in 0..orders_per_symbol {
            for symbol in symbols {
                let Some((side, price_ticks, quantity)) = self.next_order(symbol) else {
                    continue;
                };
                debug!(round, symbol = %symbol, ?side, price_ticks, quantity, "synthesizing order");
                if let Err(err) = router.route(symbol, side, price_ticks, quantity) {
                    debug!(symbol = %symbol, error = %err, "dropped synthetic order");
                }
            }
        }
    }

    fn next_order(&mut self, symbol: &str) -> Option<(Side, Ticks, i64)> {
        let &(min_ticks, max_ticks) = self.ranges.get(symbol)?;
        let reference = self.reference_ticks.get_mut(symbol)?;

        let step: i64 = self.rng.gen_range(-10..=10);
        *reference = (*reference + step).clamp(min_ticks, max_ticks);
        let reference = *reference;

        let side = if self.rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let spread: i64 = self.rng.gen_range(0..=20);
        let price_ticks = match side {
            Side::Buy => reference - spread,
            Side::Sell => reference + spread,
        }
        .clamp(min_ticks, max_ticks)
        .max(1);
        let quantity = self.rng.gen_range(1..=100);

        Some((side, price_ticks, quantity))
    }
}
