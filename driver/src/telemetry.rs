use engine::Router;
use tracing::info;

/// Prints a one-line snapshot of every partition's observability
/// counters (§6: polled, not pushed). Called once at the end of a run;
/// a long-lived driver would call this on a timer instead.
pub fn log_snapshot(router: &Router) {
    for partition in router.partitions() {
        info!(
            partition = partition.name(),
            symbols = partition.symbols().len(),
            orders_read = partition.orders_read(),
            total_trades = partition.total_trades(),
            "partition snapshot"
        );
    }
}
