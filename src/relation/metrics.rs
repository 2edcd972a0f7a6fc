use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Operations that visit every bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanOp {
    /// `x_values_given_y`.
    XValuesGivenY,
    /// `remove_all_pairs_given_y`.
    RemoveAllPairsGivenY,
}

/// Hook for observing relation mutations and scans.
///
/// Implementations receive one call per logical event. The table invokes them
/// synchronously from the mutating call.
pub trait RelationMetrics: Send + Sync {
    /// Records a pair that was newly stored.
    fn pair_inserted(&self);

    /// Records an `add_pair` call whose pair was already present.
    fn duplicate_ignored(&self);

    /// Records `count` pairs removed by a single operation.
    fn pairs_removed(&self, count: usize);

    /// Records a scan over every bucket.
    ///
    /// # Parameters
    /// * `op` - The operation that required the scan.
    fn full_scan(&self, op: ScanOp);

    /// Records a `clear` of the whole table.
    fn cleared(&self);
}

/// A [`RelationMetrics`] implementation that discards everything.
#[derive(Default)]
pub struct NoopMetrics;

impl RelationMetrics for NoopMetrics {
    fn pair_inserted(&self) {}
    fn duplicate_ignored(&self) {}
    fn pairs_removed(&self, _count: usize) {}
    fn full_scan(&self, _op: ScanOp) {}
    fn cleared(&self) {}
}

/// Atomic counter implementation of [`RelationMetrics`].
#[derive(Default)]
pub struct CounterMetrics {
    /// Number of pairs inserted.
    pub pairs_inserted: AtomicU64,

    /// Number of `add_pair` calls that found the pair already stored.
    pub duplicates_ignored: AtomicU64,

    /// Number of pairs removed by any removal operation.
    pub pairs_removed: AtomicU64,

    /// Number of full-table scans made by `x_values_given_y`.
    pub projection_scans: AtomicU64,

    /// Number of full-table scans made by `remove_all_pairs_given_y`.
    pub removal_scans: AtomicU64,

    /// Number of `clear` calls.
    pub clears: AtomicU64,
}

impl RelationMetrics for CounterMetrics {
    fn pair_inserted(&self) {
        self.pairs_inserted.fetch_add(1, Ordering::Relaxed);
    }

    fn duplicate_ignored(&self) {
        self.duplicates_ignored.fetch_add(1, Ordering::Relaxed);
    }

    fn pairs_removed(&self, count: usize) {
        self.pairs_removed.fetch_add(count as u64, Ordering::Relaxed);
    }

    fn full_scan(&self, op: ScanOp) {
        let counter = match op {
            ScanOp::XValuesGivenY => &self.projection_scans,
            ScanOp::RemoveAllPairsGivenY => &self.removal_scans,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn cleared(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }
}

/// Returns the default metrics implementation, [`NoopMetrics`].
pub fn default_metrics() -> Arc<dyn RelationMetrics> {
    Arc::new(NoopMetrics)
}
