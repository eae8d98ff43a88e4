use tracing::info;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Counters for the sync loop
#[derive(Debug, Default)]
pub struct SyncMetrics {
    pub refreshes: AtomicU64,
    pub triggers: AtomicU64,
    pub failures: AtomicU64,
    pub stale_discarded: AtomicU64,
    pub clicks_ignored: AtomicU64,
}

impl SyncMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_trigger(&self) {
        self.triggers.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale(&self) {
        self.stale_discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ignored_click(&self) {
        self.clicks_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> SyncStats {
        SyncStats {
            refreshes: self.refreshes.load(Ordering::Relaxed),
            triggers: self.triggers.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            stale_discarded: self.stale_discarded.load(Ordering::Relaxed),
            clicks_ignored: self.clicks_ignored.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Sync metrics: refreshes={}, triggers={}, failures={}, stale_discarded={}, clicks_ignored={}",
            stats.refreshes,
            stats.triggers,
            stats.failures,
            stats.stale_discarded,
            stats.clicks_ignored
        );
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub refreshes: u64,
    pub triggers: u64,
    pub failures: u64,
    pub stale_discarded: u64,
    pub clicks_ignored: u64,
}

/// Time an operation and log its duration when finished
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_ms = duration.as_millis(),
            "Operation completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let metrics = SyncMetrics::new();
        metrics.record_refresh();
        metrics.record_refresh();
        metrics.record_trigger();
        metrics.record_failure();
        metrics.record_ignored_click();

        assert_eq!(
            metrics.get_stats(),
            SyncStats {
                refreshes: 2,
                triggers: 1,
                failures: 1,
                stale_discarded: 0,
                clicks_ignored: 1,
            }
        );
    }
}
