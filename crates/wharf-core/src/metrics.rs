//! Process-wide metrics, grounded on the teacher's `engine-core::metrics`
//! atomic-counter shape, generalized to the counters/gauges spec.md §4.2 and
//! §5 call for: commits, rollbacks, statement timeouts, and the open-
//! connections gauge.

use std::sync::{
    atomic::{AtomicI64, AtomicU64, Ordering},
    Arc,
};

#[derive(Debug, Default)]
struct Inner {
    commits: AtomicU64,
    rollbacks: AtomicU64,
    timeouts: AtomicU64,
    open_connections: AtomicI64,
}

#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<Inner>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub commits: u64,
    pub rollbacks: u64,
    pub timeouts: u64,
    pub open_connections: i64,
}

impl Metrics {
    pub fn new() -> Self {
        Self { inner: Arc::new(Inner::default()) }
    }

    pub fn mark_commit(&self) {
        self.inner.commits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn mark_rollback(&self) {
        self.inner.rollbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn mark_timeout(&self) {
        self.inner.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Called around `with_connection`'s body; returns a guard that
    /// decrements the gauge on drop so every exit path (success, error,
    /// panic-unwind) restores it.
    pub fn open_connection_guard(&self) -> OpenConnectionGuard {
        self.inner.open_connections.fetch_add(1, Ordering::Relaxed);
        OpenConnectionGuard { inner: self.inner.clone() }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            commits: self.inner.commits.load(Ordering::Relaxed),
            rollbacks: self.inner.rollbacks.load(Ordering::Relaxed),
            timeouts: self.inner.timeouts.load(Ordering::Relaxed),
            open_connections: self.inner.open_connections.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the open-connections gauge when dropped.
pub struct OpenConnectionGuard {
    inner: Arc<Inner>,
}

impl Drop for OpenConnectionGuard {
    fn drop(&mut self) {
        self.inner.open_connections.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_connection_gauge_returns_to_zero_after_guard_drops() {
        let metrics = Metrics::new();
        {
            let _guard = metrics.open_connection_guard();
            assert_eq!(metrics.snapshot().open_connections, 1);
        }
        assert_eq!(metrics.snapshot().open_connections, 0);
    }

    #[test]
    fn marks_accumulate_independently() {
        let metrics = Metrics::new();
        metrics.mark_commit();
        metrics.mark_commit();
        metrics.mark_rollback();
        metrics.mark_timeout();

        let snap = metrics.snapshot();
        assert_eq!(snap.commits, 2);
        assert_eq!(snap.rollbacks, 1);
        assert_eq!(snap.timeouts, 1);
    }
}
