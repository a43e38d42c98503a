//! Lookup metrics.
//!
//! Each `Translator` owns one `LookupMetrics`. Counters are atomics so that
//! lookups can stay `&self`.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for translation lookups.
#[derive(Debug, Default)]
pub struct LookupMetrics {
    /// Lookups that resolved to a string
    hits: AtomicUsize,

    /// Lookups that failed (locale, namespace or key missing, or non-string value)
    misses: AtomicUsize,

    /// Failed lookups that were answered with the `<namespace>.<key>` fallback
    fallbacks: AtomicUsize,
}

impl LookupMetrics {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful lookup.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed lookup.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record that a failed lookup returned the fallback string.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let misses = self.misses();
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups: total,
            hits,
            misses,
            fallbacks: self.fallbacks(),
            hit_rate,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.fallbacks.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of lookup statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Total lookups (hits + misses)
    pub lookups: usize,

    /// Number of successful lookups
    pub hits: usize,

    /// Number of failed lookups
    pub misses: usize,

    /// Number of failed lookups answered with the fallback string
    pub fallbacks: usize,

    /// Hit rate as a percentage (0-100)
    pub hit_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_hit() {
        let metrics = LookupMetrics::new();

        assert_eq!(metrics.hits(), 0);
        metrics.record_hit();
        assert_eq!(metrics.hits(), 1);
        metrics.record_hit();
        assert_eq!(metrics.hits(), 2);
    }

    #[test]
    fn test_record_miss_and_fallback() {
        let metrics = LookupMetrics::new();

        metrics.record_miss();
        metrics.record_fallback();
        assert_eq!(metrics.misses(), 1);
        assert_eq!(metrics.fallbacks(), 1);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = LookupMetrics::new().report();

        assert_eq!(report.lookups, 0);
        assert_eq!(report.hits, 0);
        assert_eq!(report.misses, 0);
        assert_eq!(report.fallbacks, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = LookupMetrics::new();

        // 3 hits, 1 miss = 75% hit rate
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();

        let report = metrics.report();
        assert_eq!(report.lookups, 4);
        assert_eq!(report.hit_rate, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = LookupMetrics::new();
        metrics.record_hit();

        let json = serde_json::to_value(metrics.report()).expect("Should serialize");
        assert_eq!(json["hits"], 1);
        assert_eq!(json["hit_rate"], 100.0);
    }

    #[test]
    fn test_reset() {
        let metrics = LookupMetrics::new();
        metrics.record_hit();
        metrics.record_miss();
        metrics.record_fallback();

        metrics.reset();
        assert_eq!(metrics.report(), LookupMetrics::new().report());
    }

    #[test]
    fn test_instances_are_independent() {
        let a = LookupMetrics::new();
        let b = LookupMetrics::new();
        a.record_hit();

        assert_eq!(a.hits(), 1);
        assert_eq!(b.hits(), 0);
    }
}
