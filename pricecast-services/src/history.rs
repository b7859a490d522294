//! Session-local prediction history
//!
//! A bounded, insertion-ordered cache of past predictions. Purely
//! in-session: nothing persists across a restart.

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use pricecast_core::{HistoryEntry, PredictionRequest, PredictionResult};

/// Maximum number of entries retained
pub const HISTORY_CAPACITY: usize = 10;

/// Bounded FIFO cache of prediction history entries.
///
/// Newest entries sit at the front; exceeding capacity evicts from the
/// back (strict FIFO by insertion order). Mutations happen under a
/// synchronous lock, never across an await point, so appends are atomic
/// with respect to task suspension.
#[derive(Clone)]
pub struct PredictionHistory {
    entries: Arc<RwLock<VecDeque<HistoryEntry>>>,
    next_id: Arc<AtomicU64>,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(HISTORY_CAPACITY))),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Record a completed prediction at the front of the history.
    ///
    /// Returns the entry as stored, with its assigned id.
    pub fn record(&self, request: PredictionRequest, result: PredictionResult) -> HistoryEntry {
        let entry = HistoryEntry {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            timestamp: Utc::now(),
            request,
            result,
        };

        let mut entries = self.entries.write();
        entries.push_front(entry.clone());
        entries.truncate(HISTORY_CAPACITY);
        entry
    }

    /// Drop every entry unconditionally
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Immutable copy of the current entries, newest first
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for PredictionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PredictionHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionHistory")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pricecast_core::PredictionMethod;

    fn sample_result(price: f64) -> PredictionResult {
        PredictionResult {
            predicted_price: price,
            confidence: 0.8,
            key_features: vec![],
            method: PredictionMethod::Ai,
            response_time_secs: 0.1,
            produced_at: Utc::now(),
        }
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let history = PredictionHistory::new();

        for i in 0..11 {
            history.record(
                PredictionRequest::new(format!("product {}", i)),
                sample_result(i as f64),
            );
        }

        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), HISTORY_CAPACITY);
        // Newest first; the very first entry ("product 0") was evicted.
        assert_eq!(snapshot[0].request.title, "product 10");
        assert_eq!(snapshot[9].request.title, "product 1");
        assert!(snapshot.iter().all(|e| e.request.title != "product 0"));
    }

    #[test]
    fn test_ids_are_monotonic() {
        let history = PredictionHistory::new();
        let a = history.record(PredictionRequest::new("a"), sample_result(1.0));
        let b = history.record(PredictionRequest::new("b"), sample_result(2.0));
        assert!(b.id > a.id);
    }

    #[test]
    fn test_clear_then_snapshot_is_empty() {
        let history = PredictionHistory::new();
        for i in 0..5 {
            history.record(PredictionRequest::new(format!("p{}", i)), sample_result(1.0));
        }

        history.clear();
        assert!(history.snapshot().is_empty());
        assert!(history.is_empty());
    }
}
