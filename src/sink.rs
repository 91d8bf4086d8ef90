//! The append-only collector every worker feeds matches into.
//!
//! Grounded on `add_result_safe` in `examples/original_source/src/search.c`
//! (a critical-section-guarded singly-linked list with an
//! `InterlockedIncrement`-counted length). A growable `Vec` behind a mutex
//! is used in place of the hand-rolled linked list — amortized O(1) append
//! under lock is the property that actually matters, and `Vec` gives it to
//! us for free; see DESIGN.md for the tradeoff note.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::types::SearchMatch;

/// Invoked once per appended match, from whichever worker thread produced
/// it. Returning false requests cancellation (spec §4.6's streaming mode).
pub type StreamCallback = Box<dyn Fn(&SearchMatch) -> bool + Send + Sync>;

/// Thread-safe sink for matches produced during a traversal.
pub struct ResultSink {
    results: Mutex<Vec<SearchMatch>>,
    total_results: AtomicU64,
    max_results: usize,
    should_stop: Arc<AtomicBool>,
    on_result: Option<StreamCallback>,
}

impl ResultSink {
    #[must_use]
    pub fn new(max_results: usize, should_stop: Arc<AtomicBool>, on_result: Option<StreamCallback>) -> Self {
        Self {
            results: Mutex::new(Vec::new()),
            total_results: AtomicU64::new(0),
            max_results,
            should_stop,
            on_result,
        }
    }

    /// Appends `result`. If `max_results` is set and already reached, the
    /// result is dropped and the cancellation flag is set instead. The
    /// reservation (`fetch_add` then check) is atomic across threads, so
    /// concurrent callers can never push `total_results` past the cap —
    /// the one thread that oversteps immediately undoes its own increment.
    pub fn append(&self, result: SearchMatch) {
        if self.max_results > 0 {
            let reserved = self.total_results.fetch_add(1, Ordering::SeqCst);
            if reserved as usize >= self.max_results {
                self.total_results.fetch_sub(1, Ordering::SeqCst);
                self.should_stop.store(true, Ordering::SeqCst);
                return;
            }
        } else {
            self.total_results.fetch_add(1, Ordering::SeqCst);
        }

        if let Some(cb) = &self.on_result {
            if !cb(&result) {
                self.should_stop.store(true, Ordering::SeqCst);
            }
        }

        let mut results = self.results.lock().unwrap_or_else(|e| e.into_inner());
        results.push(result);
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total_results.load(Ordering::SeqCst)
    }

    /// Detaches ownership of the collected results, leaving the sink empty.
    /// Called once, after the pool has drained, to hand results back to the
    /// caller of `session::search`.
    pub fn take(&self) -> Vec<SearchMatch> {
        let mut results = self.results.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *results)
    }
}
