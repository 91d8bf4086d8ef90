//! The single public entry point: validates criteria, owns the pool and
//! sink for the duration of one search, and reports a final status.
//!
//! Grounded on `search_files_fast` in `examples/original_source/
//! src/search.c`, restructured so the pool and cancellation flag are
//! owned per-search rather than living in a single process-wide global —
//! see REDESIGN FLAGS in SPEC_FULL.md.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{SearchError, SearchSetupResult};
use crate::pool::{PoolConfig, ProgressCallback, ThreadPool};
use crate::sink::{ResultSink, StreamCallback};
use crate::types::{ProgressSnapshot, SearchCriteria, SearchMatch};

/// Grace period after a timeout trips before the pool is torn down,
/// letting in-flight work items reach a natural stopping point instead of
/// being abandoned mid-directory.
const TIMEOUT_GRACE: Duration = Duration::from_secs(5);

/// How a completed search concluded. Per spec §7, cooperative cancellation
/// (a result cap reached, or a progress/streaming callback returning false)
/// is not an error and is *not* distinguished from a clean finish here —
/// both report `Ok` with whatever partial results were collected. Only a
/// timeout gets its own status, per spec §7/§8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The traversal ran to completion, or was cooperatively cancelled
    /// (result cap, or a callback returning false) before doing so.
    Ok,
    /// The timeout elapsed before `queued_dirs` reached zero; `results`
    /// holds whatever was collected up to that point.
    Timeout,
}

/// The outcome of one call to [`search`].
#[derive(Debug)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub results: Vec<SearchMatch>,
    pub count: u64,
    pub processed_files: u64,
}

/// Optional callbacks an embedder can supply to observe or steer a search
/// in progress.
#[derive(Default)]
pub struct SearchCallbacks {
    /// Invoked once per match, from whichever worker produced it. Returning
    /// false cancels the search.
    pub on_result: Option<StreamCallback>,
    /// Invoked from the waiting thread roughly every 10ms while the search
    /// is in flight. Returning false cancels the search.
    pub on_progress: Option<Box<dyn Fn(ProgressSnapshot) -> bool + Send + Sync>>,
}

/// State shared between the session, the pool's worker threads, and every
/// in-flight work item.
pub struct SessionShared {
    pub criteria: SearchCriteria,
    pub sink: ResultSink,
    pub processed_files: AtomicU64,
    pub queued_dirs: AtomicU64,
    pub should_stop: Arc<AtomicBool>,
}

/// Validates `criteria`, then runs a traversal rooted there to completion,
/// timeout, or cancellation. This is the only public way to run a search.
pub fn search(criteria: SearchCriteria, callbacks: SearchCallbacks) -> SearchSetupResult<SearchOutcome> {
    criteria.validate()?;

    let root = crate::platform::canonicalize_root(std::path::Path::new(&criteria.root));
    std::fs::read_dir(&root).map_err(SearchError::RootNotOpenable)?;

    let should_stop = Arc::new(AtomicBool::new(false));
    let timeout_ms = criteria.limits.timeout_ms;
    let max_threads = criteria.limits.max_threads;
    let max_results = criteria.limits.max_results;

    let shared = Arc::new(SessionShared {
        criteria,
        sink: ResultSink::new(max_results, Arc::clone(&should_stop), callbacks.on_result),
        processed_files: AtomicU64::new(0),
        queued_dirs: AtomicU64::new(0),
        should_stop: Arc::clone(&should_stop),
    });

    let progress: Option<ProgressCallback> = callbacks.on_progress.map(|cb| {
        let shared = Arc::clone(&shared);
        Box::new(move |_stats: crate::pool::PoolStats| {
            cb(ProgressSnapshot {
                processed_files: shared.processed_files.load(Ordering::SeqCst),
                queued_dirs: shared.queued_dirs.load(Ordering::SeqCst),
                total_results: shared.sink.total(),
            })
        }) as ProgressCallback
    });

    let pool = Arc::new(ThreadPool::new(PoolConfig {
        max_threads,
        should_stop: Arc::clone(&should_stop),
        progress,
    })?);

    crate::traversal::spawn_root(&shared, &pool, root);

    // A timeout of 0 means "time out immediately" (spec §8), not "wait
    // forever" — short-circuit rather than racing wait_completion's first
    // active-count check against however fast the root directory happens
    // to finish.
    let started = Instant::now();
    let completed_cleanly = timeout_ms > 0 && pool.wait_completion(timeout_ms);

    let timed_out = !completed_cleanly && (timeout_ms == 0 || started.elapsed() >= Duration::from_millis(timeout_ms));
    let status = if timed_out { SearchStatus::Timeout } else { SearchStatus::Ok };

    should_stop.store(true, Ordering::SeqCst);
    // Only a genuine timeout gets the grace period (spec §4.7: "on timeout
    // ... give workers a short grace period"). Cooperative cancellation
    // (result cap, callback returning false) has no reason to wait — the
    // `drop(pool)` below already joins every worker regardless.
    if timed_out {
        std::thread::sleep(TIMEOUT_GRACE);
    }
    drop(pool);

    let results = shared.sink.take();
    let count = results.len() as u64;
    let processed_files = shared.processed_files.load(Ordering::SeqCst);

    Ok(SearchOutcome {
        status,
        results,
        count,
        processed_files,
    })
}
