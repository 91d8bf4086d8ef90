//! A bounded worker-pool executing submitted work units concurrently.
//!
//! Hand-rolled rather than built on `rayon`: spec mandates explicit
//! submitted/queued/active/completed counters, a `wait_completion` that
//! polls a progress callback, and cooperative cancellation via a shared
//! stop flag — none of which rayon's global work-stealing pool exposes.
//! Grounded on the state machine in `examples/original_source/
//! src/thread_pool.c` (Windows thread-pool API) and the semaphore-gated
//! thread roster in `examples/original_source/src/search.c`'s
//! `g_thread_pool`, translated to `std::thread` + a mutex/condvar queue.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::SearchError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Progress callback invoked only from the waiting thread inside
/// `wait_completion`, never from a worker. Returning false requests
/// cancellation.
pub type ProgressCallback = Box<dyn Fn(PoolStats) -> bool + Send + Sync>;

/// Snapshot of the pool's counters, per spec §4.4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub active: usize,
    pub queued: usize,
    pub completed: usize,
    pub submitted: usize,
}

#[derive(Default)]
struct Counters {
    active: AtomicUsize,
    queued: AtomicUsize,
    completed: AtomicUsize,
    submitted: AtomicUsize,
}

struct Shared {
    queue: Mutex<VecDeque<Job>>,
    condvar: Condvar,
    shutdown: AtomicBool,
    counters: Counters,
    should_stop: Arc<AtomicBool>,
}

/// Configuration passed to [`ThreadPool::new`].
pub struct PoolConfig {
    /// 0 means auto (logical CPU count).
    pub max_threads: usize,
    pub should_stop: Arc<AtomicBool>,
    pub progress: Option<ProgressCallback>,
}

/// A bounded pool of OS threads pulling work from a shared queue.
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
    progress: Option<ProgressCallback>,
}

impl ThreadPool {
    /// Creates the pool and spawns its fixed worker roster. Returns
    /// `SearchError::PoolCreation` if thread spawning fails (e.g. the OS
    /// refuses to create more threads).
    pub fn new(config: PoolConfig) -> Result<Self, SearchError> {
        let thread_count = if config.max_threads > 0 {
            config.max_threads
        } else {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(4)
        };

        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
            counters: Counters::default(),
            should_stop: config.should_stop,
        });

        let mut workers = Vec::with_capacity(thread_count);
        for id in 0..thread_count {
            let shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("snub-worker-{id}"))
                .spawn(move || worker_loop(shared))
                .map_err(|e| SearchError::PoolCreation(e.to_string()))?;
            workers.push(handle);
        }

        Ok(Self {
            shared,
            workers,
            progress: config.progress,
        })
    }

    /// Places `job` on the queue. Returns false if the cancellation flag is
    /// set; callers must then either drop the work or execute it
    /// synchronously to preserve completeness.
    pub fn submit(&self, job: Job) -> bool {
        if self.shared.should_stop.load(Ordering::SeqCst) {
            return false;
        }

        {
            let mut queue = self.shared.queue.lock().unwrap_or_else(|e| e.into_inner());
            queue.push_back(job);
        }
        self.shared.counters.submitted.fetch_add(1, Ordering::SeqCst);
        self.shared.counters.queued.fetch_add(1, Ordering::SeqCst);
        self.shared.counters.active.fetch_add(1, Ordering::SeqCst);
        self.shared.condvar.notify_one();
        true
    }

    /// Blocks until active reaches zero, the timeout elapses, or the
    /// cancellation flag becomes true. Returns true iff completion was
    /// reached cleanly (the first of those). Polls the progress callback,
    /// if any, between checks; a callback returning false trips the
    /// cancellation flag.
    pub fn wait_completion(&self, timeout_ms: u64) -> bool {
        let start = Instant::now();
        let deadline = Duration::from_millis(timeout_ms);

        loop {
            if self.shared.counters.active.load(Ordering::SeqCst) == 0 {
                return true;
            }
            if start.elapsed() >= deadline {
                return false;
            }
            if self.shared.should_stop.load(Ordering::SeqCst) {
                return false;
            }
            if let Some(cb) = &self.progress {
                if !cb(self.stats()) {
                    self.shared.should_stop.store(true, Ordering::SeqCst);
                    return false;
                }
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Snapshot of `{active, queued, completed, submitted}`.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            active: self.shared.counters.active.load(Ordering::SeqCst),
            queued: self.shared.counters.queued.load(Ordering::SeqCst),
            completed: self.shared.counters.completed.load(Ordering::SeqCst),
            submitted: self.shared.counters.submitted.load(Ordering::SeqCst),
        }
    }
}

impl Drop for ThreadPool {
    /// Sets the cancellation flag, wakes every worker, and joins them.
    /// Work still queued at this point is abandoned rather than drained —
    /// an accepted tradeoff spec §4.4 leaves to the implementation.
    fn drop(&mut self) {
        self.shared.should_stop.store(true, Ordering::SeqCst);
        self.shared.shutdown.store(true, Ordering::SeqCst);
        self.shared.condvar.notify_all();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

/// `submitted → queued → running → completed|cancelled`. A unit moves
/// directly from `queued` to `cancelled` (without running) if the stop flag
/// is already set when it is dequeued; either way `completed` and `active`
/// are updated as the unit's terminal step, since completion detection
/// (`active == 0`) must be reachable even after cancellation.
fn worker_loop(shared: Arc<Shared>) {
    loop {
        let job = {
            let mut queue = shared.queue.lock().unwrap_or_else(|e| e.into_inner());
            loop {
                if let Some(job) = queue.pop_front() {
                    break Some(job);
                }
                if shared.shutdown.load(Ordering::SeqCst) {
                    break None;
                }
                queue = shared.condvar.wait(queue).unwrap_or_else(|e| e.into_inner());
            }
        };

        let Some(job) = job else {
            break;
        };

        shared.counters.queued.fetch_sub(1, Ordering::SeqCst);

        if !shared.should_stop.load(Ordering::SeqCst) {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
                tracing::error!(?payload, "work item panicked; absorbed at pool boundary");
            }
        }

        shared.counters.completed.fetch_add(1, Ordering::SeqCst);
        shared.counters.active.fetch_sub(1, Ordering::SeqCst);
    }
}
