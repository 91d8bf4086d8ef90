//! Per-directory work units: the glue between the thread pool, the
//! directory iterator, and the predicate engine.
//!
//! Grounded on `process_directory_safe` / `spawn_directory_thread` in
//! `examples/original_source/src/search.c`, including its hardcoded
//! `system_paths[]` blacklist and `skip_directories[]` common-skip set
//! (reproduced verbatim below). Unlike that file's single global
//! `g_thread_pool`, the pool here is owned by the `Session` issuing the
//! search — see REDESIGN FLAGS in SPEC_FULL.md.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::platform::{self, dir_iter};
use crate::pool::ThreadPool;
use crate::predicate;
use crate::session::SessionShared;

/// Substrings that mark a directory as off-limits regardless of any other
/// setting. Matched against the full path, case-sensitively, mirroring the
/// original `system_paths[]` table.
const SYSTEM_BLACKLIST: &[&str] = &[
    "$Recycle.Bin",
    "System Volume Information",
    "Windows\\System32",
    "Windows\\SysWOW64",
    "Program Files",
    "Program Files (x86)",
    "ProgramData",
    "Recovery",
    "hiberfil.sys",
    "pagefile.sys",
    "swapfile.sys",
];

/// Directory basenames skipped when `skip_common_dirs` is set, matched
/// case-insensitively against the entry name alone. Mirrors the original
/// `skip_directories[]` table.
const COMMON_SKIP_SET: &[&str] = &[
    "$RECYCLE.BIN",
    "System Volume Information",
    "Windows",
    "Program Files",
    "Program Files (x86)",
    "ProgramData",
    "Recovery",
    "node_modules",
    ".git",
    ".svn",
    "__pycache__",
    "obj",
    "bin",
    "Debug",
    "Release",
    ".vs",
    "packages",
    "bower_components",
    "dist",
    "build",
];

fn is_blacklisted(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    SYSTEM_BLACKLIST.iter().any(|needle| path_str.contains(needle))
}

fn should_skip_common(name: &str) -> bool {
    COMMON_SKIP_SET.iter().any(|skip| skip.eq_ignore_ascii_case(name))
}

/// Submits the root directory as the search's first work item.
pub fn spawn_root(shared: &Arc<SessionShared>, pool: &Arc<ThreadPool>, root: PathBuf) {
    enqueue(shared, pool, root, 1);
}

/// Increments `queued_dirs`, then either submits a pool job for `dir` or —
/// if the pool refuses (saturated queue behind a tripped stop flag) —
/// executes it and everything it discovers synchronously on the calling
/// thread, so a rejected submission never drops work silently.
fn enqueue(shared: &Arc<SessionShared>, pool: &Arc<ThreadPool>, dir: PathBuf, depth: usize) {
    shared.queued_dirs.fetch_add(1, Ordering::SeqCst);

    let job_shared = Arc::clone(shared);
    let job_pool = Arc::clone(pool);
    let job_dir = dir.clone();
    let job: Box<dyn FnOnce() + Send> = Box::new(move || {
        visit(&job_shared, &job_dir, depth, &mut |child, d| enqueue(&job_shared, &job_pool, child, d));
        job_shared.queued_dirs.fetch_sub(1, Ordering::SeqCst);
    });

    if !pool.submit(job) {
        run_iteratively(shared, dir, depth);
    }
}

/// Runs a work item and every subdirectory it discovers on the calling
/// thread via an explicit stack, rather than native recursion — the
/// submit-failure fallback path. `queued_dirs` for `dir` itself was already
/// incremented by [`enqueue`] before the submission attempt; entries
/// discovered here increment it themselves when pushed.
fn run_iteratively(shared: &Arc<SessionShared>, dir: PathBuf, depth: usize) {
    let mut stack = VecDeque::new();
    stack.push_back((dir, depth));
    while let Some((dir, depth)) = stack.pop_back() {
        visit(shared, &dir, depth, &mut |child, d| {
            shared.queued_dirs.fetch_add(1, Ordering::SeqCst);
            stack.push_back((child, d));
        });
        shared.queued_dirs.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Processes exactly one directory: stop/depth/blacklist gates, open the
/// iterator, dispatch each entry to the predicate engine or to `recurse`.
/// Never panics on I/O failure — an unreadable directory is logged and
/// skipped, same as any other per-entry transient error.
fn visit(shared: &Arc<SessionShared>, dir: &Path, depth: usize, recurse: &mut dyn FnMut(PathBuf, usize)) {
    if shared.should_stop.load(Ordering::SeqCst) {
        return;
    }

    let max_depth = shared.criteria.limits.max_depth;
    if max_depth > 0 && depth > max_depth {
        return;
    }

    if is_blacklisted(dir) {
        return;
    }

    let entries = match dir_iter::open(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(path = %dir.display(), error = %err, "skipping unreadable directory");
            return;
        }
    };

    for entry in entries {
        if shared.should_stop.load(Ordering::SeqCst) {
            break;
        }

        if !shared.criteria.flags.include_hidden && platform::is_hidden_name(&entry.name) {
            continue;
        }

        if entry.is_dir {
            if entry.is_symlink && !shared.criteria.flags.follow_symlinks {
                continue;
            }
            if shared.criteria.flags.skip_common_dirs && should_skip_common(&entry.name) {
                continue;
            }
            recurse(platform::join(dir, &entry.name), depth + 1);
            continue;
        }

        shared.processed_files.fetch_add(1, Ordering::SeqCst);
        if predicate::matches(&entry, &shared.criteria) {
            let path = platform::join(dir, &entry.name).to_string_lossy().into_owned();
            shared.sink.append(crate::types::SearchMatch {
                path,
                size: entry.size,
                mtime: entry.mtime,
            });
        }
    }
}
