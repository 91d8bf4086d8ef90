//! Combines the name pattern, extension set, size band, and mtime window
//! into the single disjunctive-free predicate applied to every file entry.
//!
//! Ordering is fixed for early-out efficiency, per spec §4.2: type gate,
//! size, time, extension, name pattern. Grounded on `matches_criteria` in
//! `examples/original_source/src/search.c`.

use crate::pattern::pattern_matches;
use crate::platform::dir_iter::Entry;
use crate::types::SearchCriteria;

/// Returns true iff `entry` satisfies every filter in `criteria`. Directories
/// are always rejected (the type gate) — this predicate is only meaningful
/// for files.
#[must_use]
pub fn matches(entry: &Entry, criteria: &SearchCriteria) -> bool {
    if entry.is_dir {
        return false;
    }

    if !criteria.size.matches(entry.size) {
        return false;
    }

    if !criteria.time.matches(entry.mtime) {
        return false;
    }

    if !criteria.extensions.is_empty() && !extension_matches(&entry.name, &criteria.extensions) {
        return false;
    }

    if !criteria.search_term.is_empty()
        && !pattern_matches(
            &entry.name,
            &criteria.search_term,
            criteria.flags.case_sensitive,
            criteria.flags.use_glob,
        )
    {
        return false;
    }

    true
}

/// Extracts the substring after the last `.` in `name`, lowercases it, and
/// checks membership in `extensions` (already lowercase, dot-stripped).
fn extension_matches(name: &str, extensions: &[String]) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| *e == ext)
        }
        _ => false,
    }
}
