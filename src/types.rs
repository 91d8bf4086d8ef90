//! Core data types shared across snub: the search configuration, a single
//! match, and the small value types that compose a criteria bundle.

use std::time::SystemTime;

use crate::error::{CriteriaError, CriteriaResult};

/// An optional inclusive size band: `min`/`max`, or an `exact` value
/// mutually exclusive with both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeBand {
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub exact: Option<u64>,
}

impl SizeBand {
    fn validate(self) -> CriteriaResult<()> {
        if self.exact.is_some() && (self.min.is_some() || self.max.is_some()) {
            return Err(CriteriaError::ExactWithBand);
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(CriteriaError::SizeBandInverted { min, max });
            }
        }
        Ok(())
    }

    fn is_set(self) -> bool {
        self.min.is_some() || self.max.is_some() || self.exact.is_some()
    }

    /// Returns true iff `size` satisfies this band. An unset band always
    /// matches.
    #[must_use]
    pub fn matches(self, size: u64) -> bool {
        if let Some(exact) = self.exact {
            return size == exact;
        }
        if let Some(min) = self.min {
            if size < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if size > max {
                return false;
            }
        }
        true
    }
}

/// An optional inclusive mtime window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub after: Option<SystemTime>,
    pub before: Option<SystemTime>,
}

impl TimeWindow {
    fn validate(self) -> CriteriaResult<()> {
        if let (Some(after), Some(before)) = (self.after, self.before) {
            if after > before {
                return Err(CriteriaError::TimeWindowInverted);
            }
        }
        Ok(())
    }

    fn is_set(self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns true iff `mtime` satisfies this window. An unset window
    /// always matches.
    #[must_use]
    pub fn matches(self, mtime: SystemTime) -> bool {
        if let Some(after) = self.after {
            if mtime < after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if mtime > before {
                return false;
            }
        }
        true
    }
}

/// Boolean behavior switches for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFlags {
    pub case_sensitive: bool,
    pub use_glob: bool,
    pub skip_common_dirs: bool,
    pub follow_symlinks: bool,
    pub include_hidden: bool,
}

impl Default for SearchFlags {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            use_glob: false,
            skip_common_dirs: true,
            follow_symlinks: false,
            include_hidden: false,
        }
    }
}

/// Resource limits for a search. `0` means "unlimited"/"auto" in each field,
/// matching the C-derived convention spec.md uses throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// 0 = auto (logical CPU count).
    pub max_threads: usize,
    pub timeout_ms: u64,
    /// 0 = unlimited.
    pub max_results: usize,
    /// 0 = unlimited.
    pub max_depth: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_threads: 0,
            timeout_ms: 300_000,
            max_results: 0,
            max_depth: 0,
        }
    }
}

/// Immutable configuration for one search. Constructed by the `cli` adapter
/// (or directly, by an embedder), validated once via [`SearchCriteria::validate`],
/// then shared read-only for the lifetime of the search.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub root: String,
    pub search_term: String,
    /// Lowercase, dot-stripped extensions. Order-irrelevant.
    pub extensions: Vec<String>,
    pub size: SizeBand,
    pub time: TimeWindow,
    pub flags: SearchFlags,
    pub limits: SearchLimits,
}

impl SearchCriteria {
    /// Validates the invariants from spec §3:
    /// - `root` non-empty
    /// - `min <= max` when both set (size), exact exclusive with min/max
    /// - `after <= before` when both set
    /// - `search_term` may be empty only if some other positive filter is set
    pub fn validate(&self) -> CriteriaResult<()> {
        if self.root.trim().is_empty() {
            return Err(CriteriaError::EmptyRoot);
        }
        self.size.validate()?;
        self.time.validate()?;

        let has_other_filter = !self.extensions.is_empty() || self.size.is_set() || self.time.is_set();
        if self.search_term.is_empty() && !has_other_filter {
            return Err(CriteriaError::NoFilter);
        }
        Ok(())
    }
}

/// One match produced by the search, owned by the `ResultSink` once
/// appended and handed back to the caller when the search completes.
#[derive(Debug, Clone)]
pub struct SearchMatch {
    pub path: String,
    pub size: u64,
    pub mtime: SystemTime,
}

/// A snapshot of progress counters, passed to the optional progress
/// callback from the waiting thread only (never from a worker thread).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressSnapshot {
    pub processed_files: u64,
    pub queued_dirs: u64,
    pub total_results: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_band_exclusive_with_exact() {
        let band = SizeBand {
            min: Some(1),
            max: None,
            exact: Some(5),
        };
        assert!(matches!(band.validate(), Err(CriteriaError::ExactWithBand)));
    }

    #[test]
    fn size_band_inverted() {
        let band = SizeBand {
            min: Some(10),
            max: Some(5),
            exact: None,
        };
        assert!(matches!(
            band.validate(),
            Err(CriteriaError::SizeBandInverted { min: 10, max: 5 })
        ));
    }

    #[test]
    fn size_band_matches() {
        let band = SizeBand {
            min: Some(10),
            max: Some(20),
            exact: None,
        };
        assert!(band.matches(15));
        assert!(!band.matches(5));
        assert!(!band.matches(25));
    }

    #[test]
    fn empty_search_term_requires_other_filter() {
        let criteria = SearchCriteria {
            root: "/tmp".to_string(),
            search_term: String::new(),
            extensions: vec![],
            size: SizeBand::default(),
            time: TimeWindow::default(),
            flags: SearchFlags::default(),
            limits: SearchLimits::default(),
        };
        assert!(matches!(criteria.validate(), Err(CriteriaError::NoFilter)));

        let criteria_with_ext = SearchCriteria {
            extensions: vec!["txt".to_string()],
            ..criteria
        };
        assert!(criteria_with_ext.validate().is_ok());
    }
}
