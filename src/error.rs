//! Error types for snub.
//!
//! Uses thiserror for ergonomic error handling. Transient per-file and
//! per-directory I/O failures during a walk are not represented here — they
//! are logged and absorbed at the traversal boundary, never surfaced as
//! `Result::Err` (see `traversal::visit_directory`).

use thiserror::Error;

/// Errors that can prevent a `SearchCriteria` from being constructed.
#[derive(Error, Debug)]
pub enum CriteriaError {
    #[error("root path must not be empty")]
    EmptyRoot,

    #[error("search term may be omitted only if at least one other filter is set")]
    NoFilter,

    #[error("min size ({min}) is greater than max size ({max})")]
    SizeBandInverted { min: u64, max: u64 },

    #[error("exact size cannot be combined with min/max size")]
    ExactWithBand,

    #[error("'after' time is later than 'before' time")]
    TimeWindowInverted,

    #[error("invalid size value: {0}")]
    InvalidSize(String),

    #[error("invalid date value: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Errors that can abort a search before or during setup.
///
/// Per spec, transient I/O errors encountered *during* traversal of
/// subdirectories are never represented here; only failures that prevent
/// the search from starting at all are.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(#[from] CriteriaError),

    #[error("root path is not a readable directory: {0}")]
    RootNotOpenable(std::io::Error),

    #[error("failed to create worker pool: {0}")]
    PoolCreation(String),
}

impl SearchError {
    /// Returns a machine-readable error code, used by the CLI adapter's
    /// JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCriteria(_) => "INVALID_CRITERIA",
            Self::RootNotOpenable(_) => "ROOT_NOT_OPENABLE",
            Self::PoolCreation(_) => "POOL_CREATION_FAILED",
        }
    }
}

pub type CriteriaResult<T> = std::result::Result<T, CriteriaError>;
pub type SearchSetupResult<T> = std::result::Result<T, SearchError>;
