//! Command-line surface: argument parsing and the conversion into a
//! validated [`SearchCriteria`].
//!
//! Option set mirrors `examples/original_source/src/cli.c`'s `parse_args`.
//! Size and date argument parsing are grounded on `parse_size_arg` /
//! `parse_date_string` in that source's `utils.c`, reimplemented with
//! `chrono` instead of hand-rolled `SYSTEMTIME` arithmetic.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use clap::Parser;

use crate::error::CriteriaError;
use crate::types::{SearchCriteria, SearchFlags, SearchLimits, SizeBand, TimeWindow};

/// `snub`: a recursive file-search engine.
#[derive(Parser, Debug)]
#[command(name = "snub", version, about = "Recursive file search with composable filters")]
pub struct Cli {
    /// Directory to search from.
    pub root: PathBuf,

    /// Name pattern to match (substring by default, glob with --glob).
    #[arg(default_value = "")]
    pub pattern: String,

    /// Match case-sensitively.
    #[arg(long)]
    pub case: bool,

    /// Treat `pattern` as a glob (`*`, `?`, `[...]`, `{a,b}`) instead of a
    /// plain substring.
    #[arg(long)]
    pub glob: bool,

    /// Don't skip common build/VCS directories (node_modules, .git, ...).
    #[arg(long)]
    pub no_skip: bool,

    /// Restrict to files with this extension (repeatable).
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Size filter in `find -size`-style notation: a `K`/`M`/`G`/`T` binary
    /// suffix with an optional leading sign — `+1K` means "larger than 1K",
    /// `-1K` means "smaller than 1K", a bare `1K` means "exactly 1K".
    /// Mutually exclusive with `--min`/`--max`/`--exact`.
    #[arg(long)]
    pub size: Option<String>,

    /// Minimum size, plain `K`/`M`/`G`/`T`-suffixed bytes (no sign).
    #[arg(long)]
    pub min: Option<String>,

    /// Maximum size, same syntax as `--min`.
    #[arg(long)]
    pub max: Option<String>,

    /// Exact size, same syntax as `--min`; mutually exclusive with
    /// `--min`/`--max`.
    #[arg(long)]
    pub exact: Option<String>,

    /// Only files modified on or after this date (`YYYY-MM-DD`).
    #[arg(long)]
    pub after: Option<String>,

    /// Only files modified on or before this date (`YYYY-MM-DD`).
    #[arg(long)]
    pub before: Option<String>,

    /// Worker thread count (0 = auto).
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Search timeout in milliseconds.
    #[arg(long, default_value_t = 300_000)]
    pub timeout: u64,

    /// Stop after this many matches (0 = unlimited).
    #[arg(long = "max-results", default_value_t = 0)]
    pub max_results: usize,

    /// Maximum recursion depth from root (0 = unlimited).
    #[arg(long = "max-depth", default_value_t = 0)]
    pub max_depth: usize,

    /// Follow symlinked directories instead of treating them as leaves.
    #[arg(long = "follow-symlinks")]
    pub follow_symlinks: bool,

    /// Include dotfiles and dot-directories.
    #[arg(long)]
    pub hidden: bool,

    /// Emit results as a single JSON object instead of one path per line.
    #[arg(long)]
    pub json: bool,

    /// Print each match as it is found instead of waiting for completion.
    #[arg(long)]
    pub stream: bool,
}

impl TryFrom<Cli> for SearchCriteria {
    type Error = CriteriaError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let size = build_size_band(
            cli.size.as_deref(),
            cli.min.as_deref(),
            cli.max.as_deref(),
            cli.exact.as_deref(),
        )?;
        let time = TimeWindow {
            after: cli.after.as_deref().map(parse_date).transpose()?,
            before: cli.before.as_deref().map(parse_date).transpose()?,
        };

        let criteria = SearchCriteria {
            root: cli.root.to_string_lossy().into_owned(),
            search_term: cli.pattern,
            extensions: cli
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            size,
            time,
            flags: SearchFlags {
                case_sensitive: cli.case,
                use_glob: cli.glob,
                skip_common_dirs: !cli.no_skip,
                follow_symlinks: cli.follow_symlinks,
                include_hidden: cli.hidden,
            },
            limits: SearchLimits {
                max_threads: cli.threads,
                timeout_ms: cli.timeout,
                max_results: cli.max_results,
                max_depth: cli.max_depth,
            },
        };

        criteria.validate()?;
        Ok(criteria)
    }
}

/// Builds a `SizeBand` from `--size` (find-style signed notation, per spec
/// §6: `+N` → `min = N+1`, `-N` → `max = N-1`, bare `N` → `exact`) or from
/// the plain `--min`/`--max`/`--exact` triple. The two input styles are
/// mutually exclusive, as is `--exact` with `--min`/`--max` within the
/// plain triple; each invariant is re-checked by `SearchCriteria::validate`
/// but enforced here too so the error is reported at parse time rather than
/// surfacing a confusing downstream one.
fn build_size_band(
    size: Option<&str>,
    min: Option<&str>,
    max: Option<&str>,
    exact: Option<&str>,
) -> Result<SizeBand, CriteriaError> {
    if let Some(size) = size {
        if min.is_some() || max.is_some() || exact.is_some() {
            return Err(CriteriaError::ExactWithBand);
        }
        return parse_signed_size(size);
    }

    let exact_value = exact.map(parse_size).transpose()?;
    if exact_value.is_some() && (min.is_some() || max.is_some()) {
        return Err(CriteriaError::ExactWithBand);
    }

    Ok(SizeBand {
        min: min.map(parse_size).transpose()?,
        max: max.map(parse_size).transpose()?,
        exact: exact_value,
    })
}

/// Parses `--size`'s find-style notation: a leading `+` means "larger than",
/// a leading `-` means "smaller than", and no sign means "exactly".
fn parse_signed_size(arg: &str) -> Result<SizeBand, CriteriaError> {
    let trimmed = arg.trim();
    let invalid = || CriteriaError::InvalidSize(arg.to_string());

    if let Some(rest) = trimmed.strip_prefix('+') {
        let min = parse_size(rest)?.checked_add(1).ok_or_else(invalid)?;
        return Ok(SizeBand {
            min: Some(min),
            max: None,
            exact: None,
        });
    }
    if let Some(rest) = trimmed.strip_prefix('-') {
        let max = parse_size(rest)?.checked_sub(1).ok_or_else(invalid)?;
        return Ok(SizeBand {
            min: None,
            max: Some(max),
            exact: None,
        });
    }
    Ok(SizeBand {
        min: None,
        max: None,
        exact: Some(parse_size(trimmed)?),
    })
}

/// Parses an unsigned size argument of the form `<digits>[KMGT]?`.
fn parse_size(arg: &str) -> Result<u64, CriteriaError> {
    let trimmed = arg.trim();
    let (digits, suffix) = match trimmed.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => (&trimmed[..trimmed.len() - 1], Some(c)),
        _ => (trimmed, None),
    };

    let base: u64 = digits
        .parse()
        .map_err(|_| CriteriaError::InvalidSize(arg.to_string()))?;

    let multiplier: u64 = match suffix {
        None => 1,
        Some('K') | Some('k') => 1024,
        Some('M') | Some('m') => 1024 * 1024,
        Some('G') | Some('g') => 1024 * 1024 * 1024,
        Some('T') | Some('t') => 1024u64 * 1024 * 1024 * 1024,
        Some(_) => return Err(CriteriaError::InvalidSize(arg.to_string())),
    };

    base.checked_mul(multiplier)
        .ok_or_else(|| CriteriaError::InvalidSize(arg.to_string()))
}

/// Parses a `YYYY-MM-DD` date into a midnight-UTC `SystemTime`.
fn parse_date(arg: &str) -> Result<SystemTime, CriteriaError> {
    let date = NaiveDate::parse_from_str(arg, "%Y-%m-%d").map_err(|_| CriteriaError::InvalidDate(arg.to_string()))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CriteriaError::InvalidDate(arg.to_string()))?;
    let epoch_seconds = midnight.and_utc().timestamp();
    if epoch_seconds >= 0 {
        Ok(SystemTime::UNIX_EPOCH + Duration::from_secs(epoch_seconds as u64))
    } else {
        Ok(SystemTime::UNIX_EPOCH - Duration::from_secs((-epoch_seconds) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_size_applies_binary_suffixes() {
        assert_eq!(parse_size("10").unwrap(), 10);
        assert_eq!(parse_size("1K").unwrap(), 1024);
        assert_eq!(parse_size("2M").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_size("1g").unwrap(), 1024 * 1024 * 1024);
    }

    #[test]
    fn parse_size_rejects_garbage() {
        assert!(parse_size("abc").is_err());
        assert!(parse_size("10X").is_err());
    }

    #[test]
    fn parse_size_accepts_leading_sign() {
        assert_eq!(parse_size("+1K").unwrap(), 1024);
    }

    #[test]
    fn build_size_band_rejects_exact_with_min() {
        assert!(build_size_band(None, Some("10"), None, Some("20")).is_err());
    }

    #[test]
    fn build_size_band_rejects_size_combined_with_min() {
        assert!(build_size_band(Some("+1K"), Some("10"), None, None).is_err());
    }

    #[test]
    fn signed_size_plus_sets_min_to_n_plus_one() {
        let band = parse_signed_size("+1K").unwrap();
        assert_eq!(band.min, Some(1025));
        assert_eq!(band.max, None);
        assert_eq!(band.exact, None);
    }

    #[test]
    fn signed_size_minus_sets_max_to_n_minus_one() {
        let band = parse_signed_size("-1K").unwrap();
        assert_eq!(band.max, Some(1023));
        assert_eq!(band.min, None);
        assert_eq!(band.exact, None);
    }

    #[test]
    fn signed_size_bare_sets_exact() {
        let band = parse_signed_size("2M").unwrap();
        assert_eq!(band.exact, Some(2 * 1024 * 1024));
    }

    #[test]
    fn parse_date_produces_midnight_utc() {
        let t = parse_date("2024-01-15").unwrap();
        let secs = t.duration_since(SystemTime::UNIX_EPOCH).unwrap().as_secs();
        assert_eq!(secs % 86_400, 0);
    }

    #[test]
    fn parse_date_rejects_malformed_input() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }
}
