//! Platform-neutral filesystem primitives. Everything the core traversal
//! engine needs from the OS goes through this module, so the rest of the
//! crate never touches `std::fs` directly.

pub mod dir_iter;

use std::path::{Path, PathBuf};

/// Canonicalizes `path` for use as a search root, stripping Windows'
/// `\\?\` long-path prefix from the result so paths built from it display
/// and concatenate normally. Mirrors `dunce::canonicalize`'s purpose in
/// `examples/agentika-labs-grepika`. Falls back to the original path,
/// uncanonicalized, if canonicalization fails (e.g. the path doesn't exist
/// yet is still worth reporting as a setup error upstream).
pub fn canonicalize_root(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Joins a directory path and an entry name into a child path, the
/// `std::path::Path` equivalent of the original C source's bounded
/// `safe_strcat`-based concatenation (bounds checking here is implicit —
/// `PathBuf` grows as needed, there is no fixed `MAX_PATH_SAFE` buffer to
/// overflow).
#[must_use]
pub fn join(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

/// Returns true iff `name` denotes a hidden entry by the platform's
/// convention. On Unix this is "starts with a dot"; the original C source
/// checked `FILE_ATTRIBUTE_HIDDEN` on Windows, which `std::fs::Metadata`
/// does not expose portably, so a dot-prefix check is used uniformly.
#[must_use]
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}
