//! A platform-neutral directory enumeration handle.
//!
//! Operations: [`open`], iterate for [`Entry`] values, drop to close. `.`
//! and `..` pseudo-entries are filtered out by construction — `std::fs::
//! read_dir` never yields them, unlike the Win32 `FindFirstFile`/
//! `FindNextFile` pair the original C source (`platform.c`) has to filter
//! by hand.
//!
//! Errors from [`open`] (permission denied, not found, not a directory) are
//! non-fatal to the search: callers log and continue, per spec §4.3.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// One entry yielded by a directory iterator.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub size: u64,
    pub mtime: SystemTime,
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// Opens `path` for enumeration. Returns every entry whose metadata could be
/// read; entries whose metadata read fails (e.g. a file disappearing mid-walk,
/// or a symlink whose target is gone) are silently skipped rather than
/// aborting the whole directory, matching spec's "transient I/O errors ...
/// silently skipped" rule down at the per-entry level too.
///
/// `DirEntry::file_type`/`DirEntry::metadata` do not follow symlinks (they're
/// the `lstat` view), so a symlink pointing at a directory would otherwise
/// always report `is_dir: false` regardless of `follow_symlinks` — for a
/// symlink entry we additionally resolve `fs::metadata` (which does follow)
/// to learn what the link actually points at.
pub fn open(path: &Path) -> std::io::Result<impl Iterator<Item = Entry>> {
    let read_dir = fs::read_dir(path)?;
    Ok(read_dir.filter_map(|entry| {
        let entry = entry.ok()?;
        let name = entry.file_name().to_str()?.to_string();
        let link_type = entry.file_type().ok()?;
        let is_symlink = link_type.is_symlink();
        let resolved = if is_symlink { fs::metadata(entry.path()).ok()? } else { entry.metadata().ok()? };
        Some(Entry {
            name,
            size: resolved.len(),
            mtime: resolved.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            is_dir: resolved.is_dir(),
            is_symlink,
        })
    }))
}
