//! Archive discovery: expanding user-supplied paths into a batch.
//!
//! Directories are walked recursively and any `.cbr`/`.cbz` file is collected
//! (case-insensitive). File inputs are taken directly when their extension
//! matches and dropped silently otherwise. The result is deduplicated and
//! ordinally sorted; this ordering becomes the batch processing order.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

/// Extensions recognised as comic-book archives.
pub const ARCHIVE_EXTENSIONS: &[&str] = &["cbr", "cbz"];

fn is_comic_archive(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            ARCHIVE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Expands a set of files and/or directories into a deduplicated, sorted
/// list of comic archives.
///
/// Discovery is best-effort: unreadable subdirectories are skipped rather
/// than surfaced. An empty result means "nothing to do", not an error.
pub fn find_comic_archives(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() && is_comic_archive(entry.path()) {
                    found.insert(entry.path().to_path_buf());
                }
            }
        } else if is_comic_archive(input) {
            found.insert(input.clone());
        } else {
            debug!("ignoring non-archive input: {}", input.display());
        }
    }

    found.into_iter().collect()
}
