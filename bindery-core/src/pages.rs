//! Page discovery and ordering within an extraction directory.
//!
//! The page sequence is computed once per archive and is deterministic for
//! identical directory contents: entries are keyed by their full path,
//! compared case-insensitively with an ordinal tiebreak. This ordering is
//! the page order of the final PDF.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions recognised as page images, matched case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "tif", "tiff", "gif", "webp",
];

fn is_page_image(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Walks `dir` recursively and returns the ordered page sequence.
///
/// An empty result is a valid return value; the caller decides whether that
/// constitutes a failure.
pub fn list_pages(dir: &Path) -> Vec<PathBuf> {
    let mut pages: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_page_image(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    pages.sort_by(|a, b| {
        let ka = a.to_string_lossy().to_lowercase();
        let kb = b.to_string_lossy().to_lowercase();
        ka.cmp(&kb).then_with(|| a.cmp(b))
    });
    pages
}
