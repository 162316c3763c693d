//! ZIP (`.cbz`) extraction.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use zip::ZipArchive;

use crate::error::{CoreError, CoreResult};

/// Extracts every entry of a ZIP archive into `dest`, preserving relative
/// paths. Entries whose names would escape the destination directory are
/// rejected rather than written.
pub fn extract_zip(archive: &Path, dest: &Path) -> CoreResult<()> {
    let file = File::open(archive).map_err(|e| {
        CoreError::Extraction(format!("cannot open {}: {}", archive.display(), e))
    })?;
    let mut container = ZipArchive::new(file)
        .map_err(|e| CoreError::Extraction(format!("not a valid ZIP archive: {e}")))?;

    fs::create_dir_all(dest)?;

    for index in 0..container.len() {
        let mut entry = container
            .by_index(index)
            .map_err(|e| CoreError::Extraction(format!("bad ZIP entry #{index}: {e}")))?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(CoreError::Extraction(format!(
                "entry '{}' escapes the destination directory",
                entry.name()
            )));
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out).map_err(|e| {
            CoreError::Extraction(format!("failed to write '{}': {}", target.display(), e))
        })?;
    }

    Ok(())
}
