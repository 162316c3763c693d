//! Archive extraction, polymorphic over the container format.
//!
//! Two formats exist and the set is closed: `.cbz` is a ZIP container read
//! with the `zip` crate, `.cbr` is a RAR container handed to an external
//! `unrar` binary. Every extraction error — corrupt archive, unsupported
//! compression, I/O failure, missing binary — is converted to
//! `CoreError::Extraction` at this boundary with the underlying detail
//! preserved; nothing here is fatal to the process.

pub mod rar;
pub mod zip;

use std::path::Path;

use crate::error::CoreResult;

pub use rar::RarExtractor;

/// Supported archive container formats, selected once per task by file
/// extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Rar,
}

impl ArchiveFormat {
    /// Determines the container format from the path's extension,
    /// case-insensitively. Returns `None` for anything that is not a
    /// `.cbr`/`.cbz` archive.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()?
            .to_str()?
            .to_ascii_lowercase()
            .as_str()
        {
            "cbz" => Some(Self::Zip),
            "cbr" => Some(Self::Rar),
            _ => None,
        }
    }
}

/// Extracts all entries of `archive` into `dest`, creating it if absent.
pub fn extract_archive(
    format: ArchiveFormat,
    archive: &Path,
    dest: &Path,
    rar: &RarExtractor,
) -> CoreResult<()> {
    match format {
        ArchiveFormat::Zip => zip::extract_zip(archive, dest),
        ArchiveFormat::Rar => rar.extract(archive, dest),
    }
}
