//! RAR (`.cbr`) extraction via an external `unrar` binary.
//!
//! RAR decompression is delegated to the platform's `unrar` executable. The
//! binary is resolved once, at extractor construction: an explicit override,
//! then a bundled copy next to the running executable, then `unrar` on PATH.
//! When nothing resolves, every extraction attempt fails with a task-level
//! error; ZIP support is unaffected.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, warn};

use crate::error::{CoreError, CoreResult};

/// RAR extractor bound to a resolved `unrar` binary (or to none, in which
/// case it reports failure on every invocation).
#[derive(Debug, Clone)]
pub struct RarExtractor {
    binary: Option<PathBuf>,
}

impl RarExtractor {
    /// Resolves the unrar binary for this platform.
    pub fn new(override_path: Option<&Path>) -> Self {
        let binary = resolve_unrar(override_path);
        match &binary {
            Some(path) => debug!("unrar binary: {}", path.display()),
            None => warn!("no unrar binary found; .cbr archives will fail to extract"),
        }
        Self { binary }
    }

    /// Whether a usable unrar binary was resolved.
    pub fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    /// Extracts `archive` into `dest` by invoking `unrar x`.
    pub fn extract(&self, archive: &Path, dest: &Path) -> CoreResult<()> {
        let Some(binary) = &self.binary else {
            return Err(CoreError::Extraction(
                "unrar binary not found; cannot extract RAR archives".to_string(),
            ));
        };

        fs::create_dir_all(dest)?;

        // unrar treats the last argument as a directory only when it ends
        // with a path separator.
        let mut dest_arg = dest.as_os_str().to_os_string();
        dest_arg.push(std::path::MAIN_SEPARATOR_STR);

        let output = Command::new(binary)
            .arg("x")
            .arg("-o+")
            .arg("-y")
            .arg(archive)
            .arg(dest_arg)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                CoreError::Extraction(format!("failed to run {}: {}", binary.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CoreError::Extraction(format!(
                "unrar exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

fn resolve_unrar(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return path.exists().then(|| path.to_path_buf());
    }

    if let Some(bundled) = bundled_unrar_path() {
        if bundled.exists() {
            return Some(bundled);
        }
    }

    find_unrar_on_path()
}

/// `binaries/<os>/unrar` next to the running executable, matching the layout
/// used by packaged installs.
fn bundled_unrar_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()?.parent()?.to_path_buf();
    let (os_dir, name) = match env::consts::OS {
        "windows" => ("windows", "UnRAR.exe"),
        "macos" => ("macos", "unrar"),
        _ => ("linux", "unrar"),
    };
    Some(exe_dir.join("binaries").join(os_dir).join(name))
}

/// Probes for `unrar` on PATH. Any exit status counts as found; only a
/// NotFound spawn error means the binary is absent.
fn find_unrar_on_path() -> Option<PathBuf> {
    match Command::new("unrar")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(_) => Some(PathBuf::from("unrar")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!("failed to probe for unrar on PATH: {e}");
            None
        }
    }
}
