//! Runtime configuration for the conversion pipeline.

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};

/// Pipeline configuration. Both fields are optional overrides; the defaults
/// (output folder beside the sources, bundled/PATH unrar lookup) match
/// unconfigured operation.
#[derive(Debug, Clone, Default)]
pub struct CoreConfig {
    /// Output folder for every PDF in the batch. When unset, each batch
    /// writes to a `Converted PDFs` folder beside its first archive.
    pub output_dir: Option<PathBuf>,

    /// Explicit path to the unrar binary used for `.cbr` archives. When
    /// unset, a bundled copy next to the executable is tried first, then
    /// `unrar` on PATH.
    pub unrar_path: Option<PathBuf>,
}

impl CoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects overrides that cannot work before the batch starts. A missing
    /// unrar binary without an override is not an error here: it degrades to
    /// per-task failures for RAR archives only.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(CoreError::PathError(format!(
                    "output path '{}' exists and is not a directory",
                    dir.display()
                )));
            }
        }

        if let Some(unrar) = &self.unrar_path {
            if !unrar.is_file() {
                return Err(CoreError::PathError(format!(
                    "unrar binary '{}' does not exist",
                    unrar.display()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(CoreConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_unrar_override_is_rejected() {
        let config = CoreConfig {
            unrar_path: Some(PathBuf::from("/surely/does/not/exist/unrar")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::PathError(_))
        ));
    }
}
