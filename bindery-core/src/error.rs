use thiserror::Error;

/// Error types for the conversion pipeline.
///
/// All extraction and assembly failures are task-local: the batch worker
/// converts them into `TaskFailed` events rather than letting them abort the
/// batch.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported archive format: {0}")]
    UnsupportedFormat(String),

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("no images found in archive")]
    NoImagesFound,

    #[error("PDF assembly failed: {0}")]
    Assembly(String),

    #[error("invalid path: {0}")]
    PathError(String),

    #[error("unexpected error: {0}")]
    Other(String),
}

/// Result type for pipeline operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
