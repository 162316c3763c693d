//! Per-archive conversion job: extract, order pages, assemble.
//!
//! A job is a single best-effort attempt with no retries; the only retry
//! mechanism is idempotency, since a later batch over the same inputs will
//! see the existing output PDF and short-circuit. The scratch directory is
//! removed explicitly on every exit path out of extraction and assembly,
//! success or failure.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::extract::{ArchiveFormat, RarExtractor, extract_archive};
use crate::pages;
use crate::pdf;

/// Lifecycle states of a conversion task.
///
/// `Done` and `Failed` are terminal. `Failed` is reachable from `Extracting`
/// or `Assembling`, or immediately when the source format is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Extracting,
    Assembling,
    Done,
    Failed,
}

/// One archive's conversion state. Created by the batch worker at batch
/// start and mutated only by the worker thread driving it.
#[derive(Debug, Clone)]
pub struct ConversionTask {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub status: TaskStatus,
    pub result_path: Option<PathBuf>,
    pub error_detail: Option<String>,
}

impl ConversionTask {
    pub fn new(source: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            source,
            output_dir,
            status: TaskStatus::Pending,
            result_path: None,
            error_detail: None,
        }
    }

    /// The task's output PDF path: `<output_dir>/<basename>.pdf`. Its
    /// existence is the idempotency marker.
    pub fn output_path(&self) -> CoreResult<PathBuf> {
        let stem = self.source.file_stem().ok_or_else(|| {
            CoreError::PathError(format!(
                "cannot derive output name for {}",
                self.source.display()
            ))
        })?;
        Ok(self
            .output_dir
            .join(format!("{}.pdf", stem.to_string_lossy())))
    }
}

/// Result of one job, returned to the batch worker.
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub status: TaskStatus,
    pub result_path: Option<PathBuf>,
    pub error_detail: Option<String>,
    pub pages: usize,
    pub elapsed: Duration,
    /// True when the job short-circuited on an existing output PDF.
    pub skipped: bool,
}

/// Private extraction workspace for one archive: `<basename>_temp` beside
/// the source. At most one exists per task at any time.
struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    fn for_source(source: &Path) -> CoreResult<Self> {
        let stem = source.file_stem().ok_or_else(|| {
            CoreError::PathError(format!("cannot derive scratch name for {}", source.display()))
        })?;
        let parent = source.parent().ok_or_else(|| {
            CoreError::PathError(format!("no parent directory for {}", source.display()))
        })?;
        Ok(Self {
            path: parent.join(format!("{}_temp", stem.to_string_lossy())),
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort removal; a stale scratch directory must never fail the
    /// task on its own.
    fn remove(&self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_dir_all(&self.path) {
                warn!(
                    "failed to remove scratch directory {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

/// Runs one conversion attempt, mutating `task` through its state machine
/// and returning the terminal outcome. Never panics and never returns an
/// error: every failure becomes a `Failed` status with detail.
pub fn run_job(task: &mut ConversionTask, rar: &RarExtractor) -> JobOutcome {
    let start = Instant::now();

    let Some(format) = ArchiveFormat::from_path(&task.source) else {
        let err = CoreError::UnsupportedFormat(task.source.display().to_string());
        return fail(task, start, err.to_string(), 0);
    };

    let output_path = match task.output_path() {
        Ok(path) => path,
        Err(e) => return fail(task, start, e.to_string(), 0),
    };

    // Existing output is the durable idempotency marker: short-circuit
    // without touching the archive or creating a scratch directory.
    if output_path.exists() {
        info!(
            "skipping {} (output already exists)",
            task.source.display()
        );
        task.status = TaskStatus::Done;
        task.result_path = Some(output_path.clone());
        return JobOutcome {
            status: TaskStatus::Done,
            result_path: Some(output_path),
            error_detail: None,
            pages: 0,
            elapsed: start.elapsed(),
            skipped: true,
        };
    }

    let scratch = match ScratchDir::for_source(&task.source) {
        Ok(scratch) => scratch,
        Err(e) => return fail(task, start, e.to_string(), 0),
    };

    task.status = TaskStatus::Extracting;
    if let Err(e) = extract_archive(format, &task.source, scratch.path(), rar) {
        scratch.remove();
        return fail(task, start, e.to_string(), 0);
    }

    let images = pages::list_pages(scratch.path());
    if images.is_empty() {
        scratch.remove();
        return fail(task, start, CoreError::NoImagesFound.to_string(), 0);
    }

    task.status = TaskStatus::Assembling;
    let title = task
        .source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Comic".to_string());

    match pdf::assemble_pdf(&images, &title, &output_path) {
        Ok(page_count) => {
            scratch.remove();
            info!(
                "converted {} ({} pages)",
                task.source.display(),
                page_count
            );
            task.status = TaskStatus::Done;
            task.result_path = Some(output_path.clone());
            JobOutcome {
                status: TaskStatus::Done,
                result_path: Some(output_path),
                error_detail: None,
                pages: page_count,
                elapsed: start.elapsed(),
                skipped: false,
            }
        }
        Err(e) => {
            scratch.remove();
            fail(task, start, e.to_string(), images.len())
        }
    }
}

fn fail(
    task: &mut ConversionTask,
    start: Instant,
    detail: String,
    pages: usize,
) -> JobOutcome {
    task.status = TaskStatus::Failed;
    task.error_detail = Some(detail.clone());
    JobOutcome {
        status: TaskStatus::Failed,
        result_path: None,
        error_detail: Some(detail),
        pages,
        elapsed: start.elapsed(),
        skipped: false,
    }
}
