//! Batch execution on a single background thread.
//!
//! One worker per batch processes tasks strictly in discovery order, one at
//! a time; sequential processing bounds peak disk usage to a single scratch
//! directory. All task mutation happens on the worker thread, and the
//! consumer only observes snapshots through the event channel, so no locks
//! on task state are needed.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{info, warn};

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::events::Event;
use crate::extract::RarExtractor;
use crate::job::{ConversionTask, TaskStatus, run_job};

/// Name of the default output folder, created beside the first archive.
pub const OUTPUT_FOLDER_NAME: &str = "Converted PDFs";

/// Cooperative cancellation flag, checked only between tasks. The task in
/// flight always runs to completion so no torn scratch state or truncated
/// PDF is left behind.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Resolves the batch output folder: the configured override when present,
/// otherwise `Converted PDFs` beside the first archive.
pub fn resolve_output_dir(config: &CoreConfig, archives: &[PathBuf]) -> CoreResult<PathBuf> {
    if let Some(dir) = &config.output_dir {
        return Ok(dir.clone());
    }
    let first = archives.first().ok_or_else(|| {
        CoreError::PathError("cannot determine output folder for an empty batch".to_string())
    })?;
    let parent = first.parent().ok_or_else(|| {
        CoreError::PathError(format!("no parent directory for {}", first.display()))
    })?;
    Ok(parent.join(OUTPUT_FOLDER_NAME))
}

/// Processes `archives` in order on the calling thread, emitting events to
/// `sink`. Per-archive failures never abort the batch; only batch-level
/// setup (output folder creation) is fatal.
///
/// Returns the final task list, each in a terminal state (or still
/// `Pending` when cancellation stopped the batch before reaching it).
pub fn run_batch(
    archives: &[PathBuf],
    config: &CoreConfig,
    sink: &Sender<Event>,
    cancel: &CancelFlag,
) -> CoreResult<Vec<ConversionTask>> {
    let total = archives.len();
    if total == 0 {
        let _ = sink.send(Event::BatchComplete {
            success_count: 0,
            fail_count: 0,
        });
        return Ok(Vec::new());
    }

    let output_dir = resolve_output_dir(config, archives)?;
    std::fs::create_dir_all(&output_dir)?;

    let rar = RarExtractor::new(config.unrar_path.as_deref());

    let mut tasks: Vec<ConversionTask> = archives
        .iter()
        .map(|archive| ConversionTask::new(archive.clone(), output_dir.clone()))
        .collect();

    let mut success_count = 0usize;
    let mut fail_count = 0usize;
    let mut completed = 0usize;

    for task in &mut tasks {
        if cancel.is_cancelled() {
            info!("batch cancelled after {completed} of {total} task(s)");
            break;
        }

        let _ = sink.send(Event::TaskStarted {
            path: task.source.clone(),
        });

        let outcome = run_job(task, &rar);
        match outcome.status {
            TaskStatus::Done => {
                success_count += 1;
                let output_path = outcome.result_path.clone().unwrap_or_default();
                let _ = sink.send(Event::TaskDone {
                    path: task.source.clone(),
                    output_path,
                });
            }
            _ => {
                fail_count += 1;
                let detail = outcome
                    .error_detail
                    .clone()
                    .unwrap_or_else(|| "conversion failed".to_string());
                warn!("{}: {}", task.source.display(), detail);
                let _ = sink.send(Event::TaskFailed {
                    path: task.source.clone(),
                    detail,
                });
            }
        }

        completed += 1;
        let _ = sink.send(Event::BatchProgress { completed, total });
    }

    let _ = sink.send(Event::BatchComplete {
        success_count,
        fail_count,
    });

    Ok(tasks)
}

/// A running batch: the event receiver, the cancellation flag, and the
/// worker thread handle.
pub struct BatchHandle {
    /// Ordered event stream; iterate until it closes.
    pub events: Receiver<Event>,
    cancel: CancelFlag,
    handle: JoinHandle<CoreResult<Vec<ConversionTask>>>,
}

impl BatchHandle {
    /// Requests best-effort cancellation; the in-flight task still runs to
    /// completion.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A clonable handle to the batch's cancellation flag.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Waits for the worker thread and returns the final task list.
    pub fn join(self) -> CoreResult<Vec<ConversionTask>> {
        self.handle
            .join()
            .map_err(|_| CoreError::Other("batch worker thread panicked".to_string()))?
    }
}

/// Spawns `run_batch` on one background thread. The initiating context never
/// blocks on conversion; it only drains the event channel.
pub fn spawn_batch(archives: Vec<PathBuf>, config: CoreConfig) -> BatchHandle {
    let (sender, events) = mpsc::channel();
    let cancel = CancelFlag::new();
    let worker_cancel = cancel.clone();
    let handle =
        thread::spawn(move || run_batch(&archives, &config, &sender, &worker_cancel));
    BatchHandle {
        events,
        cancel,
        handle,
    }
}
