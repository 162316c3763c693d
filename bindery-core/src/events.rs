//! Typed events emitted by the batch worker.
//!
//! Events travel over a single ordered `mpsc` channel from the worker thread
//! to the consumer, which observes them in emission order via one reader
//! loop. The channel is the only thing that crosses the worker/presentation
//! boundary; errors are carried as `TaskFailed` detail strings, never
//! propagated as panics or results.

use std::path::PathBuf;

/// Progress and status events for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Conversion of one archive has started.
    TaskStarted { path: PathBuf },

    /// One archive converted successfully (or was skipped because its
    /// output already existed).
    TaskDone { path: PathBuf, output_path: PathBuf },

    /// One archive failed; `detail` is a short human-readable reason.
    TaskFailed { path: PathBuf, detail: String },

    /// Emitted after each task's terminal event.
    BatchProgress { completed: usize, total: usize },

    /// Emitted once, after the last task (or at cancellation), with
    /// aggregate counts.
    BatchComplete {
        success_count: usize,
        fail_count: usize,
    },
}
