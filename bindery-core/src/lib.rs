//! Core library for converting comic-book archives (CBR/CBZ) into PDFs.
//!
//! This crate provides archive discovery, extraction (ZIP via the `zip`
//! crate, RAR via an external `unrar` binary), deterministic page ordering,
//! PDF assembly, and an interruptible batch worker that reports progress
//! through a typed event channel.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use bindery_core::{CoreConfig, Event, find_comic_archives, spawn_batch};
//! use std::path::PathBuf;
//!
//! let archives = find_comic_archives(&[PathBuf::from("/path/to/comics")]);
//! let handle = spawn_batch(archives, CoreConfig::default());
//!
//! for event in &handle.events {
//!     match event {
//!         Event::TaskDone { path, output_path } => {
//!             println!("{} -> {}", path.display(), output_path.display());
//!         }
//!         Event::TaskFailed { path, detail } => {
//!             eprintln!("{}: {}", path.display(), detail);
//!         }
//!         _ => {}
//!     }
//! }
//! handle.join().unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod extract;
pub mod job;
pub mod pages;
pub mod pdf;
pub mod worker;

// Re-exports for public API
pub use config::CoreConfig;
pub use discovery::find_comic_archives;
pub use error::{CoreError, CoreResult};
pub use events::Event;
pub use extract::{ArchiveFormat, RarExtractor};
pub use job::{ConversionTask, JobOutcome, TaskStatus, run_job};
pub use worker::{BatchHandle, CancelFlag, OUTPUT_FOLDER_NAME, run_batch, spawn_batch};
