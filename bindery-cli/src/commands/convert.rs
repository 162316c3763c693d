//! Implementation of the 'convert' subcommand.
//!
//! Resolves the input paths into a batch, runs it on a background worker
//! thread, and renders the pipeline's event stream as a progress bar plus a
//! final summary block. This module only consumes events; all conversion
//! state lives in bindery-core.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use owo_colors::OwoColorize;

use bindery_core::{
    ArchiveFormat, CoreConfig, Event, RarExtractor, find_comic_archives, spawn_batch,
};

use crate::cli::ConvertArgs;
use crate::error::CliResult;

/// Aggregate result of one batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSummary {
    pub success_count: usize,
    pub fail_count: usize,
}

pub fn run_convert(args: ConvertArgs) -> CliResult<BatchSummary> {
    let archives = find_comic_archives(&args.inputs);
    if archives.is_empty() {
        info!("No .cbr/.cbz archives found in the given paths.");
        return Ok(BatchSummary::default());
    }
    info!("Found {} archive(s) to convert.", archives.len());

    let config = CoreConfig {
        output_dir: args.output_dir,
        unrar_path: args.unrar,
    };
    config.validate()?;

    // Degraded-mode notice up front: .cbr archives without an unrar binary
    // fail individually while ZIP archives still convert.
    let has_rar = archives
        .iter()
        .any(|archive| ArchiveFormat::from_path(archive) == Some(ArchiveFormat::Rar));
    if has_rar && !RarExtractor::new(config.unrar_path.as_deref()).is_available() {
        warn!("No unrar binary found; .cbr archives in this batch will fail.");
    }

    let started_at = chrono::Local::now();
    info!("Conversion run started: {}", started_at.format("%Y-%m-%d %H:%M:%S"));

    let progress = ProgressBar::new(archives.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid progress template")
            .progress_chars("=> "),
    );

    let handle = spawn_batch(archives, config);

    let mut summary = BatchSummary::default();
    let mut results: Vec<(PathBuf, Result<PathBuf, String>)> = Vec::new();

    for event in &handle.events {
        match event {
            Event::TaskStarted { path } => {
                progress.set_message(display_name(&path));
            }
            Event::TaskDone { path, output_path } => {
                results.push((path, Ok(output_path)));
            }
            Event::TaskFailed { path, detail } => {
                progress.println(format!(
                    "{} {}: {}",
                    "[FAIL]".red().bold(),
                    display_name(&path),
                    detail
                ));
                results.push((path, Err(detail)));
            }
            Event::BatchProgress { completed, .. } => {
                progress.set_position(completed as u64);
            }
            Event::BatchComplete {
                success_count,
                fail_count,
            } => {
                summary.success_count = success_count;
                summary.fail_count = fail_count;
            }
        }
    }
    progress.finish_and_clear();

    let tasks = handle.join()?;

    println!("========================================");
    for (path, result) in &results {
        match result {
            Ok(output) => println!(
                "{} {} -> {}",
                "[OK]".green(),
                display_name(path),
                output.display()
            ),
            Err(detail) => println!(
                "{} {}: {}",
                "[FAIL]".red().bold(),
                display_name(path),
                detail
            ),
        }
    }
    println!("========================================");
    println!(
        "Converted {} file(s), {} failed.",
        summary.success_count.to_string().green().bold(),
        summary.fail_count
    );

    if results.len() < tasks.len() {
        info!(
            "Batch stopped early: {} task(s) were not started.",
            tasks.len() - results.len()
        );
    }

    Ok(summary)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
