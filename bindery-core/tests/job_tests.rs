// bindery-core/tests/job_tests.rs
//
// State machine tests for single-archive conversion: success, idempotent
// skip, failure paths, and the scratch-cleanup invariant.

mod common;

use std::fs;
use std::path::Path;

use bindery_core::extract::RarExtractor;
use bindery_core::{ConversionTask, TaskStatus, run_job};
use tempfile::tempdir;

fn no_rar() -> RarExtractor {
    // Extractor that resolves to nothing, for deterministic .cbr failures.
    RarExtractor::new(Some(Path::new("/no/such/unrar/binary")))
}

fn scratch_path(source: &Path) -> std::path::PathBuf {
    let stem = source.file_stem().unwrap().to_string_lossy();
    source.parent().unwrap().join(format!("{stem}_temp"))
}

#[test]
fn successful_conversion_produces_pdf_and_cleans_scratch(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("issue_01.cbz");
    common::build_pages_cbz(&source, &["p1.png", "p2.png", "p3.png"]);
    let output_dir = dir.path().join("out");
    fs::create_dir(&output_dir)?;

    let mut task = ConversionTask::new(source.clone(), output_dir.clone());
    let outcome = run_job(&mut task, &no_rar());

    assert_eq!(outcome.status, TaskStatus::Done);
    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(outcome.pages, 3);
    assert!(!outcome.skipped);

    let pdf_path = output_dir.join("issue_01.pdf");
    assert_eq!(task.result_path.as_deref(), Some(pdf_path.as_path()));
    let pdf_bytes = fs::read(&pdf_path)?;
    assert!(pdf_bytes.starts_with(b"%PDF"));

    assert!(!scratch_path(&source).exists());
    Ok(())
}

#[test]
fn existing_output_short_circuits_to_done() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("issue_02.cbz");
    // Deliberately corrupt: the job must never open it on the skip path.
    fs::write(&source, b"not a zip at all")?;
    let output_dir = dir.path().join("out");
    fs::create_dir(&output_dir)?;

    let marker = output_dir.join("issue_02.pdf");
    fs::write(&marker, b"pre-existing")?;

    let mut task = ConversionTask::new(source.clone(), output_dir);
    let outcome = run_job(&mut task, &no_rar());

    assert_eq!(outcome.status, TaskStatus::Done);
    assert!(outcome.skipped);
    assert!(!scratch_path(&source).exists());
    // The marker file itself is untouched.
    assert_eq!(fs::read(&marker)?, b"pre-existing");
    Ok(())
}

#[test]
fn corrupt_archive_fails_with_detail_and_no_scratch(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("broken.cbz");
    fs::write(&source, b"garbage bytes, not a container")?;
    let output_dir = dir.path().join("out");
    fs::create_dir(&output_dir)?;

    let mut task = ConversionTask::new(source.clone(), output_dir.clone());
    let outcome = run_job(&mut task, &no_rar());

    assert_eq!(outcome.status, TaskStatus::Failed);
    assert_eq!(task.status, TaskStatus::Failed);
    let detail = outcome.error_detail.expect("failure carries detail");
    assert!(detail.contains("extraction failed"), "detail: {detail}");

    assert!(!scratch_path(&source).exists());
    assert!(!output_dir.join("broken.pdf").exists());
    Ok(())
}

#[test]
fn archive_without_images_fails_and_cleans_up() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("textonly.cbz");
    common::build_cbz(&source, &[("readme.txt", b"no pages here".to_vec())]);
    let output_dir = dir.path().join("out");
    fs::create_dir(&output_dir)?;

    let mut task = ConversionTask::new(source.clone(), output_dir.clone());
    let outcome = run_job(&mut task, &no_rar());

    assert_eq!(outcome.status, TaskStatus::Failed);
    let detail = outcome.error_detail.expect("failure carries detail");
    assert!(detail.contains("no images found"), "detail: {detail}");

    assert!(!scratch_path(&source).exists());
    assert!(!output_dir.join("textonly.pdf").exists());
    Ok(())
}

#[test]
fn unsupported_format_fails_immediately() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("document.pdf");
    fs::write(&source, b"whatever")?;
    let output_dir = dir.path().join("out");
    fs::create_dir(&output_dir)?;

    let mut task = ConversionTask::new(source.clone(), output_dir);
    let outcome = run_job(&mut task, &no_rar());

    assert_eq!(outcome.status, TaskStatus::Failed);
    assert!(
        outcome
            .error_detail
            .expect("failure carries detail")
            .contains("unsupported archive format")
    );
    assert!(!scratch_path(&source).exists());
    Ok(())
}

#[test]
fn rar_without_unrar_binary_fails_per_task() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("issue.cbr");
    fs::write(&source, b"Rar!\x1a\x07\x00 pretend")?;
    let output_dir = dir.path().join("out");
    fs::create_dir(&output_dir)?;

    let mut task = ConversionTask::new(source.clone(), output_dir);
    let outcome = run_job(&mut task, &no_rar());

    assert_eq!(outcome.status, TaskStatus::Failed);
    let detail = outcome.error_detail.expect("failure carries detail");
    assert!(detail.contains("unrar"), "detail: {detail}");
    assert!(!scratch_path(&source).exists());
    Ok(())
}

#[test]
fn rerun_after_success_does_no_extraction_work() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("issue_03.cbz");
    common::build_pages_cbz(&source, &["p1.png"]);
    let output_dir = dir.path().join("out");
    fs::create_dir(&output_dir)?;

    let mut first = ConversionTask::new(source.clone(), output_dir.clone());
    assert_eq!(run_job(&mut first, &no_rar()).status, TaskStatus::Done);
    let pdf_bytes = fs::read(output_dir.join("issue_03.pdf"))?;

    // Corrupt the archive; the second run must not notice because it
    // short-circuits on the existing output.
    fs::write(&source, b"now corrupted")?;

    let mut second = ConversionTask::new(source.clone(), output_dir.clone());
    let outcome = run_job(&mut second, &no_rar());

    assert_eq!(outcome.status, TaskStatus::Done);
    assert!(outcome.skipped);
    assert_eq!(fs::read(output_dir.join("issue_03.pdf"))?, pdf_bytes);
    assert!(!scratch_path(&source).exists());
    Ok(())
}
