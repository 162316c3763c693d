// bindery-core/tests/discovery_tests.rs

use std::fs::{self, File};
use std::path::PathBuf;

use bindery_core::find_comic_archives;
use tempfile::tempdir;

#[test]
fn finds_archives_recursively_and_sorted() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();

    File::create(root.join("beta.cbz"))?;
    File::create(root.join("alpha.CBR"))?; // case-insensitive extension
    File::create(root.join("notes.txt"))?;
    fs::create_dir(root.join("nested"))?;
    File::create(root.join("nested").join("gamma.cbz"))?;

    let found = find_comic_archives(&[root.to_path_buf()]);

    assert_eq!(found.len(), 3);
    assert_eq!(found[0].file_name().unwrap(), "alpha.CBR");
    assert_eq!(found[1].file_name().unwrap(), "beta.cbz");
    assert_eq!(found[2].file_name().unwrap(), "gamma.cbz");

    dir.close()?;
    Ok(())
}

#[test]
fn direct_file_inputs_filtered_by_extension() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let comic = dir.path().join("bar.cbz");
    let other = dir.path().join("foo.txt");
    File::create(&comic)?;
    File::create(&other)?;

    let found = find_comic_archives(&[other, comic.clone()]);

    assert_eq!(found, vec![comic]);
    Ok(())
}

#[test]
fn duplicate_inputs_are_deduplicated() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let comic = dir.path().join("issue.cbz");
    File::create(&comic)?;

    // Same archive reachable both directly and through its directory.
    let found = find_comic_archives(&[comic.clone(), dir.path().to_path_buf(), comic.clone()]);

    assert_eq!(found, vec![comic]);
    Ok(())
}

#[test]
fn empty_result_for_no_matches() {
    let found = find_comic_archives(&[PathBuf::from("does_not_exist_anywhere.txt")]);
    assert!(found.is_empty());
}
