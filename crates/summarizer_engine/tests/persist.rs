use std::fs;

use summarizer_engine::{ensure_output_dir, AtomicFileWriter, DownloadWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("summary.txt", "hello").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("summary.txt", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() != "summary.txt")
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn rejects_names_with_path_separators() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let err = writer.write("../escape.txt", "x").unwrap_err();
    assert!(matches!(err, PersistError::InvalidName(_)));
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("summary.txt", "data");
    assert!(matches!(result, Err(PersistError::OutputDir(_))));
    assert!(!file_path.with_file_name("summary.txt").exists());
}

#[test]
fn download_writer_names_file_after_model() {
    let temp = TempDir::new().unwrap();
    let downloads = DownloadWriter::new(temp.path().join("out"));

    let with_model = downloads.save(Some("t5"), "Hi.").unwrap();
    assert_eq!(with_model.file_name().unwrap(), "summary_t5.txt");
    assert_eq!(
        fs::read_to_string(&with_model).unwrap(),
        "Model: T5\n\nSummary:\nHi."
    );

    let bare = downloads.save(None, "Hi.").unwrap();
    assert_eq!(bare.file_name().unwrap(), "summary.txt");
    assert_eq!(fs::read_to_string(&bare).unwrap(), "Hi.");
}
