//! Tests for TableFile and TableLocks
//!
//! These tests verify:
//! - Create/truncate and header writing
//! - Appends, including onto files without a trailing newline
//! - Reads of header and record lines
//! - Atomic rewrite leaves no temp file behind
//! - Lock registry hands out one lock per table

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use flatstore::config::SyncStrategy;
use flatstore::storage::{TableContents, TableFile, TableLocks};
use flatstore::FlatError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file(name: &str) -> (TempDir, PathBuf, TableFile) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(format!("{}.csv", name));
    let file = TableFile::new(name, &path, SyncStrategy::EveryWrite);
    (temp_dir, path, file)
}

// =============================================================================
// Create Tests
// =============================================================================

#[test]
fn test_create_new_file() {
    let (_temp, path, file) = setup_temp_file("t");

    let replaced = file.create("a:int").unwrap();

    assert!(!replaced);
    assert!(file.exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "a:int\n");
}

#[test]
fn test_create_replaces_existing_file() {
    let (_temp, path, file) = setup_temp_file("t");
    fs::write(&path, "old:int\n1\n2\n").unwrap();

    let replaced = file.create("new:string").unwrap();

    assert!(replaced);
    assert_eq!(fs::read_to_string(&path).unwrap(), "new:string\n");
}

#[test]
fn test_create_in_missing_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no_such_dir").join("t.csv");
    let file = TableFile::new("t", &path, SyncStrategy::OsBuffered);

    assert!(matches!(file.create("a:int"), Err(FlatError::Io(_))));
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_append_lines() {
    let (_temp, path, file) = setup_temp_file("t");
    file.create("a:int").unwrap();

    file.append_line("1").unwrap();
    file.append_line("2").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a:int\n1\n2\n");
}

#[test]
fn test_append_to_missing_file() {
    let (_temp, path, file) = setup_temp_file("ghost");

    let result = file.append_line("1");

    assert!(matches!(result, Err(FlatError::TableNotFound(name)) if name == "ghost"));
    assert!(!path.exists());
}

#[test]
fn test_append_adds_missing_terminator() {
    let (_temp, path, file) = setup_temp_file("t");
    fs::write(&path, "a:int\n1").unwrap();

    file.append_line("2").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a:int\n1\n2\n");
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_all() {
    let (_temp, path, file) = setup_temp_file("t");
    fs::write(&path, "a:int\n1\n2\n").unwrap();

    let contents = file.read_all().unwrap();

    assert_eq!(
        contents,
        TableContents {
            header: "a:int".to_string(),
            lines: vec!["1".to_string(), "2".to_string()],
        }
    );
}

#[test]
fn test_read_all_header_only() {
    let (_temp, path, file) = setup_temp_file("t");
    fs::write(&path, "a:int\n").unwrap();

    let contents = file.read_all().unwrap();

    assert_eq!(contents.header, "a:int");
    assert!(contents.lines.is_empty());
}

#[test]
fn test_read_header() {
    let (_temp, path, file) = setup_temp_file("t");
    fs::write(&path, "a:int,b:string\r\n1,x\n").unwrap();

    assert_eq!(file.read_header().unwrap(), "a:int,b:string");
}

#[test]
fn test_read_missing_file() {
    let (_temp, _path, file) = setup_temp_file("ghost");

    assert!(matches!(file.read_all(), Err(FlatError::TableNotFound(_))));
    assert!(matches!(file.read_header(), Err(FlatError::TableNotFound(_))));
}

#[test]
fn test_read_empty_file() {
    let (_temp, path, file) = setup_temp_file("t");
    fs::write(&path, "").unwrap();

    assert!(matches!(file.read_all(), Err(FlatError::CorruptHeader(_))));
    assert!(matches!(file.read_header(), Err(FlatError::CorruptHeader(_))));
}

// =============================================================================
// Rewrite Tests
// =============================================================================

#[test]
fn test_rewrite_replaces_contents() {
    let (temp, path, file) = setup_temp_file("t");
    fs::write(&path, "a:int\n1\n2\n3\n").unwrap();

    file.rewrite("a:int", ["1", "3"]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a:int\n1\n3\n");
    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_rewrite_with_no_lines() {
    let (_temp, path, file) = setup_temp_file("t");
    fs::write(&path, "a:int\n1\n").unwrap();

    file.rewrite("a:int", std::iter::empty()).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a:int\n");
}

// =============================================================================
// Lock Registry Tests
// =============================================================================

#[test]
fn test_locks_shared_per_table() {
    let locks = TableLocks::new();

    let a1 = locks.get("a");
    let a2 = locks.get("a");
    let b = locks.get("b");

    assert!(Arc::ptr_eq(&a1, &a2));
    assert!(!Arc::ptr_eq(&a1, &b));
    assert_eq!(locks.len(), 2);
}

#[test]
fn test_locks_exclude_writer_while_reading() {
    let locks = TableLocks::new();
    let lock = locks.get("users");

    let read_guard = lock.read();
    assert!(lock.try_write().is_none());
    assert!(lock.try_read().is_some());
    drop(read_guard);

    assert!(lock.try_write().is_some());
}
