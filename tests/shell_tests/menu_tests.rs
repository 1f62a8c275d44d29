//! Tests for the interactive menu
//!
//! Drives `Shell` with scripted input and checks both the printed output
//! and the resulting table state.

use std::io::Cursor;

use flatstore::shell::{MenuChoice, Shell};
use flatstore::{Record, TableStore};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn run_script(store: &TableStore, script: &str) -> String {
    let mut output = Vec::new();
    Shell::new(store, Cursor::new(script.as_bytes()), &mut output)
        .run()
        .unwrap();
    String::from_utf8(output).unwrap()
}

fn setup_temp_store() -> (TempDir, TableStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = TableStore::open_path(temp_dir.path()).unwrap();
    (temp_dir, store)
}

// =============================================================================
// Menu Tests
// =============================================================================

#[test]
fn test_menu_choice_parse() {
    assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::CreateTable));
    assert_eq!(MenuChoice::parse(" 4 "), Some(MenuChoice::Delete));
    assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
    assert_eq!(MenuChoice::parse("6"), None);
    assert_eq!(MenuChoice::parse(""), None);
}

#[test]
fn test_exit_immediately() {
    let (_temp, store) = setup_temp_store();

    let output = run_script(&store, "5\n");

    assert!(output.contains("1. Create Table"));
    assert!(output.ends_with("Goodbye!\n"));
}

#[test]
fn test_end_of_input_stops_loop() {
    let (_temp, store) = setup_temp_store();

    let output = run_script(&store, "");

    assert!(!output.contains("Goodbye!"));
}

#[test]
fn test_invalid_choice_loops() {
    let (_temp, store) = setup_temp_store();

    let output = run_script(&store, "9\n5\n");

    assert!(output.contains("Invalid choice. Please choose a valid option."));
    assert!(output.contains("Goodbye!"));
}

#[test]
fn test_full_session() {
    let (_temp, store) = setup_temp_store();
    let script = "\
1\nusers\nname:string,age:int\n\
2\nusers\nname=Alice,age=29\n\
2\nusers\nname=Bob,age=30\n\
3\nusers\nage=30\n\
4\nusers\nname=Alice\n\
3\nusers\n\n\
5\n";

    let output = run_script(&store, script);

    assert!(output.contains("Table 'users' created successfully!"));
    assert!(output.contains("Record inserted into 'users' successfully!"));
    assert!(output.contains("1 record(s) deleted from 'users'."));
    assert_eq!(output.matches(r#"{name: "Bob", age: 30}"#).count(), 2);
    assert!(!output.contains(r#"{name: "Alice""#));

    let records = store.query("users", None).unwrap();
    assert_eq!(records, vec![Record::new().with("name", "Bob").with("age", 30)]);
}

#[test]
fn test_errors_are_printed_and_loop_continues() {
    let (_temp, store) = setup_temp_store();
    let script = "\
3\nghost\n\n\
1\nbad\nnocolon\n\
5\n";

    let output = run_script(&store, script);

    assert!(output.contains("Error: Table not found: ghost"));
    assert!(output.contains("Error: Parse error"));
    assert!(output.contains("Goodbye!"));
    assert!(!store.table_exists("bad").unwrap());
}

#[test]
fn test_insert_schema_mismatch_is_reported() {
    let (_temp, store) = setup_temp_store();
    store
        .create_table("users", &[("name", "string"), ("age", "int")])
        .unwrap();

    let output = run_script(&store, "2\nusers\nname=Alice\n5\n");

    assert!(output.contains("Error: Record does not match schema"));
    assert!(store.query("users", None).unwrap().is_empty());
}
