//! # flatstore
//!
//! A minimal flat-file record store with:
//! - One delimited text file per table, typed schema on the first line
//! - Append-only inserts validated against the schema
//! - Equality-conjunction queries
//! - Deletes by atomic whole-file rewrite
//! - Per-table single-writer/multi-reader locking
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 CLI / Shell (flatstore-cli)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      TableStore                              │
//! │        create_table / insert / query / delete                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   format    │          │   storage   │
//!   │ (line codec)│          │ (TableFile, │
//!   └─────────────┘          │  locks)     │
//!                            └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use flatstore::{Criteria, Record, TableStore};
//!
//! let store = TableStore::open_path(std::path::Path::new("./data"))?;
//! store.create_table("users", &[("name", "string"), ("age", "int")])?;
//! store.insert("users", &Record::new().with("name", "Alice").with("age", 29))?;
//!
//! let found = store.query("users", Some(&Criteria::new().with("age", 29)))?;
//! assert_eq!(found.len(), 1);
//! # Ok::<(), flatstore::FlatError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod schema;
pub mod record;
pub mod format;
pub mod storage;
pub mod store;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FlatError, Result};
pub use config::{Config, SyncStrategy};
pub use record::{Criteria, Record, Value};
pub use schema::{Column, ColumnType, Schema};
pub use store::TableStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of flatstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
