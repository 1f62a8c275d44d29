//! Storage Module
//!
//! File-level persistence for tables.
//!
//! ## Responsibilities
//! - Resolve a table to its backing file
//! - Create/truncate, append, and read table files
//! - Atomic whole-file rewrite (temp file + rename)
//! - Per-table reader/writer locks
//!
//! ## Layout
//! ```text
//! {data_dir}/
//!   ├── users.csv        (table "users")
//!   ├── users.csv.tmp    (only during a rewrite)
//!   └── orders.csv
//! ```

mod locks;
mod table_file;

pub use locks::TableLocks;
pub use table_file::{TableContents, TableFile};
