//! Table Store
//!
//! The engine behind every table operation.
//!
//! ## Responsibilities
//! - Resolve table names to files under the data directory
//! - Create tables, append records, scan with criteria, delete with rewrite
//! - Serialize access per table
//!
//! Every operation re-reads the file; nothing is cached between calls.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{FlatError, Result};
use crate::format::{decode_header, decode_record, encode_header, encode_record};
use crate::record::{Criteria, Record};
use crate::schema::Schema;
use crate::storage::{TableFile, TableLocks};

/// Flat-file table store
///
/// ## Concurrency Model: per-table Single-Writer / Multiple-Reader
///
/// - `query`/`schema` take the table's read lock
/// - `create_table`/`insert`/`delete` take the table's write lock
/// - Different tables never contend
///
/// Locks live in this process only. Two processes (or two stores) on the
/// same directory are not synchronized with each other.
pub struct TableStore {
    /// Store configuration
    config: Config,

    /// Per-table locks
    locks: TableLocks,
}

impl TableStore {
    /// Open a store with the given config
    ///
    /// Creates the data directory if it doesn't exist.
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        debug!(data_dir = %config.data_dir.display(), "opened table store");

        Ok(Self {
            config,
            locks: TableLocks::new(),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    // =========================================================================
    // Table Operations
    // =========================================================================

    /// Create a table, replacing any existing table of the same name
    ///
    /// `columns` are `(name, type)` pairs in column order. Type literals are
    /// stored verbatim; only `int` gets integer coercion on read.
    pub fn create_table<N, T>(&self, table: &str, columns: &[(N, T)]) -> Result<()>
    where
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let file = self.table_file(table)?;
        let schema = Schema::from_pairs(columns)?;

        let lock = self.locks.get(table);
        let _guard = lock.write();

        let replaced = file.create(&encode_header(&schema))?;
        if replaced {
            warn!(table, "existing table truncated by create");
        }
        info!(table, columns = schema.len(), "created table");

        Ok(())
    }

    /// Append a record
    ///
    /// The record must name exactly the table's columns, in any order.
    /// Values are written in header order.
    pub fn insert(&self, table: &str, record: &Record) -> Result<()> {
        let file = self.table_file(table)?;

        let lock = self.locks.get(table);
        let _guard = lock.write();

        let schema = decode_header(&file.read_header()?)?;
        let line = encode_record(&schema, record)?;
        file.append_line(&line)?;

        debug!(table, "inserted record");
        Ok(())
    }

    /// Return all records matching `criteria`, in file order
    ///
    /// `None` or an empty criteria returns every record.
    pub fn query(&self, table: &str, criteria: Option<&Criteria>) -> Result<Vec<Record>> {
        let file = self.table_file(table)?;

        let lock = self.locks.get(table);
        let _guard = lock.read();

        let contents = file.read_all()?;
        let schema = decode_header(&contents.header)?;
        if let Some(criteria) = criteria {
            check_criteria(&schema, criteria)?;
        }

        let mut records = Vec::new();
        for (i, line) in contents.lines.iter().enumerate() {
            let record = decode_record(&schema, line, i + 2)?;
            if criteria.map_or(true, |c| c.matches(&record)) {
                records.push(record);
            }
        }

        debug!(
            table,
            scanned = contents.lines.len(),
            matched = records.len(),
            "query complete"
        );
        Ok(records)
    }

    /// Remove every record matching all of `criteria`
    ///
    /// Surviving lines are written back verbatim, in order. An empty criteria
    /// removes nothing. Returns the number of records removed.
    pub fn delete(&self, table: &str, criteria: &Criteria) -> Result<usize> {
        let file = self.table_file(table)?;

        let lock = self.locks.get(table);
        let _guard = lock.write();

        let contents = file.read_all()?;
        let schema = decode_header(&contents.header)?;
        check_criteria(&schema, criteria)?;

        // Empty criteria removes nothing
        let mut kept: Vec<&str> = Vec::with_capacity(contents.lines.len());
        for (i, line) in contents.lines.iter().enumerate() {
            let record = decode_record(&schema, line, i + 2)?;
            if criteria.is_empty() || !criteria.matches(&record) {
                kept.push(line.as_str());
            }
        }

        let removed = contents.lines.len() - kept.len();
        file.rewrite(&contents.header, kept)?;

        info!(table, removed, "deleted records");
        Ok(removed)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Read a table's schema from its header
    pub fn schema(&self, table: &str) -> Result<Schema> {
        let file = self.table_file(table)?;

        let lock = self.locks.get(table);
        let _guard = lock.read();

        decode_header(&file.read_header()?)
    }

    /// Whether the table's file exists
    pub fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(self.table_file(table)?.exists())
    }

    /// Names of all tables in the data directory, sorted
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let ext = self.config.file_extension.as_str();
        let mut tables = Vec::new();

        for entry in fs::read_dir(&self.config.data_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(stem) = file_name.strip_suffix(ext) {
                if validate_table_name(stem).is_ok() {
                    tables.push(stem.to_string());
                }
            }
        }

        tables.sort();
        Ok(tables)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Path of a table's backing file
    pub fn table_path(&self, table: &str) -> Result<PathBuf> {
        validate_table_name(table)?;
        Ok(self
            .config
            .data_dir
            .join(format!("{}{}", table, self.config.file_extension)))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn table_file(&self, table: &str) -> Result<TableFile> {
        let path = self.table_path(table)?;
        Ok(TableFile::new(table, path, self.config.sync_strategy))
    }
}

/// A table name must be usable as a plain file stem
fn validate_table_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(FlatError::InvalidTableName(name.to_string()));
    }
    Ok(())
}

/// Every criteria column must exist in the schema
fn check_criteria(schema: &Schema, criteria: &Criteria) -> Result<()> {
    match criteria.columns().find(|column| !schema.contains(column)) {
        Some(column) => Err(FlatError::UnknownColumn(column.to_string())),
        None => Ok(()),
    }
}
