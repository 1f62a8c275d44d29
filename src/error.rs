//! Error types for flatstore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FlatError
pub type Result<T> = std::result::Result<T, FlatError>;

/// Unified error type for flatstore operations
#[derive(Debug, Error)]
pub enum FlatError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    // -------------------------------------------------------------------------
    // On-disk Format Errors
    // -------------------------------------------------------------------------
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Corrupt table header: {0}")]
    CorruptHeader(String),

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Record does not match schema (missing: {missing:?}, unexpected: {unexpected:?})")]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Column '{column}' is declared int, got {value:?}")]
    TypeMismatch { column: String, value: String },

    #[error("Value for column '{column}' contains a separator: {value:?}")]
    InvalidValue { column: String, value: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    // -------------------------------------------------------------------------
    // Front-end Errors
    // -------------------------------------------------------------------------
    #[error("Parse error: {0}")]
    Parse(String),
}
