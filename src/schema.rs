//! Table schema
//!
//! Ordered column definitions, fixed when a table is created and re-read
//! from the header line on every operation.

use std::collections::HashSet;
use std::fmt;

use crate::error::{FlatError, Result};

/// Characters that may not appear in a column name or type literal.
/// They are the separators of the header line.
const RESERVED_CHARS: [char; 4] = [',', ':', '\n', '\r'];

/// Declared type of a column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// `int`: fields are parsed to `i64` on read
    Int,

    /// `string`: fields are passed through unchanged
    String,

    /// Any other literal. Stored verbatim and treated like `string`.
    Other(String),
}

impl ColumnType {
    /// Parse a type literal as written in the header
    pub fn parse(literal: &str) -> Self {
        match literal {
            "int" => ColumnType::Int,
            "string" => ColumnType::String,
            other => ColumnType::Other(other.to_string()),
        }
    }

    /// The literal persisted in the header
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Int => "int",
            ColumnType::String => "string",
            ColumnType::Other(literal) => literal,
        }
    }

    /// Whether fields of this column are coerced to integers
    pub fn is_int(&self) -> bool {
        matches!(self, ColumnType::Int)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single named, typed column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub col_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, col_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            col_type,
        }
    }
}

/// Ordered list of columns
///
/// Column order is the positional order of fields in every record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Build a schema, validating column names and type literals
    ///
    /// Rejects an empty column list, empty or duplicate names, and names or
    /// types containing a header separator.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(FlatError::InvalidSchema(
                "a table needs at least one column".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.name.is_empty() {
                return Err(FlatError::InvalidSchema("empty column name".to_string()));
            }
            if column.name.contains(RESERVED_CHARS) {
                return Err(FlatError::InvalidSchema(format!(
                    "column name {:?} contains a reserved character",
                    column.name
                )));
            }
            if column.col_type.as_str().contains(RESERVED_CHARS) {
                return Err(FlatError::InvalidSchema(format!(
                    "type {:?} of column '{}' contains a reserved character",
                    column.col_type.as_str(),
                    column.name
                )));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(FlatError::InvalidSchema(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Build a schema from `(name, type literal)` pairs
    pub fn from_pairs<N, T>(pairs: &[(N, T)]) -> Result<Self>
    where
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let columns = pairs
            .iter()
            .map(|(name, ty)| Column::new(name.as_ref(), ColumnType::parse(ty.as_ref())))
            .collect();
        Self::new(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in header order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false for a validated schema
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
