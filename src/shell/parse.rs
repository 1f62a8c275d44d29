//! Input syntax parsing
//!
//! - Column lists: `name:type,name:type,...`
//! - Assignments:  `name=value,name=value,...`
//!
//! Whitespace around names, types and values is trimmed.

use crate::error::{FlatError, Result};
use crate::record::{Criteria, Record, Value};
use crate::schema::Schema;

/// Parse `name:type,...` into `(name, type)` pairs
pub fn parse_columns(input: &str) -> Result<Vec<(String, String)>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FlatError::Parse("no columns given".to_string()));
    }

    input
        .split(',')
        .map(|entry| {
            let (name, ty) = entry.split_once(':').ok_or_else(|| {
                FlatError::Parse(format!("expected name:type, got {:?}", entry.trim()))
            })?;
            let (name, ty) = (name.trim(), ty.trim());
            if name.is_empty() || ty.is_empty() {
                return Err(FlatError::Parse(format!(
                    "expected name:type, got {:?}",
                    entry.trim()
                )));
            }
            Ok((name.to_string(), ty.to_string()))
        })
        .collect()
}

/// Parse `name=value,...` into `(name, raw value)` pairs
///
/// Blank input yields no pairs. Values may contain `=`; only the first one
/// splits name from value.
pub fn parse_assignments(input: &str) -> Result<Vec<(String, String)>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }

    input
        .split(',')
        .map(|entry| {
            let (name, value) = entry.split_once('=').ok_or_else(|| {
                FlatError::Parse(format!("expected name=value, got {:?}", entry.trim()))
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(FlatError::Parse(format!(
                    "missing column name in {:?}",
                    entry.trim()
                )));
            }
            Ok((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Type raw values against a schema
///
/// Columns the schema doesn't know are passed through as strings so the
/// store can report them.
fn typed<'a>(
    schema: &'a Schema,
    pairs: &'a [(String, String)],
) -> impl Iterator<Item = (String, Value)> + 'a {
    pairs.iter().map(move |(name, raw)| {
        let value = match schema.column(name) {
            Some(column) => Value::coerce(raw, &column.col_type),
            None => Value::Str(raw.clone()),
        };
        (name.clone(), value)
    })
}

/// Build a record from parsed assignments
pub fn typed_record(schema: &Schema, pairs: &[(String, String)]) -> Record {
    typed(schema, pairs).collect()
}

/// Build criteria from parsed assignments
pub fn typed_criteria(schema: &Schema, pairs: &[(String, String)]) -> Criteria {
    typed(schema, pairs).collect()
}
