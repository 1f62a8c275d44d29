//! Line codec
//!
//! Encoding and decoding of header and record lines.
//!
//! Lines passed to the decoders have had their terminator removed.

use crate::error::{FlatError, Result};
use crate::record::{Record, Value};
use crate::schema::{Column, ColumnType, Schema};

/// Separates fields within a line
pub const FIELD_SEPARATOR: char = ',';

/// Separates a column name from its type in the header
pub const TYPE_SEPARATOR: char = ':';

/// Characters a stored value may not contain
const VALUE_RESERVED: [char; 3] = [FIELD_SEPARATOR, '\n', '\r'];

// =============================================================================
// Header
// =============================================================================

/// Encode a schema as `name:type,name:type,...`
pub fn encode_header(schema: &Schema) -> String {
    schema
        .columns()
        .iter()
        .map(|c| format!("{}{}{}", c.name, TYPE_SEPARATOR, c.col_type))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode a header line back into a schema
pub fn decode_header(line: &str) -> Result<Schema> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Err(FlatError::CorruptHeader("empty header line".to_string()));
    }

    let mut columns = Vec::new();
    for entry in line.split(FIELD_SEPARATOR) {
        let (name, ty) = entry.split_once(TYPE_SEPARATOR).ok_or_else(|| {
            FlatError::CorruptHeader(format!("entry {:?} has no column type", entry))
        })?;
        columns.push(Column::new(name, ColumnType::parse(ty)));
    }

    Schema::new(columns).map_err(|e| match e {
        FlatError::InvalidSchema(reason) => FlatError::CorruptHeader(reason),
        other => other,
    })
}

// =============================================================================
// Records
// =============================================================================

/// Encode a record as one line in header column order
///
/// The record must have exactly the schema's columns (any order). Values for
/// `int` columns must be integers or integer strings, and no value may
/// contain a separator.
pub fn encode_record(schema: &Schema, record: &Record) -> Result<String> {
    let missing: Vec<String> = schema
        .column_names()
        .filter(|name| !record.contains(name))
        .map(str::to_string)
        .collect();
    let unexpected: Vec<String> = record
        .columns()
        .filter(|name| !schema.contains(name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(FlatError::SchemaMismatch {
            missing,
            unexpected,
        });
    }

    let mut fields = Vec::with_capacity(schema.len());
    for column in schema.columns() {
        let value = record
            .get(&column.name)
            .ok_or_else(|| FlatError::UnknownColumn(column.name.clone()))?;
        let rendered = value.to_string();

        if rendered.contains(VALUE_RESERVED) {
            return Err(FlatError::InvalidValue {
                column: column.name.clone(),
                value: rendered,
            });
        }
        if column.col_type.is_int() && rendered.parse::<i64>().is_err() {
            return Err(FlatError::TypeMismatch {
                column: column.name.clone(),
                value: rendered,
            });
        }

        fields.push(rendered);
    }

    Ok(fields.join(","))
}

/// Decode a record line against the schema
///
/// `line_no` is the 1-based line number in the file, used in errors.
pub fn decode_record(schema: &Schema, line: &str, line_no: usize) -> Result<Record> {
    let line = line.trim_end_matches('\r');
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

    if fields.len() != schema.len() {
        return Err(FlatError::MalformedRecord {
            line: line_no,
            reason: format!(
                "expected {} fields, found {}",
                schema.len(),
                fields.len()
            ),
        });
    }

    let mut record = Record::new();
    for (column, field) in schema.columns().iter().zip(fields) {
        let value = if column.col_type.is_int() {
            let n = field.parse::<i64>().map_err(|_| FlatError::MalformedRecord {
                line: line_no,
                reason: format!("column '{}': {:?} is not an integer", column.name, field),
            })?;
            Value::Int(n)
        } else {
            Value::Str(field.to_string())
        };
        record.set(column.name.clone(), value);
    }

    Ok(record)
}
