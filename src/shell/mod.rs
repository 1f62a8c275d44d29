//! Shell Module
//!
//! Text front end over the table store.
//!
//! ## Responsibilities
//! - Parse `name:type,...` column lists and `name=value,...` assignments
//! - Type raw values against a table's schema
//! - Run the numbered interactive menu
//!
//! Holds no engine logic; everything goes through `TableStore`.

mod menu;
mod parse;

pub use menu::{MenuChoice, Shell};
pub use parse::{parse_assignments, parse_columns, typed_criteria, typed_record};
