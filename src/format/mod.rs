//! Line Format Module
//!
//! Text encoding of a table file.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Header (line 1)                         │
//! │   name:string,age:int                   │
//! ├─────────────────────────────────────────┤
//! │ Records (lines 2..N, insertion order)   │
//! │   Alice,29                              │
//! │   Bob,30                                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! - Fields are separated by `,` and matched to header columns by position
//! - Header entries are `column:type`
//! - Every line ends with `\n`
//! - No quoting, escaping, checksum or version marker. Separators are
//!   therefore rejected inside names, types and values.

mod codec;

pub use codec::{
    decode_header, decode_record, encode_header, encode_record, FIELD_SEPARATOR,
    TYPE_SEPARATOR,
};
