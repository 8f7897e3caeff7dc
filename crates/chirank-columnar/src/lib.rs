//! Bit-packed columnar encoding of categorical records.
//!
//! Records stream through [`row::Row::decode`] into a [`store::ColumnStore`],
//! which keeps one [`bit_column::BitColumn`] per attribute plus one for the
//! label. An attribute stays in the store only while every value seen so far
//! is `0` or `1`; the first other value disqualifies it for good.

pub use self::{
    bit_column::BitColumn,
    row::{Row, Ternary},
    schema::{AttributeId, Schema},
    store::{Binarity, ColumnId, ColumnStore},
};

pub mod bit_column;
pub mod row;
pub mod schema;
pub mod store;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SchemaError {
    #[display(
        "schema width {width} is too narrow: at least {min} columns (one attribute and the label) are required"
    )]
    TooNarrow { width: usize, min: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AppendError {
    #[display("attribute {attribute} is disqualified and its column is frozen")]
    Disqualified { attribute: AttributeId },
    #[display("attribute {attribute} is outside the schema")]
    UnknownAttribute { attribute: AttributeId },
    #[display("attribute {attribute} already holds a bit for each of the {rows} rows")]
    RowOutOfStep { attribute: AttributeId, rows: usize },
}
