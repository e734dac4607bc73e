//! Projecting raw metadata onto caller-defined record types.

mod builtin;
mod table;

pub use table::{FieldScope, FieldTable, MetaCodec, Tables};
