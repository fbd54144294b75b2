//! Type vocabularies shared by both expression models.
//!
//! - `ScalarType`: the optimizer's logical type descriptor (type name + precision)
//! - `ValueType`: the execution engine's value type, with its storage lengths

pub mod sql_type;
pub mod value_type;

pub use sql_type::{ScalarType, SqlTypeName};
pub use value_type::{ValueType, MAX_VALUE_LENGTH};
