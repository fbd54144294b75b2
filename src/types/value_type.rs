//! Value types understood by the execution engine.

use crate::types::SqlTypeName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest inline string or binary value the engine stores, in bytes
pub const MAX_VALUE_LENGTH: u32 = 1_048_576;

/// Execution engine value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    /// Type of an untyped NULL
    Null,
    Boolean,
    #[serde(rename = "TINYINT")]
    TinyInt,
    #[serde(rename = "SMALLINT")]
    SmallInt,
    Integer,
    #[serde(rename = "BIGINT")]
    BigInt,
    Float,
    Decimal,
    /// Microseconds since the Unix epoch
    Timestamp,
    String,
    #[serde(rename = "VARBINARY")]
    VarBinary,
    /// Numeric type whose concrete width is decided at bind time.
    ///
    /// No optimizer type maps here; it only appears on parameters typed
    /// by the engine when values are bound.
    Numeric,
}

impl ValueType {
    /// Map an optimizer type name to its engine value type.
    ///
    /// Intervals become BIGINT microseconds, DATE is widened to TIMESTAMP.
    /// Returns `None` when the engine has no representation for the type.
    pub fn from_sql_type(type_name: SqlTypeName) -> Option<ValueType> {
        let vt = match type_name {
            SqlTypeName::Boolean => ValueType::Boolean,
            SqlTypeName::TinyInt => ValueType::TinyInt,
            SqlTypeName::SmallInt => ValueType::SmallInt,
            SqlTypeName::Integer => ValueType::Integer,
            SqlTypeName::BigInt => ValueType::BigInt,
            SqlTypeName::Decimal => ValueType::Decimal,
            SqlTypeName::Float | SqlTypeName::Real | SqlTypeName::Double => ValueType::Float,
            SqlTypeName::Date | SqlTypeName::Timestamp => ValueType::Timestamp,
            t if t.is_interval() => ValueType::BigInt,
            SqlTypeName::Char | SqlTypeName::Varchar | SqlTypeName::Symbol => ValueType::String,
            SqlTypeName::Binary | SqlTypeName::Varbinary => ValueType::VarBinary,
            SqlTypeName::Null => ValueType::Null,
            _ => return None,
        };
        Some(vt)
    }

    /// Storage length for fixed-width types, `None` for variable-length ones
    pub fn fixed_length(&self) -> Option<u32> {
        match self {
            ValueType::Boolean | ValueType::TinyInt => Some(1),
            ValueType::SmallInt => Some(2),
            ValueType::Integer => Some(4),
            ValueType::BigInt | ValueType::Float | ValueType::Timestamp => Some(8),
            ValueType::Decimal => Some(16),
            ValueType::Null | ValueType::Numeric | ValueType::String | ValueType::VarBinary => {
                None
            }
        }
    }

    pub fn is_variable_length(&self) -> bool {
        self.fixed_length().is_none()
    }

    /// Largest value length the type can represent, for types that have one
    pub fn max_length(&self) -> Option<u32> {
        match self {
            ValueType::String | ValueType::VarBinary => Some(MAX_VALUE_LENGTH),
            _ => self.fixed_length(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Null => "NULL",
            ValueType::Boolean => "BOOLEAN",
            ValueType::TinyInt => "TINYINT",
            ValueType::SmallInt => "SMALLINT",
            ValueType::Integer => "INTEGER",
            ValueType::BigInt => "BIGINT",
            ValueType::Float => "FLOAT",
            ValueType::Decimal => "DECIMAL",
            ValueType::Timestamp => "TIMESTAMP",
            ValueType::String => "STRING",
            ValueType::VarBinary => "VARBINARY",
            ValueType::Numeric => "NUMERIC",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
