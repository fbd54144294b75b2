//! Literal values.

use crate::types::{ScalarType, SqlTypeName};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every literal representation the optimizer produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralValue {
    /// Character string, already unescaped
    Char(String),

    /// Exact numeric. Also used for intervals, in milliseconds or months.
    Decimal(BigDecimal),

    /// Calendar value with millisecond precision (DATE and TIMESTAMP)
    Timestamp(DateTime<Utc>),

    Binary(Vec<u8>),

    Boolean(bool),

    /// Flag literal such as a time unit argument
    Symbol(String),

    Null,
}

/// Literal with its declared type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RexLiteral {
    pub value: LiteralValue,
    pub ty: ScalarType,
}

impl RexLiteral {
    pub fn new(value: LiteralValue, ty: ScalarType) -> Self {
        Self { value, ty }
    }

    pub fn null(ty: ScalarType) -> Self {
        Self::new(LiteralValue::Null, ty)
    }

    pub fn string(val: impl Into<String>) -> Self {
        let val = val.into();
        let length = val.chars().count() as u32;
        Self::new(
            LiteralValue::Char(val),
            ScalarType::with_precision(SqlTypeName::Char, length),
        )
    }

    pub fn integer(val: i64) -> Self {
        Self::new(
            LiteralValue::Decimal(BigDecimal::from(val)),
            ScalarType::integer(),
        )
    }

    pub fn decimal(val: BigDecimal, ty: ScalarType) -> Self {
        Self::new(LiteralValue::Decimal(val), ty)
    }

    pub fn boolean(val: bool) -> Self {
        Self::new(LiteralValue::Boolean(val), ScalarType::boolean())
    }

    pub fn timestamp(val: DateTime<Utc>) -> Self {
        Self::new(LiteralValue::Timestamp(val), ScalarType::timestamp())
    }

    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let length = bytes.len() as u32;
        Self::new(
            LiteralValue::Binary(bytes),
            ScalarType::with_precision(SqlTypeName::Binary, length),
        )
    }
}
