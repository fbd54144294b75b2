//! Logical type descriptors as produced by the optimizer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical SQL type names known to the optimizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlTypeName {
    Boolean,
    #[serde(rename = "TINYINT")]
    TinyInt,
    #[serde(rename = "SMALLINT")]
    SmallInt,
    Integer,
    #[serde(rename = "BIGINT")]
    BigInt,
    Decimal,
    Float,
    Real,
    Double,
    Date,
    Time,
    Timestamp,

    // Intervals carry milliseconds (day-time) or months (year-month)
    IntervalYear,
    IntervalYearMonth,
    IntervalMonth,
    IntervalDay,
    IntervalDayHour,
    IntervalDayMinute,
    IntervalDaySecond,
    IntervalHour,
    IntervalHourMinute,
    IntervalHourSecond,
    IntervalMinute,
    IntervalMinuteSecond,
    IntervalSecond,

    Char,
    Varchar,
    Binary,
    Varbinary,
    Null,
    Symbol,

    // No lowering exists for these
    Any,
    Array,
    Map,
    Row,
}

impl SqlTypeName {
    /// Whether this is one of the interval (duration) types
    pub fn is_interval(&self) -> bool {
        matches!(
            self,
            SqlTypeName::IntervalYear
                | SqlTypeName::IntervalYearMonth
                | SqlTypeName::IntervalMonth
                | SqlTypeName::IntervalDay
                | SqlTypeName::IntervalDayHour
                | SqlTypeName::IntervalDayMinute
                | SqlTypeName::IntervalDaySecond
                | SqlTypeName::IntervalHour
                | SqlTypeName::IntervalHourMinute
                | SqlTypeName::IntervalHourSecond
                | SqlTypeName::IntervalMinute
                | SqlTypeName::IntervalMinuteSecond
                | SqlTypeName::IntervalSecond
        )
    }

    /// The SQL spelling of the type name
    pub fn name(&self) -> &'static str {
        match self {
            SqlTypeName::Boolean => "BOOLEAN",
            SqlTypeName::TinyInt => "TINYINT",
            SqlTypeName::SmallInt => "SMALLINT",
            SqlTypeName::Integer => "INTEGER",
            SqlTypeName::BigInt => "BIGINT",
            SqlTypeName::Decimal => "DECIMAL",
            SqlTypeName::Float => "FLOAT",
            SqlTypeName::Real => "REAL",
            SqlTypeName::Double => "DOUBLE",
            SqlTypeName::Date => "DATE",
            SqlTypeName::Time => "TIME",
            SqlTypeName::Timestamp => "TIMESTAMP",
            SqlTypeName::IntervalYear => "INTERVAL_YEAR",
            SqlTypeName::IntervalYearMonth => "INTERVAL_YEAR_MONTH",
            SqlTypeName::IntervalMonth => "INTERVAL_MONTH",
            SqlTypeName::IntervalDay => "INTERVAL_DAY",
            SqlTypeName::IntervalDayHour => "INTERVAL_DAY_HOUR",
            SqlTypeName::IntervalDayMinute => "INTERVAL_DAY_MINUTE",
            SqlTypeName::IntervalDaySecond => "INTERVAL_DAY_SECOND",
            SqlTypeName::IntervalHour => "INTERVAL_HOUR",
            SqlTypeName::IntervalHourMinute => "INTERVAL_HOUR_MINUTE",
            SqlTypeName::IntervalHourSecond => "INTERVAL_HOUR_SECOND",
            SqlTypeName::IntervalMinute => "INTERVAL_MINUTE",
            SqlTypeName::IntervalMinuteSecond => "INTERVAL_MINUTE_SECOND",
            SqlTypeName::IntervalSecond => "INTERVAL_SECOND",
            SqlTypeName::Char => "CHAR",
            SqlTypeName::Varchar => "VARCHAR",
            SqlTypeName::Binary => "BINARY",
            SqlTypeName::Varbinary => "VARBINARY",
            SqlTypeName::Null => "NULL",
            SqlTypeName::Symbol => "SYMBOL",
            SqlTypeName::Any => "ANY",
            SqlTypeName::Array => "ARRAY",
            SqlTypeName::Map => "MAP",
            SqlTypeName::Row => "ROW",
        }
    }
}

impl fmt::Display for SqlTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A logical type descriptor: type name plus optional precision.
///
/// For character and binary types the precision is the declared length.
/// `None` means the optimizer left it unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScalarType {
    pub type_name: SqlTypeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
}

impl ScalarType {
    pub fn new(type_name: SqlTypeName) -> Self {
        Self {
            type_name,
            precision: None,
        }
    }

    pub fn with_precision(type_name: SqlTypeName, precision: u32) -> Self {
        Self {
            type_name,
            precision: Some(precision),
        }
    }

    pub fn boolean() -> Self {
        Self::new(SqlTypeName::Boolean)
    }

    pub fn integer() -> Self {
        Self::new(SqlTypeName::Integer)
    }

    pub fn bigint() -> Self {
        Self::new(SqlTypeName::BigInt)
    }

    pub fn timestamp() -> Self {
        Self::new(SqlTypeName::Timestamp)
    }

    pub fn varchar(length: u32) -> Self {
        Self::with_precision(SqlTypeName::Varchar, length)
    }

    pub fn is_interval(&self) -> bool {
        self.type_name.is_interval()
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            Some(precision) => write!(f, "{}({})", self.type_name, precision),
            None => write!(f, "{}", self.type_name),
        }
    }
}
