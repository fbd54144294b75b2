//! Operator vocabulary of scalar calls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operators a call can apply.
///
/// Every operator with dedicated lowering has its own variant. Library and
/// user functions go through `Function`; anything the optimizer can emit
/// that has no lowering is carried as `Unsupported` with its kind name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    // Logical
    And,
    Or,
    Not,

    // Comparison
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Like,

    // Arithmetic
    Plus,
    Minus,
    Times,
    Divide,

    /// datetime + interval
    DatetimePlus,
    /// datetime - interval
    DatetimeMinus,

    Cast,
    IsNull,
    IsNotNull,
    Exists,
    Case,

    /// String concatenation, `||`
    Concat,

    /// Named scalar function
    Function(String),

    /// Operator kind without a lowering (e.g. `MOD`, `IS DISTINCT FROM`)
    Unsupported(String),
}

impl Operator {
    pub fn function(name: impl Into<String>) -> Self {
        Operator::Function(name.into())
    }

    /// Get the display string for this operator
    pub fn name(&self) -> &str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::Equals => "=",
            Operator::NotEquals => "<>",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Like => "LIKE",
            Operator::Plus | Operator::DatetimePlus => "+",
            Operator::Minus | Operator::DatetimeMinus => "-",
            Operator::Times => "*",
            Operator::Divide => "/",
            Operator::Cast => "CAST",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::Exists => "EXISTS",
            Operator::Case => "CASE",
            Operator::Concat => "||",
            Operator::Function(name) | Operator::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
