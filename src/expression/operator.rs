//! Operator definitions for engine expressions.

use serde::{Deserialize, Serialize};

/// Binary operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl BinaryOperator {
    /// Comparisons produce booleans, arithmetic produces numbers
    pub fn is_comparison(&self) -> bool {
        !matches!(
            self,
            BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Div
        )
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Eq => "=",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Like => "LIKE",
        }
    }
}

/// Unary operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    /// Conversion to the node's own value type
    Cast,
    Not,
    IsNull,
    Exists,
}

impl UnaryOperator {
    pub fn is_predicate(&self) -> bool {
        !matches!(self, UnaryOperator::Cast)
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Cast => "CAST",
            UnaryOperator::Not => "NOT",
            UnaryOperator::IsNull => "IS NULL",
            UnaryOperator::Exists => "EXISTS",
        }
    }
}

/// Boolean connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConjunctionOperator {
    And,
    Or,
}

impl ConjunctionOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConjunctionOperator::And => "AND",
            ConjunctionOperator::Or => "OR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_kinds() {
        assert!(BinaryOperator::Eq.is_comparison());
        assert!(BinaryOperator::Like.is_comparison());
        assert!(!BinaryOperator::Add.is_comparison());
        assert!(!BinaryOperator::Div.is_comparison());

        assert!(UnaryOperator::IsNull.is_predicate());
        assert!(!UnaryOperator::Cast.is_predicate());
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(BinaryOperator::Add.as_str(), "+");
        assert_eq!(BinaryOperator::Eq.as_str(), "=");
        assert_eq!(BinaryOperator::Ne.as_str(), "!=");
        assert_eq!(ConjunctionOperator::And.as_str(), "AND");

        assert_eq!(UnaryOperator::Not.as_str(), "NOT");
        assert_eq!(UnaryOperator::IsNull.as_str(), "IS NULL");
        assert_eq!(UnaryOperator::Cast.as_str(), "CAST");
    }
}
