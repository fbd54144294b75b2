//! Lowering error types.

use crate::types::SqlTypeName;
use thiserror::Error;

/// Errors that abort the lowering of a statement.
///
/// All but `InternalConversion` are planning failures caused by the input
/// tree; `InternalConversion` means the input violated an invariant the
/// optimizer guarantees and points at a bug.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LowerError {
    #[error("Unsupported expression {operator}: {reason}")]
    UnsupportedExpression { operator: String, reason: String },

    #[error("Unsupported type: {type_name}")]
    UnsupportedType { type_name: SqlTypeName },

    #[error("Malformed CASE expression with {operand_count} operands: expected WHEN/THEN pairs followed by one ELSE")]
    MalformedCase { operand_count: usize },

    #[error("Internal conversion error: {message}")]
    InternalConversion { message: String },
}

impl LowerError {
    pub fn unsupported(operator: impl ToString, reason: impl Into<String>) -> Self {
        LowerError::UnsupportedExpression {
            operator: operator.to_string(),
            reason: reason.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        LowerError::InternalConversion {
            message: message.into(),
        }
    }

    /// Whether the error signals a bug rather than an unsupported query
    pub fn is_internal(&self) -> bool {
        matches!(self, LowerError::InternalConversion { .. })
    }
}

/// Result type for lowering operations
pub type LowerResult<T> = Result<T, LowerError>;
