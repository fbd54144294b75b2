//! Engine expression model.
//!
//! This module provides:
//! - Typed expression trees consumed by the execution engine
//! - Operator enumerations for unary, binary and conjunction nodes
//! - JSON encoding of expressions through serde

pub mod expr;
pub mod operator;

pub use expr::{ColumnRef, ExprNode, Expression, TableSlot};
pub use operator::{BinaryOperator, ConjunctionOperator, UnaryOperator};
