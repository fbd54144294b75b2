//! Row expressions: the optimizer's scalar expression model.
//!
//! This module provides:
//! - Scalar nodes (literals, input/local references, dynamic parameters, calls)
//! - The closed operator vocabulary used by calls
//! - Expression programs sharing sub-expressions through local references
//! - Row type descriptors

pub mod literal;
pub mod node;
pub mod operator;
pub mod program;
pub mod row_type;

pub use literal::{LiteralValue, RexLiteral};
pub use node::{LocalRef, RexCall, RexNode};
pub use operator::Operator;
pub use program::ExprProgram;
pub use row_type::{RowField, RowType};
