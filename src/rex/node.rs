//! Scalar node definitions.

use crate::rex::literal::RexLiteral;
use crate::rex::operator::Operator;
use crate::types::ScalarType;
use serde::{Deserialize, Serialize};

/// Reference to an entry in an expression program's pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalRef {
    pub index: usize,
    pub ty: ScalarType,
}

impl LocalRef {
    pub fn new(index: usize, ty: ScalarType) -> Self {
        Self { index, ty }
    }
}

/// Operator applied to an ordered list of operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RexCall {
    pub op: Operator,
    pub operands: Vec<RexNode>,
    /// Result type of the call
    pub ty: ScalarType,
}

/// Scalar expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RexNode {
    Literal(RexLiteral),

    /// Offset into the current operator's input row
    InputRef { index: usize, ty: ScalarType },

    LocalRef(LocalRef),

    /// Value supplied at execution time
    DynamicParam { ty: ScalarType },

    Call(RexCall),
}

impl RexNode {
    pub fn literal(literal: RexLiteral) -> Self {
        RexNode::Literal(literal)
    }

    pub fn input_ref(index: usize, ty: ScalarType) -> Self {
        RexNode::InputRef { index, ty }
    }

    pub fn local_ref(index: usize, ty: ScalarType) -> Self {
        RexNode::LocalRef(LocalRef::new(index, ty))
    }

    pub fn dynamic_param(ty: ScalarType) -> Self {
        RexNode::DynamicParam { ty }
    }

    pub fn call(op: Operator, operands: Vec<RexNode>, ty: ScalarType) -> Self {
        RexNode::Call(RexCall { op, operands, ty })
    }

    /// Create a boolean-typed call, the common case for predicates
    pub fn predicate(op: Operator, operands: Vec<RexNode>) -> Self {
        Self::call(op, operands, ScalarType::boolean())
    }

    /// Declared type of this node
    pub fn ty(&self) -> &ScalarType {
        match self {
            RexNode::Literal(lit) => &lit.ty,
            RexNode::InputRef { ty, .. } => ty,
            RexNode::LocalRef(local) => &local.ty,
            RexNode::DynamicParam { ty } => ty,
            RexNode::Call(call) => &call.ty,
        }
    }
}
