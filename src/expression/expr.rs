//! Engine expression tree definitions.

use crate::expression::operator::{BinaryOperator, ConjunctionOperator, UnaryOperator};
use crate::types::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which input of an (at most binary) join a column comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSlot {
    /// Outer (left) input, or the only input outside a join
    Outer,
    /// Inner (right) input
    Inner,
}

impl TableSlot {
    pub fn index(&self) -> usize {
        match self {
            TableSlot::Outer => 0,
            TableSlot::Inner => 1,
        }
    }
}

/// Column reference in an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table_slot: TableSlot,
    /// Column index within the slot's row (0-based)
    pub column_index: usize,
    /// Empty when the reference is not bound to a catalog table
    pub table_name: String,
    pub column_name: String,
}

impl ColumnRef {
    pub fn new(
        table_slot: TableSlot,
        column_index: usize,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Self {
        Self {
            table_slot,
            column_index,
            table_name: table_name.into(),
            column_name: column_name.into(),
        }
    }
}

/// Expression node without type information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExprNode {
    /// Constant in canonical string encoding, `None` is SQL NULL
    Constant { value: Option<String> },

    Column(ColumnRef),

    /// Bind parameter, numbered in binding order
    Parameter { index: usize },

    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    Conjunction {
        op: ConjunctionOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Set membership: `left IN (list...)`
    In {
        left: Box<Expression>,
        list: Vec<Expression>,
    },

    Case {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },

    Function { name: String, args: Vec<Expression> },
}

/// Typed expression tree node.
///
/// Each node owns its operands. `value_size` is only set for
/// variable-length value types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub node: ExprNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_size: Option<u32>,
}

impl Expression {
    fn untyped(node: ExprNode) -> Self {
        Self {
            node,
            value_type: None,
            value_size: None,
        }
    }

    fn boolean(node: ExprNode) -> Self {
        Self {
            node,
            value_type: Some(ValueType::Boolean),
            value_size: None,
        }
    }

    /// Create a constant expression
    pub fn constant(value: Option<String>) -> Self {
        Self::untyped(ExprNode::Constant { value })
    }

    /// Create a column reference expression
    pub fn column(column: ColumnRef) -> Self {
        Self::untyped(ExprNode::Column(column))
    }

    /// Create a bind parameter expression
    pub fn parameter(index: usize) -> Self {
        Self::untyped(ExprNode::Parameter { index })
    }

    /// Create a unary operation; predicates start out boolean
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        let node = ExprNode::Unary {
            op,
            operand: Box::new(operand),
        };
        if op.is_predicate() {
            Self::boolean(node)
        } else {
            Self::untyped(node)
        }
    }

    /// Create a binary operation; comparisons start out boolean
    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        let node = ExprNode::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
        if op.is_comparison() {
            Self::boolean(node)
        } else {
            Self::untyped(node)
        }
    }

    pub fn conjunction(op: ConjunctionOperator, left: Expression, right: Expression) -> Self {
        Self::boolean(ExprNode::Conjunction {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Self::conjunction(ConjunctionOperator::And, left, right)
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Self::conjunction(ConjunctionOperator::Or, left, right)
    }

    pub fn in_list(left: Expression, list: Vec<Expression>) -> Self {
        Self::boolean(ExprNode::In {
            left: Box::new(left),
            list,
        })
    }

    pub fn case(condition: Expression, then_branch: Expression, else_branch: Expression) -> Self {
        Self::untyped(ExprNode::Case {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self::untyped(ExprNode::Function {
            name: name.into(),
            args,
        })
    }

    /// Builder-style type assignment without size, mostly for tests
    pub fn typed(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn is_constant_or_function(&self) -> bool {
        matches!(
            self.node,
            ExprNode::Constant { .. } | ExprNode::Function { .. }
        )
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.node, ExprNode::Parameter { .. })
    }

    /// Direct operands of this node, in evaluation order
    pub fn children(&self) -> Vec<&Expression> {
        match &self.node {
            ExprNode::Constant { .. } | ExprNode::Column(_) | ExprNode::Parameter { .. } => {
                vec![]
            }
            ExprNode::Unary { operand, .. } => vec![operand.as_ref()],
            ExprNode::Binary { left, right, .. } | ExprNode::Conjunction { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            }
            ExprNode::In { left, list } => {
                let mut children = vec![left.as_ref()];
                children.extend(list.iter());
                children
            }
            ExprNode::Case {
                condition,
                then_branch,
                else_branch,
            } => vec![condition.as_ref(), then_branch.as_ref(), else_branch.as_ref()],
            ExprNode::Function { args, .. } => args.iter().collect(),
        }
    }

    /// Bind parameter indices in left-to-right tree order
    pub fn parameter_indices(&self) -> Vec<usize> {
        let mut indices = Vec::new();
        self.collect_parameters(&mut indices);
        indices
    }

    fn collect_parameters(&self, indices: &mut Vec<usize>) {
        if let ExprNode::Parameter { index } = self.node {
            indices.push(index);
        }
        for child in self.children() {
            child.collect_parameters(indices);
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            ExprNode::Constant { value: Some(v) } => write!(f, "'{}'", v),
            ExprNode::Constant { value: None } => write!(f, "NULL"),
            ExprNode::Column(col) => {
                write!(f, "${}.{}", col.table_slot.index(), col.column_index)
            }
            ExprNode::Parameter { index } => write!(f, "?{}", index),
            ExprNode::Unary { op, operand } => match op {
                UnaryOperator::Cast => match self.value_type {
                    Some(vt) => write!(f, "CAST({} AS {})", operand, vt),
                    None => write!(f, "CAST({})", operand),
                },
                UnaryOperator::IsNull => write!(f, "({} IS NULL)", operand),
                _ => write!(f, "{}({})", op.as_str(), operand),
            },
            ExprNode::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.as_str(), right)
            }
            ExprNode::Conjunction { op, left, right } => {
                write!(f, "({} {} {})", left, op.as_str(), right)
            }
            ExprNode::In { left, list } => {
                write!(f, "({} IN (", left)?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "))")
            }
            ExprNode::Case {
                condition,
                then_branch,
                else_branch,
            } => write!(
                f,
                "CASE WHEN {} THEN {} ELSE {} END",
                condition, then_branch, else_branch
            ),
            ExprNode::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
