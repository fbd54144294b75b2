//! Call lowering: one optimizer call onto engine nodes.
//!
//! Operands arrive already lowered. Every node built here is typed from
//! the call's result type before it is returned.

use crate::expression::{BinaryOperator, ConjunctionOperator, ExprNode, Expression, UnaryOperator};
use crate::lower::typing::{assign_value_type, typed};
use crate::lower::{LowerError, LowerResult};
use crate::rex::{Operator, RexCall};
use crate::types::{ScalarType, ValueType};
use log::{debug, warn};

/// Unit argument of the engine's epoch conversion functions
const MICROSECOND_UNIT: &str = "MICROSECOND";

/// Build the engine expression for a call from its lowered operands
pub fn lower_call(call: &RexCall, operands: Vec<Expression>) -> LowerResult<Expression> {
    let op = &call.op;
    let expr = match op {
        Operator::And => build_conjunction_tree(ConjunctionOperator::And, op, operands)?,
        Operator::Or => build_disjunction(op, operands)?,

        Operator::Equals => binary(BinaryOperator::Eq, op, operands)?,
        Operator::NotEquals => binary(BinaryOperator::Ne, op, operands)?,
        Operator::LessThan => binary(BinaryOperator::Lt, op, operands)?,
        Operator::GreaterThan => binary(BinaryOperator::Gt, op, operands)?,
        Operator::LessThanOrEqual => binary(BinaryOperator::Le, op, operands)?,
        Operator::GreaterThanOrEqual => binary(BinaryOperator::Ge, op, operands)?,
        Operator::Like => binary(BinaryOperator::Like, op, operands)?,

        Operator::Plus => binary(BinaryOperator::Add, op, operands)?,
        Operator::Minus => binary(BinaryOperator::Sub, op, operands)?,
        Operator::Times => binary(BinaryOperator::Mul, op, operands)?,
        Operator::Divide => binary(BinaryOperator::Div, op, operands)?,
        Operator::DatetimePlus => datetime_arithmetic(BinaryOperator::Add, op, operands)?,
        Operator::DatetimeMinus => datetime_arithmetic(BinaryOperator::Sub, op, operands)?,

        Operator::Cast => unary(UnaryOperator::Cast, op, operands)?,
        Operator::Not => unary(UnaryOperator::Not, op, operands)?,
        Operator::IsNull => unary(UnaryOperator::IsNull, op, operands)?,
        Operator::Exists => unary(UnaryOperator::Exists, op, operands)?,
        Operator::IsNotNull => {
            let is_null = typed(unary(UnaryOperator::IsNull, op, operands)?, &call.ty)?;
            Expression::unary(UnaryOperator::Not, is_null)
        }

        Operator::Case => build_case(operands, &call.ty)?,

        Operator::Concat => Expression::function("concat", operands),
        Operator::Function(name) => Expression::function(name.to_lowercase(), operands),

        Operator::Unsupported(kind) => {
            return Err(LowerError::unsupported(
                kind,
                "no engine expression for this operator",
            ))
        }
    };
    typed(expr, &call.ty)
}

/// Build a CASE expression from `[when, then, when, then, ..., else]`.
///
/// Pairs nest to the right: `[c1, r1, c2, r2, d]` becomes
/// `CASE WHEN c1 THEN r1 ELSE (CASE WHEN c2 THEN r2 ELSE d)`.
pub fn build_case(operands: Vec<Expression>, ty: &ScalarType) -> LowerResult<Expression> {
    let operand_count = operands.len();
    if operand_count < 3 {
        return Err(LowerError::MalformedCase { operand_count });
    }
    build_case_from(&mut operands.into_iter(), operand_count, ty)
}

fn build_case_from(
    operands: &mut std::vec::IntoIter<Expression>,
    operand_count: usize,
    ty: &ScalarType,
) -> LowerResult<Expression> {
    match operands.len() {
        1 => operands
            .next()
            .ok_or_else(|| LowerError::internal("CASE operands exhausted")),
        0 | 2 => Err(LowerError::MalformedCase { operand_count }),
        _ => {
            let (Some(condition), Some(then_branch)) = (operands.next(), operands.next()) else {
                return Err(LowerError::internal("CASE operands exhausted"));
            };
            // At least an ELSE follows, so the branch takes the CASE result type
            let then_branch = typed(then_branch, ty)?;
            let else_branch = build_case_from(operands, operand_count, ty)?;
            typed(Expression::case(condition, then_branch, else_branch), ty)
        }
    }
}

/// Left fold of a flat operand list: `((a op b) op c) op d`
fn build_conjunction_tree(
    kind: ConjunctionOperator,
    op: &Operator,
    operands: Vec<Expression>,
) -> LowerResult<Expression> {
    let count = operands.len();
    let mut operands = operands.into_iter();
    let (Some(first), Some(second)) = (operands.next(), operands.next()) else {
        return Err(LowerError::unsupported(
            op,
            format!("expected at least 2 operands, got {}", count),
        ));
    };
    Ok(operands.fold(Expression::conjunction(kind, first, second), |left, right| {
        Expression::conjunction(kind, left, right)
    }))
}

/// The optimizer encodes `x IN (a, b, c)` as a variadic OR of equalities
fn build_disjunction(op: &Operator, operands: Vec<Expression>) -> LowerResult<Expression> {
    if operands.len() <= 2 {
        return build_conjunction_tree(ConjunctionOperator::Or, op, operands);
    }
    if is_membership_test(&operands) {
        debug!("OR over {} equalities lowered to IN list", operands.len());
        return build_in_list(operands);
    }
    warn!(
        "OR over {} operands is not a membership test, lowering to chained OR",
        operands.len()
    );
    build_conjunction_tree(ConjunctionOperator::Or, op, operands)
}

fn equality_probe(expr: &Expression) -> Option<&Expression> {
    match &expr.node {
        ExprNode::Binary {
            op: BinaryOperator::Eq,
            left,
            ..
        } => Some(left.as_ref()),
        _ => None,
    }
}

/// Every operand is an equality against the same left-hand expression
fn is_membership_test(operands: &[Expression]) -> bool {
    match operands.first().and_then(equality_probe) {
        Some(probe) => operands
            .iter()
            .all(|operand| equality_probe(operand) == Some(probe)),
        None => false,
    }
}

fn build_in_list(operands: Vec<Expression>) -> LowerResult<Expression> {
    let mut probe = None;
    let mut list = Vec::with_capacity(operands.len());
    for operand in operands {
        match operand.node {
            ExprNode::Binary {
                op: BinaryOperator::Eq,
                left,
                right,
            } => {
                if probe.is_none() {
                    probe = Some(*left);
                }
                list.push(*right);
            }
            other => {
                return Err(LowerError::internal(format!(
                    "expected an equality in IN list, got {:?}",
                    other
                )))
            }
        }
    }
    let probe = probe.ok_or_else(|| LowerError::internal("empty IN list"))?;
    Ok(Expression::in_list(probe, list))
}

/// `datetime +/- interval` as `to_timestamp(since_epoch(datetime) +/- interval)`.
///
/// Both operands are already in microseconds: timestamps are converted to
/// epoch microseconds, interval literals were scaled when lowered.
fn datetime_arithmetic(
    kind: BinaryOperator,
    op: &Operator,
    operands: Vec<Expression>,
) -> LowerResult<Expression> {
    let [first, second] = expect_operands::<2>(op, operands)?;
    let is_datetime = |e: &Expression| e.value_type == Some(ValueType::Timestamp);

    // Addition commutes: interval + datetime is accepted too
    let (datetime, interval) =
        if kind == BinaryOperator::Add && !is_datetime(&first) && is_datetime(&second) {
            (second, first)
        } else {
            (first, second)
        };

    let mut since_epoch = Expression::function("since_epoch", vec![unit_constant(), datetime]);
    assign_value_type(&mut since_epoch, ValueType::BigInt, None);

    let mut micros = Expression::binary(kind, since_epoch, interval);
    assign_value_type(&mut micros, ValueType::BigInt, None);

    Ok(Expression::function(
        "to_timestamp",
        vec![unit_constant(), micros],
    ))
}

fn unit_constant() -> Expression {
    let mut unit = Expression::constant(Some(MICROSECOND_UNIT.to_string()));
    assign_value_type(&mut unit, ValueType::String, None);
    unit
}

fn binary(
    kind: BinaryOperator,
    op: &Operator,
    operands: Vec<Expression>,
) -> LowerResult<Expression> {
    let [left, right] = expect_operands::<2>(op, operands)?;
    Ok(Expression::binary(kind, left, right))
}

fn unary(kind: UnaryOperator, op: &Operator, operands: Vec<Expression>) -> LowerResult<Expression> {
    let [operand] = expect_operands::<1>(op, operands)?;
    Ok(Expression::unary(kind, operand))
}

fn expect_operands<const N: usize>(
    op: &Operator,
    operands: Vec<Expression>,
) -> LowerResult<[Expression; N]> {
    let count = operands.len();
    operands.try_into().map_err(|_| {
        LowerError::unsupported(op, format!("expected {} operands, got {}", N, count))
    })
}
