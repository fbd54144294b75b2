//! Value type and size assignment.

use crate::expression::Expression;
use crate::lower::{LowerError, LowerResult};
use crate::types::{ScalarType, ValueType};

/// Assign the engine type derived from an optimizer type descriptor.
///
/// This is the single entry point for typing lowered nodes, whatever they
/// came from (column reference, literal, parameter or call result).
pub fn assign_type(expr: &mut Expression, ty: &ScalarType) -> LowerResult<()> {
    let value_type = ValueType::from_sql_type(ty.type_name).ok_or(LowerError::UnsupportedType {
        type_name: ty.type_name,
    })?;
    assign_value_type(expr, value_type, ty.precision);
    Ok(())
}

/// Assign an engine type and, for variable-length types, a declared size.
///
/// Constants and function results of a concrete variable-length type are
/// sized to the type's maximum, everything else to the (resolved)
/// precision. Parameters are sized at bind time and never get a size here.
/// `Numeric` has no optimizer counterpart and only arrives through callers
/// passing an engine type directly.
pub fn assign_value_type(expr: &mut Expression, value_type: ValueType, precision: Option<u32>) {
    expr.value_type = Some(value_type);
    if !value_type.is_variable_length() {
        expr.value_size = None;
        return;
    }
    if expr.is_parameter() {
        return;
    }

    let precision = precision.or_else(|| value_type.fixed_length());
    let concrete = !matches!(value_type, ValueType::Null | ValueType::Numeric);
    expr.value_size = if expr.is_constant_or_function() && concrete {
        value_type.max_length()
    } else {
        // Unsized strings and binaries fall back to the widest length
        precision.or_else(|| value_type.max_length())
    };
}

/// Type an owned node in one step
pub(crate) fn typed(mut expr: Expression, ty: &ScalarType) -> LowerResult<Expression> {
    assign_type(&mut expr, ty)?;
    Ok(expr)
}
