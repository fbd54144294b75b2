//! Literal re-encoding into engine constants.
//!
//! The engine parses constants from strings. Temporal values are
//! microsecond-granular there while the optimizer works in milliseconds.

use crate::expression::Expression;
use crate::lower::typing::typed;
use crate::lower::LowerResult;
use crate::rex::{LiteralValue, RexLiteral};
use bigdecimal::BigDecimal;

const MICROS_PER_MILLI: i64 = 1000;

/// Canonical constant encoding of a literal, `None` for SQL NULL
pub fn normalize_literal(literal: &RexLiteral) -> Option<String> {
    match &literal.value {
        LiteralValue::Char(s) => Some(s.clone()),
        LiteralValue::Decimal(d) => {
            if literal.ty.is_interval() {
                let micros = d.clone() * BigDecimal::from(MICROS_PER_MILLI);
                Some(micros.with_scale(0).to_plain_string())
            } else {
                Some(d.to_plain_string())
            }
        }
        LiteralValue::Timestamp(ts) => Some((ts.timestamp_millis() * MICROS_PER_MILLI).to_string()),
        // The engine's constant parser decodes binary values from hex
        LiteralValue::Binary(bytes) => Some(hex::encode(bytes)),
        LiteralValue::Null => None,
        LiteralValue::Boolean(b) => Some(b.to_string()),
        LiteralValue::Symbol(name) => Some(name.clone()),
    }
}

/// Lower a literal into a typed constant
pub fn lower_literal(literal: &RexLiteral) -> LowerResult<Expression> {
    typed(Expression::constant(normalize_literal(literal)), &literal.ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::ExprNode;
    use crate::types::{ScalarType, SqlTypeName, ValueType, MAX_VALUE_LENGTH};
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn decimal(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_string_literal() {
        let lit = RexLiteral::string("it's");
        assert_eq!(normalize_literal(&lit), Some("it's".to_string()));
    }

    #[test]
    fn test_decimal_literal_keeps_scale() {
        let lit = RexLiteral::decimal(
            decimal("12.500"),
            ScalarType::new(SqlTypeName::Decimal),
        );
        assert_eq!(normalize_literal(&lit), Some("12.500".to_string()));
    }

    #[test]
    fn test_decimal_literal_is_plain() {
        let lit = RexLiteral::decimal(decimal("1.5E+7"), ScalarType::new(SqlTypeName::Decimal));
        assert_eq!(normalize_literal(&lit), Some("15000000".to_string()));
    }

    #[test]
    fn test_interval_literal_in_microseconds() {
        let lit = RexLiteral::decimal(
            decimal("12.500"),
            ScalarType::new(SqlTypeName::IntervalDaySecond),
        );
        assert_eq!(normalize_literal(&lit), Some("12500".to_string()));

        // One day in milliseconds
        let lit = RexLiteral::decimal(
            decimal("86400000"),
            ScalarType::new(SqlTypeName::IntervalDay),
        );
        assert_eq!(normalize_literal(&lit), Some("86400000000".to_string()));
    }

    #[test]
    fn test_timestamp_literal_in_microseconds() {
        let ts = Utc.timestamp_millis_opt(1000).unwrap();
        assert_eq!(
            normalize_literal(&RexLiteral::timestamp(ts)),
            Some("1000000".to_string())
        );

        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            normalize_literal(&RexLiteral::timestamp(ts)),
            Some("1577836800000000".to_string())
        );
    }

    #[test]
    fn test_binary_literal_as_hex() {
        let lit = RexLiteral::binary(vec![0x00, 0xab, 0x10]);
        assert_eq!(normalize_literal(&lit), Some("00ab10".to_string()));

        let decoded = hex::decode(normalize_literal(&lit).unwrap()).unwrap();
        assert_eq!(decoded, vec![0x00, 0xab, 0x10]);
    }

    #[test]
    fn test_null_literal_keeps_type() {
        let lit = RexLiteral::null(ScalarType::integer());
        assert_eq!(normalize_literal(&lit), None);

        let expr = lower_literal(&lit).unwrap();
        assert_eq!(expr.node, ExprNode::Constant { value: None });
        assert_eq!(expr.value_type, Some(ValueType::Integer));
    }

    #[test]
    fn test_boolean_and_symbol_literals() {
        assert_eq!(
            normalize_literal(&RexLiteral::boolean(true)),
            Some("true".to_string())
        );
        let lit = RexLiteral::new(
            LiteralValue::Symbol("MICROSECOND".to_string()),
            ScalarType::new(SqlTypeName::Symbol),
        );
        assert_eq!(normalize_literal(&lit), Some("MICROSECOND".to_string()));
    }

    #[test]
    fn test_lowered_string_constant_sized_to_max() {
        let expr = lower_literal(&RexLiteral::string("abc")).unwrap();
        assert_eq!(expr.value_type, Some(ValueType::String));
        assert_eq!(expr.value_size, Some(MAX_VALUE_LENGTH));
    }
}
