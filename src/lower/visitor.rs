//! Post-order visitor over optimizer row expressions.

use crate::catalog::TableInfo;
use crate::expression::Expression;
use crate::lower::call::lower_call;
use crate::lower::column::{resolve_input_ref, resolve_named_input_ref, JoinOffset};
use crate::lower::literal::lower_literal;
use crate::lower::params::ParamIndexer;
use crate::lower::typing::typed;
use crate::lower::{LowerError, LowerResult};
use crate::rex::{ExprProgram, LocalRef, RexNode};
use log::trace;

/// Lowers one row expression tree at a time.
///
/// Without a table, column references get ordinal names. With a table,
/// references are named from the catalog and the program (if any) is
/// also used to look through the inner input's projections.
pub struct Lowerer<'a> {
    join: JoinOffset,
    program: Option<&'a ExprProgram>,
    table: Option<&'a TableInfo>,
    params: &'a mut ParamIndexer,
    /// Pool entries currently being lowered through a local reference
    expanding: Vec<usize>,
}

impl<'a> Lowerer<'a> {
    pub fn new(params: &'a mut ParamIndexer) -> Self {
        Self {
            join: JoinOffset::none(),
            program: None,
            table: None,
            params,
            expanding: Vec::new(),
        }
    }

    pub fn with_join(mut self, join: JoinOffset) -> Self {
        self.join = join;
        self
    }

    /// Resolve local references through `program`
    pub fn with_program(mut self, program: &'a ExprProgram) -> Self {
        self.program = Some(program);
        self
    }

    /// Name column references from `table`
    pub fn with_catalog(mut self, table: &'a TableInfo) -> Self {
        self.table = Some(table);
        self
    }

    pub fn lower(&mut self, node: &RexNode) -> LowerResult<Expression> {
        match node {
            RexNode::Literal(literal) => lower_literal(literal),
            RexNode::InputRef { index, ty } => match self.table {
                Some(table) => {
                    resolve_named_input_ref(*index, ty, self.join, table, self.program)
                }
                None => resolve_input_ref(*index, ty, self.join),
            },
            RexNode::LocalRef(local) => self.lower_local_ref(local),
            RexNode::DynamicParam { ty } => {
                let index = self.params.next_index();
                trace!("dynamic parameter bound to index {}", index);
                typed(Expression::parameter(index), ty)
            }
            RexNode::Call(call) => {
                let operands = call
                    .operands
                    .iter()
                    .map(|operand| self.lower(operand))
                    .collect::<LowerResult<Vec<_>>>()?;
                lower_call(call, operands)
            }
        }
    }

    fn lower_local_ref(&mut self, local: &LocalRef) -> LowerResult<Expression> {
        let program = self.program.ok_or_else(|| {
            LowerError::internal(format!(
                "local reference {} without an expression program",
                local.index
            ))
        })?;

        let (_, index) = self.join.split(local.index);
        if self.expanding.contains(&index) {
            return Err(LowerError::internal(format!(
                "cyclic local reference chain through expression {}",
                index
            )));
        }
        let expr = program.expr(index)?;
        trace!("local reference {} expands pool entry {}", local.index, index);

        self.expanding.push(index);
        let lowered = self.lower(expr);
        self.expanding.pop();
        lowered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{BinaryOperator, ColumnRef, ExprNode, TableSlot};
    use crate::rex::{Operator, RexLiteral};
    use crate::types::{ScalarType, ValueType};

    fn int_col(index: usize) -> RexNode {
        RexNode::input_ref(index, ScalarType::integer())
    }

    fn param() -> RexNode {
        RexNode::dynamic_param(ScalarType::integer())
    }

    #[test]
    fn test_literal() {
        let mut params = ParamIndexer::new();
        let expr = Lowerer::new(&mut params)
            .lower(&RexNode::literal(RexLiteral::integer(42)))
            .unwrap();
        assert_eq!(
            expr.node,
            ExprNode::Constant {
                value: Some("42".to_string())
            }
        );
        assert_eq!(expr.value_type, Some(ValueType::Integer));
    }

    #[test]
    fn test_parameters_in_left_to_right_order() {
        // ? < a AND b = ?
        let tree = RexNode::predicate(
            Operator::And,
            vec![
                RexNode::predicate(Operator::LessThan, vec![param(), int_col(0)]),
                RexNode::predicate(Operator::Equals, vec![int_col(1), param()]),
            ],
        );

        let mut params = ParamIndexer::new();
        let expr = Lowerer::new(&mut params).lower(&tree).unwrap();
        assert_eq!(expr.parameter_indices(), vec![0, 1]);
        assert_eq!(params.assigned(), 2);
        assert_eq!(expr.to_string(), "((?0 < $0.0) AND ($0.1 = ?1))");
    }

    #[test]
    fn test_parameters_are_typed_but_not_sized() {
        let mut params = ParamIndexer::new();
        let expr = Lowerer::new(&mut params)
            .lower(&RexNode::dynamic_param(ScalarType::varchar(16)))
            .unwrap();
        assert_eq!(expr.node, ExprNode::Parameter { index: 0 });
        assert_eq!(expr.value_type, Some(ValueType::String));
        assert_eq!(expr.value_size, None);
    }

    #[test]
    fn test_join_split() {
        let tree = RexNode::predicate(Operator::Equals, vec![int_col(1), int_col(3)]);
        let mut params = ParamIndexer::new();
        let expr = Lowerer::new(&mut params)
            .with_join(JoinOffset::join(2))
            .lower(&tree)
            .unwrap();
        assert_eq!(expr.to_string(), "($0.1 = $1.1)");
    }

    #[test]
    fn test_local_ref_expansion() {
        // pool: [$0, 10, $0 + 10]
        let program = ExprProgram::new(
            vec![
                int_col(0),
                RexNode::literal(RexLiteral::integer(10)),
                RexNode::call(
                    Operator::Plus,
                    vec![
                        RexNode::local_ref(0, ScalarType::integer()),
                        RexNode::local_ref(1, ScalarType::bigint()),
                    ],
                    ScalarType::bigint(),
                ),
            ],
            vec![],
        );

        let mut params = ParamIndexer::new();
        let mut lowerer = Lowerer::new(&mut params).with_program(&program);
        let expr = lowerer
            .lower(&RexNode::local_ref(2, ScalarType::bigint()))
            .unwrap();
        assert_eq!(expr.to_string(), "($0.0 + '10')");
        assert_eq!(expr.value_type, Some(ValueType::BigInt));

        // Same entry twice yields equal trees
        let again = lowerer
            .lower(&RexNode::local_ref(2, ScalarType::bigint()))
            .unwrap();
        assert_eq!(again, expr);
    }

    #[test]
    fn test_local_ref_adjusted_for_inner_side() {
        let program = ExprProgram::new(vec![int_col(5), int_col(6)], vec![]);
        let mut params = ParamIndexer::new();
        let expr = Lowerer::new(&mut params)
            .with_join(JoinOffset::join(3))
            .with_program(&program)
            .lower(&RexNode::local_ref(4, ScalarType::integer()))
            .unwrap();
        // Pool entry 1 is $6, itself split across the join
        assert_eq!(
            expr.node,
            ExprNode::Column(ColumnRef::new(TableSlot::Inner, 3, "", "003"))
        );
    }

    #[test]
    fn test_local_ref_out_of_bounds() {
        let program = ExprProgram::new(vec![int_col(0)], vec![]);
        let mut params = ParamIndexer::new();
        let err = Lowerer::new(&mut params)
            .with_program(&program)
            .lower(&RexNode::local_ref(1, ScalarType::integer()))
            .unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_local_ref_without_program() {
        let mut params = ParamIndexer::new();
        let err = Lowerer::new(&mut params)
            .lower(&RexNode::local_ref(0, ScalarType::integer()))
            .unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_cyclic_local_refs() {
        let program = ExprProgram::new(
            vec![
                RexNode::call(
                    Operator::Plus,
                    vec![RexNode::local_ref(1, ScalarType::integer()), int_col(0)],
                    ScalarType::integer(),
                ),
                RexNode::local_ref(0, ScalarType::integer()),
            ],
            vec![],
        );
        let mut params = ParamIndexer::new();
        let err = Lowerer::new(&mut params)
            .with_program(&program)
            .lower(&RexNode::local_ref(0, ScalarType::integer()))
            .unwrap_err();
        assert!(matches!(err, LowerError::InternalConversion { ref message } if message.contains("cyclic")));
    }

    #[test]
    fn test_catalog_names() {
        let table = TableInfo::with_columns(
            "orders",
            vec![("id", ValueType::Integer), ("qty", ValueType::Integer)],
        );
        let tree = RexNode::predicate(Operator::GreaterThan, vec![int_col(1), int_col(0)]);
        let mut params = ParamIndexer::new();
        let expr = Lowerer::new(&mut params)
            .with_catalog(&table)
            .lower(&tree)
            .unwrap();

        match &expr.node {
            ExprNode::Binary { op, left, right } => {
                assert_eq!(*op, BinaryOperator::Gt);
                assert_eq!(
                    left.node,
                    ExprNode::Column(ColumnRef::new(TableSlot::Outer, 1, "orders", "qty"))
                );
                assert_eq!(
                    right.node,
                    ExprNode::Column(ColumnRef::new(TableSlot::Outer, 0, "orders", "id"))
                );
            }
            other => panic!("Expected comparison, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_operand_aborts() {
        let tree = RexNode::predicate(
            Operator::And,
            vec![
                RexNode::predicate(Operator::IsNull, vec![int_col(0)]),
                RexNode::predicate(
                    Operator::Unsupported("SIMILAR TO".into()),
                    vec![int_col(1), int_col(2)],
                ),
            ],
        );
        let mut params = ParamIndexer::new();
        let err = Lowerer::new(&mut params).lower(&tree).unwrap_err();
        assert!(matches!(err, LowerError::UnsupportedExpression { .. }));
        assert!(!err.is_internal());
    }
}
