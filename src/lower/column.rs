//! Column reference resolution across join inputs.
//!
//! A join's input row is the outer row followed by the inner row. A flat
//! position `p` below the outer field count stays on the outer side
//! (slot 0, index `p`); anything past it belongs to the inner side
//! (slot 1, index `p - outer_field_count`).

use crate::catalog::TableInfo;
use crate::expression::{ColumnRef, Expression, TableSlot};
use crate::lower::typing::typed;
use crate::lower::LowerResult;
use crate::rex::ExprProgram;
use crate::types::ScalarType;
use log::trace;

/// Join composition of the row being referenced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinOffset {
    /// Number of columns contributed by the outer input, `None` outside a join
    outer_field_count: Option<usize>,
}

impl JoinOffset {
    /// Not a join: every position is a column of the single input
    pub fn none() -> Self {
        Self::default()
    }

    pub fn join(outer_field_count: usize) -> Self {
        Self {
            outer_field_count: Some(outer_field_count),
        }
    }

    pub fn is_join(&self) -> bool {
        self.outer_field_count.is_some()
    }

    /// Split a flat position into its table slot and slot-relative index
    pub fn split(&self, position: usize) -> (TableSlot, usize) {
        match self.outer_field_count {
            Some(outer) if position >= outer => (TableSlot::Inner, position - outer),
            _ => (TableSlot::Outer, position),
        }
    }
}

impl From<Option<usize>> for JoinOffset {
    fn from(outer_field_count: Option<usize>) -> Self {
        Self { outer_field_count }
    }
}

/// Name for a column without catalog metadata: index 1 becomes "001"
pub fn ordinal_name(index: usize) -> String {
    format!("{:03}", index)
}

/// Resolve an input reference without catalog names
pub fn resolve_input_ref(
    position: usize,
    ty: &ScalarType,
    join: JoinOffset,
) -> LowerResult<Expression> {
    let (slot, index) = join.split(position);
    let column = ColumnRef::new(slot, index, "", ordinal_name(index));
    typed(Expression::column(column), ty)
}

/// Resolve an input reference against a catalog table.
///
/// Names are only resolved for a plain scan or for the inner side of a
/// join; outer-side references of a join keep ordinal names. Inner-side
/// positions name an output of the inner node's program, so they are
/// looked up through its projection list to find the source column.
pub fn resolve_named_input_ref(
    position: usize,
    ty: &ScalarType,
    join: JoinOffset,
    table: &TableInfo,
    program: Option<&ExprProgram>,
) -> LowerResult<Expression> {
    let (slot, mut index) = join.split(position);
    let mut ty = *ty;
    let mut table_name = "";
    let mut column_name = None;

    if slot == TableSlot::Inner || !join.is_join() {
        if slot == TableSlot::Inner {
            if let Some(program) = program.filter(|p| p.has_projects()) {
                let project = program.project(index)?;
                trace!(
                    "inner column {} resolved through projection '{}' to {}",
                    index,
                    project.name,
                    project.local.index
                );
                index = project.local.index;
                ty = project.local.ty;
            }
        }
        column_name = table.column_name(index).map(str::to_string);
        table_name = table.table_name.as_str();
    }

    let column_name = column_name.unwrap_or_else(|| ordinal_name(index));
    let column = ColumnRef::new(slot, index, table_name, column_name);
    typed(Expression::column(column), &ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::ExprNode;
    use crate::rex::program::Project;
    use crate::rex::{LocalRef, RexNode};
    use crate::types::ValueType;

    fn column_of(expr: &Expression) -> &ColumnRef {
        match &expr.node {
            ExprNode::Column(col) => col,
            other => panic!("Expected column reference, got {:?}", other),
        }
    }

    fn orders_table() -> TableInfo {
        TableInfo::with_columns(
            "orders",
            vec![
                ("id", ValueType::Integer),
                ("customer", ValueType::String),
                ("total", ValueType::Decimal),
            ],
        )
    }

    #[test]
    fn test_join_offset_split() {
        let join = JoinOffset::join(3);
        assert_eq!(join.split(2), (TableSlot::Outer, 2));
        assert_eq!(join.split(3), (TableSlot::Inner, 0));
        assert_eq!(join.split(5), (TableSlot::Inner, 2));

        let scan = JoinOffset::none();
        assert_eq!(scan.split(7), (TableSlot::Outer, 7));
        assert_eq!(JoinOffset::from(Some(3)), join);
    }

    #[test]
    fn test_ordinal_name() {
        assert_eq!(ordinal_name(1), "001");
        assert_eq!(ordinal_name(42), "042");
        assert_eq!(ordinal_name(1234), "1234");
    }

    #[test]
    fn test_plain_resolution() {
        let expr = resolve_input_ref(4, &ScalarType::varchar(20), JoinOffset::join(3)).unwrap();
        let col = column_of(&expr);
        assert_eq!(col.table_slot, TableSlot::Inner);
        assert_eq!(col.column_index, 1);
        assert_eq!(col.column_name, "001");
        assert_eq!(col.table_name, "");
        assert_eq!(expr.value_type, Some(ValueType::String));
        assert_eq!(expr.value_size, Some(20));
    }

    #[test]
    fn test_named_resolution_for_scan() {
        let table = orders_table();
        let expr = resolve_named_input_ref(
            1,
            &ScalarType::varchar(64),
            JoinOffset::none(),
            &table,
            None,
        )
        .unwrap();
        let col = column_of(&expr);
        assert_eq!(col.table_slot, TableSlot::Outer);
        assert_eq!(col.table_name, "orders");
        assert_eq!(col.column_name, "customer");
    }

    #[test]
    fn test_named_resolution_falls_back_to_ordinal() {
        let table = orders_table();
        let expr =
            resolve_named_input_ref(7, &ScalarType::integer(), JoinOffset::none(), &table, None)
                .unwrap();
        let col = column_of(&expr);
        assert_eq!(col.column_index, 7);
        assert_eq!(col.column_name, "007");
        assert_eq!(col.table_name, "orders");
    }

    #[test]
    fn test_outer_side_of_join_keeps_ordinal_name() {
        let table = orders_table();
        let expr = resolve_named_input_ref(
            1,
            &ScalarType::integer(),
            JoinOffset::join(2),
            &table,
            None,
        )
        .unwrap();
        let col = column_of(&expr);
        assert_eq!(col.table_slot, TableSlot::Outer);
        assert_eq!(col.column_name, "001");
        assert_eq!(col.table_name, "");
    }

    #[test]
    fn test_inner_side_goes_through_projection() {
        let table = orders_table();
        let dec = ScalarType::new(crate::types::SqlTypeName::Decimal);
        // Inner node projects (total, id): output 0 is physical column 2
        let program = ExprProgram::new(
            vec![
                RexNode::input_ref(0, ScalarType::integer()),
                RexNode::input_ref(1, ScalarType::varchar(64)),
                RexNode::input_ref(2, dec),
            ],
            vec![
                Project {
                    local: LocalRef::new(2, dec),
                    name: "total".to_string(),
                },
                Project {
                    local: LocalRef::new(0, ScalarType::integer()),
                    name: "id".to_string(),
                },
            ],
        );

        let expr = resolve_named_input_ref(
            4,
            &ScalarType::integer(),
            JoinOffset::join(4),
            &table,
            Some(&program),
        )
        .unwrap();
        let col = column_of(&expr);
        assert_eq!(col.table_slot, TableSlot::Inner);
        assert_eq!(col.column_index, 2);
        assert_eq!(col.column_name, "total");
        assert_eq!(expr.value_type, Some(ValueType::Decimal));
    }

    #[test]
    fn test_inner_side_projection_out_of_bounds() {
        let table = orders_table();
        let program = ExprProgram::with_identity_projects(
            vec![RexNode::input_ref(0, ScalarType::integer())],
            &["id"],
        );
        let err = resolve_named_input_ref(
            5,
            &ScalarType::integer(),
            JoinOffset::join(2),
            &table,
            Some(&program),
        )
        .unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_inner_side_without_projection() {
        let table = orders_table();
        let expr = resolve_named_input_ref(
            3,
            &ScalarType::varchar(64),
            JoinOffset::join(2),
            &table,
            Some(&ExprProgram::default()),
        )
        .unwrap();
        let col = column_of(&expr);
        assert_eq!(col.column_index, 1);
        assert_eq!(col.column_name, "customer");
        assert_eq!(expr.value_size, Some(64));
    }
}
