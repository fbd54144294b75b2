//! Compilation context: the entry points used by the planner.

pub mod request;

use crate::catalog::TableInfo;
use crate::expression::Expression;
use crate::lower::{JoinOffset, Lowerer, LowerResult, OutputSchema, ParamIndexer};
use crate::rex::{ExprProgram, RexNode, RowType};
use log::debug;

pub use request::{LowerRequest, LowerResponse};

/// State shared by every expression lowered for one statement.
///
/// Dynamic parameters get bind indices in the order they are met across
/// all calls on the same compilation, so lower the statement's expressions
/// in the order the executor binds values.
#[derive(Debug, Default)]
pub struct Compilation {
    params: ParamIndexer,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower a tree with generic column names
    pub fn lower(&mut self, node: &RexNode, join: JoinOffset) -> LowerResult<Expression> {
        let expr = Lowerer::new(&mut self.params).with_join(join).lower(node)?;
        debug!("lowered {}", expr);
        Ok(expr)
    }

    /// Lower a tree whose local references point into `program`
    pub fn lower_with_program(
        &mut self,
        node: &RexNode,
        program: &ExprProgram,
        join: JoinOffset,
    ) -> LowerResult<Expression> {
        let expr = Lowerer::new(&mut self.params)
            .with_join(join)
            .with_program(program)
            .lower(node)?;
        debug!("lowered {}", expr);
        Ok(expr)
    }

    /// Lower a tree naming its column references from `table`
    pub fn lower_with_catalog(
        &mut self,
        node: &RexNode,
        table: &TableInfo,
        program: &ExprProgram,
        join: JoinOffset,
    ) -> LowerResult<Expression> {
        let expr = Lowerer::new(&mut self.params)
            .with_join(join)
            .with_program(program)
            .with_catalog(table)
            .lower(node)?;
        debug!("lowered {} against table '{}'", expr, table.table_name);
        Ok(expr)
    }

    pub fn schema_from_row_type(&self, row_type: &RowType) -> LowerResult<OutputSchema> {
        OutputSchema::from_row_type(row_type)
    }

    pub fn schema_from_program(&mut self, program: &ExprProgram) -> LowerResult<OutputSchema> {
        OutputSchema::from_program(program, &mut self.params)
    }

    /// Number of bind indices handed out so far
    pub fn parameter_count(&self) -> usize {
        self.params.assigned()
    }

    /// Start a new statement: bind indices restart at zero
    pub fn reset(&mut self) {
        self.params.reset();
    }
}
