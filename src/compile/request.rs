//! JSON request front end.
//!
//! A request carries the row expressions of one operator together with
//! the context needed to lower them: its expression program, the scanned
//! table and, for joins, the outer input's field count.

use crate::catalog::TableInfo;
use crate::compile::Compilation;
use crate::expression::Expression;
use crate::lower::{JoinOffset, LowerResult, OutputSchema};
use crate::rex::{ExprProgram, RexNode, RowType};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowerRequest {
    pub expressions: Vec<RexNode>,
    pub program: Option<ExprProgram>,
    pub table: Option<TableInfo>,
    pub outer_field_count: Option<usize>,
    pub row_type: Option<RowType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowerResponse {
    pub expressions: Vec<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_schema: Option<OutputSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_schema: Option<OutputSchema>,
    pub parameter_count: usize,
}

impl LowerRequest {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn join(&self) -> JoinOffset {
        JoinOffset::from(self.outer_field_count)
    }

    /// Lower every expression, then the schemas, in one compilation
    pub fn lower(&self) -> LowerResult<LowerResponse> {
        let mut compilation = Compilation::new();
        let join = self.join();
        let empty = ExprProgram::default();

        let mut expressions = Vec::with_capacity(self.expressions.len());
        for node in &self.expressions {
            let expr = match (&self.table, &self.program) {
                (Some(table), program) => compilation.lower_with_catalog(
                    node,
                    table,
                    program.as_ref().unwrap_or(&empty),
                    join,
                )?,
                (None, Some(program)) => compilation.lower_with_program(node, program, join)?,
                (None, None) => compilation.lower(node, join)?,
            };
            expressions.push(expr);
        }

        let program_schema = match &self.program {
            Some(program) if program.has_projects() => {
                Some(compilation.schema_from_program(program)?)
            }
            _ => None,
        };
        let row_schema = self
            .row_type
            .as_ref()
            .map(|row_type| compilation.schema_from_row_type(row_type))
            .transpose()?;

        info!(
            "lowered {} expressions with {} parameters",
            expressions.len(),
            compilation.parameter_count()
        );
        Ok(LowerResponse {
            expressions,
            program_schema,
            row_schema,
            parameter_count: compilation.parameter_count(),
        })
    }
}
