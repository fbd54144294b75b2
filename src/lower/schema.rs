//! Output schemas of relational operators.

use crate::expression::{ColumnRef, Expression, TableSlot};
use crate::lower::column::{resolve_input_ref, JoinOffset};
use crate::lower::params::ParamIndexer;
use crate::lower::typing::typed;
use crate::lower::visitor::Lowerer;
use crate::lower::LowerResult;
use crate::rex::{ExprProgram, RowField, RowType};
use log::debug;
use serde::{Deserialize, Serialize};

/// One output column: its name, the expression producing it and its position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaColumn {
    pub column_name: String,
    pub expression: Expression,
    pub position: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSchema {
    pub columns: Vec<SchemaColumn>,
}

impl OutputSchema {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, position: usize) -> Option<&SchemaColumn> {
        self.columns.get(position)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.column_name.as_str())
            .collect()
    }

    /// Pass-through schema: column `i` reads column `i` of the input row
    /// and carries the field's name
    pub fn from_row_type(row_type: &RowType) -> LowerResult<Self> {
        let columns = row_type
            .fields
            .iter()
            .enumerate()
            .map(|(position, field)| {
                let column = ColumnRef::new(TableSlot::Outer, position, "", field.name.as_str());
                Ok(SchemaColumn {
                    column_name: field.name.clone(),
                    expression: typed(Expression::column(column), &field.ty)?,
                    position,
                })
            })
            .collect::<LowerResult<Vec<_>>>()?;
        Ok(Self { columns })
    }

    /// Schema of a program's named projections, each fully expanded and lowered
    pub fn from_program(program: &ExprProgram, params: &mut ParamIndexer) -> LowerResult<Self> {
        let mut lowerer = Lowerer::new(params);
        let mut columns = Vec::with_capacity(program.projects.len());
        for (position, (local, name)) in program.named_projects().enumerate() {
            let expanded = program.expand_local_ref(local)?;
            let expression = lowerer.lower(&expanded)?;
            debug!("projection {} '{}' = {}", position, name, expression);
            columns.push(SchemaColumn {
                column_name: name.to_string(),
                expression,
                position,
            });
        }
        Ok(Self { columns })
    }
}

/// Outer-slot column reference for a row field, named by its ordinal
pub fn column_from_field(field: &RowField) -> LowerResult<Expression> {
    resolve_input_ref(field.index, &field.ty, JoinOffset::none())
}
