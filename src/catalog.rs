//! Read-only catalog view used to name column references.

use crate::types::ValueType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub column_name: String,
    pub column_type: ValueType,
    pub column_order: u32,
}

/// A table's name and its columns in physical order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub table_name: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    /// Build a table from (name, type) pairs, ordering columns as given
    pub fn with_columns<S: Into<String>>(
        table_name: impl Into<String>,
        columns: impl IntoIterator<Item = (S, ValueType)>,
    ) -> Self {
        let columns = columns
            .into_iter()
            .enumerate()
            .map(|(order, (name, column_type))| ColumnInfo {
                column_name: name.into(),
                column_type,
                column_order: order as u32,
            })
            .collect();
        Self {
            table_name: table_name.into(),
            columns,
        }
    }

    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.column_name.as_str())
    }
}
