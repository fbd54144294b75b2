//! Row type descriptors.

use crate::types::ScalarType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowField {
    pub name: String,
    /// Position of the field in its row
    pub index: usize,
    pub ty: ScalarType,
}

/// Ordered named fields of a relational operator's output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowType {
    pub fields: Vec<RowField>,
}

impl RowType {
    /// Build a row type from (name, type) pairs, indexing fields in order
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = (S, ScalarType)>) -> Self {
        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(index, (name, ty))| RowField {
                name: name.into(),
                index,
                ty,
            })
            .collect();
        Self { fields }
    }
}
