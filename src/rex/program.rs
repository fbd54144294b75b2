//! Expression programs.
//!
//! A program is a flat pool of scalar nodes in which later entries refer to
//! earlier ones through `LocalRef`s, plus an ordered list of named output
//! projections. Sharing in the pool turns the expressions into a DAG; the
//! engine wants owned trees, so every local reference is expanded before
//! lowering.

use crate::lower::{LowerError, LowerResult};
use crate::rex::node::{LocalRef, RexCall, RexNode};
use serde::{Deserialize, Serialize};

/// Named output projection of a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub local: LocalRef,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExprProgram {
    /// Shared sub-expression pool
    pub exprs: Vec<RexNode>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl ExprProgram {
    pub fn new(exprs: Vec<RexNode>, projects: Vec<Project>) -> Self {
        Self { exprs, projects }
    }

    /// Program whose projections are the first `names.len()` pool entries
    #[cfg(test)]
    pub(crate) fn with_identity_projects(exprs: Vec<RexNode>, names: &[&str]) -> Self {
        let projects = names
            .iter()
            .zip(exprs.iter())
            .enumerate()
            .map(|(i, (name, expr))| Project {
                local: LocalRef::new(i, *expr.ty()),
                name: name.to_string(),
            })
            .collect();
        Self { exprs, projects }
    }

    pub fn has_projects(&self) -> bool {
        !self.projects.is_empty()
    }

    /// Get a pool entry, failing on an out-of-bounds index
    pub fn expr(&self, index: usize) -> LowerResult<&RexNode> {
        self.exprs.get(index).ok_or_else(|| {
            LowerError::internal(format!(
                "local reference {} out of bounds for program with {} expressions",
                index,
                self.exprs.len()
            ))
        })
    }

    /// Get the projection at an output position
    pub fn project(&self, position: usize) -> LowerResult<&Project> {
        self.projects.get(position).ok_or_else(|| {
            LowerError::internal(format!(
                "projection {} out of bounds for program with {} projections",
                position,
                self.projects.len()
            ))
        })
    }

    pub fn named_projects(&self) -> impl Iterator<Item = (&LocalRef, &str)> {
        self.projects.iter().map(|p| (&p.local, p.name.as_str()))
    }

    /// Expand a local reference into an owned tree free of local references
    pub fn expand_local_ref(&self, local: &LocalRef) -> LowerResult<RexNode> {
        let mut expanding = Vec::new();
        self.expand_ref(local.index, &mut expanding)
    }

    pub fn expand_local_refs(&self, locals: &[LocalRef]) -> LowerResult<Vec<RexNode>> {
        locals.iter().map(|l| self.expand_local_ref(l)).collect()
    }

    fn expand_ref(&self, index: usize, expanding: &mut Vec<usize>) -> LowerResult<RexNode> {
        if expanding.contains(&index) {
            return Err(LowerError::internal(format!(
                "cyclic local reference chain through expression {}",
                index
            )));
        }
        let target = self.expr(index)?;
        expanding.push(index);
        let expanded = self.expand_node(target, expanding);
        expanding.pop();
        expanded
    }

    fn expand_node(&self, node: &RexNode, expanding: &mut Vec<usize>) -> LowerResult<RexNode> {
        match node {
            RexNode::LocalRef(local) => self.expand_ref(local.index, expanding),
            RexNode::Call(call) => {
                let operands = call
                    .operands
                    .iter()
                    .map(|operand| self.expand_node(operand, expanding))
                    .collect::<LowerResult<Vec<_>>>()?;
                Ok(RexNode::Call(RexCall {
                    op: call.op.clone(),
                    operands,
                    ty: call.ty,
                }))
            }
            other => Ok(other.clone()),
        }
    }
}
