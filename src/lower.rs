//! Lowering of optimizer row expressions into engine expressions.
//!
//! The visitor walks a row expression post-order: operands are lowered
//! first, then the call itself is mapped onto one or more engine nodes.
//! Column references are split between the outer and inner input of a
//! join, literals are re-encoded into the engine's constant format and
//! every produced node gets a value type through one shared entry point.

pub mod call;
pub mod column;
pub mod error;
pub mod literal;
pub mod params;
pub mod schema;
pub mod typing;
pub mod visitor;

pub use call::{build_case, lower_call};
pub use column::JoinOffset;
pub use error::{LowerError, LowerResult};
pub use literal::{lower_literal, normalize_literal};
pub use params::ParamIndexer;
pub use schema::{column_from_field, OutputSchema, SchemaColumn};
pub use typing::{assign_type, assign_value_type};
pub use visitor::Lowerer;
