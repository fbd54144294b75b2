pub mod catalog;
pub mod compile;
pub mod expression;
pub mod lower;
pub mod rex;
pub mod types;
