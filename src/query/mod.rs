//! Query Builder Module - fluent SELECT builder and execution

pub mod builder;
pub mod execution;
pub mod joins;
pub mod ordering;
pub mod pagination;
pub mod select;
pub mod sql_generation;
pub mod types;
pub mod where_clause;

// Re-export main types and builder
pub use builder::QueryBuilder;
pub use types::{JoinClause, JoinType, OrderDirection};
