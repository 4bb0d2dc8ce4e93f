//! # criteria-orm: filtered repositories over sqlx
//!
//! Express record lookups as nested criteria (field / operator / value
//! clauses grouped with and/or), translate them into a parameterized SQL
//! boolean expression, and run them through a small SELECT builder on top
//! of sqlx/Postgres.
//!
//! The interesting part lives in [`criteria::translate`]: recursive
//! and/or grouping, operator dispatch, placeholder binding, and the
//! null-safe expansion of negated set membership.

pub mod criteria;
pub mod error;
pub mod model;
pub mod query;
pub mod repository;

// Re-export core types (minimal exports to avoid conflicts)
pub use criteria::{
    search_criteria, CompiledCriteria, Criterion, FilterValue, Logic, Operator, Translator,
};
pub use error::{CriteriaError, OrmError, OrmResult};
pub use model::Model;
pub use query::{JoinClause, JoinType, OrderDirection, QueryBuilder};
pub use repository::{BuildOptions, JoinSpec, Repository};
