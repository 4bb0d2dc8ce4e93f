//! Error types for criteria translation and query execution.
//!
//! Every malformed filter structure is rejected synchronously at build
//! time with a [`CriteriaError`]; database failures surface through the
//! [`OrmError`] umbrella.

use thiserror::Error;

use crate::criteria::Operator;

/// Result type alias for repository and query operations.
pub type OrmResult<T> = Result<T, OrmError>;

/// Umbrella error for everything this crate can fail with.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Database driver error, surfaced from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Criteria input rejected at build time.
    #[error(transparent)]
    Criteria(#[from] CriteriaError),
}

/// Build-time rejection of a filter structure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    /// Operator name not in the recognized set.
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// A criteria set (top level or nested group) had no entries.
    #[error("empty criteria")]
    EmptyCriteria,

    /// A list value was given to an operator that takes scalars.
    #[error("list values are not supported for the '{0}' operator")]
    UnexpectedList(Operator),

    /// A scalar (or empty list) was given to a membership operator.
    #[error("operator '{0}' requires a non-empty list value")]
    ExpectedList(Operator),

    /// Criteria input did not match any recognized shape.
    #[error("malformed criteria: {0}")]
    Malformed(String),

    /// Keyword search was asked to build criteria over no columns.
    #[error("no searchable columns specified")]
    NoSearchableColumns,
}
