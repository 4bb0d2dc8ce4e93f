//! Criteria model, translation, and search helpers.
//!
//! [`filter`] defines the criteria tree and its associative JSON input
//! form, [`translate`] turns a tree into a parameterized SQL expression,
//! and [`search`] generates criteria from free-text keywords.

pub mod filter;
pub mod search;
pub mod translate;
pub mod types;

// Re-export the criteria surface
pub use filter::Criterion;
pub use search::search_criteria;
pub use translate::{CompiledCriteria, Translator};
pub use types::{FilterValue, Logic, Operator};

pub(crate) use translate::qualify;
