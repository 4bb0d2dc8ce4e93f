//! Model trait: the seam between entities and the query layer.

use sqlx::postgres::PgRow;

use crate::error::OrmResult;

/// Minimal entity contract the repository layer builds against.
///
/// Schema definition and full row mapping stay with the implementor;
/// this crate only needs to know the table, the alias used to qualify
/// columns, and how to hydrate one row.
pub trait Model: Sized {
    /// Table the entity maps to.
    fn table_name() -> &'static str;

    /// Alias used to qualify unqualified columns.
    fn table_alias() -> &'static str {
        Self::table_name()
    }

    /// Hydrate one database row.
    fn from_row(row: &PgRow) -> OrmResult<Self>;
}
