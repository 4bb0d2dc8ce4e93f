//! Query Builder WHERE clause wiring for compiled criteria

use super::builder::QueryBuilder;
use crate::criteria::CompiledCriteria;

impl<M> QueryBuilder<M> {
    /// Attach a compiled criteria expression as the WHERE clause.
    ///
    /// The expression's placeholders start at `$1`, so criteria must be
    /// the only parameterized clause of the query.
    pub fn where_criteria(mut self, compiled: CompiledCriteria) -> Self {
        if !compiled.sql.is_empty() {
            self.where_sql = Some(compiled.sql);
            self.params = compiled.params;
        }
        self
    }
}
