//! Query Builder SELECT and FROM operations

use super::builder::QueryBuilder;

impl<M> QueryBuilder<M> {
    /// Add SELECT fields to the query
    pub fn select(mut self, fields: &str) -> Self {
        self.select_fields.extend(
            fields
                .split(',')
                .map(|f| f.trim().to_string())
                .collect::<Vec<String>>(),
        );
        self
    }

    /// Set the FROM table
    pub fn from(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Set the FROM table with an alias used to qualify columns
    pub fn from_as(mut self, table: &str, alias: &str) -> Self {
        self.table = Some(table.to_string());
        self.alias = Some(alias.to_string());
        self
    }
}
