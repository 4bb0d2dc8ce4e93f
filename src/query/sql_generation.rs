//! Query Builder SQL generation

use super::builder::QueryBuilder;
use crate::criteria::FilterValue;

impl<M> QueryBuilder<M> {
    /// Render the query with `$N` placeholders and return the bound values.
    pub fn to_sql_with_params(&self) -> (String, Vec<FilterValue>) {
        (self.render(), self.params.clone())
    }

    /// Render the query string only.
    pub fn to_sql(&self) -> String {
        self.render()
    }

    fn render(&self) -> String {
        let mut sql = String::from("SELECT ");

        if self.select_fields.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select_fields.join(", "));
        }

        // FROM clause
        if let Some(table) = &self.table {
            sql.push_str(" FROM ");
            sql.push_str(table);
            if let Some(alias) = &self.alias {
                if alias != table {
                    sql.push(' ');
                    sql.push_str(alias);
                }
            }
        }

        // JOIN clauses
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.join_type.to_string());
            sql.push(' ');
            sql.push_str(&join.table);
            sql.push_str(&format!(" ON {} = {}", join.on.0, join.on.1));
        }

        // WHERE clause
        if let Some(where_sql) = &self.where_sql {
            sql.push_str(" WHERE ");
            sql.push_str(where_sql);
        }

        // ORDER BY clause
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            let order_clauses: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, direction)| format!("{} {}", column, direction))
                .collect();
            sql.push_str(&order_clauses.join(", "));
        }

        // LIMIT clause
        if let Some(limit) = self.limit_count {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        // OFFSET clause
        if let Some(offset) = self.offset_value {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_query_selects_everything() {
        let sql = QueryBuilder::<()>::new().from("users").to_sql();
        assert_eq!(sql, "SELECT * FROM users");
    }

    #[test]
    fn alias_matching_table_is_not_repeated() {
        let sql = QueryBuilder::<()>::new().from_as("users", "users").to_sql();
        assert_eq!(sql, "SELECT * FROM users");
    }

    #[test]
    fn full_select_renders_in_clause_order() {
        let sql = QueryBuilder::<()>::new()
            .select("u.*")
            .from_as("users", "u")
            .join("accounts a", "u.account_id", "a.id")
            .order_by_desc("u.created_at")
            .limit(5)
            .offset(10)
            .to_sql();
        assert_eq!(
            sql,
            "SELECT u.* FROM users u INNER JOIN accounts a ON u.account_id = a.id \
             ORDER BY u.created_at DESC LIMIT 5 OFFSET 10"
        );
    }
}
