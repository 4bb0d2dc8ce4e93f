//! Query Builder execution for Model types

use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{Postgres, Row};

use super::builder::QueryBuilder;
use crate::criteria::FilterValue;
use crate::error::OrmResult;
use crate::model::Model;

/// Bind translated values by their concrete type.
fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[FilterValue],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            FilterValue::Null => query.bind(Option::<String>::None),
            FilterValue::Bool(b) => query.bind(*b),
            FilterValue::Int(i) => query.bind(*i),
            FilterValue::Float(f) => query.bind(*f),
            FilterValue::Text(s) => query.bind(s.clone()),
            FilterValue::Uuid(u) => query.bind(*u),
            FilterValue::DateTime(dt) => {
                query.bind(dt.format(FilterValue::DATETIME_FORMAT).to_string())
            }
            // Lists are expanded into individual placeholders during
            // translation and never appear in the bound set.
            FilterValue::List(_) => query.bind(Option::<String>::None),
        };
    }
    query
}

impl<M: Model> QueryBuilder<M> {
    /// Execute the query and hydrate every row.
    pub async fn get(self, pool: &sqlx::PgPool) -> OrmResult<Vec<M>> {
        let (sql, params) = self.to_sql_with_params();
        tracing::debug!("Executing query: {}", sql);

        let rows = bind_params(sqlx::query(&sql), &params)
            .fetch_all(pool)
            .await?;

        let mut models = Vec::with_capacity(rows.len());
        for row in rows {
            models.push(M::from_row(&row)?);
        }
        Ok(models)
    }

    /// Execute the query and return the first row, if any.
    pub async fn one_or_none(self, pool: &sqlx::PgPool) -> OrmResult<Option<M>> {
        let query = self.limit(1);
        let (sql, params) = query.to_sql_with_params();
        tracing::debug!("Executing query: {}", sql);

        let row = bind_params(sqlx::query(&sql), &params)
            .fetch_optional(pool)
            .await?;

        row.map(|row| M::from_row(&row)).transpose()
    }

    /// Execute as a scalar COUNT over the given column.
    pub async fn count(mut self, pool: &sqlx::PgPool, column: &str) -> OrmResult<i64> {
        self.select_fields = vec![format!("count({})", column)];
        let (sql, params) = self.to_sql_with_params();
        tracing::debug!("Executing count query: {}", sql);

        let row = bind_params(sqlx::query(&sql), &params)
            .fetch_one(pool)
            .await?;

        let count: i64 = row.try_get(0)?;
        Ok(count)
    }
}
