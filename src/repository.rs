//! Filtered repository: default joins, ordering, pagination, and
//! criteria-driven finders on top of the query builder.

use std::marker::PhantomData;

use crate::criteria::{qualify, Criterion, Translator};
use crate::error::OrmResult;
use crate::model::Model;
use crate::query::{JoinType, OrderDirection, QueryBuilder};

/// Default join applied to every query built by a repository.
///
/// `column` is the entity-side join column and auto-qualifies with the
/// table alias when unqualified; `references` is the already-qualified
/// column on the joined table.
#[derive(Debug, Clone)]
pub struct JoinSpec {
    pub kind: JoinType,
    pub table: String,
    pub column: String,
    pub references: String,
}

impl JoinSpec {
    pub fn inner(
        table: impl Into<String>,
        column: impl Into<String>,
        references: impl Into<String>,
    ) -> Self {
        Self {
            kind: JoinType::Inner,
            table: table.into(),
            column: column.into(),
            references: references.into(),
        }
    }

    pub fn left(
        table: impl Into<String>,
        column: impl Into<String>,
        references: impl Into<String>,
    ) -> Self {
        Self {
            kind: JoinType::Left,
            table: table.into(),
            column: column.into(),
            references: references.into(),
        }
    }
}

/// Per-call query assembly options.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub disable_joins: bool,
}

/// Repository with default joins and criteria-driven finders.
#[derive(Debug)]
pub struct Repository<M: Model> {
    joins: Vec<JoinSpec>,
    disable_joins: bool,
    _phantom: PhantomData<M>,
}

impl<M: Model> Default for Repository<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Repository<M> {
    pub fn new() -> Self {
        Self {
            joins: Vec::new(),
            disable_joins: false,
            _phantom: PhantomData,
        }
    }

    /// Register a join applied to every query unless disabled.
    pub fn with_join(mut self, join: JoinSpec) -> Self {
        self.joins.push(join);
        self
    }

    /// Switch the default joins off or on for every subsequent query.
    pub fn disable_joins(&mut self, disable: bool) -> &mut Self {
        self.disable_joins = disable;
        self
    }

    /// Assemble the full SELECT for the given filters.
    pub fn build_query(
        &self,
        filters: &[Criterion],
        order: &[(&str, OrderDirection)],
        limit: Option<i64>,
        offset: i64,
        options: BuildOptions,
    ) -> OrmResult<QueryBuilder<M>> {
        let alias = M::table_alias();
        let mut query = QueryBuilder::<M>::new()
            .select(&format!("{}.*", alias))
            .from_as(M::table_name(), alias);

        if !self.joins.is_empty() && !options.disable_joins && !self.disable_joins {
            for join in &self.joins {
                let column = qualify(alias, &join.column);
                query = match join.kind {
                    JoinType::Inner => query.join(&join.table, &column, &join.references),
                    JoinType::Left => query.left_join(&join.table, &column, &join.references),
                };
            }
        }

        for (column, direction) in order {
            query = query.order(&qualify(alias, column), *direction);
        }

        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        if offset > 0 {
            query = query.offset(offset);
        }

        if !filters.is_empty() {
            let compiled = Translator::new(alias).compile(filters)?;
            query = query.where_criteria(compiled);
        }

        Ok(query)
    }

    /// Fetch every row matching the filters.
    pub async fn find_filtered(
        &self,
        pool: &sqlx::PgPool,
        filters: &[Criterion],
        order: &[(&str, OrderDirection)],
        limit: Option<i64>,
        offset: i64,
    ) -> OrmResult<Vec<M>> {
        self.build_query(filters, order, limit, offset, BuildOptions::default())?
            .get(pool)
            .await
    }

    /// Fetch the first matching row, if any.
    pub async fn find_one_filtered(
        &self,
        pool: &sqlx::PgPool,
        filters: &[Criterion],
        order: &[(&str, OrderDirection)],
        offset: i64,
    ) -> OrmResult<Option<M>> {
        self.build_query(filters, order, Some(1), offset, BuildOptions::default())?
            .one_or_none(pool)
            .await
    }

    /// Count rows matching the filters.
    pub async fn count_rows(
        &self,
        pool: &sqlx::PgPool,
        column: &str,
        filters: &[Criterion],
    ) -> OrmResult<i64> {
        self.build_query(filters, &[], None, 0, BuildOptions::default())?
            .count(pool, column)
            .await
    }
}
