//! Query Builder - Core builder implementation

use std::marker::PhantomData;

use super::types::*;
use crate::criteria::FilterValue;

/// Fluent SELECT builder for one entity type.
#[derive(Debug)]
pub struct QueryBuilder<M = ()> {
    pub(crate) select_fields: Vec<String>,
    pub(crate) table: Option<String>,
    pub(crate) alias: Option<String>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) where_sql: Option<String>,
    pub(crate) params: Vec<FilterValue>,
    pub(crate) order_by: Vec<(String, OrderDirection)>,
    pub(crate) limit_count: Option<i64>,
    pub(crate) offset_value: Option<i64>,
    _phantom: PhantomData<M>,
}

impl<M> Clone for QueryBuilder<M> {
    fn clone(&self) -> Self {
        Self {
            select_fields: self.select_fields.clone(),
            table: self.table.clone(),
            alias: self.alias.clone(),
            joins: self.joins.clone(),
            where_sql: self.where_sql.clone(),
            params: self.params.clone(),
            order_by: self.order_by.clone(),
            limit_count: self.limit_count,
            offset_value: self.offset_value,
            _phantom: PhantomData,
        }
    }
}

impl<M> Default for QueryBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> QueryBuilder<M> {
    /// Create a new query builder
    pub fn new() -> Self {
        Self {
            select_fields: Vec::new(),
            table: None,
            alias: None,
            joins: Vec::new(),
            where_sql: None,
            params: Vec::new(),
            order_by: Vec::new(),
            limit_count: None,
            offset_value: None,
            _phantom: PhantomData,
        }
    }
}
