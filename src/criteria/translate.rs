//! Criteria-to-SQL translation.
//!
//! Walks a criteria tree and produces a single boolean expression with
//! `$N` placeholders plus the bound values in placeholder order.

use super::filter::Criterion;
use super::types::{FilterValue, Logic, Operator};
use crate::error::CriteriaError;

/// A translated WHERE expression: SQL fragment plus bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCriteria {
    pub sql: String,
    pub params: Vec<FilterValue>,
}

/// Translates criteria trees for one entity alias.
///
/// Holds the placeholder counter; placeholders restart at `$1` per
/// compilation since sqlx binds positionally per statement.
#[derive(Debug)]
pub struct Translator<'a> {
    alias: &'a str,
    counter: usize,
    params: Vec<FilterValue>,
}

impl<'a> Translator<'a> {
    pub fn new(alias: &'a str) -> Self {
        Self {
            alias,
            counter: 0,
            params: Vec::new(),
        }
    }

    /// Compile a criteria set into a single AND-rooted expression.
    pub fn compile(mut self, criteria: &[Criterion]) -> Result<CompiledCriteria, CriteriaError> {
        let root = self.composite(Logic::And, criteria)?;
        Ok(CompiledCriteria {
            sql: root.render_root(),
            params: self.params,
        })
    }

    fn composite(
        &mut self,
        logic: Logic,
        items: &[Criterion],
    ) -> Result<Composite, CriteriaError> {
        if items.is_empty() {
            return Err(CriteriaError::EmptyCriteria);
        }

        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Criterion::Group {
                    logic: inner,
                    items,
                } => {
                    let group = self.composite(*inner, items)?;
                    if !group.parts.is_empty() {
                        parts.push(group.render_nested());
                    }
                }
                Criterion::Clause { field, op, value } => {
                    if let Some(clause) = self.clause(field, *op, value)? {
                        parts.push(clause);
                    }
                }
            }
        }

        Ok(Composite { logic, parts })
    }

    fn clause(
        &mut self,
        field: &str,
        op: Operator,
        value: &FilterValue,
    ) -> Result<Option<String>, CriteriaError> {
        let field = qualify(self.alias, field);

        let rendered = match op {
            Operator::Eq => self.comparison(&field, "=", op, value)?,
            Operator::Neq => self.comparison(&field, "!=", op, value)?,
            Operator::Gt => self.comparison(&field, ">", op, value)?,
            Operator::Gte => self.comparison(&field, ">=", op, value)?,
            Operator::Lt => self.comparison(&field, "<", op, value)?,
            Operator::Lte => self.comparison(&field, "<=", op, value)?,
            Operator::Like => self.comparison(&field, "LIKE", op, value)?,
            Operator::IsNull => null_check(&field, truthy(value)),
            Operator::NotNull => null_check(&field, !truthy(value)),
            Operator::In => self.membership(&field, value)?,
            Operator::NotIn => return self.exclusion(&field, value),
        };

        Ok(Some(rendered))
    }

    fn comparison(
        &mut self,
        field: &str,
        symbol: &str,
        op: Operator,
        value: &FilterValue,
    ) -> Result<String, CriteriaError> {
        match value {
            FilterValue::List(_) => Err(CriteriaError::UnexpectedList(op)),
            // Comparing against null can only mean a null check.
            FilterValue::Null => Ok(format!("{} IS NULL", field)),
            scalar => {
                let placeholder = self.bind(scalar);
                Ok(format!("{} {} {}", field, symbol, placeholder))
            }
        }
    }

    fn membership(
        &mut self,
        field: &str,
        value: &FilterValue,
    ) -> Result<String, CriteriaError> {
        let FilterValue::List(items) = value else {
            return Err(CriteriaError::ExpectedList(Operator::In));
        };
        if items.is_empty() {
            return Err(CriteriaError::ExpectedList(Operator::In));
        }

        let placeholders: Vec<String> = items.iter().map(|item| self.bind(item)).collect();
        Ok(format!("{} IN ({})", field, placeholders.join(", ")))
    }

    /// NOT IN is not null-safe, so each excluded value becomes its own
    /// `(field != $n OR field IS NULL)` clause and the set is conjoined.
    fn exclusion(
        &mut self,
        field: &str,
        value: &FilterValue,
    ) -> Result<Option<String>, CriteriaError> {
        let FilterValue::List(items) = value else {
            return Err(CriteriaError::ExpectedList(Operator::NotIn));
        };

        let mut clauses = Vec::with_capacity(items.len());
        for item in items {
            if item.is_null() {
                // Excluding null degrades to a plain not-null check.
                clauses.push(format!("({} IS NOT NULL)", field));
            } else {
                let placeholder = self.bind(item);
                clauses.push(format!(
                    "({} != {} OR {} IS NULL)",
                    field, placeholder, field
                ));
            }
        }

        if clauses.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!("({})", clauses.join(" AND "))))
    }

    fn bind(&mut self, value: &FilterValue) -> String {
        self.counter += 1;
        self.params.push(value.prepared());
        format!("${}", self.counter)
    }
}

/// Boolean composite of rendered clause fragments.
struct Composite {
    logic: Logic,
    parts: Vec<String>,
}

impl Composite {
    fn render_root(&self) -> String {
        self.parts.join(self.logic.separator())
    }

    fn render_nested(&self) -> String {
        format!("({})", self.render_root())
    }
}

/// Prefix unqualified column names with the entity alias.
pub(crate) fn qualify(alias: &str, column: &str) -> String {
    if column.contains('.') {
        column.to_string()
    } else {
        format!("{}.{}", alias, column)
    }
}

fn null_check(field: &str, null: bool) -> String {
    if null {
        format!("{} IS NULL", field)
    } else {
        format!("{} IS NOT NULL", field)
    }
}

fn truthy(value: &FilterValue) -> bool {
    match value {
        FilterValue::Null => false,
        FilterValue::Bool(b) => *b,
        FilterValue::Int(i) => *i != 0,
        FilterValue::Float(f) => *f != 0.0,
        FilterValue::Text(s) => !s.is_empty(),
        FilterValue::Uuid(_) | FilterValue::DateTime(_) => true,
        FilterValue::List(items) => !items.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualify_prefixes_bare_columns() {
        assert_eq!(qualify("u", "name"), "u.name");
        assert_eq!(qualify("u", "p.name"), "p.name");
    }

    #[test]
    fn placeholders_number_in_bind_order() {
        let compiled = Translator::new("u")
            .compile(&[
                Criterion::eq("a", 1),
                Criterion::eq("b", 2),
                Criterion::eq("c", 3),
            ])
            .unwrap();
        assert_eq!(compiled.sql, "u.a = $1 AND u.b = $2 AND u.c = $3");
        assert_eq!(compiled.params.len(), 3);
    }

    #[test]
    fn empty_nested_group_is_rejected() {
        let err = Translator::new("u")
            .compile(&[Criterion::eq("a", 1), Criterion::any(Vec::new())])
            .unwrap_err();
        assert_eq!(err, CriteriaError::EmptyCriteria);
    }

    #[test]
    fn null_check_truthiness_follows_value() {
        let compiled = Translator::new("u")
            .compile(&[Criterion::clause("a", Operator::IsNull, 0)])
            .unwrap();
        assert_eq!(compiled.sql, "u.a IS NOT NULL");
    }
}
