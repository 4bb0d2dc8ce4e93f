//! Criteria building blocks: operators, group logic, and filter values.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::CriteriaError;

/// Operators recognized by the criteria translator.
///
/// The serde names double as the textual operator names accepted by the
/// associative criteria form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    IsNull,
    NotNull,
    In,
    NotIn,
}

impl Operator {
    /// Parse the textual operator name used by the associative form.
    pub fn parse(name: &str) -> Result<Self, CriteriaError> {
        Ok(match name {
            "eq" => Self::Eq,
            "neq" => Self::Neq,
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "like" => Self::Like,
            "is_null" => Self::IsNull,
            "not_null" => Self::NotNull,
            "in" => Self::In,
            "not_in" => Self::NotIn,
            other => return Err(CriteriaError::UnsupportedOperator(other.to_string())),
        })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::IsNull => "is_null",
            Self::NotNull => "not_null",
            Self::In => "in",
            Self::NotIn => "not_in",
        };
        write!(f, "{}", name)
    }
}

/// Boolean combinator for criteria groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    pub(crate) fn separator(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Values bound into queries.
///
/// Scalars for the comparison family, `List` for the membership
/// operators. Lists never reach the bound-parameter set as-is; the
/// translator expands them into individual placeholders.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    DateTime(NaiveDateTime),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Canonical textual form datetimes are normalized to before binding.
    pub const DATETIME_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Normalize for binding: datetimes become canonical text, lists
    /// normalize element-wise.
    pub(crate) fn prepared(&self) -> Self {
        match self {
            Self::DateTime(dt) => Self::Text(dt.format(Self::DATETIME_FORMAT).to_string()),
            Self::List(items) => Self::List(items.iter().map(Self::prepared).collect()),
            other => other.clone(),
        }
    }

    /// Convert a JSON scalar (or array of scalars) into a filter value.
    pub fn from_json(value: &Value) -> Result<Self, CriteriaError> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    return Err(CriteriaError::Malformed(format!(
                        "numeric value {} is out of range",
                        n
                    )));
                }
            }
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => {
                Self::List(items.iter().map(Self::from_json).collect::<Result<_, _>>()?)
            }
            Value::Object(_) => {
                return Err(CriteriaError::Malformed(
                    "object values cannot be bound".to_string(),
                ))
            }
        })
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i16> for FilterValue {
    fn from(value: i16) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<NaiveDateTime> for FilterValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value.naive_utc())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_names_round_trip() {
        for name in [
            "eq", "neq", "gt", "gte", "lt", "lte", "like", "is_null", "not_null", "in", "not_in",
        ] {
            let op = Operator::parse(name).unwrap();
            assert_eq!(op.to_string(), name);
        }
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let err = Operator::parse("regexp").unwrap_err();
        assert_eq!(
            err,
            CriteriaError::UnsupportedOperator("regexp".to_string())
        );
    }

    #[test]
    fn datetime_prepares_to_canonical_text() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(
            FilterValue::from(dt).prepared(),
            FilterValue::Text("2024-03-07 09:05:00".to_string())
        );
    }

    #[test]
    fn lists_prepare_element_wise() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let list = FilterValue::List(vec![FilterValue::Int(1), FilterValue::DateTime(dt)]);
        assert_eq!(
            list.prepared(),
            FilterValue::List(vec![
                FilterValue::Int(1),
                FilterValue::Text("2024-01-01 00:00:00".to_string()),
            ])
        );
    }
}
