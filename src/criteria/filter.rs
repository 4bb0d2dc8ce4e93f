//! The criteria tree and its associative (JSON) input form.

use serde_json::Value;

use super::types::{FilterValue, Logic, Operator};
use crate::error::CriteriaError;

/// One node of a filter tree: a comparison clause or an and/or group.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    Clause {
        field: String,
        op: Operator,
        value: FilterValue,
    },
    Group {
        logic: Logic,
        items: Vec<Criterion>,
    },
}

impl Criterion {
    /// Build a clause from its parts.
    pub fn clause(field: impl Into<String>, op: Operator, value: impl Into<FilterValue>) -> Self {
        Self::Clause {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::clause(field, Operator::Eq, value)
    }

    pub fn neq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::clause(field, Operator::Neq, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::clause(field, Operator::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::clause(field, Operator::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::clause(field, Operator::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::clause(field, Operator::Lte, value)
    }

    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::clause(field, Operator::Like, FilterValue::Text(pattern.into()))
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self::clause(field, Operator::IsNull, true)
    }

    pub fn not_null(field: impl Into<String>) -> Self {
        Self::clause(field, Operator::NotNull, true)
    }

    pub fn is_in<T: Into<FilterValue>>(field: impl Into<String>, values: Vec<T>) -> Self {
        Self::clause(field, Operator::In, FilterValue::from(values))
    }

    pub fn not_in<T: Into<FilterValue>>(field: impl Into<String>, values: Vec<T>) -> Self {
        Self::clause(field, Operator::NotIn, FilterValue::from(values))
    }

    /// AND group.
    pub fn all(items: Vec<Criterion>) -> Self {
        Self::Group {
            logic: Logic::And,
            items,
        }
    }

    /// OR group.
    pub fn any(items: Vec<Criterion>) -> Self {
        Self::Group {
            logic: Logic::Or,
            items,
        }
    }

    /// Parse the associative criteria form.
    ///
    /// Accepts a JSON array of items or an object of `field: value`
    /// pairs. Array items are positional triples `[field, operator,
    /// value]`, two-element pairs `[field, operator]` (value defaults to
    /// boolean true), `["and"|"or", [...]]` groups, or keyed objects.
    /// Object pairs mean implicit equality, or an implicit null check
    /// when the value is JSON null.
    pub fn from_json(input: &Value) -> Result<Vec<Self>, CriteriaError> {
        match input {
            Value::Array(items) => items.iter().map(Self::parse_item).collect(),
            Value::Object(_) => Ok(vec![Self::parse_item(input)?]),
            _ => Err(CriteriaError::Malformed(
                "expected an array or object of criteria".to_string(),
            )),
        }
    }

    fn parse_item(item: &Value) -> Result<Self, CriteriaError> {
        match item {
            Value::Array(parts) => Self::parse_positional(parts),
            Value::Object(map) => {
                let mut pairs = map
                    .iter()
                    .map(|(key, value)| Self::parse_pair(key, value))
                    .collect::<Result<Vec<_>, _>>()?;
                if pairs.len() == 1 {
                    Ok(pairs.remove(0))
                } else {
                    Ok(Self::all(pairs))
                }
            }
            _ => Err(CriteriaError::Malformed(
                "positional criteria must be in array form, e.g. [\"id\", \"eq\", 1234]"
                    .to_string(),
            )),
        }
    }

    fn parse_positional(parts: &[Value]) -> Result<Self, CriteriaError> {
        let (field, second, third) = match parts {
            [field, second, third] => (field, second, Some(third)),
            [field, second] => (field, second, None),
            _ => {
                return Err(CriteriaError::Malformed(
                    "positional criteria take two or three elements".to_string(),
                ))
            }
        };

        let field = field.as_str().ok_or_else(|| {
            CriteriaError::Malformed("criteria field must be a string".to_string())
        })?;

        // "and"/"or" in field position shifts the nested criteria into
        // the second slot.
        if field == "and" || field == "or" {
            let logic = if field == "and" { Logic::And } else { Logic::Or };
            return Ok(Self::Group {
                logic,
                items: Self::from_json(second)?,
            });
        }

        let op_name = second.as_str().ok_or_else(|| {
            CriteriaError::Malformed("criteria operator must be a string".to_string())
        })?;
        let op = Operator::parse(op_name)?;

        let value = match third {
            Some(value) => FilterValue::from_json(value)?,
            // Two-element form defaults the value to true.
            None => FilterValue::Bool(true),
        };

        Ok(Self::Clause {
            field: field.to_string(),
            op,
            value,
        })
    }

    fn parse_pair(key: &str, value: &Value) -> Result<Self, CriteriaError> {
        if key == "and" || key == "or" {
            let logic = if key == "and" { Logic::And } else { Logic::Or };
            return Ok(Self::Group {
                logic,
                items: Self::from_json(value)?,
            });
        }

        match value {
            Value::Array(_) => Err(CriteriaError::Malformed(
                "keyed criteria do not support array values".to_string(),
            )),
            Value::Null => Ok(Self::clause(key, Operator::IsNull, true)),
            other => Ok(Self::Clause {
                field: key.to_string(),
                op: Operator::Eq,
                value: FilterValue::from_json(other)?,
            }),
        }
    }
}
