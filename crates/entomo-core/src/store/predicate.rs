//! Typed filter predicates understood by every record store.
//!
//! A predicate has two readings kept in lockstep: SQL for [`super::SqliteStore`]
//! and in-memory evaluation for [`super::MemoryStore`]. A missing value never
//! satisfies a predicate in either reading.

use crate::config::StoreConfig;
use crate::models::{AttributeKey, EntityRecord, Sex};
use rusqlite::ToSql;

/// Dedicated record column a predicate may address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    SizeMin,
    SizeMax,
    Color,
    Habitat,
    Season,
    Description,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::SizeMin => "size_min",
            Column::SizeMax => "size_max",
            Column::Color => "color",
            Column::Habitat => "habitat",
            Column::Season => "season",
            Column::Description => "description",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::SizeMin | Column::SizeMax)
    }

    fn number(&self, record: &EntityRecord) -> Option<f64> {
        match self {
            Column::SizeMin => record.size_min,
            Column::SizeMax => record.size_max,
            _ => None,
        }
    }

    pub(crate) fn text<'a>(&self, record: &'a EntityRecord) -> Option<&'a str> {
        match self {
            Column::Color => record.color.as_deref(),
            Column::Habitat => record.habitat.as_deref(),
            Column::Season => record.season.as_deref(),
            Column::Description => record.description.as_deref(),
            Column::SizeMin | Column::SizeMax => None,
        }
    }
}

/// One filter condition. A predicate list is ANDed.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column >= value`
    AtLeast { column: Column, value: f64 },
    /// `column <= value`
    AtMost { column: Column, value: f64 },
    /// Case-folded substring match on a text column.
    Contains { column: Column, needle: String },
    /// Case-folded substring match on one parsed attribute.
    AttributeContains { key: AttributeKey, needle: String },
    /// Derived sex equals `sex`, or the record covers both sexes.
    SexIs(Sex),
    /// Logical OR of the inner predicates.
    AnyOf(Vec<Predicate>),
}

impl Predicate {
    pub fn contains(column: Column, needle: impl Into<String>) -> Self {
        Predicate::Contains {
            column,
            needle: needle.into(),
        }
    }

    pub fn attribute(key: AttributeKey, needle: impl Into<String>) -> Self {
        Predicate::AttributeContains {
            key,
            needle: needle.into(),
        }
    }

    /// Evaluate against an in-memory record.
    pub fn matches(&self, record: &EntityRecord) -> bool {
        match self {
            Predicate::AtLeast { column, value } => {
                column.number(record).is_some_and(|v| v >= *value)
            }
            Predicate::AtMost { column, value } => {
                column.number(record).is_some_and(|v| v <= *value)
            }
            Predicate::Contains { column, needle } => column
                .text(record)
                .is_some_and(|text| folded_contains(text, needle)),
            Predicate::AttributeContains { key, needle } => record
                .attribute(*key)
                .is_some_and(|text| folded_contains(text, needle)),
            Predicate::SexIs(sex) => {
                matches!(record.sex, Some(s) if s == *sex || s == Sex::Both)
            }
            Predicate::AnyOf(inner) => inner.iter().any(|p| p.matches(record)),
        }
    }

    /// Render as a SQL boolean expression, appending bound parameters.
    pub fn to_sql(&self, params: &mut Vec<Box<dyn ToSql>>) -> String {
        let fold = StoreConfig::FOLD_FUNCTION;
        match self {
            Predicate::AtLeast { column, value } => {
                params.push(Box::new(*value));
                format!("{} >= ?", column.as_str())
            }
            Predicate::AtMost { column, value } => {
                params.push(Box::new(*value));
                format!("{} <= ?", column.as_str())
            }
            Predicate::Contains { column, needle } => {
                params.push(Box::new(needle.to_lowercase()));
                format!("instr({}({}), ?) > 0", fold, column.as_str())
            }
            Predicate::AttributeContains { key, needle } => {
                params.push(Box::new(needle.to_lowercase()));
                format!(
                    "instr({}(json_extract(attributes_json, '$.{}')), ?) > 0",
                    fold,
                    key.as_str()
                )
            }
            Predicate::SexIs(sex) => {
                params.push(Box::new(sex.as_str().to_string()));
                format!("sex IN (?, '{}')", Sex::Both.as_str())
            }
            Predicate::AnyOf(inner) if inner.is_empty() => "0".to_string(),
            Predicate::AnyOf(inner) => {
                let parts: Vec<String> = inner.iter().map(|p| p.to_sql(params)).collect();
                format!("({})", parts.join(" OR "))
            }
        }
    }
}

/// Render an ANDed predicate list as a `WHERE` clause body.
pub fn where_clause(predicates: &[Predicate], params: &mut Vec<Box<dyn ToSql>>) -> String {
    let mut clause = String::from("1=1");
    for predicate in predicates {
        clause.push_str(" AND ");
        clause.push_str(&predicate.to_sql(params));
    }
    clause
}

fn folded_contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
