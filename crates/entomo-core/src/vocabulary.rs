//! Filter vocabulary mining.
//!
//! A vocabulary lists, per filter field, the values a selection widget should
//! offer: a fixed curated `basic` list plus a `derived` list recomputed from
//! the store on every call. Raw values come from text columns or from the
//! attribute map built at ingestion, and are cleaned by the rules in the
//! field's [`FieldSpec`].

use crate::config::VocabularyConfig;
use crate::error::Result;
use crate::models::{AttributeKey, Category};
use crate::profiles::profile_for;
use crate::store::{Column, RecordStore};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Where the raw values of a field come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A text column. Compound values such as `blue, metallic` are split into
    /// atoms when `split_commas` is set.
    Column { column: Column, split_commas: bool },
    /// One parsed description attribute.
    Attribute(AttributeKey),
}

/// Mining and cleaning rules for one filter field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub source: FieldSource,
    /// Always-present default options, in display order.
    pub basic: &'static [&'static str],
    /// Lowercase substrings marking a value as comparative or descriptive noise.
    pub exclude: &'static [&'static str],
    /// Drop comparative phrasing such as `more than` or `see subspecies`.
    pub comparative: bool,
    /// Keep only the first of `a or b` / `a / b` alternatives.
    pub first_alternative: bool,
    /// On an exclusion hit, fall back to the text before the first comma.
    pub clean_prefix: bool,
    /// Values must be shorter than this many characters.
    pub max_chars: usize,
}

impl FieldSpec {
    /// Plain column field with no exclusions.
    pub const fn column(name: &'static str, column: Column, basic: &'static [&'static str]) -> Self {
        Self {
            name,
            source: FieldSource::Column {
                column,
                split_commas: false,
            },
            basic,
            exclude: &[],
            comparative: false,
            first_alternative: false,
            clean_prefix: false,
            max_chars: 150,
        }
    }

    /// Plain attribute field with no exclusions.
    pub const fn attribute(name: &'static str, key: AttributeKey, basic: &'static [&'static str]) -> Self {
        Self {
            name,
            source: FieldSource::Attribute(key),
            basic,
            exclude: &[],
            comparative: true,
            first_alternative: false,
            clean_prefix: false,
            max_chars: 150,
        }
    }

    /// Comma-separated color column.
    pub const fn colors(basic: &'static [&'static str]) -> Self {
        Self {
            name: "colors",
            source: FieldSource::Column {
                column: Column::Color,
                split_commas: true,
            },
            basic,
            exclude: &[],
            comparative: true,
            first_alternative: false,
            clean_prefix: false,
            max_chars: 150,
        }
    }

    pub const fn excluding(mut self, exclude: &'static [&'static str]) -> Self {
        self.exclude = exclude;
        self
    }

    pub const fn first_alternative(mut self) -> Self {
        self.first_alternative = true;
        self
    }

    pub const fn clean_prefix(mut self) -> Self {
        self.clean_prefix = true;
        self
    }

    pub const fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    fn is_excluded(&self, value: &str) -> bool {
        let lower = value.to_lowercase();
        if self.exclude.iter().any(|pattern| lower.contains(pattern)) {
            return true;
        }
        self.comparative && is_comparative(&lower)
    }

    /// Reduce a raw value to a clean filter value, or drop it.
    pub fn clean(&self, raw: &str) -> Option<String> {
        let mut value = raw.trim();
        let mut reduced = false;

        if self.first_alternative {
            let first = first_alternative(value);
            if first.len() != value.len() {
                value = first;
                reduced = true;
            }
        }

        if self.is_excluded(value) {
            if !self.clean_prefix {
                return None;
            }
            let prefix = value.split(',').next().unwrap_or_default().trim();
            if prefix.len() == value.len() || self.is_excluded(prefix) {
                return None;
            }
            value = prefix;
            reduced = true;
        }

        let max_chars = if reduced {
            self.max_chars.min(VocabularyConfig::REDUCED_VALUE_MAX_CHARS)
        } else {
            self.max_chars
        };
        let chars = value.chars().count();
        (chars > VocabularyConfig::MIN_VALUE_CHARS && chars < max_chars).then(|| value.to_string())
    }
}

/// `a or b`, `a или b` and `a / b`, in any letter case.
static ALTERNATIVE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:or|или)\s+|/").unwrap());

/// Text before the first alternative separator, trimmed.
fn first_alternative(value: &str) -> &str {
    ALTERNATIVE_SEPARATOR
        .find(value)
        .map_or(value, |m| value[..m.start()].trim())
}

/// Whether a lowercase value reads as a comparison or a cross-reference.
fn is_comparative(lower: &str) -> bool {
    let has_word = lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| VocabularyConfig::COMPARATIVE_WORDS.contains(&word));
    has_word || VocabularyConfig::COMPARATIVE_STEMS.iter().any(|stem| lower.contains(stem))
}

/// Options for one filter field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVocabulary {
    /// Curated defaults, in display order.
    pub basic: Vec<String>,
    /// Values mined from the store, sorted and deduplicated.
    pub derived: Vec<String>,
}

/// Filter options for a whole category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub category: Category,
    pub fields: BTreeMap<String, FieldVocabulary>,
}

impl Vocabulary {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            fields: BTreeMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldVocabulary> {
        self.fields.get(name)
    }
}

/// Compute the filter vocabulary of `category`.
pub fn mine(store: &dyn RecordStore, category: Category) -> Result<Vocabulary> {
    profile_for(category).mine_vocabulary(store)
}

/// Fetch and clean the values of one field.
pub fn mine_field(store: &dyn RecordStore, category: Category, spec: &FieldSpec) -> Result<FieldVocabulary> {
    let raw = match spec.source {
        FieldSource::Column { column, .. } => store.distinct_values(category, column)?,
        FieldSource::Attribute(key) => store.attribute_values(category, key)?,
    };
    let split = matches!(spec.source, FieldSource::Column { split_commas: true, .. });

    let derived: BTreeSet<String> = raw
        .iter()
        .flat_map(|value| {
            if split {
                value.split(',').collect::<Vec<_>>()
            } else {
                vec![value.as_str()]
            }
        })
        .filter_map(|value| spec.clean(value))
        .collect();

    Ok(FieldVocabulary {
        basic: spec.basic.iter().map(|s| s.to_string()).collect(),
        derived: derived.into_iter().collect(),
    })
}
