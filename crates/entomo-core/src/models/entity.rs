//! Entity records and the attribute map parsed from their descriptions.

use super::category::{Category, Sex};
use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Secondary attribute recovered from a `Label: value` description segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKey {
    EyeColor,
    Environment,
    Sex,
    Wingspan,
    SurfaceType,
    Elytra,
    WingPattern,
}

impl AttributeKey {
    pub const ALL: [AttributeKey; 7] = [
        AttributeKey::EyeColor,
        AttributeKey::Environment,
        AttributeKey::Sex,
        AttributeKey::Wingspan,
        AttributeKey::SurfaceType,
        AttributeKey::Elytra,
        AttributeKey::WingPattern,
    ];

    /// Key used in the attributes JSON column.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::EyeColor => "eye_color",
            AttributeKey::Environment => "environment",
            AttributeKey::Sex => "sex",
            AttributeKey::Wingspan => "wingspan",
            AttributeKey::SurfaceType => "surface_type",
            AttributeKey::Elytra => "elytra",
            AttributeKey::WingPattern => "wing_pattern",
        }
    }

    /// Lowercase label prefixes that introduce this attribute.
    ///
    /// A label matches when it starts with one of these, so
    /// `Тип поверхности / Блеск` and `Надкрылья` both resolve.
    pub fn label_aliases(&self) -> &'static [&'static str] {
        match self {
            AttributeKey::EyeColor => &["eye color", "eye colour", "eyes", "цвет глаз"],
            AttributeKey::Environment => &["environment", "water body", "среда"],
            AttributeKey::Sex => &["sex", "gender", "пол"],
            AttributeKey::Wingspan => &["wingspan", "wing span", "размах"],
            AttributeKey::SurfaceType => &["surface", "sheen", "тип поверхности", "блеск"],
            AttributeKey::Elytra => &["elytra", "надкрыль"],
            AttributeKey::WingPattern => &["wing pattern", "pattern", "рисунок"],
        }
    }

    /// Resolve a description label to its attribute key.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|key| {
            key.label_aliases().iter().any(|alias| {
                label == *alias
                    || (label.starts_with(alias)
                        && !label[alias.len()..].starts_with(char::is_alphanumeric))
                    || (alias.chars().count() >= 6 && label.starts_with(alias))
            })
        })
    }
}

/// Parsed attributes of one record.
pub type Attributes = BTreeMap<AttributeKey, String>;

/// A stored catalogue record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Store-assigned, unique within the category.
    pub id: i64,
    pub category: Category,
    pub name_common: String,
    pub name_scientific: Option<String>,
    pub size_min: Option<f64>,
    pub size_max: Option<f64>,
    pub color: Option<String>,
    pub habitat: Option<String>,
    pub season: Option<String>,
    pub description: Option<String>,
    /// Derived from the description at ingestion.
    pub sex: Option<Sex>,
    /// Derived from the description at ingestion.
    #[serde(default)]
    pub attributes: Attributes,
    /// Image reference relative to the image root.
    pub image: Option<String>,
}

impl EntityRecord {
    pub fn attribute(&self, key: AttributeKey) -> Option<&str> {
        self.attributes.get(&key).map(String::as_str)
    }
}

/// Field values for a record that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEntity {
    pub name_common: String,
    #[serde(default)]
    pub name_scientific: Option<String>,
    #[serde(default)]
    pub size_min: Option<f64>,
    #[serde(default)]
    pub size_max: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub habitat: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewEntity {
    pub fn new(name_common: impl Into<String>) -> Self {
        Self {
            name_common: name_common.into(),
            ..Default::default()
        }
    }

    pub fn with_sizes(mut self, size_min: Option<f64>, size_max: Option<f64>) -> Self {
        self.size_min = size_min;
        self.size_max = size_max;
        self
    }

    /// Set both sizes from free text such as `60–72 mm`.
    pub fn with_size_text(self, text: &str) -> Self {
        let (size_min, size_max) = crate::ingest::parse_size_range(text);
        self.with_sizes(size_min, size_max)
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_habitat(mut self, habitat: impl Into<String>) -> Self {
        self.habitat = Some(habitat.into());
        self
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Check the record invariants before it reaches the store.
    pub fn validate(&self) -> Result<()> {
        if self.name_common.trim().is_empty() {
            return Err(CatalogError::Validation {
                field: "name_common".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        for (field, value) in [("size_min", self.size_min), ("size_max", self.size_max)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(CatalogError::Validation {
                    field: field.to_string(),
                    message: "must be a finite number".to_string(),
                });
            }
        }

        if let (Some(min), Some(max)) = (self.size_min, self.size_max) {
            if min > max {
                return Err(CatalogError::Validation {
                    field: "size_min".to_string(),
                    message: format!("{} exceeds size_max {}", min, max),
                });
            }
        }

        Ok(())
    }
}
