//! Category tags and sex markers.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One of the three fixed entity classes in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Dragonfly,
    Beetle,
    Butterfly,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Dragonfly, Category::Beetle, Category::Butterfly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dragonfly => "dragonfly",
            Category::Beetle => "beetle",
            Category::Butterfly => "butterfly",
        }
    }

    /// Table holding this category's records.
    pub fn table_name(&self) -> &'static str {
        match self {
            Category::Dragonfly => "dragonflies",
            Category::Beetle => "beetles",
            Category::Butterfly => "butterflies",
        }
    }

    /// Sub-directory of the image root holding this category's pictures.
    pub fn image_dir_name(&self) -> &'static str {
        self.table_name()
    }

    /// Parse a boundary tag, rejecting anything outside the fixed set.
    pub fn parse(tag: &str) -> Result<Self> {
        tag.parse()
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dragonfly" => Ok(Category::Dragonfly),
            "beetle" => Ok(Category::Beetle),
            "butterfly" => Ok(Category::Butterfly),
            other => Err(CatalogError::InvalidCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MALE_MARKERS: &[&str] = &["male", "самец"];
const FEMALE_MARKERS: &[&str] = &["female", "самка"];

/// Sex recorded for an entity or encoded in an image filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
    /// Both markers present, e.g. `самец/самка`.
    Both,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Both => "both",
        }
    }

    /// Detect sex markers among already-normalized tokens.
    ///
    /// Markers are whole tokens, so `female` never counts as `male`.
    pub fn from_tokens(tokens: &BTreeSet<String>) -> Option<Self> {
        let male = MALE_MARKERS.iter().any(|m| tokens.contains(*m));
        let female = FEMALE_MARKERS.iter().any(|m| tokens.contains(*m));
        match (male, female) {
            (true, true) => Some(Sex::Both),
            (true, false) => Some(Sex::Male),
            (false, true) => Some(Sex::Female),
            (false, false) => None,
        }
    }

    /// Detect sex markers in free text.
    pub fn detect(text: &str) -> Option<Self> {
        Self::from_tokens(&crate::images::tokenize(text))
    }

    /// A single, unambiguous marker. `Both` carries no preference.
    pub fn definite(self) -> Option<Self> {
        match self {
            Sex::Both => None,
            other => Some(other),
        }
    }
}

impl FromStr for Sex {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "both" => Ok(Sex::Both),
            other => Err(CatalogError::Validation {
                field: "sex".to_string(),
                message: format!("unknown sex marker '{}'", other),
            }),
        }
    }
}
