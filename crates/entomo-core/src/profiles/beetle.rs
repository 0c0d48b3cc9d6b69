//! Crawling insects: surface sheen and elytra texture.

use super::CategoryProfile;
use crate::error::Result;
use crate::models::{AttributeKey, Category, Criteria};
use crate::store::{Column, Predicate};
use crate::vocabulary::FieldSpec;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::colors(&[
        "black", "bronze", "green", "brown", "red", "blue", "violet", "golden", "copper",
        "metallic",
    ])
    .excluding(&[
        "more", "less", "than", "более", "менее", "чем у", "variab", "вариа", "lighter", "светл",
        "dull", "тускл", "sheen", "отлив", "shine", "shiny", "блеск", "блестящ", "matt", "матов",
        "head", "голова", "pronotum", "переднеспинка", "above", "верх", "below", "низ", "often",
        "часто", "pronounced", "выражен", "strong", "сильн", "weak", "слаб",
    ])
    .max_chars(60),
    FieldSpec::attribute(
        "surface_types",
        AttributeKey::SurfaceType,
        &["glossy", "matt", "shiny", "metallic", "semi-matt", "dull", "bright"],
    )
    .max_chars(100),
    FieldSpec::attribute(
        "elytra",
        AttributeKey::Elytra,
        &["smooth", "granular", "wrinkled", "punctate", "grooved", "ribbed", "pitted"],
    )
    .max_chars(100),
    FieldSpec::column(
        "habitats",
        Column::Habitat,
        &[
            "forest", "meadow", "garden", "field", "bog", "shore", "forest edge", "glade", "park",
            "vegetable garden",
        ],
    ),
    FieldSpec::column(
        "seasons",
        Column::Season,
        &["spring", "summer", "autumn", "winter", "May", "June", "July", "August"],
    ),
];

/// Category B.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeetleProfile;

impl CategoryProfile for BeetleProfile {
    fn category(&self) -> Category {
        Category::Beetle
    }

    fn specific_predicates(&self, criteria: &Criteria) -> Result<Vec<Predicate>> {
        let mut predicates = Vec::new();
        // The sheen descriptor is often written without a label.
        if let Some(surface) = criteria.text("surface_type") {
            predicates.push(Predicate::contains(Column::Description, surface));
        }
        if let Some(elytra) = criteria.text("elytra") {
            predicates.push(Predicate::attribute(AttributeKey::Elytra, elytra));
        }
        Ok(predicates)
    }

    fn vocabulary_fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}
