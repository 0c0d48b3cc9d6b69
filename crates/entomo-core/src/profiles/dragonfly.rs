//! Flight insects: body length, wingspan, eye color, water body and sex.

use super::{push_overlap, CategoryProfile};
use crate::error::Result;
use crate::models::{format_number, AttributeKey, Category, Criteria, Sex};
use crate::store::{Column, Predicate};
use crate::vocabulary::FieldSpec;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::colors(&[
        "blue", "light blue", "green", "yellow", "red", "brown", "black", "white", "orange",
        "violet", "bronze", "metallic", "grey",
    ])
    .excluding(&[
        "more", "less", "than", "variab", "вариа", "более", "менее", "чем у", "paler", "lighter",
        "светл", "dull", "тускл", "thorax", "торакс", "abdomen", "брюшко", "segment", "сегмент",
        "marking", "отметин", "spot", "пятно", "stripe", "полос", "pattern", "рисунок", "ground",
        "фон", "pruinos", "пруинов", "sheen", "отлив", "shine", "блеск", "chest", "грудь",
        "u-shaped", "u-образн",
    ])
    .max_chars(80),
    FieldSpec::attribute(
        "eye_colors",
        AttributeKey::EyeColor,
        &["green", "brown", "black", "blue", "light blue", "red", "yellow", "grey"],
    )
    .excluding(&[
        "lighter than", "darker than", "above", "сверху", "below", "снизу", "spot", "пятно",
        "sheen", "отлив", "variab", "вариа",
    ])
    .first_alternative()
    .clean_prefix()
    .max_chars(50),
    FieldSpec::column(
        "habitats",
        Column::Habitat,
        &[
            "forest", "meadow", "water body", "garden", "field", "bog", "river", "lake", "pond",
            "stream", "shore", "forest edge",
        ],
    ),
    FieldSpec::attribute("environments", AttributeKey::Environment, &[]),
    FieldSpec::column("seasons", Column::Season, &[]),
];

/// Category A.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragonflyProfile;

impl CategoryProfile for DragonflyProfile {
    fn category(&self) -> Category {
        Category::Dragonfly
    }

    fn specific_predicates(&self, criteria: &Criteria) -> Result<Vec<Predicate>> {
        let mut predicates = Vec::new();
        push_overlap(&mut predicates, criteria, "body_length_min", "body_length_max")?;

        // Wingspan is stored as free text, so each bound is probed as a literal.
        for key in ["wingspan_min", "wingspan_max"] {
            if let Some(value) = criteria.number(key)? {
                predicates.push(Predicate::attribute(AttributeKey::Wingspan, format_number(value)));
            }
        }

        if let Some(color) = criteria.text("eye_color") {
            predicates.push(Predicate::attribute(AttributeKey::EyeColor, color));
        }
        if let Some(environment) = criteria.text("environment") {
            predicates.push(Predicate::attribute(AttributeKey::Environment, environment));
        }
        if let Some(value) = criteria.text_any(&["gender", "sex"]) {
            predicates.push(sex_predicate(&value));
        }

        Ok(predicates)
    }

    fn vocabulary_fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}

/// A recognised marker becomes a typed match; anything else probes the
/// `sex` attribute text.
fn sex_predicate(value: &str) -> Predicate {
    match value.parse::<Sex>().ok().or_else(|| Sex::detect(value)) {
        Some(sex) if sex != Sex::Both => Predicate::SexIs(sex),
        _ => Predicate::attribute(AttributeKey::Sex, value),
    }
}
