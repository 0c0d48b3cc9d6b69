//! Winged-pattern insects: wing pattern and time of activity.

use super::CategoryProfile;
use crate::error::Result;
use crate::models::{AttributeKey, Category, Criteria};
use crate::store::{Column, Predicate};
use crate::vocabulary::FieldSpec;

const DAY_STEMS: &[&str] = &["day", "diurnal", "дневн", "днем", "днём"];
const NIGHT_STEMS: &[&str] = &["night", "nocturnal", "ночн", "ночью"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::colors(&[
        "white", "yellow", "brown", "red", "blue", "black", "orange", "pink", "violet", "grey",
    ])
    .excluding(&[
        "main colour", "main color", "основной цвет", "wings", "крыльев", "forewing", "передние",
        "hindwing", "задние", "marbl", "мраморн", "lacy", "ажурн", "wavy", "волнист", "lines",
        "линии", "pattern", "рисунок", "tinge", "оттенок", "sheen", "отлив", "yellowish",
        "желтовато", "reddish", "красновато",
    ])
    .first_alternative()
    .max_chars(50),
    FieldSpec::attribute(
        "wing_patterns",
        AttributeKey::WingPattern,
        &[
            "spots", "stripes", "dots", "rings", "eyespots", "border", "bands", "marbled",
            "reticulate",
        ],
    )
    .excluding(&[
        "wings", "крыльев", "upperside", "верх", "underside", "низ", "forewing", "передние",
        "hindwing", "задние",
    ]),
    FieldSpec::column(
        "habitats",
        Column::Habitat,
        &[
            "forest", "meadow", "garden", "field", "bog", "shore", "forest edge", "glade", "park",
            "lawn", "shelterbelt",
        ],
    ),
    FieldSpec::column(
        "seasons",
        Column::Season,
        &["spring", "summer", "autumn", "May", "June", "July", "August", "September"],
    ),
];

/// Category C.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButterflyProfile;

impl CategoryProfile for ButterflyProfile {
    fn category(&self) -> Category {
        Category::Butterfly
    }

    fn specific_predicates(&self, criteria: &Criteria) -> Result<Vec<Predicate>> {
        let mut predicates = Vec::new();
        if let Some(pattern) = criteria.text("wing_pattern") {
            predicates.push(Predicate::attribute(AttributeKey::WingPattern, pattern));
        }
        if let Some(stems) = criteria.text("time_of_day").and_then(|v| time_of_day_stems(&v)) {
            predicates.push(Predicate::AnyOf(
                stems
                    .iter()
                    .map(|stem| Predicate::contains(Column::Description, *stem))
                    .collect(),
            ));
        }
        Ok(predicates)
    }

    fn vocabulary_fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }
}

/// Keyword stems for a time-of-day criterion; unknown values add no condition.
fn time_of_day_stems(value: &str) -> Option<&'static [&'static str]> {
    match value.to_lowercase().as_str() {
        "day" | "день" => Some(DAY_STEMS),
        "night" | "ночь" => Some(NIGHT_STEMS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wing_pattern_drops_comparatives() {
        let patterns = FIELDS.iter().find(|f| f.name == "wing_patterns").unwrap();
        assert_eq!(patterns.clean("eyespots, more than on the forewing"), None);
        assert_eq!(patterns.clean("see subspecies"), None);
        assert_eq!(patterns.clean("eyespots"), Some("eyespots".to_string()));
    }

    #[test]
    fn test_time_of_day_ors_stems() {
        let criteria = Criteria::new().with("time_of_day", "ночь");
        let predicates = ButterflyProfile.specific_predicates(&criteria).unwrap();
        assert_eq!(predicates.len(), 1);
        let Predicate::AnyOf(inner) = &predicates[0] else {
            panic!("expected an OR group, got {:?}", predicates[0]);
        };
        assert_eq!(inner.len(), NIGHT_STEMS.len());
        assert!(inner.contains(&Predicate::contains(Column::Description, "nocturnal")));
    }

    #[test]
    fn test_unknown_time_of_day_ignored() {
        let criteria = Criteria::new().with("time_of_day", "dusk");
        assert!(ButterflyProfile.specific_predicates(&criteria).unwrap().is_empty());
    }

    #[test]
    fn test_wing_pattern_probe() {
        let criteria = Criteria::new().with("wing_pattern", "eyespots");
        assert_eq!(
            ButterflyProfile.specific_predicates(&criteria).unwrap(),
            vec![Predicate::attribute(AttributeKey::WingPattern, "eyespots")]
        );
    }

    #[test]
    fn test_color_alternatives_reduced() {
        let colors = &FIELDS[0];
        assert_eq!(colors.clean("orange or red"), Some("orange".to_string()));
        assert_eq!(colors.clean("reddish brown"), None);
    }
}
