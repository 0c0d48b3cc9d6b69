//! Ingestion-time parsing of semi-structured record text.
//!
//! Descriptions hold `Label: value; Label: value` segments. They are parsed
//! once when a record is stored, so queries and vocabulary mining read a typed
//! attribute map instead of re-scanning free text.

use crate::error::Result;
use crate::models::{AttributeKey, Attributes, Category, EntityRecord, NewEntity, Sex};
use regex::Regex;
use std::sync::LazyLock;

/// Longest label text considered in front of a colon.
const MAX_LABEL_CHARS: usize = 48;

/// A `min-max` size range, decimal comma allowed.
static SIZE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*-\s*(\d+(?:[.,]\d+)?)").unwrap()
});

static SINGLE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());

/// Dash variants normalised to a plain hyphen before range parsing.
static DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[–—−]").unwrap());

/// Extract labelled attributes from a description.
///
/// Segments are separated by `;`. A label may follow prose inside its segment
/// and its value runs to the end of the segment, line breaks included. The
/// first value seen for a key wins; segments with unknown labels are ignored.
pub fn parse_attributes(description: &str) -> Attributes {
    let mut attributes = Attributes::new();

    for segment in description.split(';') {
        if let Some((key, value)) = labelled_value(segment) {
            attributes.entry(key).or_insert_with(|| value.to_string());
        }
    }

    attributes
}

/// First recognised `Label: value` pair of a segment.
fn labelled_value(segment: &str) -> Option<(AttributeKey, &str)> {
    let mut head_start = 0;
    for (colon, _) in segment.match_indices(':') {
        let head = &segment[head_start..colon];
        head_start = colon + 1;

        let Some(key) = trailing_label(head) else {
            continue;
        };
        let value = segment[colon + 1..].trim();
        if !value.is_empty() {
            return Some((key, value));
        }
    }
    None
}

/// Attribute named by the words closest to the end of `head`.
///
/// Word starts are tried right to left, so `A large dragonfly. Eye color`
/// resolves through `Eye color` and `Тип поверхности / Блеск` through `Блеск`.
fn trailing_label(head: &str) -> Option<AttributeKey> {
    let head = head.trim_end();
    let mut previous: Option<char> = None;
    let word_starts: Vec<usize> = head
        .char_indices()
        .filter_map(|(at, c)| {
            let starts_word = c.is_alphabetic() && !previous.is_some_and(char::is_alphanumeric);
            previous = Some(c);
            starts_word.then_some(at)
        })
        .collect();

    word_starts
        .into_iter()
        .rev()
        .map(|at| &head[at..])
        .take_while(|label| label.chars().count() <= MAX_LABEL_CHARS)
        .find_map(AttributeKey::from_label)
}

/// Sex of a record: the labelled `sex` attribute when present, otherwise
/// any unambiguous marker in the whole description.
pub fn derive_sex(description: Option<&str>, attributes: &Attributes) -> Option<Sex> {
    if let Some(value) = attributes.get(&AttributeKey::Sex) {
        if let Some(sex) = Sex::detect(value) {
            return Some(sex);
        }
    }
    description.and_then(Sex::detect).and_then(Sex::definite)
}

/// Validate a new entity and derive its attribute map and sex.
///
/// The returned record carries `id`; stores pass a placeholder and patch in the
/// assigned id after the insert.
pub fn build_record(id: i64, category: Category, entity: &NewEntity) -> Result<EntityRecord> {
    entity.validate()?;

    let clean = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let description = clean(&entity.description);
    let attributes = description
        .as_deref()
        .map(parse_attributes)
        .unwrap_or_default();
    let sex = derive_sex(description.as_deref(), &attributes);

    Ok(EntityRecord {
        id,
        category,
        name_common: entity.name_common.trim().to_string(),
        name_scientific: clean(&entity.name_scientific),
        size_min: entity.size_min,
        size_max: entity.size_max,
        color: clean(&entity.color),
        habitat: clean(&entity.habitat),
        season: clean(&entity.season),
        description,
        sex,
        attributes,
        image: clean(&entity.image),
    })
}

/// Parse a free-text size such as `60–72` or `20-28 mm` into `(min, max)`.
///
/// A single number yields `(v, v)`; text without digits yields `(None, None)`.
pub fn parse_size_range(text: &str) -> (Option<f64>, Option<f64>) {
    let text = DASHES.replace_all(text.trim(), "-");

    let parse = |s: &str| s.replace(',', ".").parse::<f64>().ok();

    if let Some(caps) = SIZE_RANGE.captures(&text) {
        let min = parse(&caps[1]);
        let max = parse(&caps[2]);
        return match (min, max) {
            (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
            other => other,
        };
    }

    match SINGLE_NUMBER.find(&text).and_then(|m| parse(m.as_str())) {
        Some(value) => (Some(value), Some(value)),
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_english_labels() {
        let attrs = parse_attributes("Eye color: green; Sex: male");
        assert_eq!(attrs.get(&AttributeKey::EyeColor).map(String::as_str), Some("green"));
        assert_eq!(attrs.get(&AttributeKey::Sex).map(String::as_str), Some("male"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_parse_russian_labels() {
        let attrs = parse_attributes(
            "Цвет глаз: зелёные; Среда: стоячие водоёмы; Пол: самец/самка",
        );
        assert_eq!(attrs.get(&AttributeKey::EyeColor).map(String::as_str), Some("зелёные"));
        assert_eq!(
            attrs.get(&AttributeKey::Environment).map(String::as_str),
            Some("стоячие водоёмы")
        );
        assert_eq!(attrs.get(&AttributeKey::Sex).map(String::as_str), Some("самец/самка"));
    }

    #[test]
    fn test_parse_compound_label() {
        let attrs = parse_attributes("Тип поверхности / Блеск: глянцевый; Надкрылья: точечные");
        assert_eq!(
            attrs.get(&AttributeKey::SurfaceType).map(String::as_str),
            Some("глянцевый")
        );
        assert_eq!(attrs.get(&AttributeKey::Elytra).map(String::as_str), Some("точечные"));
    }

    #[test]
    fn test_free_text_is_ignored() {
        let attrs = parse_attributes("A large dragonfly. Lives near ponds: often at dusk");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_label_after_prose() {
        let attrs = parse_attributes("A large dragonfly. Eye color: green; Sex: male");
        assert_eq!(attrs.get(&AttributeKey::EyeColor).map(String::as_str), Some("green"));
        assert_eq!(attrs.get(&AttributeKey::Sex).map(String::as_str), Some("male"));

        let attrs = parse_attributes("Крупная стрекоза, Цвет глаз: зелёные; Пол: самец");
        assert_eq!(attrs.get(&AttributeKey::EyeColor).map(String::as_str), Some("зелёные"));
        assert_eq!(attrs.get(&AttributeKey::Sex).map(String::as_str), Some("самец"));
    }

    #[test]
    fn test_label_after_unlabelled_colon() {
        let attrs = parse_attributes("Note: Eye color: brown");
        assert_eq!(attrs.get(&AttributeKey::EyeColor).map(String::as_str), Some("brown"));
    }

    #[test]
    fn test_multiline_segment() {
        let attrs = parse_attributes("Окраска яркая.\nЦвет глаз:\n  зелёные,\nсверху бурые; Пол: самка");
        assert_eq!(
            attrs.get(&AttributeKey::EyeColor).map(String::as_str),
            Some("зелёные,\nсверху бурые")
        );
        assert_eq!(attrs.get(&AttributeKey::Sex).map(String::as_str), Some("самка"));
    }

    #[test]
    fn test_word_prefix_is_not_a_label() {
        let attrs = parse_attributes("Полосы: жёлтые; Both sexes look alike: yes");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_first_value_wins() {
        let attrs = parse_attributes("Eye color: green; Eye color: blue");
        assert_eq!(attrs.get(&AttributeKey::EyeColor).map(String::as_str), Some("green"));
    }

    #[test]
    fn test_derive_sex() {
        let attrs = parse_attributes("Sex: female");
        assert_eq!(derive_sex(Some("Sex: female"), &attrs), Some(Sex::Female));

        let attrs = parse_attributes("Пол: самец/самка");
        assert_eq!(derive_sex(Some("Пол: самец/самка"), &attrs), Some(Sex::Both));

        let text = "Only the male is shown";
        assert_eq!(derive_sex(Some(text), &parse_attributes(text)), Some(Sex::Male));
        assert_eq!(derive_sex(None, &Attributes::new()), None);
    }

    #[test]
    fn test_build_record_derives_fields() {
        let entity = NewEntity::new("  Blue Darter ")
            .with_color("")
            .with_description("Eye color: green; Sex: male");
        let record = build_record(7, Category::Dragonfly, &entity).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.name_common, "Blue Darter");
        assert_eq!(record.color, None);
        assert_eq!(record.sex, Some(Sex::Male));
        assert_eq!(record.attribute(AttributeKey::EyeColor), Some("green"));
    }

    #[test]
    fn test_build_record_validates() {
        let entity = NewEntity::new("Stag beetle").with_sizes(Some(75.0), Some(30.0));
        assert!(build_record(0, Category::Beetle, &entity).is_err());
    }

    #[test]
    fn test_parse_size_range() {
        assert_eq!(parse_size_range("60–72"), (Some(60.0), Some(72.0)));
        assert_eq!(parse_size_range("20-28 mm"), (Some(20.0), Some(28.0)));
        assert_eq!(parse_size_range("4,5 — 6"), (Some(4.5), Some(6.0)));
        assert_eq!(parse_size_range("about 35"), (Some(35.0), Some(35.0)));
        assert_eq!(parse_size_range("unknown"), (None, None));
        assert_eq!(parse_size_range(""), (None, None));
    }
}
