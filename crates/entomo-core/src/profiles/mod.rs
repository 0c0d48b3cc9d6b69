//! Per-category query and vocabulary behaviour.
//!
//! The three categories share the size/color/habitat/season core schema and
//! diverge in their secondary attributes. Each category gets one
//! [`CategoryProfile`]; shared control flow lives in the trait's provided
//! methods and the per-category parts are data ([`FieldSpec`] tables) plus a
//! small `specific_predicates` hook.

mod beetle;
mod butterfly;
mod dragonfly;

pub use beetle::BeetleProfile;
pub use butterfly::ButterflyProfile;
pub use dragonfly::DragonflyProfile;

use crate::error::Result;
use crate::models::{Category, Criteria};
use crate::store::{Column, Predicate, RecordStore};
use crate::vocabulary::{mine_field, FieldSpec, Vocabulary};
use tracing::debug;

/// Category-specific query construction and vocabulary mining.
pub trait CategoryProfile: Send + Sync {
    fn category(&self) -> Category;

    /// Conditions only this category understands.
    fn specific_predicates(&self, criteria: &Criteria) -> Result<Vec<Predicate>>;

    /// Filter fields offered for this category, in display order.
    fn vocabulary_fields(&self) -> &'static [FieldSpec];

    /// Full ANDed condition list: shared conditions first, then specific ones.
    fn build_predicates(&self, criteria: &Criteria) -> Result<Vec<Predicate>> {
        let mut predicates = common_predicates(criteria)?;
        predicates.extend(self.specific_predicates(criteria)?);
        Ok(predicates)
    }

    /// Compute the filter vocabulary from the current store contents.
    fn mine_vocabulary(&self, store: &dyn RecordStore) -> Result<Vocabulary> {
        let category = self.category();
        let mut vocabulary = Vocabulary::new(category);
        for spec in self.vocabulary_fields() {
            let field = mine_field(store, category, spec)?;
            debug!(
                "Mined {} {} values for {}",
                field.derived.len(),
                spec.name,
                category
            );
            vocabulary.fields.insert(spec.name.to_string(), field);
        }
        Ok(vocabulary)
    }
}

static DRAGONFLY: DragonflyProfile = DragonflyProfile;
static BEETLE: BeetleProfile = BeetleProfile;
static BUTTERFLY: ButterflyProfile = ButterflyProfile;

/// The profile responsible for `category`.
pub fn profile_for(category: Category) -> &'static dyn CategoryProfile {
    match category {
        Category::Dragonfly => &DRAGONFLY,
        Category::Beetle => &BEETLE,
        Category::Butterfly => &BUTTERFLY,
    }
}

/// Conditions every category supports.
///
/// A requested size range is tested for overlap with the record's range:
/// `size_min` bounds the record's upper size from below, `size_max` bounds its
/// lower size from above.
pub fn common_predicates(criteria: &Criteria) -> Result<Vec<Predicate>> {
    let mut predicates = Vec::new();
    push_overlap(&mut predicates, criteria, "size_min", "size_max")?;

    for (key, column) in [
        ("color", Column::Color),
        ("habitat", Column::Habitat),
        ("season", Column::Season),
    ] {
        if let Some(needle) = criteria.text(key) {
            predicates.push(Predicate::contains(column, needle));
        }
    }
    Ok(predicates)
}

/// Overlap conditions for a `[min_key, max_key]` request range against the
/// record's size interval.
pub(crate) fn push_overlap(
    predicates: &mut Vec<Predicate>,
    criteria: &Criteria,
    min_key: &str,
    max_key: &str,
) -> Result<()> {
    if let Some(value) = criteria.number(min_key)? {
        predicates.push(Predicate::AtLeast {
            column: Column::SizeMax,
            value,
        });
    }
    if let Some(value) = criteria.number(max_key)? {
        predicates.push(Predicate::AtMost {
            column: Column::SizeMin,
            value,
        });
    }
    Ok(())
}
