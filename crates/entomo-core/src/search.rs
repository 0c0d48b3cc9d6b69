//! Query builder: criteria in, filtered records out.

use crate::error::Result;
use crate::models::{Category, Criteria, EntityRecord};
use crate::profiles::profile_for;
use crate::store::{Predicate, RecordStore};
use tracing::debug;

/// Translate criteria into the ANDed predicate list for `category`.
///
/// Unknown criteria are ignored. An empty criteria map yields no predicates.
pub fn build_predicates(category: Category, criteria: &Criteria) -> Result<Vec<Predicate>> {
    profile_for(category).build_predicates(criteria)
}

/// Build the predicates for `criteria` and run them against the store in a
/// single round trip.
pub fn build_and_execute(
    store: &dyn RecordStore,
    category: Category,
    criteria: &Criteria,
) -> Result<Vec<EntityRecord>> {
    let predicates = build_predicates(category, criteria)?;
    debug!(
        "Searching {} with {} condition(s)",
        category,
        predicates.len()
    );
    store.query(category, &predicates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewEntity;
    use crate::store::MemoryStore;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert(
                Category::Butterfly,
                &NewEntity::new("Peacock")
                    .with_sizes(Some(50.0), Some(60.0))
                    .with_description("Дневная бабочка; Рисунок: глазки"),
            )
            .unwrap();
        store
            .insert(
                Category::Butterfly,
                &NewEntity::new("Garden tiger")
                    .with_sizes(Some(45.0), Some(65.0))
                    .with_description("Nocturnal moth; Wing pattern: blotches"),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_time_of_day_matches_any_stem() {
        let store = seeded();
        let day = build_and_execute(
            &store,
            Category::Butterfly,
            &Criteria::new().with("time_of_day", "day"),
        )
        .unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].name_common, "Peacock");

        let night = build_and_execute(
            &store,
            Category::Butterfly,
            &Criteria::new().with("time_of_day", "night"),
        )
        .unwrap();
        assert_eq!(night.len(), 1);
        assert_eq!(night[0].name_common, "Garden tiger");
    }

    #[test]
    fn test_conditions_are_anded() {
        let store = seeded();
        let criteria = Criteria::new()
            .with("size_min", 62)
            .with("wing_pattern", "глазки");
        assert!(build_and_execute(&store, Category::Butterfly, &criteria)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_categories_are_separate() {
        let store = seeded();
        assert!(build_and_execute(&store, Category::Beetle, &Criteria::new())
            .unwrap()
            .is_empty());
    }
}
