//! In-memory record store.

use super::predicate::{Column, Predicate};
use super::RecordStore;
use crate::error::{CatalogError, Result};
use crate::ingest::build_record;
use crate::models::{AttributeKey, Category, EntityRecord, NewEntity};
use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

/// Process-local store evaluating predicates directly on records.
///
/// Useful for embedding and for tests that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Category, Vec<EntityRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> CatalogError {
        CatalogError::store("Failed to acquire memory store lock")
    }

    fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
        values
            .flatten()
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl RecordStore for MemoryStore {
    fn query(&self, category: Category, predicates: &[Predicate]) -> Result<Vec<EntityRecord>> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables
            .get(&category)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| predicates.iter().all(|p| p.matches(r)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn insert(&self, category: Category, entity: &NewEntity) -> Result<EntityRecord> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        let records = tables.entry(category).or_default();
        let id = records.last().map_or(1, |r| r.id + 1);
        let record = build_record(id, category, entity)?;
        records.push(record.clone());
        Ok(record)
    }

    fn distinct_values(&self, category: Category, column: Column) -> Result<Vec<String>> {
        if column.is_numeric() {
            return Err(CatalogError::Other(format!(
                "Column {} is not a text column",
                column.as_str()
            )));
        }
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        let records = tables.get(&category).map(Vec::as_slice).unwrap_or_default();
        Ok(Self::distinct(records.iter().map(|r| column.text(r))))
    }

    fn attribute_values(&self, category: Category, key: AttributeKey) -> Result<Vec<String>> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        let records = tables.get(&category).map(Vec::as_slice).unwrap_or_default();
        Ok(Self::distinct(records.iter().map(|r| r.attribute(key))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_per_category() {
        let store = MemoryStore::new();
        let a = store.insert(Category::Beetle, &NewEntity::new("A")).unwrap();
        let b = store.insert(Category::Beetle, &NewEntity::new("B")).unwrap();
        let c = store.insert(Category::Butterfly, &NewEntity::new("C")).unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 1));
    }

    #[test]
    fn test_query_applies_all_predicates() {
        let store = MemoryStore::new();
        store
            .insert(Category::Beetle, &NewEntity::new("Ladybird").with_color("red, black"))
            .unwrap();
        store
            .insert(Category::Beetle, &NewEntity::new("Cockchafer").with_color("brown"))
            .unwrap();

        let hits = store
            .query(
                Category::Beetle,
                &[
                    Predicate::contains(Column::Color, "RED"),
                    Predicate::contains(Column::Color, "black"),
                ],
            )
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name_common, "Ladybird");
    }

    #[test]
    fn test_distinct_values_sorted() {
        let store = MemoryStore::new();
        for color in ["green", "blue", "green", ""] {
            store
                .insert(Category::Butterfly, &NewEntity::new("x").with_color(color))
                .unwrap();
        }
        assert_eq!(
            store.distinct_values(Category::Butterfly, Column::Color).unwrap(),
            vec!["blue".to_string(), "green".to_string()]
        );
    }
}
