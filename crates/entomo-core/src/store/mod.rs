//! Record store collaborator.
//!
//! The engine only needs filtered reads, full listings, distinct column values,
//! attribute values and single-record inserts. [`SqliteStore`] opens a
//! connection per call; [`MemoryStore`] keeps records in a process-local map.

mod memory;
mod predicate;
mod sqlite;

pub use memory::MemoryStore;
pub use predicate::{where_clause, Column, Predicate};
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::models::{AttributeKey, Category, EntityRecord, NewEntity};

/// Read/insert access to the catalogue, one table per category.
///
/// Every call is independent; implementations must release whatever handle
/// they acquire before returning, including on error paths.
pub trait RecordStore: Send + Sync {
    /// Records of `category` satisfying every predicate, ordered by id.
    fn query(&self, category: Category, predicates: &[Predicate]) -> Result<Vec<EntityRecord>>;

    /// Every record of `category`, ordered by id.
    fn list_all(&self, category: Category) -> Result<Vec<EntityRecord>> {
        self.query(category, &[])
    }

    /// Store a new record and return it with its assigned id.
    fn insert(&self, category: Category, entity: &NewEntity) -> Result<EntityRecord>;

    /// Distinct non-empty raw values of a text column.
    fn distinct_values(&self, category: Category, column: Column) -> Result<Vec<String>>;

    /// Distinct non-empty values of one parsed attribute.
    fn attribute_values(&self, category: Category, key: AttributeKey) -> Result<Vec<String>>;
}
