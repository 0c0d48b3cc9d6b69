//! Entomo Core - Headless insect catalogue engine.
//!
//! Three cooperating components over a shared record store:
//!
//! - the query builder ([`search`]) turns a category and a criteria map into
//!   typed predicates and runs them against the store;
//! - the vocabulary miner ([`vocabulary`]) derives the value lists a filter UI
//!   offers for each category;
//! - the image matcher ([`images`]) picks the best file for a record from a
//!   loosely named image pool.
//!
//! [`Catalog`] ties them together behind the search API. It can be used
//! programmatically without any HTTP/RPC layer.
//!
//! # Example
//!
//! ```rust,no_run
//! use entomo_core::{Catalog, Criteria, NewEntity};
//!
//! fn main() -> entomo_core::Result<()> {
//!     let catalog = Catalog::builder("/path/to/catalogue")
//!         .auto_create_dirs(true)
//!         .build()?;
//!
//!     catalog.add_entity(
//!         "dragonfly",
//!         &NewEntity::new("Blue Darter").with_description("Eye color: green; Sex: male"),
//!     )?;
//!
//!     let response = catalog.search("dragonfly", &Criteria::new().with("eye_color", "green"))?;
//!     println!("Found {} records", response.count);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod images;
pub mod ingest;
pub mod models;
pub mod profiles;
pub mod search;
pub mod store;
pub mod vocabulary;

mod api;

// Re-export commonly used types
pub use error::{CatalogError, Result};
pub use images::{FileTree, FsTree, ImageMatcher};
pub use models::{
    AttributeKey, Attributes, Category, Criteria, EntityRecord, NewEntity, SearchResponse, Sex,
};
pub use profiles::{profile_for, CategoryProfile};
pub use store::{MemoryStore, Predicate, RecordStore, SqliteStore};
pub use vocabulary::{FieldVocabulary, Vocabulary};

// Re-export builder from api module
pub use api::CatalogBuilder;

use std::path::PathBuf;
use std::sync::Arc;

/// Main entry point for catalogue operations.
///
/// Holds no mutable state of its own: every call goes to the record store or
/// the image directory, so a `Catalog` can be shared across threads freely.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn RecordStore>,
    matcher: ImageMatcher,
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl Catalog {
    /// Create a builder for Catalog.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let catalog = entomo_core::Catalog::builder("./catalogue")
    ///     .image_root("/srv/images")
    ///     .build()?;
    /// # Ok::<(), entomo_core::CatalogError>(())
    /// ```
    pub fn builder(root: impl Into<PathBuf>) -> CatalogBuilder {
        CatalogBuilder::new(root)
    }

    /// Assemble a catalog from already-built collaborators.
    pub fn new(store: Arc<dyn RecordStore>, matcher: ImageMatcher) -> Self {
        Self { store, matcher }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn matcher(&self) -> &ImageMatcher {
        &self.matcher
    }
}
