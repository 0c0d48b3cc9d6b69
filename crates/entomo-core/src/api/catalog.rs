//! Search, listing, vocabulary and insertion methods on Catalog.

use crate::error::Result;
use crate::models::{Category, Criteria, EntityRecord, NewEntity, SearchResponse};
use crate::vocabulary::{self, Vocabulary};
use crate::{search, Catalog};
use std::time::Instant;
use tracing::{debug, info};

impl Catalog {
    // ========================================
    // Search API
    // ========================================

    /// Search one category.
    ///
    /// The category tag is validated before the store is touched. Records
    /// without a stored image get one from the image matcher; the backfill
    /// only affects the response.
    pub fn search(&self, category: &str, criteria: &Criteria) -> Result<SearchResponse> {
        let category = Category::parse(category)?;
        let started = Instant::now();

        let mut results = search::build_and_execute(self.store(), category, criteria)?;
        self.backfill_images(category, &mut results);

        let response = SearchResponse::new(results, started.elapsed());
        debug!(
            "Search on {} returned {} record(s) in {}ms",
            category, response.count, response.query_time_ms
        );
        Ok(response)
    }

    /// Every record of a category, images backfilled.
    pub fn list_all(&self, category: &str) -> Result<SearchResponse> {
        let category = Category::parse(category)?;
        let started = Instant::now();

        let mut results = self.store().list_all(category)?;
        self.backfill_images(category, &mut results);
        Ok(SearchResponse::new(results, started.elapsed()))
    }

    /// Filter options for a category, recomputed from the store.
    pub fn filter_options(&self, category: &str) -> Result<Vocabulary> {
        let category = Category::parse(category)?;
        vocabulary::mine(self.store(), category)
    }

    // ========================================
    // Records
    // ========================================

    /// Validate and store a new record.
    pub fn add_entity(&self, category: &str, entity: &NewEntity) -> Result<EntityRecord> {
        let category = Category::parse(category)?;
        let record = self.store().insert(category, entity)?;
        info!("Added {} #{} '{}'", category, record.id, record.name_common);
        Ok(record)
    }

    // ========================================
    // Images
    // ========================================

    /// Best image for a name in a category, relative to the image root.
    pub fn match_image(
        &self,
        category: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<String>> {
        let category = Category::parse(category)?;
        Ok(self.matcher().find(name, category, description))
    }

    fn backfill_images(&self, category: Category, records: &mut [EntityRecord]) {
        for record in records.iter_mut().filter(|r| r.image.is_none()) {
            record.image = self.matcher().find(
                &record.name_common,
                category,
                record.description.as_deref(),
            );
        }
    }
}
