//! Response payloads returned by the catalogue facade.

use super::entity::EntityRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Records matching a search, with their images backfilled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub count: usize,
    pub results: Vec<EntityRecord>,
    pub query_time_ms: u64,
}

impl SearchResponse {
    pub fn new(results: Vec<EntityRecord>, elapsed: Duration) -> Self {
        Self {
            count: results.len(),
            results,
            query_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}
