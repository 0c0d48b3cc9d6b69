//! Centralized configuration for the catalogue engine.
//!
//! Compile-time constants for the record store, the image matcher and the
//! vocabulary miner. Runtime paths are supplied through [`crate::CatalogBuilder`].

use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Entomo Catalogue";
}

/// Record store settings.
pub struct StoreConfig;

impl StoreConfig {
    pub const DATABASE_FILE_NAME: &'static str = "catalogue.db";
    pub const BUSY_TIMEOUT: Duration = Duration::from_secs(30);
    /// Name of the Unicode-aware lowercase function registered on every connection.
    pub const FOLD_FUNCTION: &'static str = "fold";
    /// Upper bound on simultaneous requests served by the RPC layer.
    pub const MAX_CONCURRENT_REQUESTS: usize = 64;
}

/// Image matcher settings.
pub struct ImageConfig;

impl ImageConfig {
    /// Raster formats recognised in the image pool (compared case-insensitively).
    pub const EXTENSIONS: &'static [&'static str] = &["jpg", "jpeg", "png", "webp", "gif"];
    pub const SEX_MATCH_BONUS: i32 = 10;
    pub const SEX_MISMATCH_PENALTY: i32 = 5;
    /// Depth below a category directory that is still scanned.
    pub const MAX_SCAN_DEPTH: usize = 2;
}

/// Vocabulary miner settings.
pub struct VocabularyConfig;

impl VocabularyConfig {
    /// Values of this many characters or fewer are discarded.
    pub const MIN_VALUE_CHARS: usize = 2;
    /// Limit applied to a value reduced to its first alternative or clean prefix.
    pub const REDUCED_VALUE_MAX_CHARS: usize = 30;
    /// Whole words marking a comparative or cross-reference value.
    pub const COMPARATIVE_WORDS: &'static [&'static str] =
        &["more", "less", "than", "see", "чем"];
    /// Substrings marking a comparative or cross-reference value.
    pub const COMPARATIVE_STEMS: &'static [&'static str] =
        &["subspecies", "подвид", "более", "менее", "больше", "меньше"];
}

/// Directory layout below the catalogue root.
pub struct PathsConfig;

impl PathsConfig {
    pub const DATA_DIR_NAME: &'static str = "data";
    pub const IMAGES_DIR_NAME: &'static str = "images";
}
