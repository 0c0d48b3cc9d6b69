//! Builder for configuring Catalog initialization.

use crate::config::{PathsConfig, StoreConfig};
use crate::error::{CatalogError, Result};
use crate::images::{FileTree, FsTree, ImageMatcher};
use crate::store::{RecordStore, SqliteStore};
use crate::Catalog;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Builder for configuring Catalog initialization.
///
/// Paths default to a layout below a single catalogue root:
/// `data/catalogue.db` for the database and `images/` for the image pool.
///
/// # Example
///
/// ```rust,no_run
/// use entomo_core::Catalog;
///
/// let catalog = Catalog::builder("./catalogue")
///     .auto_create_dirs(true)
///     .build()?;
/// # Ok::<(), entomo_core::CatalogError>(())
/// ```
pub struct CatalogBuilder {
    root: PathBuf,
    database_path: Option<PathBuf>,
    image_root: Option<PathBuf>,
    auto_create_dirs: bool,
    store: Option<Arc<dyn RecordStore>>,
    file_tree: Option<Arc<dyn FileTree>>,
}

impl CatalogBuilder {
    /// Create a new builder rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            database_path: None,
            image_root: None,
            auto_create_dirs: false,
            store: None,
            file_tree: None,
        }
    }

    /// Use a database file outside the default layout.
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Use an image pool outside the default layout.
    pub fn image_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_root = Some(path.into());
        self
    }

    /// Auto-create the root, data and per-category image directories.
    ///
    /// Default: `false` (the root must exist)
    pub fn auto_create_dirs(mut self, enable: bool) -> Self {
        self.auto_create_dirs = enable;
        self
    }

    /// Use an existing record store instead of opening the SQLite database.
    pub fn with_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use a custom file tree for image lookups.
    pub fn with_file_tree(mut self, tree: Arc<dyn FileTree>) -> Self {
        self.file_tree = Some(tree);
        self
    }

    fn create_dir(dir: &Path) -> Result<()> {
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| CatalogError::Io {
                message: format!("Failed to create directory: {}", dir.display()),
                path: Some(dir.to_path_buf()),
                source: Some(e),
            })?;
        }
        Ok(())
    }

    /// Build the Catalog instance.
    pub fn build(self) -> Result<Catalog> {
        let image_root = self
            .image_root
            .unwrap_or_else(|| self.root.join(PathsConfig::IMAGES_DIR_NAME));

        if self.auto_create_dirs {
            Self::create_dir(&self.root)?;
            Self::create_dir(&self.root.join(PathsConfig::DATA_DIR_NAME))?;
            for category in crate::models::Category::ALL {
                Self::create_dir(&image_root.join(category.image_dir_name()))?;
            }
        } else if !self.root.exists() {
            return Err(CatalogError::Config {
                message: format!("Catalogue root does not exist: {}", self.root.display()),
            });
        }

        let store = match self.store {
            Some(store) => store,
            None => {
                let database_path = self.database_path.unwrap_or_else(|| {
                    self.root
                        .join(PathsConfig::DATA_DIR_NAME)
                        .join(StoreConfig::DATABASE_FILE_NAME)
                });
                info!("Opening catalogue database at {}", database_path.display());
                Arc::new(SqliteStore::open(database_path)?) as Arc<dyn RecordStore>
            }
        };

        let tree = self
            .file_tree
            .unwrap_or_else(|| Arc::new(FsTree::default()));

        Ok(Catalog::new(store, ImageMatcher::with_tree(image_root, tree)))
    }
}
