//! File tree collaborator: read-only listing of image files.

use crate::error::{CatalogError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Lists files under a directory. Never writes.
pub trait FileTree: Send + Sync {
    /// Files below `directory` whose extension matches one of `extensions`
    /// case-insensitively. A missing directory yields an empty listing.
    fn list_files(&self, directory: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>>;
}

/// Filesystem-backed [`FileTree`].
#[derive(Debug, Clone)]
pub struct FsTree {
    max_depth: usize,
}

impl FsTree {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for FsTree {
    fn default() -> Self {
        Self::new(crate::config::ImageConfig::MAX_SCAN_DEPTH)
    }
}

impl FileTree for FsTree {
    fn list_files(&self, directory: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        if !directory.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(directory)
            .min_depth(1)
            .max_depth(self.max_depth)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| directory.to_path_buf());
                    let message = e.to_string();
                    return Err(match e.into_io_error() {
                        Some(io) => CatalogError::io_with_path(io, path),
                        None => CatalogError::Io {
                            message,
                            path: Some(path),
                            source: None,
                        },
                    });
                }
                Err(e) => {
                    warn!("Skipping unreadable image entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if has_extension(entry.path(), extensions) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
}
