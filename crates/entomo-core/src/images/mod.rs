//! Fuzzy association of catalogue records with files in an image pool.
//!
//! Image files are named loosely (`blue_darter_male.jpg`,
//! `Libellula quadrimaculata (самка).png`), so a record is matched by the
//! overlap between its name tokens and each filename's tokens, with a sex
//! bonus or penalty when the description says which sex is meant.

mod tokens;
mod tree;

pub use tokens::tokenize;
pub use tree::{FileTree, FsTree};

use crate::config::ImageConfig;
use crate::ingest::{derive_sex, parse_attributes};
use crate::models::{Category, Sex};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// A scored image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub path: PathBuf,
    pub tokens: BTreeSet<String>,
    pub score: i32,
}

/// Maps records to the best-matching file in their category's image directory.
#[derive(Clone)]
pub struct ImageMatcher {
    image_root: PathBuf,
    tree: Arc<dyn FileTree>,
}

impl std::fmt::Debug for ImageMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageMatcher")
            .field("image_root", &self.image_root)
            .finish_non_exhaustive()
    }
}

impl ImageMatcher {
    /// Create a matcher reading the real filesystem below `image_root`.
    pub fn new(image_root: impl Into<PathBuf>) -> Self {
        Self::with_tree(image_root, Arc::new(FsTree::default()))
    }

    /// Create a matcher over an arbitrary file tree.
    pub fn with_tree(image_root: impl Into<PathBuf>, tree: Arc<dyn FileTree>) -> Self {
        Self {
            image_root: image_root.into(),
            tree,
        }
    }

    pub fn image_root(&self) -> &Path {
        &self.image_root
    }

    /// Find the best image for a record.
    ///
    /// Returns the file's path relative to the image root with forward
    /// slashes, or `None` when nothing shares a token with the name. Ties go to
    /// the lexicographically first path.
    pub fn find(&self, name: &str, category: Category, description: Option<&str>) -> Option<String> {
        let directory = self.image_root.join(category.image_dir_name());

        let files = match self.tree.list_files(&directory, ImageConfig::EXTENSIONS) {
            Ok(files) => files,
            Err(e) => {
                warn!("Failed to list images in {}: {}", directory.display(), e);
                return None;
            }
        };
        if files.is_empty() {
            debug!("No images under {}", directory.display());
            return None;
        }

        let name_tokens = tokenize(name);
        if name_tokens.is_empty() {
            return None;
        }
        let wanted = description.and_then(intended_sex);

        let best = rank_candidates(files, &name_tokens, wanted).into_iter().next()?;
        debug!(
            "Matched '{}' to {} (score {})",
            name,
            best.path.display(),
            best.score
        );
        Some(self.relative_reference(&best.path, category))
    }

    /// Path relative to the image root, forward-slash separated.
    fn relative_reference(&self, path: &Path, category: Category) -> String {
        match path.strip_prefix(&self.image_root) {
            Ok(relative) => relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("{}/{}", category.image_dir_name(), file_name)
            }
        }
    }
}

/// The single sex a description asks for, if any.
///
/// The labelled `sex` attribute is consulted first, then the whole text. A
/// description naming both sexes leaves the match unconstrained.
pub fn intended_sex(description: &str) -> Option<Sex> {
    derive_sex(Some(description), &parse_attributes(description)).and_then(Sex::definite)
}

/// Score one filename against the name tokens.
///
/// Returns `None` when no token is shared. A filename carrying both markers
/// or none gets neither bonus nor penalty.
pub fn score_candidate(
    file_tokens: &BTreeSet<String>,
    name_tokens: &BTreeSet<String>,
    wanted: Option<Sex>,
) -> Option<i32> {
    let common = file_tokens.intersection(name_tokens).count();
    if common == 0 {
        return None;
    }

    let mut score = i32::try_from(common).unwrap_or(i32::MAX);
    if let Some(wanted) = wanted {
        match Sex::from_tokens(file_tokens).and_then(Sex::definite) {
            Some(found) if found == wanted => score += ImageConfig::SEX_MATCH_BONUS,
            Some(_) => score -= ImageConfig::SEX_MISMATCH_PENALTY,
            None => {}
        }
    }
    Some(score)
}

/// Score and order candidates: highest score first, then path order.
fn rank_candidates(
    mut files: Vec<PathBuf>,
    name_tokens: &BTreeSet<String>,
    wanted: Option<Sex>,
) -> Vec<ImageCandidate> {
    files.sort();

    let mut candidates: Vec<ImageCandidate> = files
        .into_iter()
        .filter_map(|path| {
            let stem = path.file_stem()?.to_string_lossy().into_owned();
            let tokens = tokenize(&stem);
            let score = score_candidate(&tokens, name_tokens, wanted)?;
            Some(ImageCandidate { path, tokens, score })
        })
        .collect();

    // Stable sort keeps path order among equal scores.
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use tempfile::TempDir;

    /// File tree returning a fixed listing in the given order.
    struct FixedTree(Vec<PathBuf>);

    impl FileTree for FixedTree {
        fn list_files(&self, _directory: &Path, _extensions: &[&str]) -> Result<Vec<PathBuf>> {
            Ok(self.0.clone())
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), b"img").unwrap();
    }

    #[test]
    fn test_missing_directory_gives_none() {
        let temp = TempDir::new().unwrap();
        let matcher = ImageMatcher::new(temp.path());
        assert_eq!(matcher.find("Blue Darter", Category::Dragonfly, None), None);
    }

    #[test]
    fn test_empty_directory_gives_none() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("dragonflies")).unwrap();
        let matcher = ImageMatcher::new(temp.path());
        assert_eq!(matcher.find("Blue Darter", Category::Dragonfly, None), None);
    }

    #[test]
    fn test_no_shared_token_gives_none() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("dragonflies"), "red_skimmer.jpg");
        let matcher = ImageMatcher::new(temp.path());
        assert_eq!(matcher.find("Blue Darter", Category::Dragonfly, None), None);
    }

    #[test]
    fn test_best_overlap_wins() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("beetles");
        touch(&dir, "stag.png");
        touch(&dir, "Stag-Beetle (Lucanus cervus).JPG");
        let matcher = ImageMatcher::new(temp.path());
        assert_eq!(
            matcher.find("Stag beetle", Category::Beetle, None).as_deref(),
            Some("beetles/Stag-Beetle (Lucanus cervus).JPG")
        );
    }

    #[test]
    fn test_sex_marker_selects_matching_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dragonflies");
        touch(&dir, "blue_darter_female.jpg");
        touch(&dir, "blue_darter_male.jpg");
        let matcher = ImageMatcher::new(temp.path());

        assert_eq!(
            matcher
                .find("Blue Darter", Category::Dragonfly, Some("Eye color: green; Sex: male"))
                .as_deref(),
            Some("dragonflies/blue_darter_male.jpg")
        );
        assert_eq!(
            matcher
                .find("Blue Darter", Category::Dragonfly, Some("Sex: female"))
                .as_deref(),
            Some("dragonflies/blue_darter_female.jpg")
        );
    }

    #[test]
    fn test_score_adjustments() {
        let name = set(&["blue", "darter"]);
        let male_file = set(&["blue", "darter", "male"]);
        let female_file = set(&["blue", "darter", "female"]);
        let plain_file = set(&["blue", "darter"]);

        assert_eq!(score_candidate(&male_file, &name, Some(Sex::Male)), Some(12));
        assert_eq!(score_candidate(&female_file, &name, Some(Sex::Male)), Some(-3));
        assert_eq!(score_candidate(&plain_file, &name, Some(Sex::Male)), Some(2));
        assert_eq!(score_candidate(&female_file, &name, None), Some(2));
        assert_eq!(score_candidate(&set(&["moth"]), &name, Some(Sex::Male)), None);
    }

    #[test]
    fn test_ties_resolve_by_path_not_listing_order() {
        let root = PathBuf::from("/pool");
        let tree = FixedTree(vec![
            root.join("butterflies").join("peacock_b.png"),
            root.join("butterflies").join("peacock_a.png"),
        ]);
        let matcher = ImageMatcher::with_tree(&root, Arc::new(tree));
        assert_eq!(
            matcher.find("Peacock", Category::Butterfly, None).as_deref(),
            Some("butterflies/peacock_a.png")
        );
    }

    #[test]
    fn test_intended_sex() {
        assert_eq!(intended_sex("Eye color: green; Sex: male"), Some(Sex::Male));
        assert_eq!(intended_sex("Пол: самка"), Some(Sex::Female));
        assert_eq!(intended_sex("Пол: самец/самка"), None);
        assert_eq!(intended_sex("Large and fast"), None);
    }
}
