//! Token normalization for names and filenames.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Anything that is not a letter or digit separates tokens.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap());

/// Normalize text into its token set.
///
/// Lowercases, turns punctuation (parentheses, hyphens, underscores, dots)
/// into spaces and splits on whitespace.
///
/// # Examples
///
/// ```
/// use entomo_core::images::tokenize;
///
/// let tokens = tokenize("Blue-Darter (male)");
/// assert!(tokens.contains("blue"));
/// assert!(tokens.contains("darter"));
/// assert!(tokens.contains("male"));
/// ```
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
