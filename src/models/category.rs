use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A category of contributions, e.g. keynotes or posters
///
/// `key` is the short shortcut an operator types when filing, `label` is the
/// heading used in the generated index and `path` is the directory (relative to
/// the repository root) holding one subdirectory per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub label: String,
    pub path: PathBuf,
}

impl Category {
    pub fn new(key: &str, label: &str, path: impl Into<PathBuf>) -> Self {
        Self { key: key.to_string(), label: label.to_string(), path: path.into() }
    }

    /// Check whether operator input selects this category
    ///
    /// Accepts the shortcut key, the label or the directory name, all case-insensitive.
    pub fn matches(&self, input: &str) -> bool {
        let input = input.trim();
        if input.is_empty() {
            return false;
        }

        input.eq_ignore_ascii_case(&self.key)
            || input.eq_ignore_ascii_case(&self.label)
            || self.path.to_str().is_some_and(|p| input.eq_ignore_ascii_case(p))
    }
}

/// The four categories every conference archive starts with, in index order
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("k", "Keynotes", "Keynotes"),
        Category::new("p", "Presentations", "Presentations"),
        Category::new(
            "l",
            "Lightning Talks and Lunch Sessions",
            "Lightning Talks and Lunch Sessions",
        ),
        Category::new("o", "Posters", "Posters"),
    ]
}
