//! Index builder for the conference materials tree.
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach:
//!
//! - **Missing categories**: A category directory that does not exist yet is logged and
//!   produces a heading with no entries. Categories are legitimately empty until their
//!   first entry is filed.
//! - **Entry-level failures**: An entry that is not a directory, cannot be listed or has
//!   a missing/malformed sidecar record becomes [`EntryOutcome::Skipped`] with its
//!   [`SkipReason`]. One bad entry never fails the whole index.
//! - **No fatal errors**: Building listings cannot fail. The only caller-visible failure
//!   of index generation is writing the README, see [`crate::indexer::readme`].

use std::cmp::Ordering;
use std::path::Path;

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::{Config, FileConventions};
use crate::indexer::entry_line::{SkipReason, format_entry};
use crate::models::Category;

/// Title line opening the generated index body
pub const INDEX_TITLE: &str = "# Index of Materials\n";

/// Result of processing one entry directory
#[derive(Debug)]
pub enum EntryOutcome {
    Listed { name: String, line: String },
    Skipped { name: String, reason: SkipReason },
}

impl EntryOutcome {
    pub fn name(&self) -> &str {
        match self {
            EntryOutcome::Listed { name, .. } | EntryOutcome::Skipped { name, .. } => name,
        }
    }
}

/// All entries found under one category, in index order
#[derive(Debug)]
pub struct CategoryListing {
    pub category: Category,
    /// Whether the category directory exists on disk
    pub present: bool,
    pub outcomes: Vec<EntryOutcome>,
}

impl CategoryListing {
    /// Index lines of successfully formatted entries
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().filter_map(|o| match o {
            EntryOutcome::Listed { line, .. } => Some(line.as_str()),
            EntryOutcome::Skipped { .. } => None,
        })
    }

    /// Skipped entries with their reasons
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            EntryOutcome::Skipped { name, reason } => Some((name.as_str(), reason)),
            EntryOutcome::Listed { .. } => None,
        })
    }

    pub fn listed_count(&self) -> usize {
        self.lines().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }
}

/// Case-insensitive ordering of entry directory names
///
/// Names equal ignoring case fall back to exact comparison so the order is total.
pub fn compare_entry_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Build the listing for a single category
///
/// Entries are formatted in parallel; the returned outcomes are in sorted order.
pub fn list_category(
    root: &Path,
    category: &Category,
    conventions: &FileConventions,
) -> CategoryListing {
    let category_dir = root.join(&category.path);
    if !category_dir.exists() {
        tracing::info!("Skipping {} since it doesn't exist yet", category.path.display());
        return CategoryListing { category: category.clone(), present: false, outcomes: Vec::new() };
    }

    let walker = WalkDir::new(&category_dir).min_depth(1).max_depth(1).sort_by(|a, b| {
        compare_entry_names(&a.file_name().to_string_lossy(), &b.file_name().to_string_lossy())
    });

    // Paths are rebuilt from the raw file name; the lossy form is only for display
    let mut names = Vec::new();
    for item in walker {
        match item {
            Ok(entry) => names.push(entry.file_name().to_os_string()),
            Err(e) => {
                tracing::warn!(
                    "Failed to read category directory {}: {}",
                    category_dir.display(),
                    e
                );
            }
        }
    }

    let outcomes = names
        .into_par_iter()
        .map(|file_name| {
            let rel_dir = category.path.join(&file_name);
            let name = file_name.to_string_lossy().into_owned();
            match format_entry(root, &rel_dir, conventions) {
                Ok(line) => EntryOutcome::Listed { name, line },
                Err(reason) => {
                    match reason {
                        SkipReason::NotADirectory => {
                            tracing::debug!("Skipping {}: {}", rel_dir.display(), reason)
                        }
                        _ => tracing::warn!("Skipping {}: {}", rel_dir.display(), reason),
                    }
                    EntryOutcome::Skipped { name, reason }
                }
            }
        })
        .collect();

    CategoryListing { category: category.clone(), present: true, outcomes }
}

/// Build listings for every configured category, in declared order
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use talk_index::config::Config;
/// use talk_index::indexer::{build_listings, render_index};
///
/// let root = Path::new("/srv/cppcon2018");
/// let listings = build_listings(root, &Config::default());
/// print!("{}", render_index(&listings));
/// ```
pub fn build_listings(root: &Path, config: &Config) -> Vec<CategoryListing> {
    let conventions = config.conventions();
    config.categories.iter().map(|category| list_category(root, category, &conventions)).collect()
}

/// Render the index body: title line, then a heading and entry lines per category
pub fn render_index(listings: &[CategoryListing]) -> String {
    let mut body = String::from(INDEX_TITLE);
    for listing in listings {
        body.push_str(&format!("\n## {}\n\n", listing.category.label));
        for line in listing.lines() {
            body.push_str(line);
        }
    }
    body
}
