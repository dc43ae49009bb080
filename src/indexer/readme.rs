//! README generation: header block plus the regenerated index.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::indexer::builder::{CategoryListing, build_listings, render_index};

/// Outcome of a README regeneration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub readme_path: PathBuf,
    pub listed: usize,
    pub skipped: usize,
    /// Labels of categories whose directory does not exist yet
    pub missing_categories: Vec<String>,
}

impl IndexSummary {
    pub fn from_listings(readme_path: PathBuf, listings: &[CategoryListing]) -> Self {
        Self {
            readme_path,
            listed: listings.iter().map(|l| l.listed_count()).sum(),
            skipped: listings.iter().map(|l| l.skipped_count()).sum(),
            missing_categories: listings
                .iter()
                .filter(|l| !l.present)
                .map(|l| l.category.label.clone())
                .collect(),
        }
    }
}

/// Read the header block that precedes the index
pub fn read_header(root: &Path, config: &Config) -> Result<String> {
    let header_path = root.join(&config.header);
    fs::read_to_string(&header_path)
        .with_context(|| format!("Failed to read README header: {}", header_path.display()))
}

/// Render the complete README document without writing it
pub fn render_readme(root: &Path, config: &Config) -> Result<(String, Vec<CategoryListing>)> {
    let mut document = read_header(root, config)?;
    let listings = build_listings(root, config);
    document.push_str(&render_index(&listings));
    Ok((document, listings))
}

/// Write a file atomically (temp file + rename)
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid output path: {}", path.display()))?
        .to_string_lossy();
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }

    Ok(())
}

/// Regenerate the README from the current materials tree
///
/// # Errors
///
/// Returns an error if the header cannot be read or the README cannot be written.
/// Problems with individual entries never fail regeneration.
pub fn write_readme(root: &Path, config: &Config) -> Result<IndexSummary> {
    let (document, listings) = render_readme(root, config)?;
    let readme_path = root.join(&config.readme);
    write_atomic(&readme_path, &document)?;

    let summary = IndexSummary::from_listings(readme_path, &listings);
    tracing::info!(
        listed = summary.listed,
        skipped = summary.skipped,
        "Wrote {}",
        summary.readme_path.display()
    );
    Ok(summary)
}
