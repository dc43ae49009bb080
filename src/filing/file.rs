//! Moving a classified submission into the materials tree.
//!
//! # Error Handling Strategy
//!
//! Every failure (missing source, existing target, failed move, unwritable sidecar)
//! is returned as an error with context and the index is not regenerated for it.
//! The submission is not modified until it has been moved into place, and an existing
//! target file is never overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::WRITEUP_FILENAME;
use crate::filing::slug::{author_slug, parse_custom_filename, target_filename, title_slug};
use crate::models::{Category, EntryMetadata, Event};
use crate::sidecar::write_sidecar;
use crate::utils::split_extension;

/// A submission whose category, title and author are settled
#[derive(Debug, Clone)]
pub struct FilingRequest<'a> {
    /// File or folder to file
    pub source: &'a Path,
    pub category: &'a Category,
    pub metadata: EntryMetadata,
    /// Operator-chosen replacement for the generated filename
    pub filename_override: Option<String>,
}

/// Where a submission will land, relative to the repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingPlan {
    pub entry_dir: PathBuf,
    pub filename: String,
    /// Writeups keep their name and get a `**title** by **author**` first line instead
    pub rewrite_header: bool,
}

impl FilingPlan {
    pub fn target(&self) -> PathBuf {
        self.entry_dir.join(&self.filename)
    }
}

/// Result of filing a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiledEntry {
    /// Entry directory relative to the repository root
    pub entry_dir: PathBuf,
    /// Moved file or folder relative to the repository root
    pub path: PathBuf,
    pub metadata: EntryMetadata,
}

/// Compute the entry directory and filename for a request without touching disk
pub fn plan_filing(request: &FilingRequest<'_>, event: &Event) -> Result<FilingPlan> {
    let filename = request
        .source
        .file_name()
        .with_context(|| format!("Invalid source path: {}", request.source.display()))?
        .to_string_lossy()
        .into_owned();
    let (_, ext) = split_extension(&filename);

    let mut dir_slug = title_slug(&request.metadata.title);
    let (filename, rewrite_header) = if filename == WRITEUP_FILENAME {
        (filename, true)
    } else if let Some(custom) = &request.filename_override {
        dir_slug = parse_custom_filename(custom, ext, event)?;
        (custom.clone(), false)
    } else {
        let author = author_slug(&request.metadata.author);
        (target_filename(&dir_slug, &author, ext, event), false)
    };

    if dir_slug.is_empty() {
        bail!("Title '{}' does not produce a usable directory name", request.metadata.title);
    }

    Ok(FilingPlan { entry_dir: request.category.path.join(dir_slug), filename, rewrite_header })
}

/// Replace the first line of a writeup with its `**title** by **author**` heading
pub fn rewrite_writeup_header(path: &Path, metadata: &EntryMetadata) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let body = content.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    let rewritten = format!("**{}** by **{}**\n{}", metadata.title, metadata.author, body);
    fs::write(path, rewritten).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn move_into_place(source: &Path, target: &Path) -> Result<()> {
    let rename_err = match fs::rename(source, target) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    // rename fails across filesystems; files can still be copied over
    if source.is_file() {
        fs::copy(source, target).with_context(|| {
            format!(
                "Failed to copy {} to {} after rename failed ({})",
                source.display(),
                target.display(),
                rename_err
            )
        })?;
        fs::remove_file(source)
            .with_context(|| format!("Failed to remove {}", source.display()))?;
        return Ok(());
    }

    Err(rename_err)
        .with_context(|| format!("Failed to move {} to {}", source.display(), target.display()))
}

/// File a submission under `root`
///
/// Creates `<category>/<slug>/`, moves the submission there under its normalized
/// name and writes the entry's sidecar record. Filing another format of an
/// already-filed talk lands in the same directory and refreshes its sidecar.
///
/// # Errors
///
/// Returns an error if the source does not exist, the target already exists, a
/// custom filename is invalid or any filesystem operation fails.
pub fn file_entry(root: &Path, request: &FilingRequest<'_>, event: &Event) -> Result<FiledEntry> {
    if !request.source.exists() {
        bail!("Nothing to file at {}", request.source.display());
    }

    let plan = plan_filing(request, event)?;
    let entry_dir = root.join(&plan.entry_dir);
    let target = entry_dir.join(&plan.filename);
    if target.exists() {
        bail!("Refusing to overwrite existing {}", target.display());
    }

    fs::create_dir_all(&entry_dir)
        .with_context(|| format!("Failed to create entry directory: {}", entry_dir.display()))?;
    move_into_place(request.source, &target)?;

    // The source is only changed by the move itself
    if plan.rewrite_header && target.is_file() {
        rewrite_writeup_header(&target, &request.metadata)?;
    }
    write_sidecar(&entry_dir, &request.metadata)?;

    tracing::info!(
        category = %request.category.label,
        "Filed {} by {} as {}",
        request.metadata.title,
        request.metadata.author,
        plan.target().display()
    );

    Ok(FiledEntry {
        path: plan.target(),
        entry_dir: plan.entry_dir,
        metadata: request.metadata.clone(),
    })
}
