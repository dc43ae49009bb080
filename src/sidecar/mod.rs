//! Sidecar metadata records stored inside each entry directory.
//!
//! The sidecar is the only source of an entry's display title and author once the
//! entry has been filed. It is written exactly once by filing and read on every
//! index rebuild.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use thiserror::Error;

use crate::models::EntryMetadata;

/// Filename of the sidecar record inside an entry directory
pub const SIDECAR_FILENAME: &str = ".presentation";

/// Why a sidecar record could not be loaded
#[derive(Debug, Error)]
pub enum SidecarError {
    #[error("no sidecar record at {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read sidecar record {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed sidecar record {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// Path of the sidecar record for an entry directory
pub fn sidecar_path(entry_dir: &Path) -> PathBuf {
    entry_dir.join(SIDECAR_FILENAME)
}

/// Read and validate the sidecar record of an entry
///
/// Unknown keys are ignored. An empty file, invalid JSON, a missing key or a
/// blank title/author all count as malformed.
pub fn read_sidecar(entry_dir: &Path) -> Result<EntryMetadata, SidecarError> {
    let path = sidecar_path(entry_dir);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(SidecarError::Missing(path)),
        Err(source) => return Err(SidecarError::Unreadable { path, source }),
    };

    if content.trim().is_empty() {
        return Err(SidecarError::Malformed { path, reason: "file is empty".to_string() });
    }

    let metadata: EntryMetadata = serde_json::from_str(&content)
        .map_err(|e| SidecarError::Malformed { path: path.clone(), reason: e.to_string() })?;

    if metadata.title.trim().is_empty() {
        return Err(SidecarError::Malformed { path, reason: "Title is blank".to_string() });
    }
    if metadata.author.trim().is_empty() {
        return Err(SidecarError::Malformed { path, reason: "Author is blank".to_string() });
    }

    Ok(metadata)
}

/// Write the sidecar record for an entry, replacing any existing one
pub fn write_sidecar(entry_dir: &Path, metadata: &EntryMetadata) -> anyhow::Result<()> {
    let path = sidecar_path(entry_dir);
    let json = serde_json::to_string(metadata).context("Failed to serialize sidecar record")?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write sidecar record: {}", path.display()))?;
    Ok(())
}
