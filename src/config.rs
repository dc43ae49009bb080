//! Configuration for a conference materials repository.
//!
//! Configuration sources (highest priority first):
//! 1. `--root` flag or `TALK_INDEX_ROOT` environment variable for the repository root
//! 2. Config file (`_tools/talk-index.json` under the root)
//! 3. Defaults (CppCon 2018, the four standard categories)
//!
//! Paths in the config file are relative to the repository root.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::models::{Category, Event, default_categories};
use crate::sidecar::SIDECAR_FILENAME;

/// Directory that marks a repository root and holds the README header
pub const TOOLS_DIR: &str = "_tools";

/// Optional config file inside [`TOOLS_DIR`]
pub const CONFIG_FILENAME: &str = "talk-index.json";

/// Environment variable consulted for the repository root
pub const ROOT_ENV_VAR: &str = "TALK_INDEX_ROOT";

/// Name of the long-form writeup file inside an entry directory
pub const WRITEUP_FILENAME: &str = "README.md";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub event: Event,
    /// Header block copied verbatim to the top of the generated README
    pub header: PathBuf,
    /// Generated index document
    pub readme: PathBuf,
    /// Categories in the order their sections appear in the index
    pub categories: Vec<Category>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            event: Event::default(),
            header: Path::new(TOOLS_DIR).join("readme_header.md"),
            readme: PathBuf::from("README.md"),
            categories: default_categories(),
        }
    }
}

/// Filename conventions used to classify the contents of an entry directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConventions {
    /// Stem suffix marking a primary artifact, e.g. `__cppcon_2018`
    pub primary_suffix: String,
    pub writeup_name: String,
    pub sidecar_name: String,
}

impl FileConventions {
    pub fn for_event(event: &Event) -> Self {
        Self {
            primary_suffix: format!("__{}", event.tag()),
            writeup_name: WRITEUP_FILENAME.to_string(),
            sidecar_name: SIDECAR_FILENAME.to_string(),
        }
    }
}

impl Config {
    /// Load configuration for the repository at `root`
    ///
    /// Falls back to defaults when no config file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read, parsed or
    /// fails validation.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(TOOLS_DIR).join(CONFIG_FILENAME);
        if !config_path.exists() {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
        config.validate()?;

        Ok(config)
    }

    /// Check that categories are present and unambiguous
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            bail!("Config must declare at least one category");
        }

        let mut keys = HashSet::new();
        let mut labels = HashSet::new();
        for category in &self.categories {
            if category.key.trim().is_empty() {
                bail!("Category '{}' has an empty key", category.label);
            }
            if !keys.insert(category.key.to_lowercase()) {
                bail!("Duplicate category key: {}", category.key);
            }
            if !labels.insert(category.label.to_lowercase()) {
                bail!("Duplicate category label: {}", category.label);
            }
        }

        Ok(())
    }

    /// Find the category selected by operator input (key, label or directory name)
    pub fn find_category(&self, input: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.matches(input))
    }

    pub fn conventions(&self) -> FileConventions {
        FileConventions::for_event(&self.event)
    }
}

/// Resolve and validate the repository root
///
/// Uses `explicit` when given, otherwise the current directory. The root must
/// contain a [`TOOLS_DIR`] directory.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let root = match explicit {
        Some(path) => path.to_path_buf(),
        None => env::current_dir().context("Failed to determine current directory")?,
    };

    if !root.join(TOOLS_DIR).is_dir() {
        bail!(
            "Run this from the materials root: {} has no {} directory",
            root.display(),
            TOOLS_DIR
        );
    }

    Ok(root)
}
