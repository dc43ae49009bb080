//! talk-index - Organize conference talk materials and regenerate their index
//!
//! This library files conference contributions (keynotes, presentations, lightning
//! talks, posters) into a category directory tree and rebuilds a markdown index of
//! everything filed. It supports:
//!
//! - Inferring title and author from upload naming conventions
//! - Moving submissions into `<category>/<slug>/` with normalized filenames
//! - Recording each entry's title and author in a sidecar record
//! - Regenerating the README index, skipping malformed entries without failing
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use talk_index::config::Config;
//! use talk_index::write_readme;
//!
//! let root = Path::new("/srv/cppcon2018");
//! let config = Config::load(root)?;
//! let summary = write_readme(root, &config)?;
//! println!("Indexed {} entries", summary.listed);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod filing;
pub mod indexer;
pub mod models;
pub mod sidecar;
pub mod utils;

// Re-export commonly used types
pub use indexer::{build_listings, render_index, write_readme};
pub use models::{Category, EntryMetadata, Event};
pub use sidecar::{read_sidecar, write_sidecar};
pub use utils::paths::{md_path, normalize_path, split_extension};
