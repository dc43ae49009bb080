//! Index generation for the conference materials tree
//!
//! - [`entry_line`]: classifies one entry directory's files and formats its index line
//! - [`builder`]: walks the configured categories and collects per-entry outcomes
//! - [`readme`]: combines the header block with the rendered index and writes the README
//!
//! Per-entry problems are reported as [`SkipReason`]s and never abort generation.

pub mod builder;
pub mod entry_line;
pub mod readme;

pub use builder::{CategoryListing, EntryOutcome, build_listings, list_category, render_index};
pub use entry_line::{EntryFiles, SkipReason, format_entry, format_entry_line};
pub use readme::{IndexSummary, render_readme, write_readme};
