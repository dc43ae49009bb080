//! Data models for the conference materials tree.
//!
//! - [`Category`] - A top-level classification and the directory that holds its entries
//! - [`EntryMetadata`] - Title and author persisted in each entry's sidecar record
//! - [`Event`] - The conference an archive belongs to, used to derive file naming tags

pub mod category;
pub mod event;
pub mod metadata;

pub use category::{Category, default_categories};
pub use event::Event;
pub use metadata::EntryMetadata;
