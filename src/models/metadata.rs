use serde::{Deserialize, Serialize};

/// Display metadata for one entry, stored in its sidecar record
///
/// Serialized with the capitalized keys `Title` and `Author`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
}

impl EntryMetadata {
    pub fn new(title: &str, author: &str) -> Self {
        Self { title: title.to_string(), author: author.to_string() }
    }
}
