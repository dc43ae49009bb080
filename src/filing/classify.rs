use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{EntryMetadata, Event};
use crate::utils::split_extension;

/// Outcome of inferring an entry's title and author from its upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Resolved(EntryMetadata),
    /// Naming conventions did not yield both a title and an author
    Ambiguous,
}

impl Classification {
    pub fn resolved(self) -> Option<EntryMetadata> {
        match self {
            Classification::Resolved(metadata) => Some(metadata),
            Classification::Ambiguous => None,
        }
    }
}

fn non_empty(title: &str, author: &str) -> Option<EntryMetadata> {
    if title.is_empty() || author.is_empty() {
        return None;
    }
    Some(EntryMetadata::new(title, author))
}

/// Parse a writeup heading of the form `**<title>** by **<author>**`
///
/// The heading must start the line. When the separator appears more than once the
/// title takes everything up to the last one.
pub fn parse_readme_header(line: &str) -> Option<EntryMetadata> {
    const SEPARATOR: &str = "** by **";

    let line = line.trim_end_matches(['\r', '\n']);
    let rest = line.strip_prefix("**")?;

    for (i, _) in rest.rmatch_indices(SEPARATOR) {
        let after = &rest[i + SEPARATOR.len()..];
        if let Some(end) = after.rfind("**") {
            return non_empty(&rest[..i], &after[..end]);
        }
    }

    None
}

/// Parse an upload filename of the form `<title> - <author> - <Event> <year>.<ext>`
///
/// The title takes everything up to the last ` - ` before the event name.
pub fn parse_upload_filename(filename: &str, event: &Event) -> Option<EntryMetadata> {
    let dot = filename.rfind('.')?;
    let suffix = format!(" - {}", event.display_name());
    let rest = filename[..dot].strip_suffix(&suffix)?;
    let split = rest.rfind(" - ")?;
    non_empty(&rest[..split], &rest[split + 3..])
}

/// Infer title and author for an uploaded file
///
/// Markdown writeups are classified by their first line (`header_line`), every other
/// upload by its filename.
pub fn classify(filename: &str, header_line: Option<&str>, event: &Event) -> Classification {
    let (_, ext) = split_extension(filename);
    let metadata = if ext == ".md" {
        header_line.and_then(parse_readme_header)
    } else {
        parse_upload_filename(filename, event)
    };

    match metadata {
        Some(metadata) => Classification::Resolved(metadata),
        None => Classification::Ambiguous,
    }
}

/// Read the first line of a file, if any
pub fn read_first_line(path: &Path) -> Result<Option<String>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut line = String::new();
    let read = BufReader::new(file)
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((read > 0).then_some(line))
}
