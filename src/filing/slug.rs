use anyhow::{Result, bail};

use crate::models::Event;
use crate::utils::split_extension;

/// Directory-safe slug for a title
///
/// Lowercases, drops ` - ` separators, turns spaces into `_`, spells `c++` as `cpp`
/// and keeps only alphanumerics and underscores.
pub fn title_slug(title: &str) -> String {
    let lowered =
        title.to_lowercase().replace(" - ", " ").replace(' ', "_").replace("c++", "cpp");
    let kept: String =
        lowered.chars().filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_').collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Filename-safe slug for an author name
pub fn author_slug(author: &str) -> String {
    author
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Normalized primary artifact filename: `<title>__<author>__<tag><ext>`
pub fn target_filename(title_slug: &str, author_slug: &str, ext: &str, event: &Event) -> String {
    format!("{}__{}__{}{}", title_slug, author_slug, event.tag(), ext)
}

/// Validate an operator-supplied replacement filename
///
/// The name must look like `<title>__<author>__<tag>.<ext>`, contain only
/// alphanumerics and underscores before the extension, and keep the original
/// extension. Returns the title part, which names the entry directory.
pub fn parse_custom_filename(filename: &str, original_ext: &str, event: &Event) -> Result<String> {
    let suffix = format!("__{}", event.tag());
    let Some(rest) = filename.rfind('.').and_then(|dot| filename[..dot].strip_suffix(&suffix))
    else {
        bail!("Cannot parse title and author from new filename: {}", filename);
    };
    let Some(split) = rest.rfind("__") else {
        bail!("Cannot parse title and author from new filename: {}", filename);
    };

    let (stem, ext) = split_extension(filename);
    if !stem.chars().all(|c| c.is_alphanumeric() || c == '_') {
        bail!("Filename contains non-alphanumeric characters. ({})", filename);
    }
    if ext != original_ext {
        bail!(
            "New file extension does not match original file extension ({} vs {})",
            ext,
            original_ext
        );
    }

    let title = &rest[..split];
    if title.is_empty() {
        bail!("Filename has an empty title part: {}", filename);
    }

    Ok(title.to_string())
}
