use std::path::{Component, Path};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// Characters left as-is in markdown links: unreserved URL characters plus '/'
const ENCODE_SET: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'_').remove(b'.').remove(b'-').remove(b'~').remove(b'/');

/// Normalizes a relative or absolute path into forward-slash form
///
/// `.` components are dropped and `..` folds into the preceding component where
/// possible. Backslashes are treated as separators regardless of host platform.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use talk_index::normalize_path;
///
/// assert_eq!(normalize_path(Path::new("Keynotes/./foo/../bar")), "Keynotes/bar");
/// ```
pub fn normalize_path(path: &Path) -> String {
    let path_str = path.to_string_lossy().replace('\\', "/");
    let path = Path::new(&path_str);

    let mut absolute = false;
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::RootDir | Component::Prefix(_) => absolute = true,
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push("..".to_string()),
            },
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Splits a filename into stem and extension, the extension keeping its dot
///
/// Leading dots belong to the stem, so `.presentation` has no extension.
///
/// # Examples
///
/// ```
/// use talk_index::split_extension;
///
/// assert_eq!(split_extension("slides.tar.gz"), ("slides.tar", ".gz"));
/// assert_eq!(split_extension(".presentation"), (".presentation", ""));
/// ```
pub fn split_extension(name: &str) -> (&str, &str) {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(dot) => name.split_at(stem_start + dot),
        None => (name, ""),
    }
}

/// Formats a path for use as a markdown link target
///
/// The path is normalized with [`normalize_path`] and then percent-encoded so it
/// renders the same in any markdown viewer.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use talk_index::md_path;
///
/// let path = Path::new("Lightning Talks and Lunch Sessions/foo_bar");
/// assert_eq!(md_path(path), "Lightning%20Talks%20and%20Lunch%20Sessions/foo_bar");
/// ```
pub fn md_path(path: &Path) -> String {
    utf8_percent_encode(&normalize_path(path), ENCODE_SET).to_string()
}
