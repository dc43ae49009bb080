//! Formatting of a single entry directory into its index line.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::config::FileConventions;
use crate::models::EntryMetadata;
use crate::sidecar::{SidecarError, read_sidecar};
use crate::utils::{md_path, split_extension};

/// Why an entry was left out of the index
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("not a directory")]
    NotADirectory,

    #[error("failed to list directory: {0}")]
    Unreadable(#[source] io::Error),

    #[error(transparent)]
    Sidecar(#[from] SidecarError),
}

/// Contents of an entry directory, classified by naming convention
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFiles {
    /// Primary artifact candidates in listing order
    pub primary: Vec<String>,
    /// Index into `primary` of the file the entry title links to
    pub chosen_primary: Option<usize>,
    pub writeup: Option<String>,
    pub misc: Vec<String>,
}

impl EntryFiles {
    /// Classify filenames in the order given
    ///
    /// The first PDF candidate becomes the chosen primary artifact; without a PDF the
    /// first candidate is chosen. The sidecar record is never a content file.
    pub fn classify<I, S>(names: I, conventions: &FileConventions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files = Self::default();

        for name in names {
            let name = name.into();
            if name == conventions.sidecar_name {
                continue;
            } else if is_primary_artifact(&name, &conventions.primary_suffix) {
                let prefer = match files.chosen_primary {
                    None => true,
                    Some(i) => !is_pdf(&files.primary[i]) && is_pdf(&name),
                };
                if prefer {
                    files.chosen_primary = Some(files.primary.len());
                }
                files.primary.push(name);
            } else if name.ends_with(&conventions.writeup_name) {
                if files.writeup.is_none() {
                    files.writeup = Some(name);
                }
            } else {
                files.misc.push(name);
            }
        }

        files
    }

    pub fn chosen(&self) -> Option<&str> {
        self.chosen_primary.map(|i| self.primary[i].as_str())
    }

    /// Primary candidates other than the chosen one
    pub fn extra_primaries(&self) -> impl Iterator<Item = &str> {
        self.primary
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != self.chosen_primary)
            .map(|(_, name)| name.as_str())
    }
}

/// Check whether a filename follows the primary artifact convention
///
/// The stem (everything before the last `.`) must end with `suffix`,
/// e.g. `modern_cpp__jane_doe__cppcon_2018.pdf` for suffix `__cppcon_2018`.
pub fn is_primary_artifact(name: &str, suffix: &str) -> bool {
    name.rfind('.').is_some_and(|dot| name[..dot].ends_with(suffix))
}

fn is_pdf(name: &str) -> bool {
    extension_label(name) == ".pdf"
}

/// Lowercased extension including the dot, or an empty string
pub fn extension_label(name: &str) -> String {
    split_extension(name).1.to_lowercase()
}

/// List and classify an entry directory
///
/// Names are sorted so that tie-breaks between primary candidates do not depend
/// on filesystem enumeration order.
pub fn read_entry_files(
    entry_dir: &Path,
    conventions: &FileConventions,
) -> Result<EntryFiles, SkipReason> {
    if !entry_dir.is_dir() {
        return Err(SkipReason::NotADirectory);
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(entry_dir).map_err(SkipReason::Unreadable)? {
        let entry = entry.map_err(SkipReason::Unreadable)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    Ok(EntryFiles::classify(names, conventions))
}

/// Compose the index line for an entry
///
/// `rel_dir` is the entry directory relative to the index document; every link is
/// built from it. The returned line ends with a newline.
pub fn format_entry_line(rel_dir: &Path, files: &EntryFiles, metadata: &EntryMetadata) -> String {
    let link = match files.chosen() {
        Some(name) => md_path(&rel_dir.join(name)),
        None => md_path(rel_dir),
    };

    let mut line = format!("- [{}]({}) by {}", metadata.title, link, metadata.author);

    for name in files.extra_primaries() {
        line.push_str(&format!(
            " \\[[{}]({})\\]",
            extension_label(name),
            md_path(&rel_dir.join(name))
        ));
    }

    if let Some(writeup) = &files.writeup {
        line.push_str(&format!(" \\[[README]({})\\]", md_path(&rel_dir.join(writeup))));
    }

    if !files.misc.is_empty() {
        line.push_str(&format!(" \\[[more materials]({})\\]", md_path(rel_dir)));
    }

    line.push('\n');
    line
}

/// Produce the index line for the entry at `root/rel_dir`
///
/// Nothing is returned for an entry that fails at any step; the reason is
/// reported instead so the caller can skip it.
pub fn format_entry(
    root: &Path,
    rel_dir: &Path,
    conventions: &FileConventions,
) -> Result<String, SkipReason> {
    let entry_dir = root.join(rel_dir);
    let files = read_entry_files(&entry_dir, conventions)?;
    let metadata = read_sidecar(&entry_dir)?;
    Ok(format_entry_line(rel_dir, &files, &metadata))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::models::Event;
    use crate::sidecar::write_sidecar;

    fn conventions() -> FileConventions {
        FileConventions::for_event(&Event::default())
    }

    fn metadata() -> EntryMetadata {
        EntryMetadata::new("Foo Bar", "Jane Doe")
    }

    #[test]
    fn test_is_primary_artifact() {
        assert!(is_primary_artifact("foo__jane__cppcon_2018.pdf", "__cppcon_2018"));
        assert!(is_primary_artifact("foo__jane__cppcon_2018.", "__cppcon_2018"));
        assert!(!is_primary_artifact("foo__jane__cppcon_2018", "__cppcon_2018"));
        assert!(!is_primary_artifact("foo__jane__cppcon_2018.tar.gz", "__cppcon_2018"));
        assert!(!is_primary_artifact("foo__jane__cppcon_2017.pdf", "__cppcon_2018"));
    }

    #[test]
    fn test_extension_label() {
        assert_eq!(extension_label("talk.PPTX"), ".pptx");
        assert_eq!(extension_label("archive.tar.gz"), ".gz");
        assert_eq!(extension_label("Makefile"), "");
        assert_eq!(extension_label(".hidden"), "");
    }

    #[test]
    fn test_classify_prefers_pdf() {
        let files = EntryFiles::classify(
            ["foo__jane__cppcon_2018.key", "foo__jane__cppcon_2018.PDF", ".presentation"],
            &conventions(),
        );
        assert_eq!(files.primary.len(), 2);
        assert_eq!(files.chosen(), Some("foo__jane__cppcon_2018.PDF"));
        assert_eq!(files.extra_primaries().collect::<Vec<_>>(), vec!["foo__jane__cppcon_2018.key"]);
        assert!(files.misc.is_empty());
    }

    #[test]
    fn test_classify_keeps_first_without_pdf() {
        let files = EntryFiles::classify(
            ["foo__cppcon_2018.key", "foo__cppcon_2018.pptx"],
            &conventions(),
        );
        assert_eq!(files.chosen(), Some("foo__cppcon_2018.key"));
    }

    #[test]
    fn test_classify_writeup_and_misc() {
        let files =
            EntryFiles::classify(["README.md", "code.zip", "demo", ".presentation"], &conventions());
        assert!(files.primary.is_empty());
        assert_eq!(files.writeup.as_deref(), Some("README.md"));
        assert_eq!(files.misc, vec!["code.zip", "demo"]);
    }

    #[test]
    fn test_line_single_pdf() {
        let files = EntryFiles::classify(["foo_bar__jane_doe__cppcon_2018.pdf"], &conventions());
        let line = format_entry_line(Path::new("Presentations/foo_bar"), &files, &metadata());
        assert_eq!(
            line,
            "- [Foo Bar](Presentations/foo_bar/foo_bar__jane_doe__cppcon_2018.pdf) by Jane Doe\n"
        );
    }

    #[test]
    fn test_line_without_primary_links_directory() {
        let files = EntryFiles::classify(["README.md"], &conventions());
        let line = format_entry_line(Path::new("Posters/foo_bar"), &files, &metadata());
        assert_eq!(
            line,
            "- [Foo Bar](Posters/foo_bar) by Jane Doe \\[[README](Posters/foo_bar/README.md)\\]\n"
        );
    }

    #[test]
    fn test_line_with_all_link_kinds() {
        let files = EntryFiles::classify(
            ["demo.cpp", "x__cppcon_2018.pdf", "x__cppcon_2018.pptx", "README.md"],
            &conventions(),
        );
        let rel_dir = PathBuf::from("Lightning Talks and Lunch Sessions").join("x");
        let line = format_entry_line(&rel_dir, &files, &metadata());
        let dir = "Lightning%20Talks%20and%20Lunch%20Sessions/x";
        assert_eq!(
            line,
            format!(
                "- [Foo Bar]({dir}/x__cppcon_2018.pdf) by Jane Doe \
                 \\[[.pptx]({dir}/x__cppcon_2018.pptx)\\] \
                 \\[[README]({dir}/README.md)\\] \
                 \\[[more materials]({dir})\\]\n"
            )
        );
    }

    #[test]
    fn test_format_entry_reads_sidecar() {
        let root = TempDir::new().unwrap();
        let rel_dir = Path::new("Keynotes").join("foo_bar");
        fs::create_dir_all(root.path().join(&rel_dir)).unwrap();
        fs::write(root.path().join(&rel_dir).join("foo_bar__jane_doe__cppcon_2018.pdf"), b"%PDF")
            .unwrap();
        write_sidecar(&root.path().join(&rel_dir), &metadata()).unwrap();

        let line = format_entry(root.path(), &rel_dir, &conventions()).unwrap();
        assert!(line.starts_with("- [Foo Bar](Keynotes/foo_bar/foo_bar__jane_doe__cppcon_2018.pdf)"));
        assert!(line.ends_with("by Jane Doe\n"));
    }

    #[test]
    fn test_format_entry_missing_sidecar() {
        let root = TempDir::new().unwrap();
        let rel_dir = Path::new("Keynotes").join("orphan");
        fs::create_dir_all(root.path().join(&rel_dir)).unwrap();
        fs::write(root.path().join(&rel_dir).join("orphan__cppcon_2018.pdf"), b"%PDF").unwrap();

        let err = format_entry(root.path(), &rel_dir, &conventions()).unwrap_err();
        assert!(matches!(err, SkipReason::Sidecar(SidecarError::Missing(_))));
    }

    #[test]
    fn test_format_entry_not_a_directory() {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("Keynotes")).unwrap();
        fs::write(root.path().join("Keynotes").join(".DS_Store"), b"").unwrap();

        let err = format_entry(root.path(), Path::new("Keynotes/.DS_Store"), &conventions())
            .unwrap_err();
        assert!(matches!(err, SkipReason::NotADirectory));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_entry_files_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let entry_dir = root.path().join("locked");
        fs::create_dir(&entry_dir).unwrap();
        fs::set_permissions(&entry_dir, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop a privileged user
        let still_readable = fs::read_dir(&entry_dir).is_ok();
        let result = read_entry_files(&entry_dir, &conventions());
        fs::set_permissions(&entry_dir, fs::Permissions::from_mode(0o755)).unwrap();
        if still_readable {
            return;
        }

        assert!(matches!(result, Err(SkipReason::Unreadable(_))));
    }
}
