//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const DEFAULT_HEADER: &str = "# CppCon 2018 Presentation Materials\n\n";

/// Builder for creating test materials repositories
pub struct MaterialsBuilder {
    temp_dir: TempDir,
}

impl MaterialsBuilder {
    /// Create a new builder with a `_tools` directory and the default README header
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(temp_dir.path().join("_tools")).expect("Failed to create _tools");
        let builder = Self { temp_dir };
        builder.with_header(DEFAULT_HEADER)
    }

    /// Get the repository root
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Replace the README header block
    pub fn with_header(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join("_tools").join("readme_header.md"), content)
            .expect("Failed to write readme header");
        self
    }

    /// Write `_tools/talk-index.json`
    pub fn with_config(self, json: &str) -> Self {
        fs::write(self.temp_dir.path().join("_tools").join("talk-index.json"), json)
            .expect("Failed to write config");
        self
    }

    /// Add an entry directory under `category`
    pub fn with_entry(self, category: &str, entry: EntryBuilder) -> Self {
        entry.create_in(&self.temp_dir.path().join(category));
        self
    }

    /// Add a plain file directly under a category directory
    pub fn with_stray_file(self, category: &str, name: &str) -> Self {
        let dir = self.temp_dir.path().join(category);
        fs::create_dir_all(&dir).expect("Failed to create category dir");
        fs::write(dir.join(name), b"stray").expect("Failed to write stray file");
        self
    }

    /// Add a file at the repository root, e.g. an upload waiting to be filed
    pub fn with_upload(self, name: &str, content: &[u8]) -> Self {
        fs::write(self.temp_dir.path().join(name), content).expect("Failed to write upload");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for MaterialsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sidecar contents for an entry
enum Sidecar {
    Metadata { title: String, author: String },
    Raw(String),
    Absent,
}

/// Builder for a single entry directory
pub struct EntryBuilder {
    name: String,
    files: Vec<String>,
    sidecar: Sidecar,
}

impl EntryBuilder {
    /// Create an entry directory with the given name and a valid sidecar
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            files: Vec::new(),
            sidecar: Sidecar::Metadata {
                title: "Test Talk".to_string(),
                author: "Test Speaker".to_string(),
            },
        }
    }

    /// Set the sidecar title and author
    pub fn metadata(mut self, title: &str, author: &str) -> Self {
        self.sidecar = Sidecar::Metadata { title: title.to_string(), author: author.to_string() };
        self
    }

    /// Write the sidecar verbatim
    pub fn raw_sidecar(mut self, content: &str) -> Self {
        self.sidecar = Sidecar::Raw(content.to_string());
        self
    }

    /// Leave the sidecar out
    pub fn without_sidecar(mut self) -> Self {
        self.sidecar = Sidecar::Absent;
        self
    }

    /// Add a file to the entry directory
    pub fn file(mut self, name: &str) -> Self {
        self.files.push(name.to_string());
        self
    }

    /// Create the entry inside the given category directory
    pub fn create_in(&self, category_dir: &Path) -> PathBuf {
        let dir = category_dir.join(&self.name);
        fs::create_dir_all(&dir).expect("Failed to create entry dir");

        for file in &self.files {
            fs::write(dir.join(file), b"content").expect("Failed to write entry file");
        }

        let sidecar = match &self.sidecar {
            Sidecar::Metadata { title, author } => Some(format!(
                r#"{{"Title": "{}", "Author": "{}"}}"#,
                title, author
            )),
            Sidecar::Raw(content) => Some(content.clone()),
            Sidecar::Absent => None,
        };
        if let Some(content) = sidecar {
            fs::write(dir.join(".presentation"), content).expect("Failed to write sidecar");
        }

        dir
    }
}

/// Helper to create a repository with a few entries in every category
pub fn realistic_materials() -> TempDir {
    MaterialsBuilder::new()
        .with_entry(
            "Keynotes",
            EntryBuilder::new("concepts_the_future")
                .metadata("Concepts: The Future", "Bjarne Stroustrup")
                .file("concepts_the_future__bjarne_stroustrup__cppcon_2018.pdf"),
        )
        .with_entry(
            "Presentations",
            EntryBuilder::new("modern_cmake")
                .metadata("Modern CMake", "Jane Doe")
                .file("modern_cmake__jane_doe__cppcon_2018.pdf")
                .file("modern_cmake__jane_doe__cppcon_2018.pptx")
                .file("README.md")
                .file("examples.zip"),
        )
        .with_entry(
            "Presentations",
            EntryBuilder::new("allocators")
                .metadata("Allocators", "John Roe")
                .file("allocators__john_roe__cppcon_2018.key"),
        )
        .with_entry(
            "Lightning Talks and Lunch Sessions",
            EntryBuilder::new("five_minutes_of_ub").metadata("Five Minutes of UB", "Sam Poe"),
        )
        .with_entry(
            "Posters",
            EntryBuilder::new("fuzzing_at_scale")
                .metadata("Fuzzing at Scale", "Ann Lee")
                .file("fuzzing_at_scale__ann_lee__cppcon_2018.pdf"),
        )
        .build()
}
