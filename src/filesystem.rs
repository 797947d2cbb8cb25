//! In-memory snapshot of a repository tree

use std::collections::BTreeMap;

/// Represents a file with content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// File content as bytes
    pub content: Vec<u8>,
}

impl File {
    /// Create a new file with content
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    /// Create a new file from string content
    pub fn from_string(content: &str) -> Self {
        Self::new(content.as_bytes().to_vec())
    }
}

/// In-memory file tree keyed by `/`-separated repository paths.
///
/// Paths are stored without a leading `/`, so `/.ml-git/config.yaml` and
/// `.ml-git/config.yaml` name the same file. Listing is in sorted path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFS {
    files: BTreeMap<String, File>,
}

fn normalize(path: &str) -> &str {
    path.trim_start_matches('/')
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a file
    pub fn add_file(&mut self, path: &str, file: File) {
        self.files.insert(normalize(path).to_string(), file);
    }

    /// Add a file with string content
    pub fn add_file_string(&mut self, path: &str, content: &str) {
        self.add_file(path, File::from_string(content));
    }

    /// Get a file by path
    pub fn get_file(&self, path: &str) -> Option<&File> {
        self.files.get(normalize(path))
    }

    /// Check if a file exists
    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(normalize(path))
    }

    /// List all files in sorted order
    pub fn list_files(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

}
