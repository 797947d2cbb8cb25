//! In-memory `RemoteOperations` implementation.
//!
//! `MemoryRemote` holds a set of named repositories, each with a working
//! tree (`head`) and an ordered list of tagged snapshots. It answers every
//! port call without touching the network, which makes it the port of
//! choice for tests, benchmarks and examples.
//!
//! ```
//! use entity_catalog::memory::{MemoryRemote, MemoryRepository};
//! use entity_catalog::repository::RemoteOperations;
//!
//! let repo = MemoryRepository::new()
//!     .with_file("datasets/ds.spec", "name: ds\n")
//!     .tagged("imgs__ds__1");
//! let remote = MemoryRemote::new().with_repository("org/repo", repo);
//!
//! let handle = remote.find_repository("org/repo").unwrap().unwrap();
//! assert_eq!(remote.list_tags(&handle).unwrap(), vec!["imgs__ds__1"]);
//! ```

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::filesystem::MemoryFS;
use crate::path::has_suffix;
use crate::repository::{validate_identifier, RemoteOperations, RepositoryHandle};

/// One repository: a working tree plus tagged snapshots.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    head: MemoryFS,
    tags: Vec<(String, MemoryFS)>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file to the working tree.
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.head.add_file_string(path, content);
        self
    }

    /// Tags the current working tree.
    pub fn tagged(mut self, tag: &str) -> Self {
        self.tags.push((tag.to_string(), self.head.clone()));
        self
    }

    fn snapshot(&self, git_ref: Option<&str>) -> Option<&MemoryFS> {
        match git_ref {
            None => Some(&self.head),
            Some(name) => self
                .tags
                .iter()
                .find(|(tag, _)| tag == name)
                .map(|(_, fs)| fs),
        }
    }
}

/// A federation of in-memory repositories, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    repositories: BTreeMap<String, MemoryRepository>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, name: &str, repository: MemoryRepository) -> Self {
        self.add_repository(name, repository);
        self
    }

    pub fn add_repository(&mut self, name: &str, repository: MemoryRepository) {
        self.repositories.insert(name.to_string(), repository);
    }

    fn repository(&self, handle: &RepositoryHandle) -> Result<&MemoryRepository> {
        self.repositories
            .get(handle.name())
            .ok_or_else(|| Error::RepositoryNotFound {
                name: handle.name().to_string(),
            })
    }
}

impl RemoteOperations for MemoryRemote {
    fn find_repository(&self, name: &str) -> Result<Option<RepositoryHandle>> {
        validate_identifier(name)?;
        Ok(self
            .repositories
            .contains_key(name)
            .then(|| RepositoryHandle::new(name, format!("memory://{}", name))))
    }

    fn file_exists(&self, repo: &RepositoryHandle, path: &str) -> Result<bool> {
        Ok(self.repository(repo)?.head.exists(path))
    }

    fn search_files(&self, repo: &RepositoryHandle, suffix: &str) -> Result<Vec<String>> {
        Ok(self
            .repository(repo)?
            .head
            .list_files()
            .into_iter()
            .filter(|path| has_suffix(path, suffix))
            .collect())
    }

    fn get_file_content(
        &self,
        repo: &RepositoryHandle,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<Option<Vec<u8>>> {
        Ok(self
            .repository(repo)?
            .snapshot(git_ref)
            .and_then(|fs| fs.get_file(path))
            .map(|file| file.content.clone()))
    }

    fn list_tags(&self, repo: &RepositoryHandle) -> Result<Vec<String>> {
        Ok(self
            .repository(repo)?
            .tags
            .iter()
            .map(|(tag, _)| tag.clone())
            .collect())
    }
}
