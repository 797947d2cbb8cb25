//! # Entity Resolution
//!
//! The `EntityResolver` is the orchestrator of the crate. It answers two
//! questions through a `RemoteOperations` port:
//!
//! 1.  **Which entities exist?** (`get_entities`) Starting from a
//!     configuration, either a local file or `.ml-git/config.yaml` inside a
//!     named repository, it resolves every remote the configuration lists,
//!     searches each one for `.spec` files and parses them into `Entity`
//!     records.
//!
//! 2.  **What versions does an entity have?** (`get_entity_versions`) Given
//!     an entity name and the repository holding its metadata, it locates
//!     the entity's spec file, walks the repository's tags, keeps the tags
//!     that version that entity and reads the spec as it was at each one.
//!
//! ## Failure Policy
//!
//! - A remote listed in a configuration that cannot be resolved, or whose
//!   identifier the port rejects, is skipped; an explicitly requested
//!   repository that cannot be resolved is an error.
//! - Malformed configuration or spec content aborts the whole call.
//! - A matching tag without readable content at the spec path is skipped.
//! - Port failures are passed through, never retried.
//!
//! All remote calls are issued sequentially. Checking for the configuration
//! file and then fetching it are two separate calls, so a remote that
//! changes in between can still be observed half-way; the port offers no
//! atomic read to avoid that.
//!
//! ## Ordering
//!
//! Entities come back in configuration order, then in the port's file
//! enumeration order. Versions come back in the port's tag enumeration order,
//! which is not necessarily chronological.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::cache::EntityCache;
use crate::config::{self, Configuration, Remote};
use crate::defaults::{CONFIG_PATH, SPEC_EXTENSION};
use crate::entity::{Entity, SpecVersion};
use crate::error::{Error, Result};
use crate::path::file_name_matches;
use crate::repository::{RemoteOperations, RepositoryHandle};
use crate::tag::parse_tag;

/// Where to read the configuration naming the remotes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigSource {
    /// A configuration file on the local filesystem
    Path(PathBuf),
    /// A repository expected to hold `.ml-git/config.yaml`
    Repository(String),
}

impl ConfigSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ConfigSource::Path(path.into())
    }

    pub fn repository(name: impl Into<String>) -> Self {
        ConfigSource::Repository(name.into())
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Path(path) => write!(f, "{}", path.display()),
            ConfigSource::Repository(name) => write!(f, "repository {}", name),
        }
    }
}

/// Discovers entities and their version history through a remote port.
pub struct EntityResolver {
    remote: Box<dyn RemoteOperations>,
    cache: EntityCache,
}

impl EntityResolver {
    /// Creates a resolver with its own, empty entity cache.
    pub fn new(remote: Box<dyn RemoteOperations>) -> Self {
        Self::with_cache(remote, EntityCache::new())
    }

    /// Creates a resolver that records listings into `cache`.
    pub fn with_cache(remote: Box<dyn RemoteOperations>, cache: EntityCache) -> Self {
        Self { remote, cache }
    }

    pub fn remote(&self) -> &dyn RemoteOperations {
        self.remote.as_ref()
    }

    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    /// Lists every entity reachable from the configuration at `source`.
    ///
    /// The result replaces whatever the cache held. A failed call leaves the
    /// cache empty.
    pub fn get_entities(&self, source: &ConfigSource) -> Result<Vec<Entity>> {
        let result = match source {
            ConfigSource::Repository(name) => self.entities_from_repository(name),
            ConfigSource::Path(path) => self.entities_from_file(path),
        };

        match result {
            Ok(entities) => {
                self.cache.store(source.clone(), entities.clone())?;
                Ok(entities)
            }
            Err(e) => {
                self.cache.clear()?;
                Err(e)
            }
        }
    }

    /// Like `get_entities`, but reuses the cached list when it was built from
    /// the same source.
    pub fn get_entities_cached(&self, source: &ConfigSource) -> Result<Vec<Entity>> {
        if let Some(entities) = self.cache.get(source)? {
            debug!("Using cached entity list for {}", source);
            return Ok(entities);
        }
        self.get_entities(source)
    }

    /// The list produced by the most recent successful `get_entities` call.
    pub fn cached_entities(&self) -> Result<Option<Vec<Entity>>> {
        Ok(self.cache.snapshot()?.map(|cached| cached.entities))
    }

    fn entities_from_repository(&self, name: &str) -> Result<Vec<Entity>> {
        let repository = match self.remote.find_repository(name)? {
            Some(repository) => repository,
            None => {
                debug!("Configuration repository {} not found", name);
                return Ok(Vec::new());
            }
        };

        if !self.remote.file_exists(&repository, CONFIG_PATH)? {
            debug!("{} has no {}", name, CONFIG_PATH);
            return Ok(Vec::new());
        }

        match self.remote.get_file_content(&repository, CONFIG_PATH, None)? {
            Some(content) => self.extract_entities(&content),
            None => {
                debug!("{} disappeared from {} before it was read", CONFIG_PATH, name);
                Ok(Vec::new())
            }
        }
    }

    fn entities_from_file(&self, path: &Path) -> Result<Vec<Entity>> {
        let config = config::from_file(path)?;
        self.collect_entities(&config)
    }

    fn extract_entities(&self, content: &[u8]) -> Result<Vec<Entity>> {
        let config = Configuration::from_bytes(content)?;
        self.collect_entities(&config)
    }

    /// Collects the entities of every remote with an identifier, in
    /// configuration order.
    fn collect_entities(&self, config: &Configuration) -> Result<Vec<Entity>> {
        let mut entities = Vec::new();
        for remote in config.active_remotes() {
            self.collect_remote_entities(remote, &mut entities)?;
        }
        Ok(entities)
    }

    fn collect_remote_entities(&self, remote: &Remote, entities: &mut Vec<Entity>) -> Result<()> {
        let repository = match self.remote.find_repository(&remote.identifier) {
            Ok(Some(repository)) => repository,
            Ok(None) => {
                debug!(
                    "Skipping {} remote {}: repository not found",
                    remote.role, remote.identifier
                );
                return Ok(());
            }
            Err(e @ Error::InvalidRepository { .. }) => {
                warn!("Skipping {} remote: {}", remote.role, e);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        for spec_path in self.remote.search_files(&repository, SPEC_EXTENSION)? {
            match self.remote.get_file_content(&repository, &spec_path, None)? {
                Some(content) => {
                    entities.push(Entity::from_content(repository.clone(), &spec_path, &content)?);
                }
                None => debug!("{} vanished from {}", spec_path, repository),
            }
        }
        Ok(())
    }

    /// Lists the versions of `entity_name` recorded as tags in
    /// `metadata_repo_name`, in tag enumeration order.
    pub fn get_entity_versions(
        &self,
        entity_name: &str,
        metadata_repo_name: &str,
    ) -> Result<Vec<SpecVersion>> {
        let repository = self
            .remote
            .find_repository(metadata_repo_name)?
            .ok_or_else(|| Error::RepositoryNotFound {
                name: metadata_repo_name.to_string(),
            })?;
        let spec_path = self.entity_spec_path(&repository, entity_name)?;

        let mut versions = Vec::new();
        for tag in self.remote.list_tags(&repository)? {
            let belongs = parse_tag(&tag).is_some_and(|parsed| parsed.belongs_to(entity_name));
            if !belongs {
                continue;
            }

            let content = match self.remote.get_file_content(&repository, &spec_path, Some(&tag))? {
                Some(content) if !content.is_empty() => content,
                _ => {
                    debug!("Tag {} has no content at {}, skipping", tag, spec_path);
                    continue;
                }
            };

            versions.push(SpecVersion::from_content(&tag, &spec_path, &content)?);
        }
        Ok(versions)
    }

    /// Finds the spec file named `<entity_name>.spec` in `repository`.
    fn entity_spec_path(&self, repository: &RepositoryHandle, entity_name: &str) -> Result<String> {
        let file_name = format!("{}{}", entity_name, SPEC_EXTENSION);
        self.remote
            .search_files(repository, SPEC_EXTENSION)?
            .into_iter()
            .find(|path| file_name_matches(path, &file_name))
            .ok_or_else(|| Error::EntityNotFound {
                entity: entity_name.to_string(),
                repository: repository.name().to_string(),
            })
    }
}
