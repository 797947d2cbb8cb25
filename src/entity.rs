//! Entity and version records produced by the resolver.

use serde::Serialize;

use crate::defaults::SPEC_EXTENSION;
use crate::error::{Error, Result};
use crate::path::has_suffix;
use crate::repository::RepositoryHandle;
use crate::spec::{EntityType, SpecBody};

/// One specification file discovered in a metadata repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    repository: RepositoryHandle,
    path: String,
    spec: SpecBody,
}

impl Entity {
    /// Binds a parsed spec to the repository and path it was read from.
    ///
    /// Fails unless `path` names a specification file.
    pub fn new(repository: RepositoryHandle, path: impl Into<String>, spec: SpecBody) -> Result<Self> {
        let path = path.into();
        if !has_suffix(&path, SPEC_EXTENSION) {
            return Err(Error::SpecParse {
                path,
                message: format!("Not a specification file (expected a '{}' suffix)", SPEC_EXTENSION),
            });
        }
        Ok(Self {
            repository,
            path,
            spec,
        })
    }

    /// Parses raw spec content read from `path` in `repository`.
    pub fn from_content(repository: RepositoryHandle, path: &str, content: &[u8]) -> Result<Self> {
        let origin = format!("{}:{}", repository.name(), path);
        let spec = SpecBody::from_bytes(&origin, content)?;
        Self::new(repository, path, spec)
    }

    pub fn repository(&self) -> &RepositoryHandle {
        &self.repository
    }

    /// Repository-relative path of the spec file.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn spec(&self) -> &SpecBody {
        &self.spec
    }

    pub fn name(&self) -> Option<&str> {
        self.spec.name()
    }

    pub fn entity_type(&self) -> Option<EntityType> {
        self.spec.entity_type()
    }
}

/// A spec body as it existed at one tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecVersion {
    tag: String,
    spec: SpecBody,
}

impl SpecVersion {
    pub fn new(tag: impl Into<String>, spec: SpecBody) -> Self {
        Self {
            tag: tag.into(),
            spec,
        }
    }

    /// Parses raw spec content read at `tag`.
    pub fn from_content(tag: &str, path: &str, content: &[u8]) -> Result<Self> {
        let origin = format!("{}@{}", path, tag);
        Ok(Self::new(tag, SpecBody::from_bytes(&origin, content)?))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn spec(&self) -> &SpecBody {
        &self.spec
    }

    pub fn version(&self) -> Option<u64> {
        self.spec.version()
    }
}
