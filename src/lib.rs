//! # Entity Catalog Library
//!
//! This library discovers ml-git style entities (datasets, labels and
//! models) spread across a federation of git repositories, and resolves the
//! version history of each one from the repository's tags. It backs the
//! `entity-catalog` command-line tool but is usable on its own.
//!
//! ## Quick Example
//!
//! ```
//! use entity_catalog::memory::{MemoryRemote, MemoryRepository};
//! use entity_catalog::resolver::{ConfigSource, EntityResolver};
//!
//! let remote = MemoryRemote::new()
//!     .with_repository(
//!         "org/config",
//!         MemoryRepository::new().with_file(".ml-git/config.yaml", "remotes:\n  model: org/models\n"),
//!     )
//!     .with_repository(
//!         "org/models",
//!         MemoryRepository::new()
//!             .with_file("models/x.spec", "name: x\n")
//!             .tagged("vision__models__x__1"),
//!     );
//!
//! let resolver = EntityResolver::new(Box::new(remote));
//! let entities = resolver
//!     .get_entities(&ConfigSource::repository("org/config"))
//!     .unwrap();
//! assert_eq!(entities[0].name(), Some("x"));
//!
//! let versions = resolver.get_entity_versions("x", "org/models").unwrap();
//! assert_eq!(versions[0].tag(), "vision__models__x__1");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The root metadata file naming the
//!   repositories to search, keyed by role.
//! - **Specs (`spec`, `entity`)**: YAML documents in `.spec` files that
//!   describe one entity. They are kept as open mappings with a few typed
//!   accessors.
//! - **Tags (`tag`)**: The `__`-separated naming convention that ties a git
//!   tag to one version of one entity.
//! - **Remote Access (`repository`, `git`, `memory`)**: The
//!   `RemoteOperations` port and its two implementations, one backed by the
//!   git command line and one held entirely in memory.
//! - **Resolution (`resolver`, `cache`)**: The orchestrator that walks the
//!   federation, plus the memo of its last listing.

pub mod cache;
pub mod config;
pub mod defaults;
pub mod entity;
pub mod error;
pub mod filesystem;
pub mod git;
pub mod memory;
pub mod path;
pub mod repository;
pub mod resolver;
pub mod spec;
pub mod suggestions;
pub mod tag;

#[cfg(test)]
mod tag_proptest;

pub use entity::{Entity, SpecVersion};
pub use error::{Error, Result};
pub use repository::{RemoteOperations, RepositoryHandle};
pub use resolver::{ConfigSource, EntityResolver};
