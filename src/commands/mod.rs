//! # CLI Command Implementations
//!
//! Each subcommand of `entity-catalog` lives in its own file with an `Args`
//! struct derived through `clap` and an `execute` function that calls into
//! the `entity_catalog` library.
//!
//! Arguments shared by the commands that talk to remotes are collected in
//! `RemoteArgs` and flattened into each command.

pub mod completions;
pub mod entities;
pub mod tag;
pub mod versions;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use entity_catalog::cache::EntityCache;
use entity_catalog::defaults::{default_cache_root, DEFAULT_BASE_URL};
use entity_catalog::repository::GitRemote;
use entity_catalog::resolver::EntityResolver;

/// Options for reaching the git remotes
#[derive(Args, Debug, Clone)]
pub struct RemoteArgs {
    /// The root directory for mirrored repositories.
    ///
    /// Defaults to the system cache directory (`~/.cache/entity-catalog` on
    /// Linux, `~/Library/Caches/entity-catalog` on macOS).
    #[arg(long, value_name = "DIR", env = "ENTITY_CATALOG_CACHE")]
    pub cache_root: Option<PathBuf>,

    /// Base URL used to expand short `org/repo` names.
    #[arg(
        long,
        value_name = "URL",
        env = "ENTITY_CATALOG_BASE_URL",
        default_value = DEFAULT_BASE_URL
    )]
    pub base_url: String,
}

impl RemoteArgs {
    /// Build a resolver backed by git mirrors under the cache root.
    pub fn build_resolver(&self) -> EntityResolver {
        let cache_root = self.cache_root.clone().unwrap_or_else(default_cache_root);
        let remote = GitRemote::new(cache_root).with_base_url(self.base_url.clone());
        EntityResolver::with_cache(Box::new(remote), EntityCache::new())
    }
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human readable table
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}
