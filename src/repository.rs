//! # Remote Repository Access
//!
//! This module defines the boundary between the entity resolver and the
//! platform that actually hosts metadata repositories.
//!
//! ## Design
//!
//! The resolver never talks to a hosting platform directly. Everything it
//! needs goes through the `RemoteOperations` trait, which offers five
//! capabilities: find a repository by name, test whether a path exists, list
//! files with a given suffix, read a file (optionally at a tag), and list
//! tags. Repositories are identified by an opaque `RepositoryHandle` that the
//! port hands out and later receives back.
//!
//! Two implementations ship with the crate:
//!
//! - **`GitRemote`**: drives the system `git` command against local mirror
//!   clones kept under a cache root. Authentication is whatever `git`
//!   itself is configured with.
//! - **`MemoryRemote`** (in `crate::memory`): an in-memory federation used
//!   by tests and examples.
//!
//! Timeouts and retries, if any, belong to the port. The resolver passes
//! port failures through untouched.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};
use serde::Serialize;
use url::Url;

use crate::defaults::DEFAULT_BASE_URL;
use crate::error::{Error, Result};
use crate::path::{encode_url_path, has_suffix};

/// Opaque reference to a repository, issued by a `RemoteOperations` port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryHandle {
    name: String,
    location: String,
}

impl RepositoryHandle {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    /// The identifier the repository was looked up by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the port actually reads the repository from.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for RepositoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Rejects identifiers that a command-line port would read as an option.
///
/// Identifiers come from configuration files, which may themselves live in
/// remote repositories, so they are untrusted input.
pub fn validate_identifier(name: &str) -> Result<()> {
    if crate::git::is_option_like(name) {
        return Err(Error::InvalidRepository {
            name: name.to_string(),
            reason: "identifiers must not start with '-'".to_string(),
        });
    }
    Ok(())
}

/// Capabilities the resolver needs from a hosting platform.
pub trait RemoteOperations: Send + Sync {
    /// Look a repository up by name or URL. `Ok(None)` means it does not exist.
    ///
    /// Identifiers that fail `validate_identifier` are an
    /// `Error::InvalidRepository`.
    fn find_repository(&self, name: &str) -> Result<Option<RepositoryHandle>>;

    /// Whether `path` exists on the repository's default branch.
    fn file_exists(&self, repo: &RepositoryHandle, path: &str) -> Result<bool>;

    /// Paths on the default branch whose file name ends with `suffix`.
    ///
    /// The returned order is whatever the platform enumerates.
    fn search_files(&self, repo: &RepositoryHandle, suffix: &str) -> Result<Vec<String>>;

    /// Content of `path`, at `git_ref` when given, else on the default branch.
    ///
    /// `Ok(None)` when the path does not exist at that ref.
    fn get_file_content(
        &self,
        repo: &RepositoryHandle,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<Option<Vec<u8>>>;

    /// Tag names, in platform-defined enumeration order.
    fn list_tags(&self, repo: &RepositoryHandle) -> Result<Vec<String>>;
}

/// `RemoteOperations` backed by the system `git` command.
///
/// Each repository is mirrored once under `cache_root` and refreshed at most
/// once per `GitRemote` instance; all reads are served from the mirror.
pub struct GitRemote {
    cache_root: PathBuf,
    base_url: String,
    refreshed: Mutex<HashSet<String>>,
}

impl GitRemote {
    /// Creates a `GitRemote` that keeps its mirrors under `cache_root`.
    pub fn new(cache_root: PathBuf) -> Self {
        Self {
            cache_root,
            base_url: DEFAULT_BASE_URL.to_string(),
            refreshed: Mutex::new(HashSet::new()),
        }
    }

    /// Overrides the base URL used to expand short `org/repo` names.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Turns a repository identifier into something `git` can fetch.
    ///
    /// Absolute URLs, scp-style `user@host:path` addresses and existing local
    /// directories are used as given; anything else is treated as a path
    /// under the base URL.
    pub fn resolve_url(&self, name: &str) -> Result<String> {
        validate_identifier(name)?;
        let name = name.trim();
        if Url::parse(name).is_ok() || is_scp_address(name) || Path::new(name).is_dir() {
            return Ok(name.to_string());
        }

        let base = Url::parse(&self.base_url)?;
        let repo = name.trim_matches('/').trim_end_matches(".git");
        Ok(format!(
            "{}/{}.git",
            base.as_str().trim_end_matches('/'),
            repo
        ))
    }

    /// Location of the mirror for `url` under the cache root.
    pub fn mirror_path(&self, url: &str) -> PathBuf {
        self.cache_root.join(encode_url_path(url))
    }

    /// Ensures a mirror exists for `repo`, refreshing it on first use.
    ///
    /// A failed refresh of an existing mirror falls back to the stale copy.
    fn mirror(&self, repo: &RepositoryHandle) -> Result<PathBuf> {
        let url = repo.location();
        let path = self.mirror_path(url);

        let mut refreshed = self.refreshed.lock().map_err(|_| Error::LockPoisoned {
            context: "git mirror refresh set".to_string(),
        })?;
        if refreshed.contains(url) {
            return Ok(path);
        }

        if path.is_dir() {
            if let Err(e) = crate::git::update_mirror(&path, url) {
                warn!("Refreshing mirror of {} failed, using cached copy: {}", url, e);
            }
        } else {
            debug!("Mirroring {} into {}", url, path.display());
            crate::git::clone_mirror(url, &path)?;
        }

        refreshed.insert(url.to_string());
        Ok(path)
    }
}

fn is_scp_address(name: &str) -> bool {
    if crate::git::is_option_like(name) {
        return false;
    }
    match (name.find('@'), name.find(':')) {
        (Some(at), Some(colon)) => at < colon && !name.contains("://"),
        _ => false,
    }
}

impl RemoteOperations for GitRemote {
    fn find_repository(&self, name: &str) -> Result<Option<RepositoryHandle>> {
        let url = self.resolve_url(name)?;
        if crate::git::remote_exists(&url)? {
            Ok(Some(RepositoryHandle::new(name, url)))
        } else {
            debug!("Repository {} ({}) does not exist", name, url);
            Ok(None)
        }
    }

    fn file_exists(&self, repo: &RepositoryHandle, path: &str) -> Result<bool> {
        let mirror = self.mirror(repo)?;
        crate::git::object_exists(&mirror, "HEAD", path)
    }

    fn search_files(&self, repo: &RepositoryHandle, suffix: &str) -> Result<Vec<String>> {
        let mirror = self.mirror(repo)?;
        let files = crate::git::list_files(&mirror, "HEAD")?;
        Ok(files
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
        let mirror = self.mirror(repo)?;
        crate::git::read_file(&mirror, git_ref.unwrap_or("HEAD"), path)
    }

    fn list_tags(&self, repo: &RepositoryHandle) -> Result<Vec<String>> {
        let mirror = self.mirror(repo)?;
        crate::git::list_tags(&mirror)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn remote() -> GitRemote {
        GitRemote::new(PathBuf::from("/tmp/entity-catalog-test-cache"))
    }

    #[test]
    fn test_repository_handle_accessors() {
        let handle = RepositoryHandle::new("org/repo", "https://github.com/org/repo.git");
        assert_eq!(handle.name(), "org/repo");
        assert_eq!(handle.location(), "https://github.com/org/repo.git");
        assert_eq!(handle.to_string(), "org/repo");
    }

    #[test]
    fn test_resolve_url_short_name() {
        assert_eq!(
            remote().resolve_url("org/repo").unwrap(),
            "https://github.com/org/repo.git"
        );
        assert_eq!(
            remote().resolve_url("/org/repo.git").unwrap(),
            "https://github.com/org/repo.git"
        );
    }

    #[test]
    fn test_resolve_url_custom_base() {
        let remote = remote().with_base_url("https://git.example.com/mirrors/");
        assert_eq!(
            remote.resolve_url("team/specs").unwrap(),
            "https://git.example.com/mirrors/team/specs.git"
        );
    }

    #[test]
    fn test_resolve_url_keeps_full_urls() {
        let url = "https://gitlab.com/org/repo.git";
        assert_eq!(remote().resolve_url(url).unwrap(), url);
        let scp = "git@github.com:org/repo.git";
        assert_eq!(remote().resolve_url(scp).unwrap(), scp);
    }

    #[test]
    fn test_resolve_url_keeps_local_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        assert_eq!(remote().resolve_url(&path).unwrap(), path);
    }

    #[test]
    fn test_resolve_url_invalid_base() {
        let remote = remote().with_base_url("not a url");
        assert!(matches!(
            remote.resolve_url("org/repo"),
            Err(Error::UrlParse(_))
        ));
    }

    #[test]
    fn test_mirror_path_is_under_cache_root() {
        let path = remote().mirror_path("https://github.com/org/repo.git");
        assert_eq!(
            path,
            PathBuf::from("/tmp/entity-catalog-test-cache")
                .join("https%3A%2F%2Fgithub.com%2Forg%2Frepo.git")
        );
    }

    #[test]
    fn test_mirror_paths_differ_when_dashes_and_slashes_swap() {
        let remote = remote();
        assert_ne!(
            remote.mirror_path("https://github.com/foo-bar/baz.git"),
            remote.mirror_path("https://github.com/foo/bar-baz.git")
        );
        assert_ne!(
            remote.mirror_path("file:///repos/team-x/specs.git"),
            remote.mirror_path("file:///repos/team/x-specs.git")
        );
    }

    #[test]
    fn test_is_scp_address() {
        assert!(is_scp_address("git@github.com:org/repo.git"));
        assert!(!is_scp_address("ssh://git@github.com/org/repo.git"));
        assert!(!is_scp_address("org/repo"));
        assert!(!is_scp_address("--upload-pack=touch /tmp/x; git-upload-pack@h:x"));
    }

    #[test]
    fn test_option_like_identifiers_are_rejected() {
        for name in [
            "--upload-pack=touch /tmp/x; git-upload-pack@h:x",
            "-oProxyCommand=sh",
            "  --config=core.sshCommand=sh",
        ] {
            assert!(
                matches!(remote().resolve_url(name), Err(Error::InvalidRepository { .. })),
                "{:?} should be rejected",
                name
            );
            assert!(matches!(
                remote().find_repository(name),
                Err(Error::InvalidRepository { .. })
            ));
        }
        assert!(validate_identifier("org/repo-with-dash").is_ok());
    }

    #[test]
    fn test_option_like_identifier_never_reaches_git() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("ran");
        let name = format!(
            "--upload-pack=touch {}; git-upload-pack@h:x",
            marker.display()
        );
        let remote = GitRemote::new(dir.path().join("cache"));

        assert!(remote.find_repository(&name).is_err());
        assert!(!marker.exists());
    }
}
