//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::EMPTY_REMOTES);
//!     fixture.command().arg("entities").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::GitFixture;
    pub use super::TestFixture;
}

/// Configuration snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// A configuration declaring no remotes at all.
    pub const EMPTY_REMOTES: &str = "remotes: {}\n";

    /// A configuration whose remotes all have empty identifiers.
    pub const BLANK_REMOTES: &str = "remotes:\n  dataset: ''\n  model:\n";

    /// The per-type section layout with nothing configured.
    pub const BLANK_SECTIONS: &str = "datasets:\n  git: ''\nmodels:\n  git: ''\n";

    /// A YAML document that is not a mapping.
    pub const NOT_A_MAPPING: &str = "- dataset\n- model\n";

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "remotes: [unclosed";
}

/// A temporary directory with an optional `config.yaml`.
#[allow(dead_code)]
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `config.yaml` with the given content.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("config.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Get the path to the temporary directory.
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    /// Path used as the mirror cache root, kept inside the fixture.
    #[allow(dead_code)]
    pub fn cache_root(&self) -> PathBuf {
        self.temp_dir.path().join("cache")
    }

    /// Create a command running in this fixture's directory, with its mirror
    /// cache isolated from the user's.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("entity-catalog");
        cmd.current_dir(self.path())
            .env("ENTITY_CATALOG_CACHE", self.cache_root())
            .env_remove("ENTITY_CATALOG_BASE_URL")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Local git repositories built with the git command line.
///
/// Each repository lives under `<root>/<name>` so that `--base-url <root>`
/// expands short names onto it.
#[allow(dead_code)]
pub struct GitFixture {
    root: assert_fs::TempDir,
}

#[allow(dead_code)]
impl GitFixture {
    pub fn new() -> Self {
        Self {
            root: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Base URL under which `<name>.git` resolves to a fixture repository.
    pub fn base_url(&self) -> String {
        format!("file://{}", self.root().display())
    }

    /// Initialize an empty repository named `name`.
    pub fn init(&self, name: &str) -> PathBuf {
        let path = self.root().join(format!("{}.git", name));
        std::fs::create_dir_all(&path).expect("Failed to create repository directory");
        git(&path, &["init", "--quiet"]);
        git(&path, &["config", "user.email", "test@example.com"]);
        git(&path, &["config", "user.name", "Test"]);
        git(&path, &["config", "commit.gpgsign", "false"]);
        path
    }

    /// Write `files` into the repository and commit them.
    pub fn commit(&self, repo: &Path, files: &[(&str, &str)], message: &str) {
        for (path, content) in files {
            let target = repo.join(path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create directory");
            }
            std::fs::write(&target, content).expect("Failed to write file");
            git(repo, &["add", path]);
        }
        git(repo, &["commit", "--quiet", "-m", message]);
    }

    /// Tag the current commit.
    pub fn tag(&self, repo: &Path, tag: &str) {
        git(repo, &["tag", tag]);
    }
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(dir)
        .args(args)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed in {}", args, dir.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_config() {
        let fixture = TestFixture::new().with_config(configs::EMPTY_REMOTES);
        assert!(fixture.config_path().exists());
    }

    #[test]
    fn test_configs_are_valid_yaml() {
        for config in [
            configs::EMPTY_REMOTES,
            configs::BLANK_REMOTES,
            configs::BLANK_SECTIONS,
            configs::NOT_A_MAPPING,
        ] {
            serde_yaml::from_str::<serde_yaml::Value>(config).expect("Config should be valid YAML");
        }
    }

    #[test]
    fn test_invalid_yaml_is_actually_invalid() {
        let result = serde_yaml::from_str::<serde_yaml::Value>(configs::INVALID_YAML);
        assert!(result.is_err(), "INVALID_YAML should not parse");
    }
}
