//! Default values and fixed names used by entity-catalog.
//!
//! This module centralizes the well-known paths and naming conventions the
//! resolver depends on, so they are defined in exactly one place.

use std::path::PathBuf;

/// Repository-relative path of the configuration file naming the remotes.
pub const CONFIG_PATH: &str = ".ml-git/config.yaml";

/// Suffix identifying entity specification files.
pub const SPEC_EXTENSION: &str = ".spec";

/// Separator between the segments of a version tag name.
pub const TAG_SEPARATOR: &str = "__";

/// Hosting base URL used to expand short `org/repo` identifiers.
pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// Returns the default cache root directory for repository mirrors.
///
/// Uses the platform-appropriate cache directory:
/// - Linux: `~/.cache/entity-catalog` (XDG Base Directory)
/// - macOS: `~/Library/Caches/entity-catalog`
/// - Windows: `{FOLDERID_LocalAppData}\entity-catalog`
///
/// Falls back to `.entity-catalog-cache` in the current directory if the
/// platform cache directory cannot be determined.
///
/// This can be overridden by the `--cache-root` CLI flag or the
/// `ENTITY_CATALOG_CACHE` environment variable.
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".entity-catalog-cache"))
        .join("entity-catalog")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cache_root_returns_path() {
        let cache_root = default_cache_root();
        assert!(cache_root.ends_with("entity-catalog"));
    }

    #[test]
    fn test_default_cache_root_is_absolute_or_fallback() {
        let cache_root = default_cache_root();
        assert!(
            cache_root.is_absolute() || cache_root.starts_with(".entity-catalog-cache"),
            "Expected absolute path or fallback, got: {:?}",
            cache_root
        );
    }

    #[test]
    fn test_config_path_is_relative() {
        assert!(!CONFIG_PATH.starts_with('/'));
        assert!(CONFIG_PATH.ends_with("config.yaml"));
    }
}
