//! # Error Suggestions
//!
//! Helpers that turn resolver failures into CLI errors which say what went
//! wrong and how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use entity_catalog::suggestions;
//!
//! if !path.exists() {
//!     return Err(suggestions::config_not_found(path));
//! }
//! ```

use std::path::Path;

/// Generate an error for a configuration file that does not exist.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Pass the path of an ml-git config.yaml with --config\n\
         hint: Use --repo <NAME> to read .ml-git/config.yaml from a repository",
        path = path.display()
    )
}

/// Generate an error for a metadata repository the remote does not know.
///
/// Includes hints about naming and the base URL used to expand short names.
pub fn repository_not_found(name: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Repository not found: {name}\n\n\
         hint: Short names like 'org/repo' are expanded against --base-url\n\
         hint: Pass a full URL or a local path to skip the expansion\n\
         hint: Check that your git credentials can read the repository"
    )
}

/// Generate an error for an entity without a spec file in its repository.
pub fn entity_not_found(entity: &str, repository: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Entity '{entity}' not found in {repository}\n\n\
         hint: The repository must contain a file named {entity}.spec\n\
         hint: Run 'entity-catalog entities --repo <CONFIG_REPO>' to list known entities"
    )
}

/// Map the resolver's lookup failures onto suggestion errors, passing
/// everything else through untouched.
pub fn from_error(error: crate::error::Error) -> anyhow::Error {
    use crate::error::Error;

    match error {
        Error::RepositoryNotFound { name } => repository_not_found(&name),
        Error::EntityNotFound { entity, repository } => entity_not_found(&entity, &repository),
        other => other.into(),
    }
}
