//! # Remote-Set Configuration
//!
//! This module defines the `Configuration` record: the root metadata file
//! that tells the resolver which repositories to search for entity
//! specifications. It is read either from a local file or from
//! `.ml-git/config.yaml` inside a hosting repository.
//!
//! ## Accepted Layouts
//!
//! An explicit `remotes:` mapping of role to repository identifier:
//!
//! ```yaml
//! remotes:
//!   dataset: org/datasets-metadata
//!   model: org/models-metadata
//! ```
//!
//! and the per-entity-type sections written by ml-git itself:
//!
//! ```yaml
//! datasets:
//!   git: https://github.com/org/datasets-metadata.git
//! models:
//!   git: ''
//! ```
//!
//! Both may appear in one file. Entries from `remotes:` come first, then the
//! `datasets`, `labels` and `models` sections in that order. Entries with an
//! empty identifier are kept (so callers can report them) but are never
//! resolved.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::spec::{value_kind, EntityType};

/// One role → repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remote {
    /// What the remote holds (e.g. `dataset`, or a config section name)
    pub role: String,
    /// Repository identifier handed to the remote port; may be empty
    pub identifier: String,
}

impl Remote {
    pub fn new(role: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            identifier: identifier.into(),
        }
    }

    /// True when there is nothing to resolve.
    pub fn is_empty(&self) -> bool {
        self.identifier.trim().is_empty()
    }
}

/// The parsed set of remotes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Configuration {
    remotes: Vec<Remote>,
}

impl Configuration {
    /// Parse raw configuration bytes.
    pub fn from_bytes(content: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(content).map_err(|e| Error::ConfigParse {
            message: format!("Invalid UTF-8 in configuration: {}", e),
            hint: None,
        })?;
        Self::from_yaml(text)
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: None,
        })?;
        Self::from_value(value)
    }

    /// Build a configuration from an already deserialized document.
    pub fn from_value(value: Value) -> Result<Self> {
        let map = match value {
            Value::Mapping(map) => map,
            other => {
                return Err(Error::ConfigParse {
                    message: format!(
                        "Expected a mapping at the top level of the configuration, found {}",
                        value_kind(&other)
                    ),
                    hint: Some("Start the file with 'remotes:'".to_string()),
                });
            }
        };

        let mut remotes = parse_remotes_section(&map)?;

        for entity_type in EntityType::ALL {
            let key = entity_type.config_key();
            if let Some(section) = map.get(key) {
                let identifier = match section {
                    Value::Mapping(section) => section.get("git").and_then(Value::as_str),
                    _ => None,
                };
                remotes.push(Remote::new(key, identifier.unwrap_or_default()));
            }
        }

        Ok(Self { remotes })
    }

    /// All declared remotes, including empty ones.
    pub fn remotes(&self) -> &[Remote] {
        &self.remotes
    }

    /// Remotes that carry a repository identifier.
    pub fn active_remotes(&self) -> impl Iterator<Item = &Remote> {
        self.remotes.iter().filter(|remote| !remote.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}

fn parse_remotes_section(map: &Mapping) -> Result<Vec<Remote>> {
    let entries = match map.get("remotes") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Mapping(entries)) => entries,
        Some(other) => {
            return Err(Error::ConfigParse {
                message: format!("'remotes' must be a mapping, found {}", value_kind(other)),
                hint: Some("Use 'remotes: { dataset: org/repo }'".to_string()),
            });
        }
    };

    entries
        .iter()
        .map(|(role, identifier)| {
            let role = role.as_str().ok_or_else(|| Error::ConfigParse {
                message: format!("Remote names must be strings, found {}", value_kind(role)),
                hint: None,
            })?;
            Ok(Remote::new(role, identifier.as_str().unwrap_or_default()))
        })
        .collect()
}

/// Parse a configuration from a local file path
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Configuration> {
    let content = std::fs::read(path).map_err(Error::Io)?;
    Configuration::from_bytes(&content)
}
