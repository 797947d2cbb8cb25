//! # Specification Bodies
//!
//! A specification file describes one entity: its name, what kind of entity
//! it is, and any number of free-form fields (manifest, storage, mutability,
//! ...). This module keeps the parsed YAML mapping verbatim inside a
//! `SpecBody` and exposes the handful of fields the catalog relies on
//! through typed accessors.
//!
//! Two layouts are recognized:
//!
//! ```yaml
//! # flat
//! name: imagenet
//! type: dataset
//! version: 3
//! ```
//!
//! ```yaml
//! # sectioned, keyed by entity type
//! dataset:
//!   name: imagenet
//!   categories: [computer-vision, images]
//!   version: 3
//! ```
//!
//! Top-level fields win over section fields when both are present.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

/// The kinds of entity a catalog can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Dataset,
    Labels,
    Model,
}

impl EntityType {
    /// Every entity type, in the order configuration sections are read.
    pub const ALL: [EntityType; 3] = [EntityType::Dataset, EntityType::Labels, EntityType::Model];

    /// Section key used inside specification files.
    pub fn spec_key(self) -> &'static str {
        match self {
            EntityType::Dataset => "dataset",
            EntityType::Labels => "labels",
            EntityType::Model => "model",
        }
    }

    /// Section key used inside configuration files.
    pub fn config_key(self) -> &'static str {
        match self {
            EntityType::Dataset => "datasets",
            EntityType::Labels => "labels",
            EntityType::Model => "models",
        }
    }

    /// Parse either the singular or plural spelling, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.spec_key() == value || t.config_key() == value)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec_key())
    }
}

/// Human-readable name of a YAML node kind, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// The parsed body of one specification file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpecBody {
    fields: Mapping,
}

impl SpecBody {
    /// Parse raw file content. `origin` names the file in error messages.
    pub fn from_bytes(origin: &str, content: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(content).map_err(|e| Error::SpecParse {
            path: origin.to_string(),
            message: format!("Invalid UTF-8: {}", e),
        })?;
        Self::from_yaml(origin, text)
    }

    /// Parse a YAML document.
    pub fn from_yaml(origin: &str, content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| Error::SpecParse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        Self::from_value(origin, value)
    }

    /// Wrap an already deserialized document.
    ///
    /// Anything other than a mapping at the top level is rejected.
    pub fn from_value(origin: &str, value: Value) -> Result<Self> {
        match value {
            Value::Mapping(fields) => Ok(Self { fields }),
            other => Err(Error::SpecParse {
                path: origin.to_string(),
                message: format!("Expected a mapping at the top level, found {}", value_kind(&other)),
            }),
        }
    }

    /// The entity name.
    pub fn name(&self) -> Option<&str> {
        self.lookup("name").and_then(Value::as_str)
    }

    /// The entity type, from the section key or a `type`/`category` field.
    pub fn entity_type(&self) -> Option<EntityType> {
        if let Some((entity_type, _)) = self.section() {
            return Some(entity_type);
        }
        ["type", "category"]
            .iter()
            .filter_map(|key| self.fields.get(*key).and_then(Value::as_str))
            .find_map(EntityType::parse)
    }

    /// The integer `version` field, if any.
    pub fn version(&self) -> Option<u64> {
        self.lookup("version").and_then(Value::as_u64)
    }

    /// Category labels. A single string counts as one category.
    pub fn categories(&self) -> Vec<&str> {
        match self.lookup("categories") {
            Some(Value::Sequence(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(single)) => vec![single.as_str()],
            _ => Vec::new(),
        }
    }

    /// Raw access to a top-level field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.fields
    }

    /// The first entity-type section holding a mapping.
    fn section(&self) -> Option<(EntityType, &Mapping)> {
        EntityType::ALL.into_iter().find_map(|entity_type| {
            match self.fields.get(entity_type.spec_key()) {
                Some(Value::Mapping(section)) => Some((entity_type, section)),
                _ => None,
            }
        })
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        self.fields
            .get(key)
            .or_else(|| self.section().and_then(|(_, section)| section.get(key)))
    }
}
