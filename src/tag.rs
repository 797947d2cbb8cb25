//! Version tag naming convention.
//!
//! Metadata repositories mark each published revision of an entity with a
//! tag whose name is a `__`-joined list of segments, for example
//! `computer-vision__images__imagenet__3`. The second-to-last segment is the
//! entity name and the last one is its sequence number; anything before that
//! is free-form category context.
//!
//! `parse_tag` is the only place that knows this layout.

use std::fmt;

use serde::Serialize;

use crate::defaults::TAG_SEPARATOR;

/// A tag name split into its meaningful parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VersionTag {
    /// Segments preceding the entity name
    pub categories: Vec<String>,
    /// The entity this tag versions
    pub entity: String,
    /// The trailing segment, usually a version number
    pub sequence: String,
}

impl VersionTag {
    pub fn new(categories: Vec<String>, entity: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            categories,
            entity: entity.into(),
            sequence: sequence.into(),
        }
    }

    /// True when this tag versions `entity_name`.
    pub fn belongs_to(&self, entity_name: &str) -> bool {
        self.entity == entity_name
    }

    /// The sequence segment as a number, when it is one.
    pub fn number(&self) -> Option<u64> {
        self.sequence.parse().ok()
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in &self.categories {
            write!(f, "{}{}", category, TAG_SEPARATOR)?;
        }
        write!(f, "{}{}{}", self.entity, TAG_SEPARATOR, self.sequence)
    }
}

/// Split a tag name into a `VersionTag`.
///
/// Returns `None` for tags with fewer than two segments, which cannot carry
/// an entity name.
pub fn parse_tag(tag: &str) -> Option<VersionTag> {
    let segments: Vec<&str> = tag.split(TAG_SEPARATOR).collect();
    if segments.len() < 2 {
        return None;
    }

    let (categories, tail) = segments.split_at(segments.len() - 2);
    Some(VersionTag {
        categories: categories.iter().map(|s| s.to_string()).collect(),
        entity: tail[0].to_string(),
        sequence: tail[1].to_string(),
    })
}
