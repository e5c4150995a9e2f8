//! Annotation record data model.
//!
//! A record attaches a display name and free-form tags to one color.

use serde::{Deserialize, Serialize};

/// Name and tags a user assigned to a color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Display name
    pub name: String,
    /// Tags in the order entered; duplicates allowed
    #[serde(default)]
    pub tags: Vec<String>,
}

impl AnnotationRecord {
    pub fn new(name: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            name: name.into(),
            tags,
        }
    }

    /// Build a record from raw dialog input.
    ///
    /// Returns `None` when the name is empty, which cancels the annotation.
    pub fn from_input(name: &str, tags_text: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, parse_tags(tags_text)))
    }
}

/// Split comma-separated tag text into trimmed tags.
///
/// Order and duplicates are preserved. Empty or whitespace-only text yields
/// no tags.
pub fn parse_tags(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(|tag| tag.trim().to_string()).collect()
}
