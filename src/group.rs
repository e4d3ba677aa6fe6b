//! Group model and group-name normalization
//!
//! A group is a named bucket of color identities. Membership stores color
//! ids only; display order is always re-derived by name-sort at render
//! time, never from insertion order.

use serde::{Deserialize, Serialize};

/// A named bucket of color ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,

    /// Member color ids (into the theme's color dictionary)
    #[serde(default)]
    pub members: Vec<String>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    pub fn contains(&self, color_id: &str) -> bool {
        self.members.iter().any(|id| id == color_id)
    }

    /// Add a member id, ignoring duplicates
    pub fn add(&mut self, color_id: &str) {
        if !self.contains(color_id) {
            self.members.push(color_id.to_string());
        }
    }

    /// Remove a member id. Returns true if it was present.
    pub fn remove(&mut self, color_id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|id| id != color_id);
        self.members.len() != before
    }
}

/// Normalize a raw group-name line: trim, collapse internal whitespace
/// runs to a single hyphen. Returns None for empty results.
pub fn normalize_group_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.split_whitespace().collect::<Vec<_>>().join("-"))
}
