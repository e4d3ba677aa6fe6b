//! Theme state management
//!
//! The aggregate root of the editing engine: the color dictionary, the
//! group dictionary, the per-color selection markers, and the raw source
//! text they were parsed from. All mutation goes through the single pure
//! reducer `reduce`: `(state, action) -> new state`, never in place.
//!
//! Cross-references between parts (a selection marker pointing at a
//! color, a group holding members) are plain id lookups into the owning
//! dictionary, keeping ownership single-rooted at `ThemeState` and
//! making snapshot/restore straightforward.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::{parse_color, ColorValue};
use crate::group::{normalize_group_name, Group};

/// Tri-state membership marker driving the group-assignment UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStatus {
    #[default]
    Default,
    Selected,
    Grouped,
}

/// One marker per color; list order defines the display order of
/// ungrouped colors before name-sort is applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableItem {
    pub color_id: String,
    #[serde(default)]
    pub status: SelectionStatus,
}

/// The full in-memory theme
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeState {
    /// Raw source text the state was parsed from
    #[serde(default)]
    pub group_names_text: String,
    #[serde(default)]
    pub colors_text: String,

    /// Color dictionary, keyed by canonical id, in first-seen parse order
    #[serde(default)]
    pub colors: IndexMap<String, ColorValue>,

    /// Group dictionary, keyed by normalized name, in first-seen parse order
    #[serde(default)]
    pub groups: IndexMap<String, Group>,

    /// One entry per color, in color-dictionary order
    #[serde(default)]
    pub items: Vec<SelectableItem>,
}

/// An edit applied to the theme through the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeAction {
    /// default -> selected, selected -> default; grouped items are not
    /// selectable and stay unchanged
    ToggleSelection { color_id: String },

    /// Move every currently-selected color into the named group.
    /// No-op when nothing is selected or the group does not exist.
    AssignSelectedToGroup { group_name: String },

    /// Remove a color from a group and return its marker to default.
    /// No-op when the color was not a member of that group.
    RemoveFromGroup {
        color_id: String,
        group_name: String,
    },

    /// Set a color's display name. No-op for unknown ids or names that
    /// are empty after trimming.
    RenameColor { color_id: String, name: String },
}

/// Split a free-text block into trimmed lines, dropping duplicates
/// while preserving first-seen order
fn dedup_lines(text: &str) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if !seen.contains(&line) {
            seen.push(line);
        }
    }
    seen
}

/// Parse raw source text into a fresh theme.
///
/// Total: empty or whitespace-only inputs yield an empty state, never an
/// error. Color lines that fail to parse are dropped (logged, not
/// surfaced); group lines that normalize to nothing are dropped.
pub fn parse_theme(group_names_text: &str, colors_text: &str) -> ThemeState {
    let mut colors: IndexMap<String, ColorValue> = IndexMap::new();
    let mut dropped = 0usize;
    for line in dedup_lines(colors_text) {
        if line.is_empty() {
            continue;
        }
        match parse_color(line) {
            Ok(color) => {
                // Canonicalization collapses duplicates; last parse wins,
                // which only matters for true duplicates of the same value
                colors.insert(color.id.clone(), color);
            }
            Err(failure) => {
                tracing::debug!("Dropping unparseable color line: {:?}", failure.raw);
                dropped += 1;
            }
        }
    }
    if dropped > 0 {
        tracing::warn!("Dropped {} unparseable color line(s)", dropped);
    }

    let mut groups: IndexMap<String, Group> = IndexMap::new();
    for line in dedup_lines(group_names_text) {
        if let Some(name) = normalize_group_name(line) {
            groups
                .entry(name.clone())
                .or_insert_with(|| Group::new(&name));
        }
    }

    let items = colors
        .keys()
        .map(|id| SelectableItem {
            color_id: id.clone(),
            status: SelectionStatus::Default,
        })
        .collect();

    ThemeState {
        group_names_text: group_names_text.to_string(),
        colors_text: colors_text.to_string(),
        colors,
        groups,
        items,
    }
}

/// Re-parse new source text into an existing theme.
///
/// Colors surviving the re-parse keep their old entry (renames are
/// preserved); surviving groups keep the intersection of their old
/// membership with the new color set. Colors removed from the source
/// drop out of every group silently. Idempotent for unchanged inputs.
pub fn merge_theme(state: &ThemeState, group_names_text: &str, colors_text: &str) -> ThemeState {
    let fresh = parse_theme(group_names_text, colors_text);

    let colors: IndexMap<String, ColorValue> = fresh
        .colors
        .into_iter()
        .map(|(id, parsed)| match state.colors.get(&id) {
            Some(existing) => (id, existing.clone()),
            None => (id, parsed),
        })
        .collect();

    let groups: IndexMap<String, Group> = fresh
        .groups
        .into_iter()
        .map(|(name, empty)| match state.groups.get(&name) {
            Some(existing) => {
                let mut merged = Group::new(&name);
                merged.members = existing
                    .members
                    .iter()
                    .filter(|id| colors.contains_key(*id))
                    .cloned()
                    .collect();
                (name, merged)
            }
            None => (name, empty),
        })
        .collect();

    let items = colors
        .keys()
        .map(|id| SelectableItem {
            color_id: id.clone(),
            status: if groups.values().any(|g| g.contains(id)) {
                SelectionStatus::Grouped
            } else {
                SelectionStatus::Default
            },
        })
        .collect();

    ThemeState {
        group_names_text: group_names_text.to_string(),
        colors_text: colors_text.to_string(),
        colors,
        groups,
        items,
    }
}

/// Apply one action to the theme, returning the new state.
///
/// Actions referencing unknown identifiers return the state unchanged.
pub fn reduce(state: &ThemeState, action: ThemeAction) -> ThemeState {
    let mut next = state.clone();
    match action {
        ThemeAction::ToggleSelection { color_id } => {
            if let Some(item) = next.items.iter_mut().find(|i| i.color_id == color_id) {
                item.status = match item.status {
                    SelectionStatus::Default => SelectionStatus::Selected,
                    SelectionStatus::Selected => SelectionStatus::Default,
                    SelectionStatus::Grouped => SelectionStatus::Grouped,
                };
            }
        }

        ThemeAction::AssignSelectedToGroup { group_name } => {
            if !next.groups.contains_key(&group_name) {
                tracing::debug!("Assign to unknown group {:?} ignored", group_name);
                return next;
            }
            let selected: Vec<String> = next
                .items
                .iter()
                .filter(|i| i.status == SelectionStatus::Selected)
                .map(|i| i.color_id.clone())
                .collect();
            for color_id in &selected {
                // A color belongs to at most one group: pull it out of any
                // prior group before adding it to the target
                for group in next.groups.values_mut() {
                    group.remove(color_id);
                }
                if let Some(group) = next.groups.get_mut(&group_name) {
                    group.add(color_id);
                }
            }
            for item in next.items.iter_mut() {
                if selected.contains(&item.color_id) {
                    item.status = SelectionStatus::Grouped;
                }
            }
        }

        ThemeAction::RemoveFromGroup {
            color_id,
            group_name,
        } => {
            let removed = next
                .groups
                .get_mut(&group_name)
                .map(|g| g.remove(&color_id))
                .unwrap_or(false);
            if removed {
                if let Some(item) = next.items.iter_mut().find(|i| i.color_id == color_id) {
                    item.status = SelectionStatus::Default;
                }
            }
        }

        ThemeAction::RenameColor { color_id, name } => {
            let name = name.trim();
            if !name.is_empty() {
                if let Some(color) = next.colors.get_mut(&color_id) {
                    color.name = Some(name.to_string());
                }
            }
        }
    }

    debug_assert!(grouped_invariant_holds(&next));
    next
}

impl ThemeState {
    /// Color ids of ungrouped entries, in item order
    pub fn ungrouped_ids(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|i| i.status != SelectionStatus::Grouped)
            .map(|i| i.color_id.as_str())
            .collect()
    }

    /// Count of items currently selected
    pub fn selected_count(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.status == SelectionStatus::Selected)
            .count()
    }

    /// Resolve a user-typed token to a color id in this theme: an exact
    /// id, any parseable form of one ("fff", "#FFF"), or a display name
    pub fn resolve_color_id(&self, token: &str) -> Option<String> {
        if self.colors.contains_key(token) {
            return Some(token.to_string());
        }
        if let Ok(color) = parse_color(token) {
            if self.colors.contains_key(&color.id) {
                return Some(color.id);
            }
        }
        self.colors
            .values()
            .find(|c| c.display_name() == token)
            .map(|c| c.id.clone())
    }
}

/// True when the set of grouped-status color ids exactly equals the
/// union of all group memberships
pub fn grouped_invariant_holds(state: &ThemeState) -> bool {
    let grouped_items: std::collections::BTreeSet<&str> = state
        .items
        .iter()
        .filter(|i| i.status == SelectionStatus::Grouped)
        .map(|i| i.color_id.as_str())
        .collect();
    let group_members: std::collections::BTreeSet<&str> = state
        .groups
        .values()
        .flat_map(|g| g.members.iter().map(String::as_str))
        .collect();
    grouped_items == group_members
}
