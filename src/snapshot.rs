//! Session persistence
//!
//! Saves and restores the whole theme state as a plain JSON record so an
//! editing session can continue across invocations. Restore is tolerant:
//! a missing file starts fresh, and malformed or partially-shaped data
//! falls back to the empty-state equivalents instead of crashing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::ThemeState;

/// One persisted editing session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Timestamp of when the session was saved
    #[serde(default)]
    pub saved_at: Option<String>,

    #[serde(default)]
    pub theme: ThemeState,
}

impl Session {
    pub fn new(theme: ThemeState) -> Self {
        Self {
            saved_at: None,
            theme,
        }
    }

    /// Reconstruct a session from raw JSON. Malformed input logs a
    /// warning and yields a fresh empty session.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str(raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Malformed session data ({}), starting fresh", e);
                Self::default()
            }
        }
    }

    /// Save the session to disk, stamping `saved_at`
    pub fn save(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create session directory")?;
        }

        self.saved_at = Some(chrono::Local::now().to_rfc3339());
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize session")?;
        fs::write(path, contents).context("Failed to write session file")?;

        tracing::info!("Session saved to {:?}", path);
        Ok(())
    }

    /// Load a session from disk. A missing file starts fresh.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No session file at {:?}, starting fresh", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).context("Failed to read session file")?;
        Ok(Self::from_json(&contents))
    }
}

/// Resolve the data directory: `THEMECRAFT_DIR` override, else
/// `~/.themecraft`
pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("THEMECRAFT_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".themecraft"))
}

/// Path of a named session file under the data directory
pub fn session_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{}.session.json", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{parse_theme, reduce, ThemeAction};

    #[test]
    fn test_round_trip_preserves_theme() {
        let state = parse_theme("green\n", "#64FFDA\n#A5D6A7\n");
        let state = reduce(
            &state,
            ThemeAction::RenameColor {
                color_id: "#64FFDA".to_string(),
                name: "200".to_string(),
            },
        );

        let mut session = Session::new(state.clone());
        let dir = std::env::temp_dir().join(format!("themecraft-test-{}", std::process::id()));
        let path = session_path(&dir, "round-trip");
        session.save(&path).unwrap();

        let restored = Session::load(&path).unwrap();
        assert_eq!(restored.theme, state);
        assert!(restored.saved_at.is_some());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_starts_fresh() {
        let path = std::env::temp_dir().join("themecraft-does-not-exist.session.json");
        let session = Session::load(&path).unwrap();
        assert!(session.theme.colors.is_empty());
    }

    #[test]
    fn test_malformed_json_falls_back_to_empty() {
        let session = Session::from_json("{not json at all");
        assert!(session.theme.colors.is_empty());
        assert!(session.theme.groups.is_empty());
        assert!(session.theme.items.is_empty());
    }

    #[test]
    fn test_partially_shaped_data_fills_defaults() {
        // Only one field present; the rest fall back to empty-state values
        let session = Session::from_json(r##"{"theme": {"colors_text": "#fff"}}"##);
        assert_eq!(session.theme.colors_text, "#fff");
        assert!(session.theme.colors.is_empty());
        assert!(session.theme.items.is_empty());
        assert!(session.saved_at.is_none());
    }

    #[test]
    fn test_session_path_shape() {
        let path = session_path(Path::new("/tmp/data"), "default");
        assert_eq!(path, Path::new("/tmp/data/default.session.json"));
    }
}
