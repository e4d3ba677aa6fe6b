//! Clipboard integration for the export step
//!
//! Uses arboard for cross-platform clipboard access. The engine treats
//! the clipboard as fire-and-forget: it hands over the serialized text
//! and only drives the transient "copied" flash.

use anyhow::Result;
use arboard::Clipboard;
use std::time::{Duration, Instant};

/// Copy text to system clipboard
pub fn copy(text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(()); // Nothing to copy
    }

    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

/// Transient "copied" indicator with a fixed-duration expiry.
///
/// Re-triggering before expiry cancels the prior timer and restarts it.
/// Takes explicit instants so callers decide what "now" means and tests
/// never have to sleep.
#[derive(Debug, Clone, Default)]
pub struct CopyFlash {
    expires_at: Option<Instant>,
}

impl CopyFlash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the flash at `now` for `duration`
    pub fn trigger_at(&mut self, now: Instant, duration: Duration) {
        self.expires_at = Some(now + duration);
    }

    /// Whether the flash is still visible at `now`
    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.expires_at.map(|end| now < end).unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.expires_at = None;
    }
}
