//! Clipboard helper for copying character records
//!
//! Uses `arboard` for cross-platform support. The clipboard is opened fresh
//! each time instead of being held for the whole session.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Fails on headless Linux without a display server.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}
