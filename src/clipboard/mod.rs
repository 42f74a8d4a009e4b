use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::display::CallTarget;

/// Longest text accepted for the clipboard; phone numbers are far shorter
const MAX_CLIPBOARD_CHARS: usize = 64;

/// Trait for clipboard operations (allows mocking in tests)
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by arboard
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }

    let len = text.chars().count();
    if len > MAX_CLIPBOARD_CHARS {
        anyhow::bail!("Text too long for clipboard ({} chars, max {})", len, MAX_CLIPBOARD_CHARS);
    }

    if text.chars().any(char::is_control) {
        anyhow::bail!("Refusing to copy text containing control characters");
    }

    Ok(())
}

/// Number of `target` as it goes on the clipboard: whitespace removed, validated
fn clipboard_number(target: &CallTarget) -> Result<String> {
    let number: String = target.number.chars().filter(|c| !c.is_whitespace()).collect();
    validate_clipboard_text(&number)?;
    Ok(number)
}

/// Copy the raw number of `target` using `provider`
pub fn copy_call_target(target: &CallTarget, provider: &mut dyn ClipboardProvider) -> Result<()> {
    provider.set_text(&clipboard_number(target)?)
}

/// Copy the raw number of `target` to the system clipboard.
///
/// # Errors
/// Returns error if:
/// - The number is empty or too long
/// - The number contains control characters
/// - System clipboard is unavailable (headless environment)
pub fn copy_to_clipboard(target: &CallTarget) -> Result<()> {
    // Validate first, before initializing clipboard (for better error messages in CI)
    let number = clipboard_number(target)?;

    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(&number)
}
