use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "scan-move";

/// Default state directory holding `session.json` and the UI log
///
/// - Linux: `$XDG_DATA_HOME/scan-move` or `~/.local/share/scan-move`
/// - macOS: `~/Library/Application Support/scan-move`
/// - Windows: `%LOCALAPPDATA%\scan-move`
///
/// Falls back to `$HOME/.scan-move` when the platform directory is unknown.
pub fn get_state_dir() -> Result<PathBuf> {
    if let Some(data_dir) = dirs::data_local_dir() {
        return Ok(data_dir.join(APP_DIR_NAME));
    }
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(format!(".{}", APP_DIR_NAME)))
}
