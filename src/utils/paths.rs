use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Record data files larger than this are refused
const MAX_DATA_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Reject an already-open data file larger than 10MB.
///
/// Checks the open handle rather than the path so the size cannot change
/// between the check and the read.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let size = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?
        .len();

    if size > MAX_DATA_FILE_BYTES {
        bail!("File too large: {} ({} bytes, max {} bytes)", path.display(), size, MAX_DATA_FILE_BYTES);
    }
    Ok(())
}

/// Display form of a path with the home directory shown as `~`
pub fn format_path_with_tilde(path: &Path) -> String {
    tilde_relative_to(path, dirs::home_dir().as_deref())
}

fn tilde_relative_to(path: &Path, home: Option<&Path>) -> String {
    match home.and_then(|home| path.strip_prefix(home).ok()) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => path.display().to_string(),
    }
}
