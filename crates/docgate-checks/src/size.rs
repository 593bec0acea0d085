//! Output size measurement.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::CheckError;

/// Total size in bytes of all regular files under `dir`.
///
/// Symlinks are not followed, so a link pointing outside the output tree
/// does not inflate the total.
pub fn dir_size(dir: &Path) -> Result<u64, CheckError> {
    if !dir.is_dir() {
        return Err(CheckError::OutputMissing(dir.to_path_buf()));
    }

    let mut total = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }

    Ok(total)
}

/// Format a byte count for humans (e.g. "1.5 MB").
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
