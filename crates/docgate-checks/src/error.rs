//! Errors shared by all checks.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that can occur while running a check.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Build command is empty")]
    EmptyCommand,

    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}){detail}")]
    BuildFailed {
        command: String,
        status: ExitStatus,
        detail: String,
    },

    #[error("Output directory not found: {}", .0.display())]
    OutputMissing(PathBuf),

    #[error("Docs directory not found: {}", .0.display())]
    DocsRootMissing(PathBuf),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
