//! Subcommand implementations.

use std::process::ExitCode;

pub mod init;
pub mod links;
pub mod perf;
pub mod verify;

/// Whether a command's checks passed.
///
/// Errors are reported separately through `anyhow`; both a failed check and
/// an error exit with status 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        if passed {
            Self::Passed
        } else {
            Self::Failed
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}
