//! External build command execution.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tokio::process::Command;

use crate::error::CheckError;

/// Build command used when none is configured.
pub const DEFAULT_BUILD_COMMAND: &[&str] = &["npm", "run", "build"];

/// Lines of captured stderr kept in a failure message.
const STDERR_TAIL_LINES: usize = 20;

/// Default build command as an owned argv.
pub fn default_build_command() -> Vec<String> {
    DEFAULT_BUILD_COMMAND.iter().map(|s| s.to_string()).collect()
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// A build command bound to a working directory.
///
/// The argv is executed directly, without a shell. The child is always
/// awaited, and is killed if the waiting future is dropped first.
#[derive(Debug, Clone)]
pub struct BuildCommand {
    program: String,
    args: Vec<String>,
    workdir: PathBuf,
}

/// Outcome of a build command that ran to completion.
#[derive(Debug)]
pub struct BuildRun {
    /// Exit status of the build
    pub status: ExitStatus,

    /// Wall-clock time from spawn to exit
    pub elapsed: Duration,

    /// Captured stderr (empty when output was inherited)
    pub stderr: String,
}

impl BuildRun {
    /// Build time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        saturating_millis(self.elapsed)
    }
}

impl BuildCommand {
    /// Create a command from an argv vector.
    pub fn new(argv: &[String], workdir: impl Into<PathBuf>) -> Result<Self, CheckError> {
        let (program, args) = argv.split_first().ok_or(CheckError::EmptyCommand)?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            workdir: workdir.into(),
        })
    }

    /// Working directory the command runs in.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Command line for display.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .current_dir(&self.workdir)
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> CheckError {
        CheckError::Spawn {
            command: self.display(),
            source,
        }
    }

    /// Run with the parent's stdio so build output streams live.
    pub async fn run_inherit(&self) -> Result<BuildRun, CheckError> {
        tracing::debug!("Running `{}` in {}", self.display(), self.workdir.display());

        let start = Instant::now();
        let status = self
            .command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        self.finish(BuildRun {
            status,
            elapsed: start.elapsed(),
            stderr: String::new(),
        })
    }

    /// Run with output captured and hidden.
    pub async fn run_quiet(&self) -> Result<BuildRun, CheckError> {
        tracing::debug!(
            "Running `{}` quietly in {}",
            self.display(),
            self.workdir.display()
        );

        let start = Instant::now();
        let output = self
            .command()
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        self.finish(BuildRun {
            status: output.status,
            elapsed: start.elapsed(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Turn a non-zero exit into an error.
    fn finish(&self, run: BuildRun) -> Result<BuildRun, CheckError> {
        if run.status.success() {
            return Ok(run);
        }

        Err(CheckError::BuildFailed {
            command: self.display(),
            status: run.status,
            detail: stderr_tail(&run.stderr),
        })
    }
}

/// Format the last lines of stderr for an error message.
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    format!("\n{}", lines[start..].join("\n"))
}
