//! Build verification: run the build, then confirm its output exists.

use std::path::PathBuf;

use crate::error::CheckError;
use crate::process::{default_build_command, BuildCommand};

/// Configuration for verifying a site build.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Directory the build command runs in
    pub workdir: PathBuf,

    /// Build command argv
    pub command: Vec<String>,

    /// Directory the build is expected to produce
    pub output_dir: PathBuf,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            command: default_build_command(),
            output_dir: PathBuf::from("dist"),
        }
    }
}

/// Result of a successful verification.
#[derive(Debug)]
pub struct VerifyResult {
    /// Output directory that was found
    pub output_dir: PathBuf,

    /// Build time in milliseconds
    pub duration_ms: u64,
}

/// Runs the build once and checks for the output directory.
pub struct BuildVerifier {
    config: VerifyConfig,
}

impl BuildVerifier {
    /// Create a new verifier.
    pub fn new(config: VerifyConfig) -> Self {
        Self { config }
    }

    /// Run the build with live output and check the result.
    ///
    /// A non-zero exit is terminal; the output directory is only inspected
    /// after a successful build.
    pub async fn verify(&self) -> Result<VerifyResult, CheckError> {
        let command = BuildCommand::new(&self.config.command, &self.config.workdir)?;
        let run = command.run_inherit().await?;

        if !self.config.output_dir.is_dir() {
            return Err(CheckError::OutputMissing(self.config.output_dir.clone()));
        }

        Ok(VerifyResult {
            output_dir: self.config.output_dir.clone(),
            duration_ms: run.elapsed_ms(),
        })
    }
}
