//! Performance gate: build time and output size budgets.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::CheckError;
use crate::process::{default_build_command, BuildCommand};
use crate::size::{dir_size, human_size};

/// Default build time budget (30 seconds).
pub const DEFAULT_MAX_BUILD_MS: u64 = 30_000;

/// Default output size budget (50 MiB).
pub const DEFAULT_MAX_OUTPUT_BYTES: u64 = 50 * 1024 * 1024;

/// Budgets a build must stay within. A value equal to its limit passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    pub max_build_ms: u64,
    pub max_output_bytes: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_build_ms: DEFAULT_MAX_BUILD_MS,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

impl Thresholds {
    /// Check both measurements independently.
    pub fn evaluate(&self, elapsed_ms: u64, output_bytes: u64) -> Vec<ThresholdViolation> {
        let mut violations = Vec::new();

        if elapsed_ms > self.max_build_ms {
            violations.push(ThresholdViolation::BuildTime {
                elapsed_ms,
                limit_ms: self.max_build_ms,
            });
        }

        if output_bytes > self.max_output_bytes {
            violations.push(ThresholdViolation::OutputSize {
                bytes: output_bytes,
                limit_bytes: self.max_output_bytes,
            });
        }

        violations
    }
}

/// A budget that was exceeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "threshold", rename_all = "snake_case")]
pub enum ThresholdViolation {
    BuildTime { elapsed_ms: u64, limit_ms: u64 },
    OutputSize { bytes: u64, limit_bytes: u64 },
}

impl fmt::Display for ThresholdViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuildTime {
                elapsed_ms,
                limit_ms,
            } => write!(
                f,
                "Build time {}ms exceeds {}ms threshold",
                elapsed_ms, limit_ms
            ),
            Self::OutputSize { bytes, limit_bytes } => write!(
                f,
                "Bundle size {} ({} bytes) exceeds {} threshold",
                human_size(*bytes),
                bytes,
                human_size(*limit_bytes)
            ),
        }
    }
}

/// Configuration for the performance gate.
#[derive(Debug, Clone)]
pub struct PerfConfig {
    /// Directory the build command runs in
    pub workdir: PathBuf,

    /// Build command argv
    pub command: Vec<String>,

    /// Directory whose size is measured
    pub output_dir: PathBuf,

    /// Budgets to enforce
    pub thresholds: Thresholds,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            command: default_build_command(),
            output_dir: PathBuf::from("dist"),
            thresholds: Thresholds::default(),
        }
    }
}

/// Measurements from one gated build.
#[derive(Debug, Serialize)]
pub struct PerfReport {
    /// Wall-clock build time in milliseconds
    pub elapsed_ms: u64,

    /// Recursive size of the output directory
    pub output_bytes: u64,

    /// Budgets the build was measured against
    pub thresholds: Thresholds,

    /// Exceeded budgets, time first
    pub violations: Vec<ThresholdViolation>,
}

impl PerfReport {
    /// True when every budget was met.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Times a quiet build and measures its output.
pub struct PerfGate {
    config: PerfConfig,
}

impl PerfGate {
    /// Create a new gate.
    pub fn new(config: PerfConfig) -> Self {
        Self { config }
    }

    /// Run the build once and compare the measurements with the budgets.
    pub async fn run(&self) -> Result<PerfReport, CheckError> {
        let command = BuildCommand::new(&self.config.command, &self.config.workdir)?;
        let run = command.run_quiet().await?;

        let elapsed_ms = run.elapsed_ms();
        let output_bytes = dir_size(&self.config.output_dir)?;

        tracing::debug!(
            "Measured {}ms build, {} bytes in {}",
            elapsed_ms,
            output_bytes,
            self.config.output_dir.display()
        );

        Ok(PerfReport {
            elapsed_ms,
            output_bytes,
            thresholds: self.config.thresholds,
            violations: self.config.thresholds.evaluate(elapsed_ms, output_bytes),
        })
    }
}
