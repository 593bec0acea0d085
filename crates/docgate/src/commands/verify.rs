//! Build verification command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docgate_checks::{BuildVerifier, VerifyConfig};

use super::Outcome;
use crate::config;

/// Run the verify-build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<Outcome> {
    let config = config::load(config_path)?;
    let output = output.unwrap_or_else(|| config.file.site.output.clone());

    let verify = VerifyConfig {
        workdir: config.root.clone(),
        command: config.file.build.command.clone(),
        output_dir: config.resolve(&output),
    };

    tracing::info!("Running build...");

    let result = BuildVerifier::new(verify)
        .verify()
        .await
        .context("Build failed")?;

    tracing::info!(
        "✅ Build successful - {} created in {}ms",
        output.display(),
        result.duration_ms
    );

    Ok(Outcome::Passed)
}
