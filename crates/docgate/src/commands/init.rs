//! Write a default docgate.toml.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::Outcome;
use crate::config::DEFAULT_CONFIG;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<Outcome> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(Outcome::Passed);
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    Ok(Outcome::Passed)
}
