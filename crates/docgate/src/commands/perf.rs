//! Performance gate command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docgate_checks::{human_size, PerfConfig, PerfGate, Thresholds};

use super::Outcome;
use crate::config;

/// Command-line overrides for the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub max_build_ms: Option<u64>,
    pub max_output_bytes: Option<u64>,
}

/// Run the perf command.
pub async fn run(config_path: &Path, overrides: Overrides, json: bool) -> Result<Outcome> {
    let config = config::load(config_path)?;
    let output = overrides
        .output
        .unwrap_or_else(|| config.file.site.output.clone());

    let perf = PerfConfig {
        workdir: config.root.clone(),
        command: config.file.build.command.clone(),
        output_dir: config.resolve(&output),
        thresholds: Thresholds {
            max_build_ms: overrides
                .max_build_ms
                .unwrap_or(config.file.thresholds.max_build_ms),
            max_output_bytes: overrides
                .max_output_bytes
                .unwrap_or(config.file.thresholds.max_output_bytes),
        },
    };

    tracing::info!("Testing build performance...");

    let report = PerfGate::new(perf)
        .run()
        .await
        .context("Performance test failed")?;

    tracing::info!("✅ Build completed in {}ms", report.elapsed_ms);
    tracing::info!(
        "📦 {} size: {} ({} bytes)",
        output.display(),
        human_size(report.output_bytes),
        report.output_bytes
    );

    for violation in &report.violations {
        tracing::warn!("⚠️  {}", violation);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if report.passed() {
        tracing::info!("✅ Performance test passed");
    } else {
        tracing::error!("❌ Performance test failed");
    }

    Ok(report.passed().into())
}
