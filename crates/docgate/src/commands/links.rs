//! Link check command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docgate_checks::LinkChecker;

use super::Outcome;
use crate::config;

/// Run the check-links command.
pub async fn run(config_path: &Path, docs: Option<PathBuf>, json: bool) -> Result<Outcome> {
    let config = config::load(config_path)?;
    let docs = docs.unwrap_or_else(|| config.file.site.docs_dir.clone());

    tracing::info!("Checking links in {}...", docs.display());

    let report = LinkChecker::new(config.resolve(&docs))
        .scan()
        .context("Link check failed")?;

    for finding in &report.findings {
        tracing::error!(
            "❌ Broken link in {}:{}: [{}]({})",
            finding.file.display(),
            finding.line,
            finding.text,
            finding.target
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if report.passed() {
        tracing::info!(
            "✅ No broken links found ({} links in {} files)",
            report.links_seen,
            report.files_scanned
        );
    } else {
        tracing::error!("❌ Broken links detected: {}", report.findings.len());
    }

    Ok(report.passed().into())
}
