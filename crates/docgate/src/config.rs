//! Configuration file (docgate.toml) loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docgate_checks::perf::{DEFAULT_MAX_BUILD_MS, DEFAULT_MAX_OUTPUT_BYTES};
use docgate_checks::process::default_build_command;
use serde::Deserialize;

/// Configuration file structure (docgate.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub thresholds: ThresholdSettings,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    /// Documentation source directory
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
    /// Build output directory
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    /// Build command argv, run without a shell
    #[serde(default = "default_build_command")]
    pub command: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default = "default_max_build_ms")]
    pub max_build_ms: u64,
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            output: default_output(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            command: default_build_command(),
        }
    }
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            max_build_ms: default_max_build_ms(),
            max_output_bytes: default_max_output_bytes(),
        }
    }
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("src/content/docs")
}
fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_max_build_ms() -> u64 {
    DEFAULT_MAX_BUILD_MS
}
fn default_max_output_bytes() -> u64 {
    DEFAULT_MAX_OUTPUT_BYTES
}

/// Loaded configuration plus the project root it is relative to.
#[derive(Debug)]
pub struct Config {
    pub file: ConfigFile,
    pub root: PathBuf,
}

impl Config {
    /// Resolve a configured path against the project root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

/// Project root for a config path: the directory holding the file.
pub fn project_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load(path: &Path) -> Result<Config> {
    let root = project_root(path);

    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(Config {
            file: ConfigFile::default(),
            root,
        });
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());

    Ok(Config { file, root })
}

/// Default config written by `docgate init`.
pub const DEFAULT_CONFIG: &str = r#"# docgate configuration
# Paths are relative to the directory containing this file.

[site]
# Markdown/MDX sources scanned by `docgate check-links`
docs_dir = "src/content/docs"

# Directory the build must produce
output = "dist"

[build]
# Site build command, run without a shell
command = ["npm", "run", "build"]

[thresholds]
# `docgate perf` fails above either budget
max_build_ms = 30000
max_output_bytes = 52428800
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_without_file() {
        let temp = tempdir().unwrap();

        let config = load(&temp.path().join("docgate.toml")).unwrap();

        assert_eq!(config.root, temp.path());
        assert_eq!(config.file.site.docs_dir, PathBuf::from("src/content/docs"));
        assert_eq!(config.file.site.output, PathBuf::from("dist"));
        assert_eq!(config.file.build.command, vec!["npm", "run", "build"]);
        assert_eq!(config.file.thresholds.max_build_ms, 30_000);
        assert_eq!(config.file.thresholds.max_output_bytes, 52_428_800);
    }

    #[test]
    fn default_config_matches_defaults() {
        let file: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();
        let defaults = ConfigFile::default();

        assert_eq!(file.site.docs_dir, defaults.site.docs_dir);
        assert_eq!(file.site.output, defaults.site.output);
        assert_eq!(file.build.command, defaults.build.command);
        assert_eq!(file.thresholds.max_build_ms, defaults.thresholds.max_build_ms);
        assert_eq!(
            file.thresholds.max_output_bytes,
            defaults.thresholds.max_output_bytes
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("docgate.toml");
        fs::write(&path, "[site]\noutput = \"build\"\n").unwrap();

        let config = load(&path).unwrap();

        assert_eq!(config.file.site.output, PathBuf::from("build"));
        assert_eq!(config.file.site.docs_dir, PathBuf::from("src/content/docs"));
        assert_eq!(config.resolve(&config.file.site.output), temp.path().join("build"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("docgate.toml");
        fs::write(&path, "[thresholds]\nmax_build_ms = \"fast\"\n").unwrap();

        let err = load(&path).unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to parse"));
    }

    #[test]
    fn bare_file_name_resolves_to_cwd() {
        assert_eq!(project_root(Path::new("docgate.toml")), PathBuf::from("."));
        assert_eq!(
            project_root(Path::new("site/docgate.toml")),
            PathBuf::from("site")
        );
    }
}
