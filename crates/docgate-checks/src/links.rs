//! Placeholder link detection across a documentation tree.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use docgate_mdx::{parse_doc, ParsedDoc, Syntax};

use crate::error::CheckError;

/// A link whose target is empty or a bare `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkFinding {
    /// File path relative to the docs directory
    pub file: PathBuf,

    /// Line of the link (1-indexed)
    pub line: usize,

    /// Link text
    pub text: String,

    /// Offending target
    pub target: String,
}

/// Result of scanning a documentation tree.
#[derive(Debug, Default, Serialize)]
pub struct LinkReport {
    /// Number of Markdown/MDX files read
    pub files_scanned: usize,

    /// Number of links seen, external ones included
    pub links_seen: usize,

    /// Findings ordered by file, then position
    pub findings: Vec<LinkFinding>,
}

impl LinkReport {
    /// True when no placeholder links were found.
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Scans Markdown and MDX sources for placeholder links.
pub struct LinkChecker {
    docs_dir: PathBuf,
}

impl LinkChecker {
    /// Create a checker rooted at `docs_dir`.
    pub fn new(docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
        }
    }

    /// Scan every Markdown/MDX file under the docs directory.
    ///
    /// Every file is checked; findings do not stop the scan. Only file-system
    /// failures abort it.
    pub fn scan(&self) -> Result<LinkReport, CheckError> {
        let files = self.discover()?;
        tracing::debug!(
            "Scanning {} files under {}",
            files.len(),
            self.docs_dir.display()
        );

        let docs: Vec<(PathBuf, ParsedDoc)> = files
            .par_iter()
            .map(|path| self.parse_file(path))
            .collect::<Result<Vec<_>, CheckError>>()?;

        let mut report = LinkReport {
            files_scanned: docs.len(),
            ..Default::default()
        };

        for (file, doc) in &docs {
            report.links_seen += doc.links.len();
            report
                .findings
                .extend(doc.placeholder_links().map(|link| LinkFinding {
                    file: file.clone(),
                    line: link.line,
                    text: link.text.clone(),
                    target: link.target.clone(),
                }));
        }

        Ok(report)
    }

    /// Find all Markdown/MDX files, sorted by path.
    fn discover(&self) -> Result<Vec<PathBuf>, CheckError> {
        if !self.docs_dir.is_dir() {
            return Err(CheckError::DocsRootMissing(self.docs_dir.clone()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.docs_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }

            if Syntax::from_path(path).is_none() {
                continue;
            }

            files.push(path.to_path_buf());
        }

        Ok(files)
    }

    /// Read and parse one file, returning its docs-relative path.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    fn parse_file(&self, path: &Path) -> Result<(PathBuf, ParsedDoc), CheckError> {
        let bytes = fs::read(path).map_err(|source| CheckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let syntax = Syntax::from_path(path).unwrap_or(Syntax::Markdown);
        let doc = parse_doc(&content, syntax);

        if let Some(message) = &doc.mdx_error {
            tracing::warn!(
                "{} is not valid MDX ({}); scanned as Markdown",
                path.display(),
                message
            );
        }

        let relative = path
            .strip_prefix(&self.docs_dir)
            .unwrap_or(path)
            .to_path_buf();

        Ok((relative, doc))
    }
}
