//! Markdown/MDX link extraction with frontmatter handling.
//!
//! This crate parses documentation sources, splits off YAML frontmatter, and
//! enumerates the links a renderer would produce so callers can classify their
//! targets. `.md` pages are read as CommonMark; `.mdx` pages are read with MDX
//! constructs so links nested in JSX components are found.

pub mod frontmatter;
pub mod links;
mod mdx;
pub mod parser;

pub use frontmatter::Frontmatter;
pub use links::{Link, TargetKind};
pub use parser::{parse_doc, ParsedDoc, Syntax};
