//! Document parser.

use std::path::Path;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::frontmatter::{extract_frontmatter, Frontmatter};
use crate::links::Link;
use crate::mdx::mdx_links;

/// Source dialect of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Markdown,
    Mdx,
}

impl Syntax {
    /// Dialect for a file, by extension (`.md` or `.mdx`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") => Some(Self::Markdown),
            Some("mdx") => Some(Self::Mdx),
            _ => None,
        }
    }
}

/// A parsed documentation page.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (if present and well-formed)
    pub frontmatter: Option<Frontmatter>,

    /// Links in document order, frontmatter first
    pub links: Vec<Link>,

    /// Set when an MDX body did not parse and was scanned as CommonMark
    pub mdx_error: Option<String>,
}

impl ParsedDoc {
    /// Links whose target is empty or a bare `#`.
    pub fn placeholder_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|link| link.is_placeholder())
    }
}

/// Parse a Markdown or MDX document.
///
/// Never fails: malformed frontmatter or MDX degrades to scanning the text as
/// CommonMark. Links written inside frontmatter values are reported too.
/// Reference-style links are reported with their resolved destination; text
/// inside code spans and code blocks is never treated as a link.
pub fn parse_doc(source: &str, syntax: Syntax) -> ParsedDoc {
    let split = extract_frontmatter(source);
    let mut links = Vec::new();
    let mut mdx_error = None;

    if let Some(block) = &split.block {
        links.extend(frontmatter_links(block.yaml, block.line_offset));
    }

    match syntax {
        Syntax::Markdown => links.extend(commonmark_links(split.body, split.line_offset)),
        Syntax::Mdx => match mdx_links(split.body, split.line_offset) {
            Ok(found) => links.extend(found),
            Err(message) => {
                mdx_error = Some(message);
                links.extend(commonmark_links(split.body, split.line_offset));
            }
        },
    }

    ParsedDoc {
        frontmatter: split.frontmatter().cloned(),
        links,
        mdx_error,
    }
}

/// Links written in frontmatter values, e.g. `description: See [setup]()`.
///
/// Lines are dedented first so nested YAML values are not read as indented
/// code blocks.
fn frontmatter_links(yaml: &str, line_offset: usize) -> Vec<Link> {
    let dedented: Vec<&str> = yaml.lines().map(str::trim_start).collect();
    commonmark_links(&dedented.join("\n"), line_offset)
}

/// Collect links from CommonMark text.
fn commonmark_links(text: &str, line_offset: usize) -> Vec<Link> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let lines = LineIndex::new(text);
    let mut links = Vec::new();
    let mut current: Option<Link> = None;

    for (event, range) in Parser::new_ext(text, options).into_offset_iter() {
        match event {
            Event::Start(Tag::Link { dest_url, .. }) => {
                current = Some(Link {
                    text: String::new(),
                    target: dest_url.to_string(),
                    line: line_offset + lines.line_of(range.start),
                });
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some(link) = current.as_mut() {
                    link.text.push_str(&text);
                }
            }

            Event::End(TagEnd::Link) => {
                if let Some(link) = current.take() {
                    links.push(link);
                }
            }

            _ => {}
        }
    }

    links
}

/// Byte offset to line number lookup.
struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        Self {
            newlines: text.match_indices('\n').map(|(i, _)| i).collect(),
        }
    }

    /// 1-indexed line containing `offset`.
    fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset) + 1
    }
}
