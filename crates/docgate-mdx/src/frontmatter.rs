//! Frontmatter extraction and parsing.

use serde::Deserialize;

/// Parsed frontmatter from a documentation page.
///
/// Only the keys the checks care about are modelled; anything else the site
/// framework understands (hero, sidebar, template...) is ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Frontmatter {
    /// Page title
    #[serde(default)]
    pub title: Option<String>,

    /// Page description for SEO
    #[serde(default)]
    pub description: Option<String>,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,

    /// Draft pages are excluded from production builds
    #[serde(default)]
    pub draft: bool,
}

/// Raw frontmatter block text and where it sits in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Block<'a> {
    /// YAML between the fences, untrimmed
    pub yaml: &'a str,

    /// Number of source lines preceding `yaml`'s first line
    pub line_offset: usize,

    /// Typed view of the block, if the keys match [`Frontmatter`]
    pub frontmatter: Option<Frontmatter>,
}

/// Frontmatter split from the rest of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<'a> {
    /// The frontmatter block, if the document had one
    pub block: Option<Block<'a>>,

    /// Markdown body after the frontmatter block
    pub body: &'a str,

    /// Number of source lines preceding `body`
    pub line_offset: usize,
}

impl Split<'_> {
    /// Typed frontmatter, when present and well-formed.
    pub fn frontmatter(&self) -> Option<&Frontmatter> {
        self.block.as_ref().and_then(|b| b.frontmatter.as_ref())
    }
}

/// Extract frontmatter from document content.
///
/// Never fails. A block counts as frontmatter only when it is closed and its
/// YAML is a mapping (or empty); otherwise the whole source is body, so a
/// leading `---` thematic break stays Markdown. Keys with unexpected types
/// leave the typed view empty but keep the block.
pub fn extract_frontmatter(source: &str) -> Split<'_> {
    let whole = Split {
        block: None,
        body: source,
        line_offset: 0,
    };

    let trimmed = source.trim_start();
    if !trimmed.starts_with("---") {
        return whole;
    }

    // Find the closing ---
    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return whole;
    };

    let yaml = &after_open[..close_pos];
    let value: serde_yaml::Value = if yaml.trim().is_empty() {
        serde_yaml::Value::Null
    } else {
        match serde_yaml::from_str(yaml) {
            Ok(value) => value,
            Err(_) => return whole,
        }
    };

    let frontmatter = match value {
        serde_yaml::Value::Null => Some(Frontmatter::default()),
        value @ serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value).ok(),
        _ => return whole,
    };

    let body = after_open[close_pos + 4..].trim_start();
    let yaml_start = source.len() - after_open.len();
    let body_start = source.len() - body.len();

    Split {
        block: Some(Block {
            yaml,
            line_offset: source[..yaml_start].matches('\n').count(),
            frontmatter,
        }),
        body,
        line_offset: source[..body_start].matches('\n').count(),
    }
}
