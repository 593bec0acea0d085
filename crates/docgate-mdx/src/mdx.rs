//! MDX link extraction.
//!
//! CommonMark treats a JSX element on its own line as a raw HTML block, which
//! hides any Markdown inside it. MDX bodies are therefore parsed into an mdast
//! tree with MDX constructs enabled, where JSX children are regular nodes.

use std::collections::HashMap;

use markdown::mdast::Node;
use markdown::{to_mdast, ParseOptions};

use crate::links::Link;

/// Collect links from an MDX body, in document order.
///
/// Returns the parser's message when the body is not valid MDX.
pub(crate) fn mdx_links(body: &str, line_offset: usize) -> Result<Vec<Link>, String> {
    let tree = to_mdast(body, &ParseOptions::mdx()).map_err(|e| e.to_string())?;

    let mut definitions = HashMap::new();
    collect_definitions(&tree, &mut definitions);

    let mut links = Vec::new();
    collect_links(&tree, &definitions, line_offset, &mut links);
    Ok(links)
}

fn collect_definitions(node: &Node, definitions: &mut HashMap<String, String>) {
    if let Node::Definition(def) = node {
        // First definition wins
        definitions
            .entry(def.identifier.clone())
            .or_insert_with(|| def.url.clone());
    }

    for child in node.children().into_iter().flatten() {
        collect_definitions(child, definitions);
    }
}

fn collect_links(
    node: &Node,
    definitions: &HashMap<String, String>,
    line_offset: usize,
    links: &mut Vec<Link>,
) {
    let target = match node {
        Node::Link(link) => Some(link.url.clone()),
        Node::LinkReference(reference) => definitions.get(&reference.identifier).cloned(),
        _ => None,
    };

    if let Some(target) = target {
        let line = node.position().map_or(1, |p| p.start.line);
        links.push(Link {
            text: text_of(node),
            target,
            line: line_offset + line,
        });
    }

    for child in node.children().into_iter().flatten() {
        collect_links(child, definitions, line_offset, links);
    }
}

/// Concatenated text and inline code beneath `node`.
fn text_of(node: &Node) -> String {
    match node {
        Node::Text(text) => text.value.clone(),
        Node::InlineCode(code) => code.value.clone(),
        _ => node
            .children()
            .into_iter()
            .flatten()
            .map(text_of)
            .collect(),
    }
}
