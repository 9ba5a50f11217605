//! Table-of-contents extraction from the markdown AST.
//!
//! Headings of level 2 to 6 are listed in document order; the level 1
//! heading is the page title. Depth is relative to level 2, so an `##`
//! heading has depth 1.

use markdown::mdast::Node;

use crate::error::Result;
use crate::model::TocItem;
use crate::parse::parse_mdast;
use crate::slug::AnchorSlugger;

const MIN_LEVEL: u8 = 2;
const MAX_LEVEL: u8 = 6;

/// Extract the flat table of contents of an MDX document.
pub fn extract_toc(source: &str) -> Result<Vec<TocItem>> {
    let root = parse_mdast(source)?;

    let mut headings = Vec::new();
    collect_headings(&root, &mut headings);

    Ok(build_toc(headings))
}

/// Heading levels and plain text, in document order.
fn collect_headings(node: &Node, out: &mut Vec<(u8, String)>) {
    if let Node::Heading(heading) = node {
        if (MIN_LEVEL..=MAX_LEVEL).contains(&heading.depth) {
            let mut text = String::new();
            for child in &heading.children {
                collect_text(child, &mut text);
            }
            let text = text.trim().to_string();
            if !text.is_empty() {
                out.push((heading.depth, text));
            }
        }
        return;
    }

    if let Some(children) = node.children() {
        for child in children {
            collect_headings(child, out);
        }
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.value),
        Node::InlineCode(code) => out.push_str(&code.value),
        Node::Break(_) => out.push(' '),
        other => {
            if let Some(children) = other.children() {
                for child in children {
                    collect_text(child, out);
                }
            }
        }
    }
}

struct OpenHeading {
    depth: u32,
    href: String,
    numbering: Vec<u32>,
    children: u32,
}

fn build_toc(headings: Vec<(u8, String)>) -> Vec<TocItem> {
    let mut slugger = AnchorSlugger::new();
    let mut stack: Vec<OpenHeading> = Vec::new();
    let mut top_level = 0u32;
    let mut items = Vec::with_capacity(headings.len());

    for (level, text) in headings {
        let depth = u32::from(level - MIN_LEVEL + 1);
        let href = format!("#{}", slugger.slug(&text));

        while stack.last().is_some_and(|open| open.depth >= depth) {
            stack.pop();
        }

        let (numbering, parent) = match stack.last_mut() {
            Some(open) => {
                let mut numbering = open.numbering.clone();
                numbering.push(open.children);
                open.children += 1;
                (numbering, Some(open.href.clone()))
            }
            None => {
                let numbering = vec![top_level];
                top_level += 1;
                (numbering, None)
            }
        };

        stack.push(OpenHeading {
            depth,
            href: href.clone(),
            numbering: numbering.clone(),
            children: 0,
        });

        items.push(TocItem {
            text,
            href,
            depth,
            numbering,
            parent,
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_toc_with_numbering() {
        let source = "# Button\n\n## Usage\n\n### Variants\n\n### Sizes\n\n## Props\n";
        let toc = extract_toc(source).unwrap();

        let summary: Vec<_> = toc
            .iter()
            .map(|item| (item.text.as_str(), item.depth, item.numbering.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Usage", 1, vec![0]),
                ("Variants", 2, vec![0, 0]),
                ("Sizes", 2, vec![0, 1]),
                ("Props", 1, vec![1]),
            ]
        );
        assert_eq!(toc[1].parent.as_deref(), Some("#usage"));
        assert_eq!(toc[3].parent, None);
    }

    #[test]
    fn test_inline_markup_is_flattened() {
        let source = "## The `size` *prop*\n";
        let toc = extract_toc(source).unwrap();
        assert_eq!(toc[0].text, "The size prop");
        assert_eq!(toc[0].href, "#the-size-prop");
    }

    #[test]
    fn test_skipped_levels_attach_to_nearest_ancestor() {
        let source = "## Overview\n\n#### Deep\n\n### Shallow\n";
        let toc = extract_toc(source).unwrap();
        assert_eq!(toc[1].depth, 3);
        assert_eq!(toc[1].numbering, vec![0, 0]);
        assert_eq!(toc[2].numbering, vec![0, 1]);
        assert_eq!(toc[2].parent.as_deref(), Some("#overview"));
    }

    #[test]
    fn test_headings_after_frontmatter() {
        let source = "---\ntitle: Card\n---\n\n## Anatomy\n";
        let toc = extract_toc(source).unwrap();
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].href, "#anatomy");
    }
}
