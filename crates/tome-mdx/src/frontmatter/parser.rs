//! Frontmatter extraction and parsing

use markdown::mdast::Node;
use serde_json::Value as JsonValue;

use super::types::{Frontmatter, FrontmatterFormat, SplitDocument};
use crate::error::{MdxError, Result};
use crate::parse::parse_mdast;

/// Split a document into parsed frontmatter and body.
///
/// The frontmatter node is found in the markdown AST root; the body is the
/// source text following it, with the separating line break removed.
/// Documents without frontmatter get default metadata and keep their full
/// source as body.
///
/// # Errors
///
/// Returns an error if:
/// - The document is not valid MDX
/// - Frontmatter parsing fails (invalid YAML/TOML syntax, wrong field types)
/// - Multiple frontmatter blocks are found
pub fn split_frontmatter(source: &str) -> Result<SplitDocument> {
    let root = parse_mdast(source)?;
    let Node::Root(root) = root else {
        return Err(MdxError::new("Expected a document root"));
    };

    let mut found: Option<(FrontmatterFormat, &str, Option<usize>)> = None;
    for child in &root.children {
        let (format, value, position) = match child {
            Node::Yaml(node) => (FrontmatterFormat::Yaml, &node.value, &node.position),
            Node::Toml(node) => (FrontmatterFormat::Toml, &node.value, &node.position),
            _ => continue,
        };
        if found.is_some() {
            return Err(MdxError::duplicate_frontmatter());
        }
        found = Some((format, value.as_str(), position.as_ref().map(|p| p.end.offset)));
    }

    let Some((format, raw, end)) = found else {
        return Ok(SplitDocument {
            frontmatter: Frontmatter::default(),
            format: None,
            body: source.to_string(),
        });
    };

    tracing::trace!(format = format.as_str(), "Found frontmatter block");
    let frontmatter = parse_frontmatter(format, raw)?;
    let body = match end {
        Some(offset) if offset <= source.len() => strip_leading_newline(&source[offset..]),
        _ => source,
    };

    Ok(SplitDocument {
        frontmatter,
        format: Some(format),
        body: body.to_string(),
    })
}

fn parse_frontmatter(format: FrontmatterFormat, raw: &str) -> Result<Frontmatter> {
    if raw.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    let data: JsonValue = match format {
        FrontmatterFormat::Yaml => serde_saphyr::from_str(raw)
            .map_err(|e| MdxError::frontmatter_error(format.as_str(), e))?,
        FrontmatterFormat::Toml => {
            let value: toml::Value = toml::from_str(raw)
                .map_err(|e| MdxError::frontmatter_error(format.as_str(), e))?;
            serde_json::to_value(value)
                .map_err(|e| MdxError::frontmatter_error(format.as_str(), e))?
        }
    };

    if data.is_null() {
        return Ok(Frontmatter::default());
    }

    serde_json::from_value(data).map_err(|e| MdxError::frontmatter_error(format.as_str(), e))
}

fn strip_leading_newline(body: &str) -> &str {
    body.strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let source = "---\nid: button\ntitle: Button\nmenu:\n  - Components\n  - Inputs\n  - Button\norder: 2\n---\n\n# Button\n\nBody text.\n";
        let split = split_frontmatter(source).unwrap();

        assert_eq!(split.format, Some(FrontmatterFormat::Yaml));
        assert_eq!(split.frontmatter.id.as_deref(), Some("button"));
        assert_eq!(split.frontmatter.title.as_deref(), Some("Button"));
        assert_eq!(split.frontmatter.order, Some(2));
        assert_eq!(
            split.frontmatter.menu,
            Some(vec![
                "Components".to_string(),
                "Inputs".to_string(),
                "Button".to_string()
            ])
        );
        assert_eq!(split.body, "\n# Button\n\nBody text.\n");
    }

    #[test]
    fn test_toml_frontmatter() {
        let source = "+++\nid = \"tokens\"\ntitle = \"Tokens\"\nmenu = [\"Foundations\", \"Tokens\"]\ndocumentState = \"stable\"\n+++\nBody\n";
        let split = split_frontmatter(source).unwrap();

        assert_eq!(split.format, Some(FrontmatterFormat::Toml));
        assert_eq!(split.frontmatter.id.as_deref(), Some("tokens"));
        assert_eq!(split.frontmatter.document_state.as_deref(), Some("stable"));
        assert_eq!(split.body, "Body\n");
    }

    #[test]
    fn test_no_frontmatter_keeps_source() {
        let source = "# Just a heading\n";
        let split = split_frontmatter(source).unwrap();

        assert_eq!(split.format, None);
        assert_eq!(split.frontmatter, Frontmatter::default());
        assert_eq!(split.body, source);
    }

    #[test]
    fn test_camel_case_fields() {
        let source = "---\nfigmaLink: https://figma.com/file/abc\ndocumentAudiences: [designers, engineers]\n---\n";
        let split = split_frontmatter(source).unwrap();

        assert_eq!(
            split.frontmatter.figma_link.as_deref(),
            Some("https://figma.com/file/abc")
        );
        assert_eq!(
            split.frontmatter.document_audiences,
            Some(vec!["designers".to_string(), "engineers".to_string()])
        );
        assert_eq!(split.body, "");
    }

    #[test]
    fn test_wrong_field_type_is_error() {
        let source = "---\nmenu: 42\n---\nBody\n";
        let err = split_frontmatter(source).unwrap_err();
        assert!(err.message.contains("YAML"));
    }
}
