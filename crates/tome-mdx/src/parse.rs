//! Shared markdown parser configuration.

use markdown::mdast::Node;

use crate::error::{MdxError, Result};

/// Parse options used for every document: MDX constructs plus YAML/TOML
/// frontmatter. ESM and expressions are accepted without validation.
pub(crate) fn parse_options() -> markdown::ParseOptions {
    let mut parse_options = markdown::ParseOptions::mdx();
    parse_options.constructs.frontmatter = true;
    parse_options.constructs.gfm_table = true;
    parse_options.constructs.gfm_strikethrough = true;
    parse_options
}

/// Parse an MDX source into its markdown AST.
pub(crate) fn parse_mdast(source: &str) -> Result<Node> {
    markdown::to_mdast(source, &parse_options()).map_err(MdxError::parse_error)
}
