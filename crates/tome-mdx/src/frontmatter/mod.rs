//! Frontmatter parsing and types
//!
//! Documents open with a YAML (`---`) or TOML (`+++`) block holding their
//! metadata. The block is located through the markdown AST so fences inside
//! code samples are never mistaken for frontmatter.

mod parser;
mod types;

pub use parser::split_frontmatter;
pub use types::{Frontmatter, FrontmatterFormat, SplitDocument};
