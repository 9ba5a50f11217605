//! MDX document handling for the tome documentation pipeline.
//!
//! This crate knows how to read a single documentation page:
//!
//! - [`frontmatter`] splits YAML or TOML metadata from the MDX body
//! - [`toc`] turns the heading structure into a flat table of contents
//! - [`slug`] derives routes from menu paths and anchors from headings
//! - [`model`] defines [`ParsedDocument`] and its JSON Schema
//!
//! Everything here is synchronous and free of I/O; caching, concurrency and
//! file access live in the `tome` binary.

pub mod error;
pub mod frontmatter;
pub mod model;
mod parse;
pub mod slug;
pub mod toc;

pub use error::{MdxError, Result};
pub use frontmatter::{Frontmatter, FrontmatterFormat, SplitDocument, split_frontmatter};
pub use model::{DEFAULT_ORDER, DocumentMeta, ParsedDocument, TocItem};
pub use slug::{route_from_menu, slugify};
pub use toc::extract_toc;
