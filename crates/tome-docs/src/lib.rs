#![deny(clippy::all)]

//! Component prop type extraction for tome.
//!
//! This crate provides:
//! - An OXC-based extractor that walks a TypeScript entry module and its
//!   relative re-exports, pairing each exported component with its
//!   `<Name>Props` declaration.
//! - Filtering of props inherited from DOM, accessibility and style-system
//!   types.
//! - A JSON generator for the `component-types.json` artifact.

pub mod error;
pub mod extractor;
pub mod filter;
pub mod generators;
pub mod jsdoc;
pub mod model;

pub use error::{DocsError, Result};
pub use extractor::{ExtractOptions, TypeExtractor};
pub use generators::json::render_json;
pub use model::{ComponentTypeDoc, PropDoc};
