//! # Introduction
//!
//! MicroML parses a small ML-style expression language into an explicit
//! abstract syntax tree, serializes the tree to JSON and renders it as a text
//! outline or in an interactive terminal viewer built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → JSON / outline / TUI
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds the AST.
//! 2. [`json`]: the serialized form (`nodeType` + camelCase fields) and the
//!    `{"error": ...}` failure envelope.
//! 3. [`render`]: flattens the tree into labelled rows and draws a text
//!    outline.
//! 4. [`ui`]: ratatui-based tree viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use microml::parser::ast::Node;
//!
//! let tree = microml::parse("let x = 5 in x + 3").unwrap();
//! assert_eq!(
//!     tree,
//!     Node::let_in(
//!         "x",
//!         Node::number(5.0),
//!         Node::binary("+", Node::var("x"), Node::number(3.0)),
//!     )
//! );
//! ```

pub mod config;
pub mod error;
pub mod json;
pub mod logging;
pub mod parser;
pub mod render;
pub mod ui;

pub use config::{ParseOptions, TrailingTokens};
pub use error::Error;
pub use parser::ast::Node;

use parser::lexer::Lexer;
use parser::parse::Parser;

/// Tokenize and parse `source`, ignoring tokens after the first complete
/// expression.
pub fn parse(source: &str) -> Result<Node, Error> {
    parse_with(source, &ParseOptions::default())
}

/// Tokenize and parse `source` with explicit options.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Node, Error> {
    let tokens = Lexer::new(source).tokenize()?;
    let node = Parser::new(tokens).parse_with(options)?;
    Ok(node)
}
