//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `forms`: the expression-swallowing forms (`let`, `if`, lambda)
//! - `expressions`: binary operators with precedence climbing, application, atoms
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! A `Parser` owns its token sequence and cursor. It is built for a single
//! parse and consumed by [`Parser::parse`], so no cursor is ever shared.

use crate::config::{ParseOptions, TrailingTokens};
use crate::parser::ast::Node;
use crate::parser::lexer::{Token, TokenKind};
use std::fmt;
use thiserror::Error;

/// Deepest tree the parser returns.
///
/// Every tree operation recurses per level, so the bound keeps them within
/// the stack. It also keeps the JSON form under serde_json's default
/// nesting limit of 128, so [`crate::json::from_json`] reads back anything
/// the parser produced.
pub const MAX_DEPTH: usize = 100;

/// Most expressions the parser will have open at once.
///
/// The printed form of a tree opens at most two expressions per level (the
/// parentheses and a form's sub-expression), so anything [`MAX_DEPTH`] deep
/// still parses back.
pub const MAX_NESTING: usize = 2 * MAX_DEPTH + 1;

/// What a grammar rule was looking for when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// A token of this kind, e.g. `IN` after a `let` binding
    Kind(TokenKind),
    /// An operator token with exactly this text, e.g. `=` in `let`
    Operator(&'static str),
    /// Anything that can start an atom
    Expression,
    /// No more tokens (strict trailing-token policy)
    EndOfInput,
    /// A numeric literal that fits in an `f64`
    FiniteNumber,
    /// At most [`MAX_NESTING`] open expressions
    NestingLimit,
    /// A tree at most [`MAX_DEPTH`] levels deep
    DepthLimit,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{}", kind),
            Expected::Operator(op) => write!(f, "'{}'", op),
            Expected::Expression => write!(f, "expression"),
            Expected::EndOfInput => write!(f, "end of input"),
            Expected::FiniteNumber => write!(f, "a finite number"),
            Expected::NestingLimit => write!(f, "at most {} levels of nesting", MAX_NESTING),
            Expected::DepthLimit => write!(f, "a tree at most {} levels deep", MAX_DEPTH),
        }
    }
}

/// What the parser actually saw.
#[derive(Debug, Clone, PartialEq)]
pub enum Found {
    Token(Token),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(token) => write!(f, "{} at {}", token, token.location),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Parser error type
///
/// `position` is the index of the offending token in the token sequence, or
/// the sequence length when the parser ran off the end.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error at token {position}: expected {expected}, found {found}")]
pub struct ParseError {
    pub expected: Expected,
    pub found: Found,
    pub position: usize,
}

/// Recursive descent parser for MicroML
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// `parse_expression` calls currently on the stack
    pub(crate) nesting: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            nesting: 0,
        }
    }

    /// Parse one expression, ignoring anything after it.
    pub fn parse(self) -> Result<Node, ParseError> {
        self.parse_with(&ParseOptions::default())
    }

    /// Parse one expression, applying the trailing-token policy of `options`.
    pub fn parse_with(mut self, options: &ParseOptions) -> Result<Node, ParseError> {
        let node = self.parse_expression()?;

        if !self.is_at_end() {
            match options.trailing {
                TrailingTokens::Ignore => {
                    log::debug!(
                        "ignoring {} trailing token(s) from position {}",
                        self.tokens.len() - self.position,
                        self.position
                    );
                }
                TrailingTokens::Reject => return Err(self.error(Expected::EndOfInput)),
            }
        }

        log::debug!("parsed {} node(s)", node.size());
        Ok(node)
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub(crate) fn check_operator(&self, op: &str) -> bool {
        self.peek().is_some_and(|t| t.is_operator(op))
    }

    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Consume the current token if it is one of `ops`, returning its text.
    pub(crate) fn match_operator(&mut self, ops: &[&str]) -> Option<String> {
        let token = self.peek()?;
        if token.kind == TokenKind::Operator && ops.contains(&token.text.as_str()) {
            self.advance().map(|t| t.text)
        } else {
            None
        }
    }

    /// Build an error describing the current cursor position.
    pub(crate) fn error(&self, expected: Expected) -> ParseError {
        let found = match self.peek() {
            Some(token) => Found::Token(token.clone()),
            None => Found::EndOfInput,
        };
        ParseError {
            expected,
            found,
            position: self.position,
        }
    }

    /// Pass `node` through unless it is deeper than [`MAX_DEPTH`].
    pub(crate) fn within_depth(&self, node: Node) -> Result<Node, ParseError> {
        if node.depth() > MAX_DEPTH {
            Err(self.error(Expected::DepthLimit))
        } else {
            Ok(node)
        }
    }

    pub(crate) fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.error(Expected::Kind(kind)))
    }

    pub(crate) fn expect_operator(&mut self, op: &'static str) -> Result<(), ParseError> {
        if self.check_operator(op) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(Expected::Operator(op)))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        self.expect_kind(TokenKind::Identifier).map(|t| t.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse(source: &str) -> Result<Node, ParseError> {
        Parser::new(tokenize(source).unwrap()).parse()
    }

    #[test]
    fn test_parse_simple_let() {
        let node = parse("let x = 5 in x").unwrap();
        assert_eq!(node, Node::let_in("x", Node::number(5.0), Node::var("x")));
    }

    #[test]
    fn test_missing_in() {
        let err = parse("let x = 5").unwrap_err();
        assert_eq!(err.expected, Expected::Kind(TokenKind::In));
        assert_eq!(err.found, Found::EndOfInput);
        assert_eq!(err.position, 4);
        assert_eq!(
            err.to_string(),
            "Parse error at token 4: expected IN, found end of input"
        );
    }

    #[test]
    fn test_empty_input() {
        let err = parse("").unwrap_err();
        assert_eq!(err.expected, Expected::Expression);
        assert_eq!(err.found, Found::EndOfInput);
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_trailing_tokens_ignored_by_default() {
        assert_eq!(parse("1 )").unwrap(), Node::number(1.0));
    }

    #[test]
    fn test_trailing_tokens_rejected_when_strict() {
        let options = ParseOptions {
            trailing: TrailingTokens::Reject,
        };
        let err = Parser::new(tokenize("1 ) 2").unwrap())
            .parse_with(&options)
            .unwrap_err();
        assert_eq!(err.expected, Expected::EndOfInput);
        assert_eq!(err.position, 1);
        match err.found {
            Found::Token(token) => assert_eq!(token.kind, TokenKind::RParen),
            Found::EndOfInput => panic!("Expected a leftover token"),
        }
    }

    #[test]
    fn test_error_mentions_location() {
        let err = parse("let 5 = 1 in 2").unwrap_err();
        assert_eq!(err.expected, Expected::Kind(TokenKind::Identifier));
        assert_eq!(
            err.to_string(),
            "Parse error at token 1: expected IDENTIFIER, found number 5 at line 1, column 5"
        );
    }

    fn parenthesized(depth: usize) -> String {
        format!("{}x{}", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_up_to_limit_parses() {
        // The outer expression counts as one level
        let source = parenthesized(MAX_NESTING - 1);
        assert_eq!(parse(&source).unwrap(), Node::var("x"));
    }

    #[test]
    fn test_nesting_past_limit_is_error() {
        let err = parse(&parenthesized(MAX_NESTING)).unwrap_err();
        assert_eq!(err.expected, Expected::NestingLimit);
        // The innermost `x` is where the extra level would start
        assert_eq!(err.position, MAX_NESTING);
        assert!(matches!(err.found, Found::Token(ref t) if t.kind == TokenKind::Identifier));
        assert!(err
            .to_string()
            .contains("expected at most 201 levels of nesting"));
    }

    #[test]
    fn test_tree_depth_limit_on_flat_chain() {
        // n terms fold into a tree n levels deep
        let fits = vec!["a"; MAX_DEPTH].join(" + ");
        assert_eq!(parse(&fits).unwrap().depth(), MAX_DEPTH);

        let too_deep = vec!["a"; MAX_DEPTH + 1].join(" + ");
        let err = parse(&too_deep).unwrap_err();
        assert_eq!(err.expected, Expected::DepthLimit);
        assert_eq!(err.found, Found::EndOfInput);
        assert!(err
            .to_string()
            .contains("expected a tree at most 100 levels deep"));
    }

    #[test]
    fn test_tree_depth_limit_on_application_chain() {
        let source = format!("f{}", " 1".repeat(MAX_DEPTH));
        let err = parse(&source).unwrap_err();
        assert_eq!(err.expected, Expected::DepthLimit);
    }

    #[test]
    fn test_tree_depth_limit_on_nested_lambdas() {
        let source = format!("{}0", "fun x -> ".repeat(MAX_DEPTH));
        let err = parse(&source).unwrap_err();
        assert_eq!(err.expected, Expected::DepthLimit);
    }

    #[test]
    fn test_number_out_of_range() {
        let err = parse(&"9".repeat(400)).unwrap_err();
        assert_eq!(err.expected, Expected::FiniteNumber);
        assert_eq!(err.position, 0);
        assert!(matches!(err.found, Found::Token(ref t) if t.kind == TokenKind::Number));
        assert!(err.to_string().contains("expected a finite number"));
    }

    #[test]
    fn test_number_at_top_of_range() {
        let source = format!("{}", f64::MAX);
        assert_eq!(parse(&source).unwrap(), Node::number(f64::MAX));
    }
}
