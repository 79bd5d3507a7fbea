//! Expression parsing implementation
//!
//! This module handles binary operators using precedence climbing, function
//! application by juxtaposition, and atoms.
//!
//! # Precedence
//!
//! From loosest to tightest:
//!
//! | Level          | Operators                      | Associativity |
//! |----------------|--------------------------------|---------------|
//! | comparison     | `==` `!=` `<` `>` `<=` `>=`    | left          |
//! | additive       | `+` `-`                        | left          |
//! | multiplicative | `*` `/`                        | left          |
//! | application    | juxtaposition (`f x`)          | left          |
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::Node;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, Parser};

const COMPARISON_OPERATORS: [&str; 6] = ["==", "!=", "<", ">", "<=", ">="];
const ADDITIVE_OPERATORS: [&str; 2] = ["+", "-"];
const MULTIPLICATIVE_OPERATORS: [&str; 2] = ["*", "/"];

impl Parser {
    /// Parse comparison (== != < > <= >=)
    pub(crate) fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_additive()?;

        while let Some(op) = self.match_operator(&COMPARISON_OPERATORS) {
            let right = self.parse_additive()?;
            left = self.within_depth(Node::binary(op, left, right))?;
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = self.match_operator(&ADDITIVE_OPERATORS) {
            let right = self.parse_multiplicative()?;
            left = self.within_depth(Node::binary(op, left, right))?;
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_application()?;

        while let Some(op) = self.match_operator(&MULTIPLICATIVE_OPERATORS) {
            let right = self.parse_application()?;
            left = self.within_depth(Node::binary(op, left, right))?;
        }

        Ok(left)
    }

    /// Parse application: an atom followed directly by another atom is a call
    fn parse_application(&mut self) -> Result<Node, ParseError> {
        let mut function = self.parse_atom()?;

        while self.peek().is_some_and(|t| t.starts_atom()) {
            let argument = self.parse_atom()?;
            function = self.within_depth(Node::apply(function, argument))?;
        }

        Ok(function)
    }

    /// Parse atom (number, variable, parenthesized expression, lambda)
    fn parse_atom(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.error(Expected::Expression));
        };

        match token.kind {
            TokenKind::Number => {
                // Digits past the f64 range parse to infinity rather than failing
                let value = token
                    .text
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| self.error(Expected::FiniteNumber))?;
                self.advance();
                Ok(Node::number(value))
            }
            TokenKind::Identifier => {
                let name = token.text.clone();
                self.advance();
                Ok(Node::var(name))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_kind(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Lambda => self.parse_lambda(),
            _ => Err(self.error(Expected::Expression)),
        }
    }
}
