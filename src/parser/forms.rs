//! Expression-swallowing forms: `let`, `if` and lambda
//!
//! Each form is committed to as soon as its keyword is consumed; from then on
//! a missing token is a hard error rather than a cue to try another rule. The
//! trailing expression of every form (`in` body, `else` branch, lambda body)
//! extends as far right as possible.

use crate::parser::ast::Node;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, Parser, MAX_NESTING};

impl Parser {
    /// Parse expression (top-level entry point)
    ///
    /// Every nested expression passes through here, so this is where the
    /// recursion is bounded.
    pub(crate) fn parse_expression(&mut self) -> Result<Node, ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(self.error(Expected::NestingLimit));
        }
        log::trace!("expression at token {}", self.position);

        self.nesting += 1;
        let result = self.parse_let();
        self.nesting -= 1;
        result
    }

    /// `let IDENT = expression in expression`, or fall through to `if`
    fn parse_let(&mut self) -> Result<Node, ParseError> {
        if !self.check(TokenKind::Let) {
            return self.parse_if();
        }
        self.advance();

        let variable_name = self.expect_identifier()?;
        self.expect_operator("=")?;
        let value = self.parse_expression()?;
        self.expect_kind(TokenKind::In)?;
        let in_expression = self.parse_expression()?;

        self.within_depth(Node::let_in(variable_name, value, in_expression))
    }

    /// `if expression then expression else expression`, or fall through to
    /// comparisons
    fn parse_if(&mut self) -> Result<Node, ParseError> {
        if !self.check(TokenKind::If) {
            return self.parse_comparison();
        }
        self.advance();

        let condition = self.parse_expression()?;
        self.expect_kind(TokenKind::Then)?;
        let then_branch = self.parse_expression()?;
        self.expect_kind(TokenKind::Else)?;
        let else_branch = self.parse_expression()?;

        self.within_depth(Node::if_then_else(condition, then_branch, else_branch))
    }

    /// `(lambda | fun) IDENT -> expression`; the caller has checked for the
    /// keyword.
    pub(crate) fn parse_lambda(&mut self) -> Result<Node, ParseError> {
        self.expect_kind(TokenKind::Lambda)?;
        let parameter_name = self.expect_identifier()?;
        self.expect_kind(TokenKind::Arrow)?;
        let body = self.parse_expression()?;

        self.within_depth(Node::function(parameter_name, body))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Node;
    use crate::parser::lexer::{tokenize, TokenKind};
    use crate::parser::parse::{Expected, Found, ParseError, Parser};

    fn parse(source: &str) -> Result<Node, ParseError> {
        Parser::new(tokenize(source).unwrap()).parse()
    }

    #[test]
    fn test_if_then_else() {
        assert_eq!(
            parse("if 5 > 3 then 10 else 20").unwrap(),
            Node::if_then_else(
                Node::binary(">", Node::number(5.0), Node::number(3.0)),
                Node::number(10.0),
                Node::number(20.0),
            )
        );
    }

    #[test]
    fn test_nested_let_in_value() {
        assert_eq!(
            parse("let x = let y = 1 in y in x").unwrap(),
            Node::let_in(
                "x",
                Node::let_in("y", Node::number(1.0), Node::var("y")),
                Node::var("x"),
            )
        );
    }

    #[test]
    fn test_else_branch_is_greedy() {
        assert_eq!(
            parse("if c then 1 else 2 + 3").unwrap(),
            Node::if_then_else(
                Node::var("c"),
                Node::number(1.0),
                Node::binary("+", Node::number(2.0), Node::number(3.0)),
            )
        );
    }

    #[test]
    fn test_lambda_and_fun_are_synonyms() {
        assert_eq!(parse("lambda x -> x").unwrap(), parse("fun x -> x").unwrap());
    }

    #[test]
    fn test_let_requires_equals() {
        let err = parse("let x 5 in x").unwrap_err();
        assert_eq!(err.expected, Expected::Operator("="));
        assert_eq!(err.position, 2);
    }

    #[test]
    fn test_let_rejects_other_operator() {
        let err = parse("let x == 5 in x").unwrap_err();
        assert_eq!(err.expected, Expected::Operator("="));
    }

    #[test]
    fn test_if_requires_then() {
        let err = parse("if a else b").unwrap_err();
        assert_eq!(err.expected, Expected::Kind(TokenKind::Then));
        assert!(matches!(err.found, Found::Token(ref t) if t.kind == TokenKind::Else));
    }

    #[test]
    fn test_if_requires_else() {
        let err = parse("if a then b").unwrap_err();
        assert_eq!(err.expected, Expected::Kind(TokenKind::Else));
        assert_eq!(err.found, Found::EndOfInput);
    }

    #[test]
    fn test_lambda_requires_arrow() {
        let err = parse("fun x x").unwrap_err();
        assert_eq!(err.expected, Expected::Kind(TokenKind::Arrow));
        assert_eq!(err.position, 2);
    }

    #[test]
    fn test_lambda_requires_parameter() {
        let err = parse("fun -> x").unwrap_err();
        assert_eq!(err.expected, Expected::Kind(TokenKind::Identifier));
    }
}
