//! Lexer (tokenizer) for MicroML source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Whitespace is discarded; every other character must start one of the token
//! patterns below or tokenization fails with a [`LexError`].
//!
//! | Pattern                      | Kind                                     |
//! |------------------------------|------------------------------------------|
//! | `(` `)`                      | [`TokenKind::LParen`] / [`TokenKind::RParen`] |
//! | `[a-zA-Z_][a-zA-Z0-9_]*`     | keyword kind or [`TokenKind::Identifier`] |
//! | `[0-9]+(\.[0-9]+)?`          | [`TokenKind::Number`]                    |
//! | `== != <= >=`                | [`TokenKind::Operator`]                  |
//! | `->`                         | [`TokenKind::Arrow`]                     |
//! | `+ - * / = < >`              | [`TokenKind::Operator`]                  |
//! | `;`                          | [`TokenKind::Semicolon`]                 |

use std::fmt;
use thiserror::Error;

/// Operators spelled with two characters. Matched before their one-character
/// prefixes so that `<=` never lexes as `<` followed by `=`.
const TWO_CHAR_OPERATORS: [&str; 5] = ["==", "!=", "<=", ">=", "->"];

const ONE_CHAR_OPERATORS: [char; 7] = ['+', '-', '*', '/', '=', '<', '>'];

/// Source location information for error reporting (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Identifier,
    Let,
    In,
    If,
    Then,
    Else,
    /// Both `lambda` and `fun`
    Lambda,
    Arrow,
    LParen,
    RParen,
    Operator,
    Semicolon,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Let => "LET",
            TokenKind::In => "IN",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::Lambda => "LAMBDA",
            TokenKind::Arrow => "ARROW",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Semicolon => "SEMICOLON",
        };
        f.write_str(name)
    }
}

/// A classified slice of source text.
///
/// The `location` only feeds error messages; two tokens with the same kind
/// and text are interchangeable as far as the grammar is concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// True for an [`TokenKind::Operator`] token spelled exactly `op`.
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// True if this token can begin an `atom` (and therefore an application
    /// argument).
    pub fn starts_atom(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Number | TokenKind::Identifier | TokenKind::LParen | TokenKind::Lambda
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Number => write!(f, "number {}", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Reclassify identifier-shaped text as a keyword where it spells one.
pub fn classify_word(text: &str) -> TokenKind {
    match text {
        "let" => TokenKind::Let,
        "in" => TokenKind::In,
        "if" => TokenKind::If,
        "then" => TokenKind::Then,
        "else" => TokenKind::Else,
        "lambda" | "fun" => TokenKind::Lambda,
        _ => TokenKind::Identifier,
    }
}

/// Classify operator-shaped text. `None` means the text is not an operator.
pub fn classify_operator(text: &str) -> Option<TokenKind> {
    match text {
        "->" => Some(TokenKind::Arrow),
        "==" | "!=" | "<=" | ">=" | "+" | "-" | "*" | "/" | "=" | "<" | ">" => {
            Some(TokenKind::Operator)
        }
        _ => None,
    }
}

/// Lexer for MicroML source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            tokens.push(self.next_token()?);
        }

        log::debug!("lexed {} token(s)", tokens.len());
        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of input".to_string(),
            location: loc,
        })?;

        match ch {
            '(' => Ok(Token::new(TokenKind::LParen, "(", loc)),
            ')' => Ok(Token::new(TokenKind::RParen, ")", loc)),
            ';' => Ok(Token::new(TokenKind::Semicolon, ";", loc)),
            '0'..='9' => Ok(self.number_literal(ch, loc)),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),
            _ => self.operator(ch, loc),
        }
    }

    /// Lex `[0-9]+(\.[0-9]+)?`. A `.` not followed by a digit is left in the
    /// input.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut text = String::new();
        text.push(first_digit);
        self.take_digits(&mut text);

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            text.push('.');
            self.advance();
            self.take_digits(&mut text);
        }

        Token::new(TokenKind::Number, text, loc)
    }

    fn take_digits(&mut self, text: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(classify_word(&ident), ident, loc)
    }

    /// Operators, longest match first.
    fn operator(&mut self, first: char, loc: SourceLocation) -> Result<Token, LexError> {
        if let Some(next) = self.peek() {
            let pair: String = [first, next].iter().collect();
            if TWO_CHAR_OPERATORS.contains(&pair.as_str()) {
                self.advance();
                if let Some(kind) = classify_operator(&pair) {
                    return Ok(Token::new(kind, pair, loc));
                }
            }
        }

        if ONE_CHAR_OPERATORS.contains(&first) {
            let text = first.to_string();
            if let Some(kind) = classify_operator(&text) {
                return Ok(Token::new(kind, text, loc));
            }
        }

        Err(LexError {
            message: format!("Unexpected character: '{}'", first),
            location: loc,
        })
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str) -> Vec<String> {
        tokenize(source).unwrap().into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_let_expression_tokens() {
        assert_eq!(
            kinds("let x = 5 in x + 3"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::Number,
                TokenKind::In,
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("let in if then else lambda fun"),
            vec![
                TokenKind::Let,
                TokenKind::In,
                TokenKind::If,
                TokenKind::Then,
                TokenKind::Else,
                TokenKind::Lambda,
                TokenKind::Lambda,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let tokens = tokenize("letter fun_ iff _in").unwrap();
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
        assert_eq!(tokens[1].text, "fun_");
    }

    #[test]
    fn test_two_char_operators_win() {
        assert_eq!(texts("== != <= >= ->"), vec!["==", "!=", "<=", ">=", "->"]);
        assert_eq!(kinds("<= ->"), vec![TokenKind::Operator, TokenKind::Arrow]);
        // Without whitespace the longest match still applies
        assert_eq!(texts("a<=b"), vec!["a", "<=", "b"]);
        assert_eq!(texts("x->x"), vec!["x", "->", "x"]);
    }

    #[test]
    fn test_one_char_operators() {
        let tokens = tokenize("+ - * / = < >").unwrap();
        assert_eq!(tokens.len(), 7);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Operator));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(texts("42 3.14 007"), vec!["42", "3.14", "007"]);
        assert!(kinds("1.5").iter().all(|k| *k == TokenKind::Number));
    }

    #[test]
    fn test_number_followed_by_identifier() {
        assert_eq!(kinds("2x"), vec![TokenKind::Number, TokenKind::Identifier]);
    }

    #[test]
    fn test_dangling_decimal_point_is_error() {
        let err = tokenize("1.").unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 2));
        assert!(err.message.contains('.'));
    }

    #[test]
    fn test_parens_and_semicolon() {
        assert_eq!(
            kinds("(f);"),
            vec![
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::RParen,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_unknown_character() {
        let err = tokenize("@@@").unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 1));
        assert_eq!(err.message, "Unexpected character: '@'");
    }

    #[test]
    fn test_lone_bang_is_error() {
        assert!(tokenize("a ! b").is_err());
    }

    #[test]
    fn test_locations_track_lines() {
        let tokens = tokenize("let x =\n  5\nin x").unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[4].location, SourceLocation::new(3, 1));
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize(" \t\r\n ").unwrap().is_empty());
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_token_display() {
        let loc = SourceLocation::new(1, 1);
        assert_eq!(Token::new(TokenKind::Number, "5", loc).to_string(), "number 5");
        assert_eq!(
            Token::new(TokenKind::Identifier, "x", loc).to_string(),
            "identifier 'x'"
        );
        assert_eq!(Token::new(TokenKind::In, "in", loc).to_string(), "'in'");
        assert_eq!(TokenKind::In.to_string(), "IN");
    }
}
