//! MicroML source code parser
//!
//! This module transforms MicroML source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Grammar
//!
//! ```text
//! expression         → letExpr
//! letExpr            → "let" IDENT "=" expression "in" expression | ifExpr
//! ifExpr             → "if" expression "then" expression "else" expression | comparisonExpr
//! comparisonExpr     → additiveExpr (("==" | "!=" | "<" | ">" | "<=" | ">=") additiveExpr)*
//! additiveExpr       → multiplicativeExpr (("+" | "-") multiplicativeExpr)*
//! multiplicativeExpr → applicationExpr (("*" | "/") applicationExpr)*
//! applicationExpr    → atom (atom)*
//! atom               → NUMBER | IDENT | "(" expression ")" | lambdaExpr
//! lambdaExpr         → ("lambda" | "fun") IDENT "->" expression
//! ```
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
mod forms;
pub mod lexer;
pub mod parse;
