//! Top-level error type for [`crate::parse`]

use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use thiserror::Error;

/// Either stage of the pipeline can fail; nothing is returned on failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
