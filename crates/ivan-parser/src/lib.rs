// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Ivan interface language.
//!
//! Transforms a token stream into top-level items.

mod hints;
mod parser;

pub use parser::{ParseError, Parser};

use ivan_ast::token::Token;
use ivan_ast::{PrimaryItem, Span};
use ivan_lexer::LexError;
use thiserror::Error;

/// Either phase of turning text into items failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(e) => e.span,
            SyntaxError::Parse(e) => e.span,
        }
    }
}

/// Parse an already lexed token stream.
pub fn parse(tokens: Vec<Token>) -> Result<Vec<PrimaryItem>, ParseError> {
    Parser::new(tokens).parse()
}

/// Lex and parse `source`.
pub fn parse_source(source: &str) -> Result<Vec<PrimaryItem>, SyntaxError> {
    let tokens = ivan_lexer::lex(source)?;
    Ok(parse(tokens)?)
}
