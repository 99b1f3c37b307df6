// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for the Ivan interface language.
//!
//! Tokenizes source text into a stream of tokens for the parser. The first
//! error aborts the pass.

mod error;
mod keywords;
mod lexer;
mod line_tracker;

pub use error::{LexError, LexErrorKind};
pub use keywords::keyword;
pub use lexer::Lexer;
pub use line_tracker::LineTracker;

use ivan_ast::token::Token;

/// Tokenize `source` in one pass.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
