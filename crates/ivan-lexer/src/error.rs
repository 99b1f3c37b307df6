// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer error types.

use ivan_ast::Span;
use thiserror::Error;

/// A lexer error with the location of the offending text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn unexpected_char(ch: char, span: Span) -> Self {
        Self::new(LexErrorKind::UnexpectedChar(ch), span)
    }

    /// A short suggestion shown under the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self.kind {
            LexErrorKind::UnsupportedBlockComment => {
                Some("use `//` comments, or start a doc comment with `/**` on its own line")
            }
            LexErrorKind::UnterminatedDocComment => Some("add a closing ` */`"),
            LexErrorKind::MalformedDocLine => Some("write each line as `* text`, or `*` for a blank line"),
            LexErrorKind::MisplacedDocTerminator => Some("put whitespace before the closing `*/`"),
            LexErrorKind::UnexpectedChar(_) | LexErrorKind::EmptyDocComment => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("block comments are not supported")]
    UnsupportedBlockComment,
    #[error("unterminated doc comment")]
    UnterminatedDocComment,
    #[error("doc comment lines must start with `* `")]
    MalformedDocLine,
    #[error("doc comment terminator `*/` must be preceded by whitespace")]
    MisplacedDocTerminator,
    #[error("empty doc comment")]
    EmptyDocComment,
}
