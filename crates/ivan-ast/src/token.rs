// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the lexer.

use crate::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Identifier
    Ident(String),

    /// A `/** ... */` comment. The value holds the documentation lines
    /// (leading `*` removed) joined by `\n`.
    DocComment(String),

    // Keywords
    Interface,
    Fun,
    Raw,
    Mut,
    Own,
    Opaque,
    Type,
    SelfValue,
    SelfType,
    Opt,

    // Symbols
    LBrace,
    RBrace,
    LParen,
    RParen,
    Colon,
    Semi,
    Comma,
    Amp,
}

impl TokenKind {
    /// The fixed source text of a keyword or symbol.
    ///
    /// Identifiers and doc comments carry their own text and return `None`.
    pub fn literal(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Ident(_) | TokenKind::DocComment(_) => return None,

            TokenKind::Interface => "interface",
            TokenKind::Fun => "fun",
            TokenKind::Raw => "raw",
            TokenKind::Mut => "mut",
            TokenKind::Own => "own",
            TokenKind::Opaque => "opaque",
            TokenKind::Type => "type",
            TokenKind::SelfValue => "self",
            TokenKind::SelfType => "Self",
            TokenKind::Opt => "opt",

            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Colon => ":",
            TokenKind::Semi => ";",
            TokenKind::Comma => ",",
            TokenKind::Amp => "&",
        })
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Interface
                | TokenKind::Fun
                | TokenKind::Raw
                | TokenKind::Mut
                | TokenKind::Own
                | TokenKind::Opaque
                | TokenKind::Type
                | TokenKind::SelfValue
                | TokenKind::SelfType
                | TokenKind::Opt
        )
    }

    /// Returns a human-readable name for this token kind.
    pub fn display_name(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("name '{}'", name),
            TokenKind::DocComment(_) => "a doc comment".to_string(),
            other => match other.literal() {
                Some(text) if other.is_keyword() => format!("keyword '{}'", text),
                Some(text) => format!("'{}'", text),
                None => unreachable!("only identifiers and doc comments lack a literal"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_of_fixed_kinds() {
        assert_eq!(TokenKind::Interface.literal(), Some("interface"));
        assert_eq!(TokenKind::SelfType.literal(), Some("Self"));
        assert_eq!(TokenKind::Amp.literal(), Some("&"));
        assert_eq!(TokenKind::Ident("x".into()).literal(), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(TokenKind::Fun.display_name(), "keyword 'fun'");
        assert_eq!(TokenKind::Semi.display_name(), "';'");
        assert_eq!(TokenKind::Ident("foo".into()).display_name(), "name 'foo'");
    }
}
