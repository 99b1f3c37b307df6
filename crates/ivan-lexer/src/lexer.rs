// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation using logos.

use ivan_ast::token::{Token, TokenKind};
use ivan_ast::Span;
use logos::Logos;
use tracing::debug;

use crate::error::{LexError, LexErrorKind};
use crate::keywords::keyword;
use crate::line_tracker::LineTracker;

/// Errors raised from inside logos callbacks.
#[derive(Debug, Clone, PartialEq, Default)]
enum RawError {
    #[default]
    Unrecognized,
    UnsupportedBlockComment,
    UnterminatedDocComment,
}

/// Raw token type for logos - keywords and doc lines are handled in a second pass.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = RawError)]
#[logos(skip r"\s+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    /// Holds the offset of the comment body within the token.
    #[token("/*", doc_comment)]
    DocComment(usize),

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token("&")]
    Amp,

    // Keywords are split off in `convert_token`
    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Ident,
}

/// Consume a `/** ... */` doc comment. Any other `/*` is rejected.
fn doc_comment(lexer: &mut logos::Lexer<RawToken>) -> Result<usize, RawError> {
    let remainder = lexer.remainder();
    let header = ["*\n", "*\r\n"]
        .iter()
        .find(|header| remainder.starts_with(**header))
        .map(|header| header.len())
        .ok_or(RawError::UnsupportedBlockComment)?;

    match remainder[header..].find("*/") {
        Some(close) => {
            lexer.bump(header + close + 2);
            Ok(2 + header)
        }
        None => {
            lexer.bump(remainder.len());
            Err(RawError::UnterminatedDocComment)
        }
    }
}

/// The lexer for Ivan source text.
pub struct Lexer<'a> {
    source: &'a str,
    tracker: LineTracker<'a>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tracker: LineTracker::new(source),
        }
    }

    /// Tokenize the entire source, stopping at the first error.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut logos_lexer = RawToken::lexer(self.source);

        while let Some(result) = logos_lexer.next() {
            let range = logos_lexer.span();
            let span = self.tracker.span_at(range.start);

            let kind = match result {
                Ok(raw) => self.convert_token(raw, logos_lexer.slice(), range.start, span)?,
                Err(err) => return Err(self.convert_error(err, range.start, span)),
            };
            tokens.push(Token::new(kind, span));
        }

        debug!(tokens = tokens.len(), "lexed source");
        Ok(tokens)
    }

    fn convert_token(
        &mut self,
        raw: RawToken,
        slice: &str,
        start: usize,
        span: Span,
    ) -> Result<TokenKind, LexError> {
        Ok(match raw {
            RawToken::DocComment(body_start) => {
                // The slice always ends with the `*/` found by the callback.
                let body = &slice[body_start..slice.len() - 2];
                let lines = self.doc_lines(body, start + body_start, span)?;
                TokenKind::DocComment(lines.join("\n"))
            }

            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Amp => TokenKind::Amp,

            RawToken::Ident => keyword(slice).unwrap_or_else(|| TokenKind::Ident(slice.to_string())),
        })
    }

    /// Split a doc comment body into its documentation lines.
    ///
    /// `offset` is the byte offset of `body` in the source.
    fn doc_lines(&mut self, body: &str, offset: usize, start: Span) -> Result<Vec<String>, LexError> {
        if !body.is_empty() && !body.ends_with(char::is_whitespace) {
            let span = self.tracker.span_at(offset + body.len());
            return Err(LexError::new(LexErrorKind::MisplacedDocTerminator, span));
        }

        let mut lines = Vec::new();
        let mut line_offset = offset;
        for line in body.split('\n') {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                // blank
            } else if trimmed == "*" {
                lines.push(String::new());
            } else if let Some(text) = trimmed.strip_prefix("* ") {
                lines.push(text.to_string());
            } else {
                let indent = line.len() - line.trim_start().len();
                let span = self.tracker.span_at(line_offset + indent);
                return Err(LexError::new(LexErrorKind::MalformedDocLine, span));
            }
            line_offset += line.len() + 1;
        }

        if lines.is_empty() {
            return Err(LexError::new(LexErrorKind::EmptyDocComment, start));
        }
        Ok(lines)
    }

    fn convert_error(&self, err: RawError, start: usize, span: Span) -> LexError {
        match err {
            RawError::Unrecognized => {
                let ch = self.source[start..].chars().next().unwrap_or('?');
                LexError::unexpected_char(ch, span)
            }
            RawError::UnsupportedBlockComment => {
                LexError::new(LexErrorKind::UnsupportedBlockComment, span)
            }
            RawError::UnterminatedDocComment => {
                LexError::new(LexErrorKind::UnterminatedDocComment, span)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().unwrap()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    fn lex_err(source: &str) -> LexError {
        Lexer::new(source).tokenize().unwrap_err()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Ident(name.to_string())
    }

    #[test]
    fn empty_source() {
        assert!(lex("").is_empty());
        assert!(lex("  \n\t // only a comment\n").is_empty());
    }

    #[test]
    fn keywords() {
        assert_eq!(
            lex("fun interface"),
            vec![
                Token::new(TokenKind::Fun, Span::new(1, 0)),
                Token::new(TokenKind::Interface, Span::new(1, 4)),
            ]
        );
        assert_eq!(
            kinds("raw mut own opaque type self Self opt"),
            vec![
                TokenKind::Raw,
                TokenKind::Mut,
                TokenKind::Own,
                TokenKind::Opaque,
                TokenKind::Type,
                TokenKind::SelfValue,
                TokenKind::SelfType,
                TokenKind::Opt,
            ]
        );
    }

    #[test]
    fn keyword_prefix_is_an_identifier() {
        assert_eq!(kinds("funny types"), vec![ident("funny"), ident("types")]);
    }

    #[test]
    fn symbols() {
        assert_eq!(
            kinds("{}():;,&"),
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Colon,
                TokenKind::Semi,
                TokenKind::Comma,
                TokenKind::Amp,
            ]
        );
    }

    #[test]
    fn spans_across_lines() {
        assert_eq!(
            lex("interface {\n    hello self\n}"),
            vec![
                Token::new(TokenKind::Interface, Span::new(1, 0)),
                Token::new(TokenKind::LBrace, Span::new(1, 10)),
                Token::new(ident("hello"), Span::new(2, 4)),
                Token::new(TokenKind::SelfValue, Span::new(2, 10)),
                Token::new(TokenKind::RBrace, Span::new(3, 0)),
            ]
        );
    }

    #[test]
    fn function_signature() {
        assert_eq!(
            kinds("fun foo(a: &mut Example): u32;"),
            vec![
                TokenKind::Fun,
                ident("foo"),
                TokenKind::LParen,
                ident("a"),
                TokenKind::Colon,
                TokenKind::Amp,
                TokenKind::Mut,
                ident("Example"),
                TokenKind::RParen,
                TokenKind::Colon,
                ident("u32"),
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn line_comments_are_skipped() {
        assert_eq!(
            lex("fun // trailing words\nfoo"),
            vec![
                Token::new(TokenKind::Fun, Span::new(1, 0)),
                Token::new(ident("foo"), Span::new(2, 0)),
            ]
        );
    }

    #[test]
    fn unicode_identifiers() {
        assert_eq!(kinds("größe _x x1"), vec![ident("größe"), ident("_x"), ident("x1")]);
        let tokens = lex("äö x");
        assert_eq!(tokens[1].span, Span::new(1, 3));
    }

    #[test]
    fn doc_comment() {
        let source = "/**\n    * This is\n    * multiline doc\n    *\n    * comment\n    */\n    fun hello";
        assert_eq!(
            lex(source),
            vec![
                Token::new(
                    TokenKind::DocComment("This is\nmultiline doc\n\ncomment".to_string()),
                    Span::new(1, 0)
                ),
                Token::new(TokenKind::Fun, Span::new(7, 4)),
                Token::new(ident("hello"), Span::new(7, 8)),
            ]
        );
    }

    #[test]
    fn doc_comment_with_crlf() {
        assert_eq!(
            kinds("/**\r\n * Hello\r\n */\r\nfun"),
            vec![TokenKind::DocComment("Hello".to_string()), TokenKind::Fun]
        );
    }

    #[test]
    fn doc_comment_ends_at_first_terminator() {
        assert_eq!(
            kinds("/**\n * a\n */ fun"),
            vec![TokenKind::DocComment("a".to_string()), TokenKind::Fun]
        );
        let err = lex_err("/**\n * a\n */ */");
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('*'));
        assert_eq!(err.span, Span::new(3, 4));
    }

    #[test]
    fn lexing_is_deterministic() {
        let source = "/**\n * doc\n */\ninterface Basic { fun noArgs(): i64; }";
        assert_eq!(lex(source), lex(source));
    }

    #[test]
    fn unexpected_char() {
        let err = lex_err("fun $");
        assert_eq!(err.kind, LexErrorKind::UnexpectedChar('$'));
        assert_eq!(err.span, Span::new(1, 4));
    }

    #[test]
    fn lone_slash_is_unexpected() {
        assert_eq!(lex_err("a / b").kind, LexErrorKind::UnexpectedChar('/'));
    }

    #[test]
    fn block_comments_are_rejected() {
        let err = lex_err("fun\n  /* nope */");
        assert_eq!(err.kind, LexErrorKind::UnsupportedBlockComment);
        assert_eq!(err.span, Span::new(2, 2));

        assert_eq!(lex_err("/** same line */").kind, LexErrorKind::UnsupportedBlockComment);
    }

    #[test]
    fn unterminated_doc_comment() {
        let err = lex_err("fun\n/**\n * never closed\n");
        assert_eq!(err.kind, LexErrorKind::UnterminatedDocComment);
        assert_eq!(err.span, Span::new(2, 0));
    }

    #[test]
    fn malformed_doc_line() {
        let err = lex_err("/**\n * fine\n   oops\n */");
        assert_eq!(err.kind, LexErrorKind::MalformedDocLine);
        assert_eq!(err.span, Span::new(3, 3));
    }

    #[test]
    fn terminator_needs_whitespace() {
        let err = lex_err("/**\n * text*/");
        assert_eq!(err.kind, LexErrorKind::MisplacedDocTerminator);
        assert_eq!(err.span, Span::new(2, 7));
    }

    #[test]
    fn empty_doc_comment() {
        let err = lex_err("fun\n/**\n\n */");
        assert_eq!(err.kind, LexErrorKind::EmptyDocComment);
        assert_eq!(err.span, Span::new(2, 0));
    }
}
