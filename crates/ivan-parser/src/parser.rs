// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The recursive descent parser.

use std::sync::OnceLock;

use ivan_ast::token::{Token, TokenKind};
use ivan_ast::{
    DocString, FixedIntegerType, FunctionArg, FunctionDef, InterfaceDef, NativeType,
    OpaqueTypeDef, PrimaryItem, PrimitiveType, ReferenceKind, Span,
};
use regex::Regex;
use thiserror::Error;
use tracing::{debug, trace};

/// The parser for Ivan source.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse every top-level item, stopping at the first error.
    pub fn parse(mut self) -> Result<Vec<PrimaryItem>, ParseError> {
        let mut items = Vec::new();
        while !self.at_end() {
            let item = self.parse_item()?;
            trace!(name = item.name(), "parsed item");
            items.push(item);
        }
        debug!(items = items.len(), "parsed source");
        Ok(items)
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<&TokenKind> {
        self.current().map(|t| &t.kind)
    }

    /// The span of the current token. At the end of input this is the
    /// span of the last token.
    fn current_span(&self) -> Span {
        self.current()
            .or_else(|| self.tokens.last())
            .map(|t| t.span)
            .unwrap_or(Span::new(1, 0))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Span {
        let span = self.current_span();
        if !self.at_end() {
            self.pos += 1;
        }
        span
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind()
            .is_some_and(|k| std::mem::discriminant(k) == std::mem::discriminant(kind))
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(&kind.display_name()))
        }
    }

    fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        match self.current_kind() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                Ok((name, self.advance()))
            }
            _ => Err(self.error_expected("a name")),
        }
    }

    fn error_expected(&self, expected: &str) -> ParseError {
        ParseError::expected(expected, self.current_kind(), self.current_span())
    }

    // =========================================================================
    // Items
    // =========================================================================

    fn parse_item(&mut self) -> Result<PrimaryItem, ParseError> {
        let doc_string = self.parse_doc_comment()?;
        if let Some(doc) = &doc_string {
            if self.check(&TokenKind::DocComment(String::new())) {
                return Err(ParseError::multiple_doc_comments(self.current_span(), doc.span()));
            }
        }

        match self.current_kind() {
            Some(TokenKind::Fun) => Ok(PrimaryItem::Function(self.parse_function(doc_string, false)?)),
            Some(TokenKind::Interface) => Ok(PrimaryItem::Interface(self.parse_interface(doc_string)?)),
            Some(TokenKind::Opaque) => Ok(PrimaryItem::OpaqueType(self.parse_opaque_type(doc_string)?)),
            Some(TokenKind::Opt) => Err(ParseError::new(
                "'opt' is only allowed on interface methods",
                self.current_span(),
            )
            .with_hint("write 'opt fun name(...);' inside an interface body")),
            None if doc_string.is_some() => Err(ParseError::new(
                "Doc comment is not attached to any declaration",
                self.current_span(),
            )),
            _ => Err(self.error_expected("declaration ('fun', 'interface' or 'opaque type')")),
        }
    }

    /// Parse a doc comment token, if one is next.
    fn parse_doc_comment(&mut self) -> Result<Option<DocString>, ParseError> {
        let text = match self.current_kind() {
            Some(TokenKind::DocComment(text)) => text.clone(),
            _ => return Ok(None),
        };
        let span = self.advance();
        let lines = text.split('\n').map(String::from).collect();
        DocString::new(lines, span)
            .map(Some)
            .map_err(|_| ParseError::new("Empty doc comment", span))
    }

    fn parse_opaque_type(&mut self, doc_string: Option<DocString>) -> Result<OpaqueTypeDef, ParseError> {
        self.expect(&TokenKind::Opaque)?;
        self.expect(&TokenKind::Type)?;
        let (name, span) = self.expect_ident()?;
        self.expect(&TokenKind::Semi)?;
        Ok(OpaqueTypeDef { name, doc_string, span })
    }

    fn parse_interface(&mut self, doc_string: Option<DocString>) -> Result<InterfaceDef, ParseError> {
        self.expect(&TokenKind::Interface)?;
        let (name, span) = self.expect_ident()?;
        self.expect(&TokenKind::LBrace)?;

        let mut methods: Vec<FunctionDef> = Vec::new();
        let mut pending: Option<DocString> = None;
        loop {
            let method = match self.current_kind() {
                Some(TokenKind::RBrace) => {
                    if let Some(doc) = pending {
                        return Err(ParseError::dangling_doc_comment(doc.span()));
                    }
                    self.advance();
                    break;
                }
                Some(TokenKind::DocComment(_)) => {
                    if let Some(doc) = &pending {
                        return Err(ParseError::multiple_doc_comments(self.current_span(), doc.span()));
                    }
                    pending = self.parse_doc_comment()?;
                    continue;
                }
                Some(TokenKind::Opt) => {
                    self.advance();
                    self.parse_function(pending.take(), true)?
                }
                Some(TokenKind::Fun) => self.parse_function(pending.take(), false)?,
                None => return Err(self.error_expected("'}'")),
                Some(_) => return Err(self.error_expected("'fun' or '}'")),
            };

            if methods.iter().any(|m| m.name == method.name) {
                return Err(ParseError::new(
                    format!("Duplicate method '{}' in interface '{}'", method.name, name),
                    method.span,
                ));
            }
            methods.push(method);
        }

        Ok(InterfaceDef { name, methods, doc_string, span })
    }

    fn parse_function(
        &mut self,
        doc_string: Option<DocString>,
        optional: bool,
    ) -> Result<FunctionDef, ParseError> {
        self.expect(&TokenKind::Fun)?;
        let (name, span) = self.expect_ident()?;
        self.expect(&TokenKind::LParen)?;

        let mut args: Vec<FunctionArg> = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let (arg_name, arg_span) = self.expect_ident()?;
                self.expect(&TokenKind::Colon)?;
                let ty = self.parse_type()?;
                if args.iter().any(|a| a.name == arg_name) {
                    return Err(ParseError::new(
                        format!("Duplicate argument '{}' in function '{}'", arg_name, name),
                        arg_span,
                    ));
                }
                args.push(FunctionArg::new(arg_name, ty));

                match self.current_kind() {
                    Some(TokenKind::Comma) => {
                        self.advance();
                    }
                    Some(TokenKind::RParen) => break,
                    _ => return Err(self.error_expected("',' or ')'")),
                }
            }
        }
        self.expect(&TokenKind::RParen)?;

        let return_type = if self.check(&TokenKind::Colon) {
            self.advance();
            self.parse_type()?
        } else {
            NativeType::UNIT
        };
        self.expect(&TokenKind::Semi)?;

        Ok(FunctionDef {
            name,
            args,
            return_type,
            doc_string,
            span,
            optional,
        })
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn parse_type(&mut self) -> Result<NativeType, ParseError> {
        match self.current_kind() {
            Some(TokenKind::Opt) => {
                self.advance();
                if !self.check(&TokenKind::Amp) {
                    return Err(self
                        .error_expected("'&' after 'opt'")
                        .with_hint("only references can be optional, as in `opt &T`"));
                }
                let (target, kind) = self.parse_reference()?;
                Ok(NativeType::optional_reference(target, kind))
            }
            Some(TokenKind::Amp) => {
                let (target, kind) = self.parse_reference()?;
                Ok(NativeType::reference(target, kind))
            }
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                let span = self.advance();
                Ok(classify_type_name(&name, span))
            }
            _ => Err(self.error_expected("a type")),
        }
    }

    /// `&` followed by an optional kind keyword and the target type.
    fn parse_reference(&mut self) -> Result<(NativeType, ReferenceKind), ParseError> {
        self.expect(&TokenKind::Amp)?;
        let kind = match self.current_kind() {
            Some(TokenKind::Raw) => ReferenceKind::Raw,
            Some(TokenKind::Own) => ReferenceKind::Owned,
            Some(TokenKind::Mut) => ReferenceKind::Mutable,
            _ => ReferenceKind::Immutable,
        };
        if kind != ReferenceKind::Immutable {
            self.advance();
        }
        Ok((self.parse_type()?, kind))
    }
}

fn fixed_integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([iu])(8|16|32|64)$").expect("fixed integer pattern is valid"))
}

/// Map a type name to a primitive, a fixed-size integer, or an unresolved name.
fn classify_type_name(name: &str, span: Span) -> NativeType {
    if let Some(primitive) = PrimitiveType::from_name(name) {
        return NativeType::Primitive(primitive);
    }
    if let Some(caps) = fixed_integer_pattern().captures(name) {
        let signed = &caps[1] == "i";
        let fixed = caps[2].parse().ok().and_then(|bits| FixedIntegerType::new(bits, signed));
        if let Some(fixed) = fixed {
            return NativeType::FixedInteger(fixed);
        }
    }
    NativeType::unresolved(name, span)
}

/// A parse error with location and friendly message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            span,
            message: message.into(),
            hint: None,
        }
    }

    fn expected(expected: &str, found: Option<&TokenKind>, span: Span) -> Self {
        let message = format_expected_message(expected, found);
        let hint = crate::hints::for_expected(expected, found).map(String::from);
        Self { span, message, hint }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn multiple_doc_comments(span: Span, previous: Span) -> Self {
        Self::new("Multiple doc comments", span)
            .with_hint(format!("a doc comment already started at {}", previous))
    }

    fn dangling_doc_comment(span: Span) -> Self {
        Self::new("Doc comment is not attached to any method", span)
            .with_hint("move the doc comment before a 'fun', or remove it")
    }
}

/// Format a user-friendly "expected X, found Y" message.
fn format_expected_message(expected: &str, found: Option<&TokenKind>) -> String {
    let found_name = match found {
        Some(kind) => kind.display_name(),
        None => "end of file".to_string(),
    };
    match (expected, found) {
        ("')'", None) => "Unclosed '(' - missing ')'".to_string(),
        ("'}'", None) => "Unclosed '{' - missing '}'".to_string(),
        ("'{'", _) => format!("Expected '{{' to start interface body, found {}", found_name),
        ("';'", _) => format!("Expected ';' after declaration, found {}", found_name),
        _ => format!("Expected {}, found {}", expected, found_name),
    }
}
