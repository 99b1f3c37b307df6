// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use ivan_ast::token::TokenKind;

/// Get a hint for an "expected X" error based on context.
pub fn for_expected(expected: &str, found: Option<&TokenKind>) -> Option<&'static str> {
    match (expected, found) {
        ("':'", Some(TokenKind::Ident(_))) => Some("arguments are written as name: Type"),
        ("':'", _) => Some("syntax: name: Type"),

        ("';'", Some(TokenKind::Ident(_))) => Some("return types are written after ':' like 'fun f(): int;'"),
        ("';'", _) => Some("declarations end with ';'"),

        ("'{'", _) => Some("interface bodies start with '{'"),
        ("'}'", None) => Some("every '{' needs a matching '}'"),
        ("'('", _) => Some("functions need a parameter list, even if empty: 'fun f();'"),
        ("')'", None) => Some("add ')' to close the parameter list"),
        ("',' or ')'", _) => Some("separate arguments with ','"),

        ("keyword 'type'", _) => Some("opaque types are declared as 'opaque type Name;'"),

        ("a name", Some(kind)) if kind.is_keyword() => {
            Some("keywords can't be used as names")
        }
        ("a name", _) => Some("names start with a letter or '_'"),

        ("a type", Some(TokenKind::Amp)) => Some("references are written '&T', '&mut T', '&own T' or '&raw T'"),
        ("a type", _) => Some("try a primitive like 'int', a fixed integer like 'u32', or a declared type"),

        ("'fun' or '}'", Some(TokenKind::Opaque | TokenKind::Interface)) => {
            Some("interfaces can only contain methods")
        }

        (s, _) if s.starts_with("declaration") => {
            Some("start with 'fun', 'interface' or 'opaque type'")
        }

        _ => None,
    }
}
