// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The reserved word table.

use std::collections::HashMap;
use std::sync::OnceLock;

use ivan_ast::token::TokenKind;

const KEYWORDS: [TokenKind; 10] = [
    TokenKind::Interface,
    TokenKind::Fun,
    TokenKind::Raw,
    TokenKind::Mut,
    TokenKind::Own,
    TokenKind::Opaque,
    TokenKind::Type,
    TokenKind::SelfValue,
    TokenKind::SelfType,
    TokenKind::Opt,
];

static TABLE: OnceLock<HashMap<&'static str, TokenKind>> = OnceLock::new();

fn table() -> &'static HashMap<&'static str, TokenKind> {
    TABLE.get_or_init(|| {
        let mut table = HashMap::with_capacity(KEYWORDS.len());
        for kind in KEYWORDS {
            if let Some(text) = kind.literal() {
                let previous = table.insert(text, kind);
                assert!(previous.is_none(), "keyword '{}' registered twice", text);
            }
        }
        table
    })
}

/// Look up the keyword spelled `ident`, if it is reserved.
pub fn keyword(ident: &str) -> Option<TokenKind> {
    table().get(ident).cloned()
}
