// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Identifiers the target languages reserve.

use std::borrow::Cow;

use ivan_ast::{FunctionDef, PrimaryItem, Span};
use ivan_types::Target;

use crate::error::GenerateError;

/// C11 keywords, plus the `<stdbool.h>` and `<stdlib.h>` macros every
/// generated header pulls in.
const C_RESERVED: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else", "enum",
    "extern", "float", "for", "goto", "if", "inline", "int", "long", "register", "restrict", "return",
    "short", "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while", "_Alignas", "_Alignof", "_Atomic", "_Bool", "_Complex", "_Generic",
    "_Imaginary", "_Noreturn", "_Static_assert", "_Thread_local", "bool", "true", "false", "NULL",
];

/// Strict and reserved keywords of Rust 2021.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Keywords that are not allowed as raw identifiers either.
const RUST_UNESCAPABLE: &[&str] = &["crate", "self", "Self", "super"];

fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// `name` as a Rust value identifier, raw if it is a keyword.
pub fn rust_ident(name: &str) -> Cow<'_, str> {
    if is_rust_keyword(name) {
        Cow::Owned(format!("r#{}", name))
    } else {
        Cow::Borrowed(name)
    }
}

/// Whether `name` can't be written in `target` output at all.
///
/// Type names are spelled as they are, so any Rust keyword is rejected
/// there. Value names only fail when `r#` can't escape them.
fn is_reserved(name: &str, target: Target, is_type: bool) -> bool {
    match target {
        Target::C => C_RESERVED.contains(&name),
        Target::Rust if is_type => is_rust_keyword(name),
        Target::Rust => RUST_UNESCAPABLE.contains(&name),
    }
}

/// Reject the first declared name that `target` reserves.
pub fn check(items: &[PrimaryItem], target: Target) -> Result<(), GenerateError> {
    let reserved = |name: &str, span: Span, is_type: bool| {
        if is_reserved(name, target, is_type) {
            Err(GenerateError::ReservedIdentifier {
                name: name.to_string(),
                target,
                span,
            })
        } else {
            Ok(())
        }
    };
    let function = |f: &FunctionDef| {
        reserved(&f.name, f.span, false)?;
        // Arguments carry no span of their own
        f.args.iter().try_for_each(|arg| reserved(&arg.name, f.span, false))
    };

    for item in items {
        match item {
            PrimaryItem::Function(f) => function(f)?,
            PrimaryItem::Interface(interface) => {
                reserved(&interface.name, interface.span, true)?;
                interface.methods.iter().try_for_each(|method| function(method))?;
            }
            PrimaryItem::OpaqueType(opaque) => reserved(&opaque.name, opaque.span, true)?,
        }
    }
    Ok(())
}
