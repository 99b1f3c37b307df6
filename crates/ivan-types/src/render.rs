// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Spelling resolved types in a target language.

use std::fmt;

use ivan_ast::{FixedIntegerType, NativeType, PrimitiveType, ReferenceKind, ReferenceType};

/// A language the generators can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    C,
    Rust,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::C => "C",
            Target::Rust => "Rust",
        })
    }
}

/// Spell `ty` the way `target` writes it.
///
/// Reference kinds only partly survive: C keeps the `const` of an
/// immutable reference and Rust keeps `&`/`&mut`, while owned and raw
/// references both become plain mutable pointers. An optional `&`/`&mut`
/// becomes `Option<..>` in Rust; C pointers and Rust raw pointers are
/// already nullable.
///
/// # Panics
///
/// If `ty` still contains an unresolved name.
pub fn spell(ty: &NativeType, target: Target) -> String {
    match ty {
        NativeType::Primitive(p) => match target {
            Target::C => p.c_name().to_string(),
            Target::Rust => p.rust_name().to_string(),
        },
        NativeType::FixedInteger(i) => spell_fixed_integer(*i, target),
        NativeType::Reference(r) => spell_reference(r, target),
        NativeType::Opaque(o) => o.spelling.clone(),
        NativeType::Interface(i) => i.name.clone(),
        NativeType::Unresolved(u) => {
            unreachable!("type '{}' at {} was never resolved", u.name, u.usage_span)
        }
    }
}

fn spell_fixed_integer(ty: FixedIntegerType, target: Target) -> String {
    match target {
        Target::C if ty.signed() => format!("int{}_t", ty.bits()),
        Target::C => format!("uint{}_t", ty.bits()),
        Target::Rust => ty.to_string(),
    }
}

fn spell_reference(reference: &ReferenceType, target: Target) -> String {
    let inner = spell(&reference.target, target);
    match (target, reference.kind) {
        // Pointer to pointer: the qualifier goes after the inner pointer
        (Target::C, ReferenceKind::Immutable) if matches!(*reference.target, NativeType::Reference(_)) => {
            format!("{} const*", inner)
        }
        (Target::C, ReferenceKind::Immutable) => format!("const {}*", inner),
        (Target::C, _) => format!("{}*", inner),
        (Target::Rust, ReferenceKind::Immutable) if reference.optional => format!("Option<&{}>", inner),
        (Target::Rust, ReferenceKind::Mutable) if reference.optional => format!("Option<&mut {}>", inner),
        (Target::Rust, ReferenceKind::Immutable) => format!("&{}", inner),
        (Target::Rust, ReferenceKind::Mutable) => format!("&mut {}", inner),
        (Target::Rust, ReferenceKind::Owned | ReferenceKind::Raw) => format!("*mut {}", inner),
    }
}

/// The value a generated fallback returns in place of a `ty`.
///
/// For `unit` in C this is empty, meaning a bare `return;`. Returns `None`
/// when the target has no null-like value for the type, such as
/// non-optional Rust references or opaque types passed by value.
pub fn default_value(ty: &NativeType, target: Target) -> Option<String> {
    let value = match ty {
        NativeType::Primitive(p) => match (p, target) {
            (PrimitiveType::Unit, Target::C) => "",
            (PrimitiveType::Unit, Target::Rust) => "()",
            (PrimitiveType::Double, _) => "0.0",
            (PrimitiveType::Bool, _) => "false",
            (PrimitiveType::Int | PrimitiveType::Byte | PrimitiveType::Usize | PrimitiveType::Isize, _) => "0",
        },
        NativeType::FixedInteger(_) => "0",
        NativeType::Reference(r) => match (target, r.kind) {
            (Target::C, _) => "NULL",
            (Target::Rust, ReferenceKind::Owned | ReferenceKind::Raw) => "core::ptr::null_mut()",
            (Target::Rust, ReferenceKind::Immutable | ReferenceKind::Mutable) if r.optional => "None",
            (Target::Rust, ReferenceKind::Immutable | ReferenceKind::Mutable) => return None,
        },
        NativeType::Opaque(_) | NativeType::Interface(_) => return None,
        NativeType::Unresolved(u) => {
            unreachable!("type '{}' at {} was never resolved", u.name, u.usage_span)
        }
    };
    Some(value.to_string())
}
