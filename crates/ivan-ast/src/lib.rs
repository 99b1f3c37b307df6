// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for the Ivan interface language.
//!
//! This crate defines the tokens, items and native types shared between
//! the lexer, parser, type resolution and the code generators.

pub mod doc;
pub mod item;
pub mod span;
pub mod token;
pub mod ty;

pub use doc::{DocString, EmptyDocString};
pub use item::{FunctionArg, FunctionDef, InterfaceDef, OpaqueTypeDef, PrimaryItem};
pub use span::Span;
pub use ty::{
    FixedIntegerType, InterfaceType, NativeType, OpaqueType, PrimitiveType, ReferenceKind,
    ReferenceType, UnresolvedType,
};
