// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Top-level item AST nodes.

use crate::ty::NativeType;
use crate::{DocString, Span};

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryItem {
    /// Free function declaration
    Function(FunctionDef),
    /// Interface (vtable) declaration
    Interface(InterfaceDef),
    /// Opaque type declaration
    OpaqueType(OpaqueTypeDef),
}

impl PrimaryItem {
    pub fn name(&self) -> &str {
        match self {
            PrimaryItem::Function(f) => &f.name,
            PrimaryItem::Interface(i) => &i.name,
            PrimaryItem::OpaqueType(o) => &o.name,
        }
    }

    /// The span of the declared name.
    pub fn span(&self) -> Span {
        match self {
            PrimaryItem::Function(f) => f.span,
            PrimaryItem::Interface(i) => i.span,
            PrimaryItem::OpaqueType(o) => o.span,
        }
    }

    pub fn doc_string(&self) -> Option<&DocString> {
        match self {
            PrimaryItem::Function(f) => f.doc_string.as_ref(),
            PrimaryItem::Interface(i) => i.doc_string.as_ref(),
            PrimaryItem::OpaqueType(o) => o.doc_string.as_ref(),
        }
    }
}

/// A function declaration, either free-standing or an interface method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub args: Vec<FunctionArg>,
    pub return_type: NativeType,
    pub doc_string: Option<DocString>,
    pub span: Span,
    /// Set for interface methods declared `opt fun`; the vtable slot may be null.
    pub optional: bool,
}

impl FunctionDef {
    /// Iterate over every type mentioned in the signature, return type last.
    pub fn types(&self) -> impl Iterator<Item = &NativeType> {
        self.args.iter().map(|arg| &arg.ty).chain(std::iter::once(&self.return_type))
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArg {
    pub name: String,
    pub ty: NativeType,
}

impl FunctionArg {
    pub fn new(name: impl Into<String>, ty: NativeType) -> Self {
        Self { name: name.into(), ty }
    }
}

/// An interface: a named set of methods rendered as a struct of function pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDef {
    pub name: String,
    pub methods: Vec<FunctionDef>,
    pub doc_string: Option<DocString>,
    pub span: Span,
}

impl InterfaceDef {
    pub fn method(&self, name: &str) -> Option<&FunctionDef> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A type whose layout lives in the target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueTypeDef {
    pub name: String,
    pub doc_string: Option<DocString>,
    pub span: Span,
}
