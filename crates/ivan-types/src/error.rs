// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type resolution error types.

use ivan_ast::Span;
use thiserror::Error;

/// A type resolution error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub span: Span,
}

impl TypeError {
    pub fn unresolved(name: String, span: Span) -> Self {
        Self {
            kind: TypeErrorKind::UnresolvedType { name },
            span,
        }
    }

    pub fn duplicate(name: String, span: Span, previous: Span) -> Self {
        Self {
            kind: TypeErrorKind::DuplicateType { name, previous },
            span,
        }
    }

    pub fn shadows_builtin(name: String, span: Span) -> Self {
        Self {
            kind: TypeErrorKind::ShadowsBuiltin { name },
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeErrorKind {
    #[error("unresolved type: {name}")]
    UnresolvedType { name: String },
    #[error("type '{name}' is already declared at {previous}")]
    DuplicateType { name: String, previous: Span },
    #[error("'{name}' is a builtin type and can't be redeclared")]
    ShadowsBuiltin { name: String },
}
