// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Code generation errors.

use ivan_ast::Span;
use ivan_types::{Target, TypeError};
use thiserror::Error;

/// Why an artifact could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("invalid module name '{name}'")]
    InvalidModuleName { name: String },

    #[error("invalid import '{import}' for {target}")]
    InvalidImport { import: String, target: Target },

    #[error("wrappers requested for unknown interface '{interface}'")]
    UnknownWrapperInterface { interface: String },

    #[error("interface '{interface}' has no method '{method}'")]
    UnknownWrapperMethod { interface: String, method: String },

    #[error("method '{interface}.{method}' has an argument named 'vtable', which clashes with the wrapper receiver")]
    WrapperArgConflict {
        interface: String,
        method: String,
        span: Span,
    },

    #[error("{target} has no default value for '{ty}', returned by optional method '{interface}.{method}'")]
    NoDefaultValue {
        interface: String,
        method: String,
        ty: String,
        target: Target,
        span: Span,
    },

    #[error("opaque type mapping for '{name}', which is not a declared opaque type")]
    UnknownOpaqueType { name: String },

    #[error("'{name}' is a reserved word in {target}")]
    ReservedIdentifier { name: String, target: Target, span: Span },
}

impl GenerateError {
    /// The source location of the problem. Configuration errors have none.
    pub fn span(&self) -> Option<Span> {
        match self {
            GenerateError::Type(e) => Some(e.span),
            GenerateError::WrapperArgConflict { span, .. }
            | GenerateError::NoDefaultValue { span, .. }
            | GenerateError::ReservedIdentifier { span, .. } => Some(*span),
            GenerateError::InvalidModuleName { .. }
            | GenerateError::InvalidImport { .. }
            | GenerateError::UnknownWrapperInterface { .. }
            | GenerateError::UnknownWrapperMethod { .. }
            | GenerateError::UnknownOpaqueType { .. } => None,
        }
    }

    /// A short suggestion for fixing the problem, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            GenerateError::InvalidModuleName { .. } => {
                Some("module names may only contain letters, digits, '_', '.' and '-'")
            }
            GenerateError::InvalidImport { target: Target::C, .. } => {
                Some("C imports are written <header.h> or \"header.h\"")
            }
            GenerateError::InvalidImport { target: Target::Rust, .. } => {
                Some("Rust imports are paths like 'crate::ffi::Handle'")
            }
            GenerateError::WrapperArgConflict { .. } => Some("rename the argument"),
            GenerateError::ReservedIdentifier { .. } => Some("rename the declaration"),
            GenerateError::NoDefaultValue { .. } => Some("use \"onMissing\": \"abort\" for this interface"),
            GenerateError::UnknownWrapperMethod { .. } => Some("check the 'allow' and 'deny' lists"),
            GenerateError::Type(_)
            | GenerateError::UnknownWrapperInterface { .. }
            | GenerateError::UnknownOpaqueType { .. } => None,
        }
    }
}
