// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The Ivan compilation pipeline.
//!
//! One compilation unit goes text → tokens → items → type context →
//! generated artifact. The first error in any phase ends the unit.

use std::fmt;

use ivan_ast::Span;
use ivan_codegen::{GenerateConfig, GenerateError};
use ivan_lexer::LexError;
use ivan_parser::{ParseError, SyntaxError};
use ivan_types::{TypeContext, TypeError};
use thiserror::Error;
use tracing::debug;

pub use ivan_codegen::{OnMissing, TargetLanguage, WrapperConfig};

/// Compile one unit of Ivan source into the artifact described by `config`.
pub fn compile(source: &str, config: &GenerateConfig) -> Result<String, CompileError> {
    let tokens = ivan_lexer::lex(source)?;
    let items = ivan_parser::parse(tokens)?;
    let context = TypeContext::build(&items, &config.opaque_types)?;
    debug!(items = items.len(), types = context.len(), "front end finished");
    let output = ivan_codegen::generate(&items, &context, config)?;
    debug!(bytes = output.len(), "generated {}", config.module_name);
    Ok(output)
}

/// The pipeline stage an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lex,
    Parse,
    Resolve,
    Generate,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Lex => "Lex",
            Phase::Parse => "Parse",
            Phase::Resolve => "Resolve",
            Phase::Generate => "Generate",
        })
    }
}

/// Any error from any phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Generate(GenerateError),
}

impl From<SyntaxError> for CompileError {
    fn from(err: SyntaxError) -> Self {
        match err {
            SyntaxError::Lex(e) => CompileError::Lex(e),
            SyntaxError::Parse(e) => CompileError::Parse(e),
        }
    }
}

impl From<GenerateError> for CompileError {
    fn from(err: GenerateError) -> Self {
        match err {
            // Resolution happens again inside generation
            GenerateError::Type(e) => CompileError::Type(e),
            other => CompileError::Generate(other),
        }
    }
}

impl CompileError {
    /// Where in the source the error is, if it has a location.
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Lex(e) => Some(e.span),
            CompileError::Parse(e) => Some(e.span),
            CompileError::Type(e) => Some(e.span),
            CompileError::Generate(e) => e.span(),
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            CompileError::Lex(_) => Phase::Lex,
            CompileError::Parse(_) => Phase::Parse,
            CompileError::Type(_) => Phase::Resolve,
            CompileError::Generate(_) => Phase::Generate,
        }
    }
}
