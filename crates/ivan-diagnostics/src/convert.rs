// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from compiler error types to `Diagnostic`.

use crate::{Diagnostic, ToDiagnostic};

// ============================================================================
// Syntax Errors
// ============================================================================

impl ToDiagnostic for ivan_lexer::LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        use ivan_lexer::LexErrorKind::*;

        let label = match self.kind {
            UnexpectedChar(_) => "unexpected character",
            UnsupportedBlockComment => "comment starts here",
            UnterminatedDocComment => "doc comment starts here",
            MalformedDocLine => "expected `* `",
            MisplacedDocTerminator => "terminator here",
            EmptyDocComment => "doc comment has no text",
        };
        Diagnostic::error(self.kind.to_string())
            .with_code("E0001")
            .with_primary(self.span, label)
            .with_optional_help(self.hint())
    }
}

impl ToDiagnostic for ivan_parser::ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(&self.message)
            .with_code("E0100")
            .with_primary(self.span, "here")
            .with_optional_help(self.hint.as_deref())
    }
}

impl ToDiagnostic for ivan_parser::SyntaxError {
    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ivan_parser::SyntaxError::Lex(e) => e.to_diagnostic(),
            ivan_parser::SyntaxError::Parse(e) => e.to_diagnostic(),
        }
    }
}

// ============================================================================
// Type Errors
// ============================================================================

impl ToDiagnostic for ivan_types::TypeError {
    fn to_diagnostic(&self) -> Diagnostic {
        use ivan_types::TypeErrorKind::*;

        match &self.kind {
            UnresolvedType { name } => Diagnostic::error(format!("unresolved type: `{}`", name))
                .with_code("E0200")
                .with_primary(self.span, "not declared in this unit")
                .with_note("types are declared with `opaque type` or `interface`"),

            DuplicateType { name, previous } => Diagnostic::error(format!("duplicate type: `{}`", name))
                .with_code("E0201")
                .with_primary(self.span, "declared again here")
                .with_secondary(*previous, "first declared here"),

            ShadowsBuiltin { name } => Diagnostic::error(format!("`{}` shadows a builtin type", name))
                .with_code("E0202")
                .with_primary(self.span, "cannot redeclare a builtin")
                .with_help("use a different name"),
        }
    }
}

// ============================================================================
// Generation Errors
// ============================================================================

impl ToDiagnostic for ivan_codegen::GenerateError {
    fn to_diagnostic(&self) -> Diagnostic {
        use ivan_codegen::GenerateError::*;

        let (code, label) = match self {
            Type(e) => return e.to_diagnostic(),
            InvalidModuleName { .. } => ("E0300", None),
            InvalidImport { .. } => ("E0301", None),
            UnknownWrapperInterface { .. } => ("E0302", None),
            UnknownWrapperMethod { .. } => ("E0303", None),
            WrapperArgConflict { .. } => ("E0304", Some("in this method")),
            NoDefaultValue { .. } => ("E0305", Some("optional method declared here")),
            UnknownOpaqueType { .. } => ("E0306", None),
            ReservedIdentifier { .. } => ("E0307", Some("declared here")),
        };
        let mut diag = Diagnostic::error(self.to_string()).with_code(code);
        if let (Some(span), Some(label)) = (self.span(), label) {
            diag = diag.with_primary(span, label);
        }
        if let NoDefaultValue { .. } = self {
            diag = diag.with_note("`returnDefault` wrappers return a default value when the member is null");
        }
        diag.with_optional_help(self.hint())
    }
}

impl ToDiagnostic for ivan_compiler::CompileError {
    fn to_diagnostic(&self) -> Diagnostic {
        use ivan_compiler::CompileError::*;

        match self {
            Lex(e) => e.to_diagnostic(),
            Parse(e) => e.to_diagnostic(),
            Type(e) => e.to_diagnostic(),
            Generate(e) => e.to_diagnostic(),
        }
    }
}
