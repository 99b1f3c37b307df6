// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON diagnostic output for machine consumption.
//!
//! Use `--format json` with the `ivan` binary to get this output.

use serde::Serialize;

use crate::codes::ErrorCodeRegistry;
use crate::{Diagnostic, LabelStyle};

/// A complete JSON diagnostic report for one compilation unit.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Schema version for forward compatibility.
    pub version: u32,
    pub file: String,
    pub success: bool,
    /// The pipeline phase that produced these diagnostics.
    pub phase: String,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
}

/// A single diagnostic in JSON form, with source context.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    pub severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error category (e.g. "Resolution").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    /// Primary source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub labels: Vec<JsonLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// Line is 1-based, column 0-based, matching `Span`.
#[derive(Debug, Serialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub source_line: String,
}

#[derive(Debug, Serialize)]
pub struct JsonLabel {
    /// "primary" or "secondary".
    pub role: LabelStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub location: SourceLocation,
}

/// Convert diagnostics to a structured JSON report.
pub fn to_json_report(diagnostics: &[Diagnostic], source: &str, file: &str, phase: &str) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let diagnostics: Vec<JsonDiagnostic> = diagnostics
        .iter()
        .map(|d| to_json_diagnostic(d, source, &registry))
        .collect();

    DiagnosticReport {
        version: 1,
        file: file.to_string(),
        success: diagnostics.is_empty(),
        phase: phase.to_string(),
        error_count: diagnostics.len(),
        diagnostics,
    }
}

fn to_json_diagnostic(diag: &Diagnostic, source: &str, registry: &ErrorCodeRegistry) -> JsonDiagnostic {
    let code = diag.code.as_ref().map(|c| c.0.clone());
    let category = code
        .as_deref()
        .and_then(|c| registry.get(c))
        .map(|info| info.category.to_string());

    let location_of = |span: ivan_ast::Span| SourceLocation {
        line: span.line,
        column: span.column,
        source_line: get_line(source, span.line).unwrap_or("").to_string(),
    };

    JsonDiagnostic {
        severity: "error",
        code,
        category,
        message: diag.message.clone(),
        location: diag.primary_span().map(location_of),
        labels: diag
            .labels
            .iter()
            .map(|l| JsonLabel {
                role: l.style,
                message: l.message.clone(),
                location: location_of(l.span),
            })
            .collect(),
        notes: diag.notes.clone(),
        help: diag.help.clone(),
    }
}

/// Get source line text by 1-based line number.
fn get_line(source: &str, line_num: u32) -> Option<&str> {
    source.lines().nth((line_num as usize).checked_sub(1)?)
}

/// Serialize a diagnostic report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToDiagnostic;
    use ivan_codegen::{GenerateConfig, TargetLanguage};
    use serde_json::{json, Value};

    fn report(source: &str) -> Value {
        let config = GenerateConfig::new("json.test", TargetLanguage::C);
        let err = ivan_compiler::compile(source, &config).unwrap_err();
        let report = to_json_report(&[err.to_diagnostic()], source, "test.ivan", &err.phase().to_string());
        serde_json::from_str(&to_json_string(&report)).unwrap()
    }

    #[test]
    fn unresolved_type_report() {
        let value = report("opaque type A;\nfun f(a: &B);");
        assert_eq!(value["version"], 1);
        assert_eq!(value["success"], false);
        assert_eq!(value["phase"], "Resolve");
        assert_eq!(value["error_count"], 1);

        let diag = &value["diagnostics"][0];
        assert_eq!(diag["severity"], "error");
        assert_eq!(diag["code"], "E0200");
        assert_eq!(diag["category"], "Resolution");
        assert_eq!(
            diag["location"],
            json!({ "line": 2, "column": 10, "source_line": "fun f(a: &B);" })
        );
        assert_eq!(diag["labels"][0]["role"], "primary");
        assert!(diag.get("help").is_none());
    }

    #[test]
    fn configuration_error_has_no_location() {
        let source = "interface I {}";
        let config = GenerateConfig::new("bad name", TargetLanguage::C);
        let err = ivan_compiler::compile(source, &config).unwrap_err();
        let report = to_json_report(&[err.to_diagnostic()], source, "test.ivan", "Generate");
        let value: Value = serde_json::from_str(&to_json_string(&report)).unwrap();
        let diag = &value["diagnostics"][0];
        assert_eq!(diag["category"], "Configuration");
        assert!(diag.get("location").is_none());
        assert_eq!(diag["labels"], json!([]));
    }

    #[test]
    fn empty_report_is_a_success() {
        let report = to_json_report(&[], "", "test.ivan", "Generate");
        assert!(report.success);
        assert_eq!(report.error_count, 0);
    }
}
