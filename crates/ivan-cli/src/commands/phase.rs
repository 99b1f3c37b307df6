// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Compiler phase inspection commands: lex, parse, check.

use std::collections::BTreeMap;

use colored::Colorize;
use ivan_ast::token::Token;
use ivan_ast::{FunctionDef, PrimaryItem};
use ivan_diagnostics::ToDiagnostic;
use ivan_parser::SyntaxError;
use ivan_types::TypeContext;
use serde::Serialize;

use crate::{fail, output, read_file, Format};

/// What a successful phase prints with `--json`.
///
/// Shares its leading fields with the diagnostic report, so consumers can
/// branch on `success` alone.
#[derive(Debug, Serialize)]
struct PhaseReport<T> {
    version: u32,
    file: String,
    success: bool,
    phase: &'static str,
    #[serde(flatten)]
    summary: T,
}

impl<T: Serialize> PhaseReport<T> {
    fn new(file: &str, phase: &'static str, summary: T) -> Self {
        Self {
            version: 1,
            file: file.to_string(),
            success: true,
            phase,
            summary,
        }
    }

    fn print(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{}: serializing {} report: {}", output::error_label(), self.phase, e),
        }
    }
}

#[derive(Debug, Serialize)]
struct LexSummary {
    token_count: usize,
    tokens: Vec<JsonToken>,
}

#[derive(Debug, Serialize)]
struct JsonToken {
    kind: String,
    line: u32,
    column: u32,
}

#[derive(Debug, Serialize)]
struct ParseSummary {
    item_count: usize,
    items: Vec<JsonItem>,
}

#[derive(Debug, Serialize)]
struct JsonItem {
    /// `function`, `interface` or `opaque type`
    kind: &'static str,
    name: String,
    line: u32,
    column: u32,
    /// The function itself, or each interface method, in source syntax
    #[serde(skip_serializing_if = "Vec::is_empty")]
    signatures: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CheckSummary {
    item_count: usize,
    declared_types: usize,
}

fn lex_summary(tokens: &[Token]) -> LexSummary {
    LexSummary {
        token_count: tokens.len(),
        tokens: tokens
            .iter()
            .map(|tok| JsonToken {
                kind: format!("{:?}", tok.kind),
                line: tok.span.line,
                column: tok.span.column,
            })
            .collect(),
    }
}

fn parse_summary(items: &[PrimaryItem]) -> ParseSummary {
    ParseSummary {
        item_count: items.len(),
        items: items
            .iter()
            .map(|item| {
                let (kind, signatures) = match item {
                    PrimaryItem::Function(f) => ("function", vec![signature(f)]),
                    PrimaryItem::Interface(i) => ("interface", i.methods.iter().map(signature).collect()),
                    PrimaryItem::OpaqueType(_) => ("opaque type", Vec::new()),
                };
                let span = item.span();
                JsonItem {
                    kind,
                    name: item.name().to_string(),
                    line: span.line,
                    column: span.column,
                    signatures,
                }
            })
            .collect(),
    }
}

/// `opt fun name(a: T): R`, leaving out a unit return type.
fn signature(function: &FunctionDef) -> String {
    let args: Vec<String> = function
        .args
        .iter()
        .map(|arg| format!("{}: {}", arg.name, arg.ty))
        .collect();
    let mut text = format!(
        "{}fun {}({})",
        if function.optional { "opt " } else { "" },
        function.name,
        args.join(", ")
    );
    if !function.return_type.is_unit() {
        text.push_str(&format!(": {}", function.return_type));
    }
    text
}

pub fn cmd_lex(path: &str, format: Format) {
    let source = read_file(path);

    let tokens = match ivan_lexer::lex(&source) {
        Ok(tokens) => tokens,
        Err(e) => fail(&[e.to_diagnostic()], &source, path, "Lex", format),
    };

    match format {
        Format::Human => {
            println!("{} Tokens ({}) {}\n", "===".dimmed(), tokens.len(), "===".dimmed());
            for tok in &tokens {
                println!("{:4}:{:<3} {:?}", tok.span.line, tok.span.column, tok.kind);
            }
            println!("\n{}", output::banner_ok(&format!("Lex: {} tokens", tokens.len())));
        }
        Format::Json => PhaseReport::new(path, "Lex", lex_summary(&tokens)).print(),
    }
}

pub fn cmd_parse(path: &str, format: Format) {
    let source = read_file(path);

    let items = match ivan_parser::parse_source(&source) {
        Ok(items) => items,
        Err(e) => fail(&[e.to_diagnostic()], &source, path, syntax_phase(&e), format),
    };

    match format {
        Format::Human => {
            println!("{} Items ({}) {}\n", "===".dimmed(), items.len(), "===".dimmed());
            for item in &items {
                println!("{:#?}", item);
                println!();
            }
            println!("{}", output::banner_ok("Parse"));
        }
        Format::Json => PhaseReport::new(path, "Parse", parse_summary(&items)).print(),
    }
}

/// Resolve every type name without generating anything.
pub fn cmd_check(path: &str, format: Format) {
    let source = read_file(path);

    let items = match ivan_parser::parse_source(&source) {
        Ok(items) => items,
        Err(e) => fail(&[e.to_diagnostic()], &source, path, syntax_phase(&e), format),
    };
    let checked = TypeContext::build(&items, &BTreeMap::new()).and_then(|context| {
        context.resolve_all(&items)?;
        Ok(context.len())
    });
    let types = match checked {
        Ok(types) => types,
        Err(e) => fail(&[e.to_diagnostic()], &source, path, "Resolve", format),
    };

    match format {
        Format::Human => println!(
            "{}",
            output::banner_ok(&format!("Check: {} items, {} declared types", items.len(), types))
        ),
        Format::Json => {
            let summary = CheckSummary {
                item_count: items.len(),
                declared_types: types,
            };
            PhaseReport::new(path, "Check", summary).print();
        }
    }
}

fn syntax_phase(err: &SyntaxError) -> &'static str {
    match err {
        SyntaxError::Lex(_) => "Lex",
        SyntaxError::Parse(_) => "Parse",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn lex_report() {
        let tokens = ivan_lexer::lex("fun f();").unwrap();
        let report = PhaseReport::new("f.ivan", "Lex", lex_summary(&tokens));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["phase"], json!("Lex"));
        assert_eq!(value["token_count"], json!(tokens.len()));
        assert_eq!(value["tokens"][0], json!({ "kind": "Fun", "line": 1, "column": 0 }));
    }

    #[test]
    fn parse_report_lists_items() {
        let items = ivan_parser::parse_source(
            "opaque type Example;\ninterface Shape {\n    opt fun parent(): opt &Shape;\n    fun scale(by: double);\n}\nfun make(e: &mut Example): u32;",
        )
        .unwrap();
        let value = serde_json::to_value(PhaseReport::new("s.ivan", "Parse", parse_summary(&items))).unwrap();
        assert_eq!(
            value,
            json!({
                "version": 1,
                "file": "s.ivan",
                "success": true,
                "phase": "Parse",
                "item_count": 3,
                "items": [
                    { "kind": "opaque type", "name": "Example", "line": 1, "column": 12 },
                    {
                        "kind": "interface",
                        "name": "Shape",
                        "line": 2,
                        "column": 10,
                        "signatures": ["opt fun parent(): opt &Shape", "fun scale(by: double)"]
                    },
                    {
                        "kind": "function",
                        "name": "make",
                        "line": 6,
                        "column": 4,
                        "signatures": ["fun make(e: &mut Example): u32"]
                    }
                ]
            })
        );
    }

    #[test]
    fn check_report() {
        let report = PhaseReport::new(
            "c.ivan",
            "Check",
            CheckSummary {
                item_count: 2,
                declared_types: 1,
            },
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["declared_types"], json!(1));
        assert_eq!(value["item_count"], json!(2));
        assert_eq!(value["success"], json!(true));
    }
}
