// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rust FFI module backend.

use ivan_ast::{DocString, FunctionArg, FunctionDef, PrimaryItem};
use ivan_types::{default_value, spell, Target};

use crate::config::GenerateConfig;
use crate::error::GenerateError;
use crate::generator::Generator;
use crate::names::rust_ident;
use crate::wrapper::{WrapperFn, RECEIVER};
use crate::writer::CodeWriter;

/// Emits a Rust module of `#[repr(C)]` declarations.
#[derive(Debug, Clone)]
pub struct RustGenerator {
    module_name: String,
    /// Paths for `use` declarations, without `use` or `;`
    imports: Vec<String>,
}

impl RustGenerator {
    pub fn new(config: &GenerateConfig) -> Result<Self, GenerateError> {
        let imports = config
            .imports
            .iter()
            .map(|import| import_path(import))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            module_name: config.module_name.clone(),
            imports,
        })
    }

    fn write_doc(&self, doc: Option<&DocString>, w: &mut CodeWriter) {
        if let Some(doc) = doc {
            for line in doc.line_comment_lines() {
                w.writeln(&line);
            }
        }
    }
}

/// Accepts `path`, `use path` and `use path;`.
fn import_path(import: &str) -> Result<String, GenerateError> {
    let path = import.trim();
    let path = path.strip_prefix("use ").unwrap_or(path);
    let path = path.strip_suffix(';').unwrap_or(path).trim();
    let valid = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '{' | '}' | ',' | ' ' | '*'));
    if valid {
        Ok(path.to_string())
    } else {
        Err(GenerateError::InvalidImport {
            import: import.to_string(),
            target: Target::Rust,
        })
    }
}

impl Generator for RustGenerator {
    fn target(&self) -> Target {
        Target::Rust
    }

    fn generate_header(&self, w: &mut CodeWriter) -> Result<(), GenerateError> {
        w.writeln(&format!(
            "// Generated by ivan from module `{}`. Do not edit.",
            self.module_name
        ));
        w.writeln("#![allow(non_snake_case)]");
        w.blank_line();
        if !self.imports.is_empty() {
            for path in &self.imports {
                w.writeln(&format!("use {};", path));
            }
            w.blank_line();
        }
        Ok(())
    }

    fn generate_code(&self, item: &PrimaryItem, w: &mut CodeWriter) -> Result<(), GenerateError> {
        match item {
            PrimaryItem::Function(function) => {
                w.writeln("extern \"C\" {");
                w.with_indent(|w| {
                    self.write_doc(function.doc_string.as_ref(), w);
                    w.writeln(&format!(
                        "pub fn {}({}){};",
                        rust_ident(&function.name),
                        parameters(&function.args),
                        return_suffix(function)
                    ));
                });
                w.writeln("}");
            }
            PrimaryItem::Interface(interface) => {
                self.write_doc(interface.doc_string.as_ref(), w);
                w.writeln("#[repr(C)]");
                w.writeln("#[derive(Clone, Copy)]");
                w.writeln(&format!("pub struct {} {{", interface.name));
                w.with_indent(|w| {
                    for method in &interface.methods {
                        self.write_doc(method.doc_string.as_ref(), w);
                        let pointer = format!(
                            "unsafe extern \"C\" fn({}){}",
                            parameters(&method.args),
                            return_suffix(method)
                        );
                        let member = rust_ident(&method.name);
                        if method.optional {
                            w.writeln(&format!("pub {}: Option<{}>,", member, pointer));
                        } else {
                            w.writeln(&format!("pub {}: {},", member, pointer));
                        }
                    }
                });
                w.writeln("}");
            }
            PrimaryItem::OpaqueType(opaque) => {
                self.write_doc(opaque.doc_string.as_ref(), w);
                w.writeln("#[repr(C)]");
                w.writeln(&format!("pub struct {} {{", opaque.name));
                w.with_indent(|w| w.writeln("_private: [u8; 0],"));
                w.writeln("}");
            }
        }
        Ok(())
    }

    fn generate_wrapper(&self, wrapper: &WrapperFn<'_>, w: &mut CodeWriter) -> Result<(), GenerateError> {
        let method = wrapper.method;
        let receiver = if wrapper.by_value {
            format!("{}: {}", RECEIVER, wrapper.interface.name)
        } else {
            format!("{}: &{}", RECEIVER, wrapper.interface.name)
        };
        let mut params = vec![receiver];
        params.extend(method.args.iter().map(parameter));
        w.writeln(&format!(
            "pub unsafe fn {}({}){} {{",
            rust_ident(&wrapper.name),
            params.join(", "),
            return_suffix(method)
        ));

        let member = format!("{}.{}", RECEIVER, rust_ident(&method.name));
        let args = arguments(&method.args);
        let terminator = if method.return_type.is_unit() { ";" } else { "" };
        let fallback = if wrapper.checks_null() && !wrapper.asserts() {
            let value = default_value(&method.return_type, Target::Rust).ok_or_else(|| {
                GenerateError::NoDefaultValue {
                    interface: wrapper.interface.name.clone(),
                    method: method.name.clone(),
                    ty: spell(&method.return_type, Target::Rust),
                    target: Target::Rust,
                    span: method.span,
                }
            })?;
            Some(value)
        } else {
            None
        };
        w.with_indent(|w| {
            if wrapper.asserts() {
                w.writeln(&format!(
                    "let func = {}.expect(\"{}::{} is not implemented\");",
                    member, wrapper.interface.name, method.name
                ));
                w.writeln(&format!("func({}){}", args, terminator));
            } else if let Some(fallback) = &fallback {
                w.writeln(&format!("match {} {{", member));
                w.with_indent(|w| {
                    w.writeln(&format!("Some(func) => func({}),", args));
                    w.writeln(&format!("None => {},", fallback));
                });
                w.writeln("}");
            } else {
                w.writeln(&format!("({})({}){}", member, args, terminator));
            }
        });
        w.writeln("}");
        Ok(())
    }

    fn generate_footer(&self, _w: &mut CodeWriter) -> Result<(), GenerateError> {
        Ok(())
    }
}

fn return_suffix(function: &FunctionDef) -> String {
    if function.return_type.is_unit() {
        String::new()
    } else {
        format!(" -> {}", spell(&function.return_type, Target::Rust))
    }
}

fn parameter(arg: &FunctionArg) -> String {
    format!("{}: {}", rust_ident(&arg.name), spell(&arg.ty, Target::Rust))
}

fn parameters(args: &[FunctionArg]) -> String {
    args.iter().map(parameter).collect::<Vec<_>>().join(", ")
}

fn arguments(args: &[FunctionArg]) -> String {
    args.iter().map(|arg| rust_ident(&arg.name)).collect::<Vec<_>>().join(", ")
}
