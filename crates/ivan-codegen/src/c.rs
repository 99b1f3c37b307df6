// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! C header backend.

use ivan_ast::{DocString, FunctionArg, FunctionDef, NativeType, OpaqueType, PrimaryItem, ReferenceType};
use ivan_types::{default_value, spell, Target};

use crate::config::GenerateConfig;
use crate::error::GenerateError;
use crate::generator::Generator;
use crate::wrapper::{WrapperFn, RECEIVER};
use crate::writer::CodeWriter;

const STD_INCLUDES: [&str; 3] = ["<stdint.h>", "<stdbool.h>", "<stdlib.h>"];

/// Emits a self-contained C header with an include guard.
#[derive(Debug, Clone)]
pub struct CGenerator {
    guard: String,
    /// `#include` groups in output order, empty groups already removed
    include_groups: Vec<Vec<String>>,
}

impl CGenerator {
    pub fn new(config: &GenerateConfig, wrappers: &[WrapperFn<'_>]) -> Result<Self, GenerateError> {
        let mut std = STD_INCLUDES.map(String::from).to_vec();
        if wrappers.iter().any(WrapperFn::asserts) {
            std.push("<assert.h>".to_string());
        }
        let mut global = Vec::new();
        let mut local = Vec::new();
        for import in &config.imports {
            let import = import.trim();
            if is_delimited(import, '<', '>') {
                global.push(import.to_string());
            } else if is_delimited(import, '"', '"') {
                local.push(import.to_string());
            } else {
                return Err(GenerateError::InvalidImport {
                    import: import.to_string(),
                    target: Target::C,
                });
            }
        }

        Ok(Self {
            guard: include_guard(&config.module_name),
            include_groups: [std, global, local].into_iter().filter(|g| !g.is_empty()).collect(),
        })
    }

    fn write_doc(&self, doc: Option<&DocString>, w: &mut CodeWriter) {
        if let Some(doc) = doc {
            for line in doc.block_lines() {
                w.writeln(&line);
            }
        }
    }
}

impl Generator for CGenerator {
    fn target(&self) -> Target {
        Target::C
    }

    fn generate_header(&self, w: &mut CodeWriter) -> Result<(), GenerateError> {
        w.writeln(&format!("#ifndef {}", self.guard));
        w.writeln(&format!("#define {}", self.guard));
        for group in &self.include_groups {
            w.blank_line();
            for include in group {
                w.writeln(&format!("#include {}", include));
            }
        }
        w.blank_line();
        Ok(())
    }

    fn generate_code(&self, item: &PrimaryItem, w: &mut CodeWriter) -> Result<(), GenerateError> {
        self.write_doc(item.doc_string(), w);
        match item {
            PrimaryItem::Function(function) => {
                w.writeln(&format!("{};", signature(&function.name, function)));
            }
            PrimaryItem::Interface(interface) => {
                w.writeln(&format!("typedef struct {} {{", interface.name));
                w.with_indent(|w| {
                    for method in &interface.methods {
                        self.write_doc(method.doc_string.as_ref(), w);
                        let member_type = |ty: &NativeType| spell(&within_definition(ty, &interface.name), Target::C);
                        let params: Vec<String> = method
                            .args
                            .iter()
                            .map(|arg| format!("{} {}", member_type(&arg.ty), arg.name))
                            .collect();
                        w.writeln(&format!(
                            "{} (*{})({});",
                            member_type(&method.return_type),
                            method.name,
                            params.join(", ")
                        ));
                    }
                });
                w.writeln(&format!("}} {};", interface.name));
            }
            PrimaryItem::OpaqueType(opaque) => {
                w.writeln(&format!("typedef struct {0} {0};", opaque.name));
            }
        }
        Ok(())
    }

    fn generate_wrapper(&self, wrapper: &WrapperFn<'_>, w: &mut CodeWriter) -> Result<(), GenerateError> {
        let method = wrapper.method;
        let receiver = if wrapper.by_value {
            format!("{} {}", wrapper.interface.name, RECEIVER)
        } else {
            format!("const {}* {}", wrapper.interface.name, RECEIVER)
        };
        let mut params = vec![receiver];
        params.extend(method.args.iter().map(parameter));
        w.writeln(&format!(
            "{} {}({}) {{",
            spell(&method.return_type, Target::C),
            wrapper.name,
            params.join(", ")
        ));

        let member = format!("{}{}{}", RECEIVER, if wrapper.by_value { "." } else { "->" }, method.name);
        let call = format!("{}({})", member, arguments(&method.args));
        let returns = !method.return_type.is_unit();
        w.with_indent(|w| {
            if wrapper.asserts() {
                w.writeln(&format!("assert({} != NULL);", member));
            } else if wrapper.checks_null() {
                w.writeln(&format!("if ({} == NULL) {{", member));
                w.with_indent(|w| w.writeln(&fallback_return(&method.return_type)));
                w.writeln("}");
            }
            if returns {
                w.writeln(&format!("return {};", call));
            } else {
                w.writeln(&format!("{};", call));
            }
        });
        w.writeln("}");
        Ok(())
    }

    fn generate_footer(&self, w: &mut CodeWriter) -> Result<(), GenerateError> {
        w.writeln(&format!("#endif /* {} */", self.guard));
        Ok(())
    }
}

/// `ivan.basic` becomes `IVAN_BASIC_H`.
pub fn include_guard(module_name: &str) -> String {
    let mut guard: String = module_name
        .chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    guard.push_str("_H");
    guard
}

/// The typedef name of `interface` isn't declared until its struct is
/// complete, so inside the struct it has to be spelled `struct Name`.
fn within_definition(ty: &NativeType, interface: &str) -> NativeType {
    match ty {
        NativeType::Interface(i) if i.name == interface => NativeType::Opaque(OpaqueType {
            name: i.name.clone(),
            spelling: format!("struct {}", i.name),
        }),
        NativeType::Reference(r) => NativeType::Reference(ReferenceType {
            target: Box::new(within_definition(&r.target, interface)),
            kind: r.kind,
            optional: r.optional,
        }),
        _ => ty.clone(),
    }
}

fn is_delimited(text: &str, open: char, close: char) -> bool {
    text.len() > 2 && text.starts_with(open) && text.ends_with(close)
}

fn signature(name: &str, function: &FunctionDef) -> String {
    format!(
        "{} {}({})",
        spell(&function.return_type, Target::C),
        name,
        parameters(&function.args)
    )
}

fn parameter(arg: &FunctionArg) -> String {
    format!("{} {}", spell(&arg.ty, Target::C), arg.name)
}

fn parameters(args: &[FunctionArg]) -> String {
    args.iter().map(parameter).collect::<Vec<_>>().join(", ")
}

fn arguments(args: &[FunctionArg]) -> String {
    args.iter().map(|arg| arg.name.as_str()).collect::<Vec<_>>().join(", ")
}

/// The early return taken when an optional member is null.
fn fallback_return(return_type: &NativeType) -> String {
    match default_value(return_type, Target::C) {
        Some(value) if !value.is_empty() => format!("return {};", value),
        _ => "return;".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OnMissing, TargetLanguage, WrapperConfig};
    use crate::generator::generate;
    use ivan_ast::Span;
    use ivan_types::TypeContext;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn render(src: &str, config: &GenerateConfig) -> String {
        let items = ivan_parser::parse_source(src).unwrap();
        let context = TypeContext::build(&items, &config.opaque_types).unwrap();
        generate(&items, &context, config).unwrap()
    }

    fn c_config() -> GenerateConfig {
        GenerateConfig::new("test.mod", TargetLanguage::C)
    }

    #[test]
    fn guard_names() {
        assert_eq!(include_guard("ivan.basic"), "IVAN_BASIC_H");
        assert_eq!(include_guard("duck-logic.shape"), "DUCK_LOGIC_SHAPE_H");
    }

    #[test]
    fn header_and_footer() {
        assert_eq!(
            render("", &c_config()),
            "#ifndef TEST_MOD_H\n\
             #define TEST_MOD_H\n\
             \n\
             #include <stdint.h>\n\
             #include <stdbool.h>\n\
             #include <stdlib.h>\n\
             \n\
             #endif /* TEST_MOD_H */\n"
        );
    }

    #[test]
    fn include_groups() {
        let config = c_config()
            .with_import("\"local.h\"")
            .with_import("<global.h>")
            .with_import("\"other.h\"");
        let output = render("", &config);
        assert!(output.contains(
            "#include <stdlib.h>\n\n#include <global.h>\n\n#include \"local.h\"\n#include \"other.h\"\n\n#endif"
        ));
    }

    #[test]
    fn malformed_import() {
        let config = c_config().with_import("stdio.h");
        let err = CGenerator::new(&config, &[]).unwrap_err();
        assert_eq!(
            err,
            GenerateError::InvalidImport {
                import: "stdio.h".to_string(),
                target: Target::C,
            }
        );
        assert!(CGenerator::new(&c_config().with_import("<>"), &[]).is_err());
    }

    #[test]
    fn function_declarations() {
        let output = render(
            "opaque type Example;\nfun topLevel(e: Example);\nfun count(bytes: &byte, len: usize): u32;\nfun none();",
            &c_config(),
        );
        assert!(output.contains("void topLevel(Example e);\n"));
        assert!(output.contains("uint32_t count(const char* bytes, size_t len);\n"));
        assert!(output.contains("void none();\n"));
    }

    #[test]
    fn vtable_has_one_member_per_method() {
        let output = render(
            "interface Shape {\n    fun area(): double;\n    fun scale(by: double, out: &mut Shape);\n    fun name(): &raw byte;\n}",
            &c_config(),
        );
        assert!(output.contains(
            "typedef struct Shape {\n\
             \x20   double (*area)();\n\
             \x20   void (*scale)(double by, struct Shape* out);\n\
             \x20   char* (*name)();\n\
             } Shape;\n"
        ));
    }

    #[test]
    fn single_method_interface() {
        let output = render("interface Other { fun test(d: double); }", &c_config());
        assert!(output.contains("typedef struct Other {\n    void (*test)(double d);\n} Other;\n"));
    }

    #[test]
    fn doc_comments_use_block_style() {
        let output = render(
            "/**\n * A thing.\n *\n * Really.\n */\nopaque type Thing;\n\
             interface I {\n    /**\n     * Does it.\n     */\n    fun f();\n}",
            &c_config(),
        );
        assert!(output.contains("/**\n * A thing.\n *\n * Really.\n*/\ntypedef struct Thing Thing;\n"));
        assert!(output.contains("typedef struct I {\n    /**\n     * Does it.\n    */\n    void (*f)();\n} I;\n"));
    }

    #[test]
    fn wrapper_by_pointer_and_by_value() {
        let config = c_config()
            .with_wrappers("Basic", WrapperConfig::default())
            .with_wrappers(
                "Other",
                WrapperConfig {
                    by_value: true,
                    ..WrapperConfig::default()
                },
            );
        let output = render(
            "interface Basic { fun noArgs(): i64; }\ninterface Other { fun test(d: double); }",
            &config,
        );
        assert!(output.contains(
            "// wrappers\n\
             \n\
             int64_t basic_noArgs(const Basic* vtable) {\n\
             \x20   return vtable->noArgs();\n\
             }\n\
             \n\
             void other_test(Other vtable, double d) {\n\
             \x20   vtable.test(d);\n\
             }\n\
             \n\
             #endif"
        ));
        assert!(!output.contains("<assert.h>"));
    }

    #[test]
    fn optional_method_asserts_by_default() {
        let config = c_config().with_wrappers("Shape", WrapperConfig::default());
        let output = render("interface Shape { opt fun area(): double; }", &config);
        assert!(output.contains("#include <stdlib.h>\n#include <assert.h>\n"));
        assert!(output.contains(
            "double shape_area(const Shape* vtable) {\n\
             \x20   assert(vtable->area != NULL);\n\
             \x20   return vtable->area();\n\
             }\n"
        ));
        assert!(output.contains("typedef struct Shape {\n    double (*area)();\n} Shape;\n"));
    }

    #[test]
    fn optional_method_returns_default() {
        let config = c_config().with_wrappers(
            "PyShape",
            WrapperConfig {
                name_prefix: Some("object".to_string()),
                on_missing: OnMissing::ReturnDefault,
                ..WrapperConfig::default()
            },
        );
        let output = render(
            "opaque type PyObject;\nopaque type DuckObject;\n\
             interface PyShape {\n    opt fun view_legacy_repr(obj: &DuckObject): &raw PyObject;\n    opt fun reset();\n}",
            &config,
        );
        assert!(!output.contains("<assert.h>"));
        assert!(output.contains(
            "PyObject* object_view_legacy_repr(const PyShape* vtable, const DuckObject* obj) {\n\
             \x20   if (vtable->view_legacy_repr == NULL) {\n\
             \x20       return NULL;\n\
             \x20   }\n\
             \x20   return vtable->view_legacy_repr(obj);\n\
             }\n"
        ));
        assert!(output.contains(
            "void object_reset(const PyShape* vtable) {\n\
             \x20   if (vtable->reset == NULL) {\n\
             \x20       return;\n\
             \x20   }\n\
             \x20   vtable->reset();\n\
             }\n"
        ));
    }

    #[test]
    fn self_references_use_the_struct_tag() {
        let config = c_config().with_wrappers("Node", WrapperConfig::default());
        let output = render(
            "interface Node {\n    fun next(of: &Node): opt &mut Node;\n    fun copy(into: &&raw Node, count: int);\n}\nfun visit(node: &Node);",
            &config,
        );
        assert!(output.contains(
            "typedef struct Node {\n\
             \x20   struct Node* (*next)(const struct Node* of);\n\
             \x20   void (*copy)(struct Node* const* into, int count);\n\
             } Node;\n"
        ));
        // Outside the definition the typedef name is complete
        assert!(output.contains("void visit(const Node* node);\n"));
        assert!(output.contains("Node* node_next(const Node* vtable, const Node* of) {\n"));
    }

    #[test]
    fn optional_references_are_plain_pointers() {
        let config = c_config().with_wrappers(
            "Shape",
            WrapperConfig {
                on_missing: OnMissing::ReturnDefault,
                ..WrapperConfig::default()
            },
        );
        let output = render("opaque type PyObject;\ninterface Shape { opt fun repr(): opt &PyObject; }", &config);
        assert!(output.contains("const PyObject* (*repr)();\n"));
        assert!(output.contains(
            "const PyObject* shape_repr(const Shape* vtable) {\n\
             \x20   if (vtable->repr == NULL) {\n\
             \x20       return NULL;\n\
             \x20   }\n\
             \x20   return vtable->repr();\n\
             }\n"
        ));
    }

    #[test]
    fn keywords_cannot_be_names() {
        let items = ivan_parser::parse_source("fun f(int: int, char: double);").unwrap();
        let context = TypeContext::build(&items, &BTreeMap::new()).unwrap();
        assert_eq!(
            generate(&items, &context, &c_config()),
            Err(GenerateError::ReservedIdentifier {
                name: "int".to_string(),
                target: Target::C,
                span: Span::new(1, 4),
            })
        );
        // Fine in C, even though Rust would need `r#`
        assert!(render("fun match(loop: int);", &c_config()).contains("void match(int loop);\n"));
    }
}
