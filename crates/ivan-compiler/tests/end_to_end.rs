// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Whole-artifact tests: source and config in, generated text out.

use std::fs;
use std::path::PathBuf;

use ivan_ast::Span;
use ivan_codegen::{GenerateConfig, OnMissing, WrapperConfig};
use ivan_compiler::{compile, CompileError, Phase, TargetLanguage};
use ivan_types::TypeErrorKind;
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e))
}

fn compile_fixture(stem: &str) -> String {
    let config = GenerateConfig::from_json(&fixture(&format!("{}.json", stem))).unwrap();
    match compile(&fixture(&format!("{}.ivan", stem)), &config) {
        Ok(output) => output,
        Err(e) => panic!("compiling {}: {} ({:?})", stem, e, e.span()),
    }
}

#[test]
fn basic_c_header() {
    assert_eq!(compile_fixture("basic"), fixture("basic.h"));
}

#[test]
fn shape_rust_module() {
    assert_eq!(compile_fixture("shape"), fixture("shape.rs.expected"));
}

#[test]
fn unresolved_then_resolved() {
    let config = GenerateConfig::new("ivan.example", TargetLanguage::C);

    let err = compile("fun topLevel(e: Example);", &config).unwrap_err();
    assert_eq!(err.phase(), Phase::Resolve);
    let CompileError::Type(err) = err else {
        panic!("expected a type error, got {:?}", err);
    };
    assert_eq!(err.kind, TypeErrorKind::UnresolvedType { name: "Example".to_string() });
    assert_eq!(err.span, Span::new(1, 16));

    let output = compile("opaque type Example;\nfun topLevel(e: Example);", &config).unwrap();
    assert!(output.contains("typedef struct Example Example;\n\nvoid topLevel(Example e);\n"));
}

#[test]
fn single_method_interface() {
    let config = GenerateConfig::new("ivan.other", TargetLanguage::C);
    let output = compile("interface Other { fun test(d: double); }", &config).unwrap();
    assert_eq!(
        output,
        "#ifndef IVAN_OTHER_H\n\
         #define IVAN_OTHER_H\n\
         \n\
         #include <stdint.h>\n\
         #include <stdbool.h>\n\
         #include <stdlib.h>\n\
         \n\
         typedef struct Other {\n\
         \x20   void (*test)(double d);\n\
         } Other;\n\
         \n\
         #endif /* IVAN_OTHER_H */\n"
    );
}

#[test]
fn same_source_both_targets() {
    let source = "opaque type Buffer;\nfun fill(buf: &mut Buffer, value: u32): bool;";
    let c = compile(source, &GenerateConfig::new("io.buffer", TargetLanguage::C)).unwrap();
    let rust = compile(source, &GenerateConfig::new("io.buffer", TargetLanguage::Rust)).unwrap();
    assert!(c.contains("bool fill(Buffer* buf, uint32_t value);"));
    assert!(rust.contains("pub fn fill(buf: &mut Buffer, value: u32) -> bool;"));
}

#[test]
fn parse_errors_carry_spans() {
    let config = GenerateConfig::new("m", TargetLanguage::C);
    let err = compile("interface I {\n    fun f(a: int b: int);\n}", &config).unwrap_err();
    assert_eq!(err.phase(), Phase::Parse);
    assert_eq!(err.span(), Some(Span::new(2, 17)));
}

#[test]
fn optional_references_in_both_targets() {
    let source = "opaque type DuckObject;\nopaque type PyObject;\n\
        fun lookup(obj: &DuckObject): opt &PyObject;\n\
        interface Shape { opt fun find(obj: &DuckObject): opt &mut PyObject; }";
    let wrappers = WrapperConfig {
        by_value: true,
        on_missing: OnMissing::ReturnDefault,
        ..WrapperConfig::default()
    };

    let c_config = GenerateConfig::new("duck.lookup", TargetLanguage::C).with_wrappers("Shape", wrappers.clone());
    let c = compile(source, &c_config).unwrap();
    assert!(c.contains("const PyObject* lookup(const DuckObject* obj);\n"));
    assert!(c.contains("    PyObject* (*find)(const DuckObject* obj);\n"));
    assert!(c.contains("        return NULL;\n"));

    let rust_config = GenerateConfig::new("duck.lookup", TargetLanguage::Rust).with_wrappers("Shape", wrappers);
    let rust = compile(source, &rust_config).unwrap();
    assert!(rust.contains("pub fn lookup(obj: &DuckObject) -> Option<&PyObject>;\n"));
    assert!(rust.contains("pub find: Option<unsafe extern \"C\" fn(obj: &DuckObject) -> Option<&mut PyObject>>,\n"));
    assert!(rust.contains("pub unsafe fn shape_find(vtable: Shape, obj: &DuckObject) -> Option<&mut PyObject> {\n"));
    assert!(rust.contains("        None => None,\n"));
}

#[test]
fn self_referencing_interface_in_c() {
    let config = GenerateConfig::new("ivan.list", TargetLanguage::C);
    let output = compile("interface List {\n    fun push(onto: &mut List, value: int);\n}", &config).unwrap();
    assert!(output.contains(
        "typedef struct List {\n\
         \x20   void (*push)(struct List* onto, int value);\n\
         } List;\n"
    ));
}

#[test]
fn reserved_words_by_target() {
    let source = "fun match(loop: int): bool;";
    let rust = compile(source, &GenerateConfig::new("m", TargetLanguage::Rust)).unwrap();
    assert!(rust.contains("pub fn r#match(r#loop: i32) -> bool;\n"));

    let err = compile("fun f(char: double);", &GenerateConfig::new("m", TargetLanguage::C)).unwrap_err();
    assert_eq!(err.phase(), Phase::Generate);
    assert_eq!(err.to_string(), "'char' is a reserved word in C");
}
