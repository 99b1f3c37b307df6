// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Help text for CLI commands.

use crate::output;

pub fn print_usage() {
    println!(
        "{} {} - FFI headers and modules from one interface definition",
        output::title("Ivan"),
        output::version(env!("CARGO_PKG_VERSION"))
    );
    println!();
    println!(
        "{}: {} {} {}",
        output::section_header("Usage"),
        output::command("ivan"),
        output::arg("<command>"),
        output::arg("[args]")
    );
    println!();
    println!("{}", output::section_header("Generate:"));
    println!(
        "  {} {} {} {}",
        output::command("generate"),
        output::arg("<file>"),
        output::arg("--config <config.json>"),
        output::arg("[--target c|rust] [-o <output>]")
    );
    println!("      Generate a C header or Rust module. `ivan <file.ivan> ...` is a shorthand.");
    println!();
    println!("{}", output::section_header("Compilation Phases:"));
    println!("  {} {}       Tokenize a file and print tokens", output::command("lex"), output::arg("<file>"));
    println!("  {} {}     Parse a file and print items", output::command("parse"), output::arg("<file>"));
    println!("  {} {}     Resolve every type name in a file", output::command("check"), output::arg("<file>"));
    println!();
    println!("{}", output::section_header("Other:"));
    println!("  {} {}   Explain an error code", output::command("explain"), output::arg("<code>"));
    println!("  {}             Show this help", output::command("help"));
    println!("  {}          Show version", output::command("version"));
    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {}   Output diagnostics as structured JSON", output::arg("--json"));
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=ivan_codegen=trace) to see what each phase does.");
}
