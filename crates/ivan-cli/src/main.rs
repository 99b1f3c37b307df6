// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Ivan CLI.

mod commands;
mod help;
mod output;

use std::env;
use std::fs;
use std::process;

use ivan_diagnostics::{json, Diagnostic, DiagnosticFormatter};

/// How diagnostics are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

fn main() {
    output::init();
    init_tracing();

    let mut args: Vec<String> = env::args().collect();
    let format = if args.iter().any(|a| a == "--json") {
        Format::Json
    } else {
        Format::Human
    };
    args.retain(|a| a != "--json");

    if args.len() < 2 {
        help::print_usage();
        return;
    }

    match args[1].as_str() {
        "generate" | "gen" => commands::generate::cmd_generate(&args[2..], format),
        "lex" => commands::phase::cmd_lex(file_arg(&args, "lex"), format),
        "parse" => commands::phase::cmd_parse(file_arg(&args, "parse"), format),
        "check" => commands::phase::cmd_check(file_arg(&args, "check"), format),
        "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: ivan explain <code>");
                process::exit(1);
            }
            commands::tools::cmd_explain(&args[2]);
        }
        "help" | "--help" | "-h" => help::print_usage(),
        "version" | "--version" | "-V" => println!("ivan {}", env!("CARGO_PKG_VERSION")),
        other if other.ends_with(".ivan") => commands::generate::cmd_generate(&args[1..], format),
        other => {
            eprintln!("{}: unknown command '{}'", output::error_label(), other);
            help::print_usage();
            process::exit(1);
        }
    }
}

/// Set up a `tracing` subscriber, but only if RUST_LOG asks for one.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn file_arg<'a>(args: &'a [String], command: &str) -> &'a str {
    match args.get(2) {
        Some(path) => path,
        None => {
            eprintln!("Usage: ivan {} <file.ivan>", command);
            process::exit(1);
        }
    }
}

/// Read a file or exit with an error message.
pub fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: reading {}: {}", output::error_label(), output::file_path(path), e);
            process::exit(1);
        }
    }
}

/// Print diagnostics in the requested format.
pub fn show_diagnostics(diags: &[Diagnostic], source: &str, path: &str, phase: &str, format: Format) {
    match format {
        Format::Human => {
            let formatter = DiagnosticFormatter::new(source).with_file_name(path);
            for diag in diags {
                eprint!("{}", formatter.format(diag));
            }
        }
        Format::Json => {
            let report = json::to_json_report(diags, source, path, phase);
            println!("{}", json::to_json_string(&report));
        }
    }
}

/// Report one failed phase and exit.
pub fn fail(diags: &[Diagnostic], source: &str, path: &str, phase: &str, format: Format) -> ! {
    show_diagnostics(diags, source, path, phase, format);
    if format == Format::Human {
        eprintln!("\n{}", output::banner_fail(phase, diags.len()));
    }
    process::exit(1);
}
