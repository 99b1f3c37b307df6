// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Developer tool commands: explain.

use colored::Colorize;
use ivan_diagnostics::codes::ErrorCodeRegistry;
use std::process;

use crate::output;

pub fn cmd_explain(code: &str) {
    let registry = ErrorCodeRegistry::default();
    let code = code.to_ascii_uppercase();

    match registry.get(&code) {
        Some(info) => {
            println!("{}[{}]: {}", "error".red().bold(), info.code.red().bold(), info.title.bold());
            println!();
            println!("  Category: {}", info.category);
        }
        None => {
            eprintln!("{}: unknown error code '{}'", output::error_label(), code);
            eprintln!();
            eprintln!("Known codes:");
            for info in registry.iter() {
                eprintln!("  {}  {}", info.code, info.title);
            }
            process::exit(1);
        }
    }
}
