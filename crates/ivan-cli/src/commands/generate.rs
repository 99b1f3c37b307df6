// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The `generate` command: one `.ivan` file and one config in, one artifact out.

use std::fs;
use std::process;

use ivan_codegen::{GenerateConfig, TargetLanguage};
use ivan_diagnostics::ToDiagnostic;

use crate::{fail, output, read_file, Format};

const USAGE: &str = "Usage: ivan generate <file.ivan> --config <config.json> [--target c|rust] [-o <output>]";

#[derive(Debug, PartialEq, Eq)]
struct GenerateArgs {
    input: String,
    config: String,
    /// Overrides `targetLanguage` from the config
    target: Option<TargetLanguage>,
    /// Print to stdout when absent
    output: Option<String>,
}

impl GenerateArgs {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut input = None;
        let mut config = None;
        let mut target = None;
        let mut output = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" | "-c" => config = Some(value_of(arg, iter.next())?),
                "--output" | "-o" => output = Some(value_of(arg, iter.next())?),
                "--target" | "-t" => {
                    let value = value_of(arg, iter.next())?;
                    target = Some(match value.as_str() {
                        "c" => TargetLanguage::C,
                        "rust" => TargetLanguage::Rust,
                        other => return Err(format!("unknown target '{}', expected 'c' or 'rust'", other)),
                    });
                }
                flag if flag.starts_with('-') => return Err(format!("unknown option '{}'", flag)),
                path => {
                    if input.is_some() {
                        return Err(format!("unexpected argument '{}'", path));
                    }
                    input = Some(path.to_string());
                }
            }
        }

        Ok(Self {
            input: input.ok_or("missing input file")?,
            config: config.ok_or("missing --config")?,
            target,
            output,
        })
    }
}

fn value_of(flag: &str, value: Option<&String>) -> Result<String, String> {
    value
        .cloned()
        .ok_or_else(|| format!("'{}' needs a value", flag))
}

pub fn cmd_generate(args: &[String], format: Format) {
    let args = match GenerateArgs::parse(args) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}: {}", output::error_label(), msg);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let source = read_file(&args.input);
    let mut config = match GenerateConfig::from_json(&read_file(&args.config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "{}: invalid config {}: {}",
                output::error_label(),
                output::file_path(&args.config),
                e
            );
            process::exit(1);
        }
    };
    if let Some(target) = args.target {
        config.target_language = target;
    }

    let generated = match ivan_compiler::compile(&source, &config) {
        Ok(generated) => generated,
        Err(e) => {
            let phase = e.phase().to_string();
            fail(&[e.to_diagnostic()], &source, &args.input, &phase, format)
        }
    };

    match args.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &generated) {
                eprintln!("{}: writing {}: {}", output::error_label(), output::file_path(&path), e);
                process::exit(1);
            }
            if format == Format::Human {
                eprintln!("{}", output::banner_ok(&format!("Generate: {}", path)));
            }
        }
        None => print!("{}", generated),
    }
}
