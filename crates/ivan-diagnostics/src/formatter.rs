// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatter for diagnostics.
//!
//! ```text
//! error[E0201]: duplicate type: `Shape`
//!   --> shape.ivan:4:11
//!     |
//!   1 | opaque type Shape;
//!     |             ----- first declared here
//!    ...
//!   4 | interface Shape {
//!     |           ^^^^^ declared again here
//! ```

use std::collections::BTreeMap;

use colored::Colorize;

use crate::{Diagnostic, LabelStyle};

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
}

/// A source line with its labels.
struct AnnotatedLine<'d> {
    line_num: u32,
    text: String,
    annotations: Vec<Annotation<'d>>,
}

struct Annotation<'d> {
    /// Character column, 0-based.
    col: usize,
    width: usize,
    style: LabelStyle,
    message: Option<&'d str>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.format_header(&mut out, diagnostic);

        let annotated = self.collect_annotated_lines(diagnostic);
        let max_line = annotated.last().map_or(1, |a| a.line_num);
        let gutter_width = max_line.to_string().len().max(2);

        if let Some(span) = diagnostic.primary_span() {
            // Editors count columns from 1
            out.push_str(&format!(
                "  {} {}:{}:{}\n",
                "-->".blue(),
                self.file_name.unwrap_or("<source>"),
                span.line,
                span.column + 1
            ));
            out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));
        }

        let mut prev_line_num: Option<u32> = None;
        for line in &annotated {
            if let Some(prev) = prev_line_num {
                if line.line_num > prev + 1 {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width), "...".blue()));
                }
            }
            out.push_str(&format!(
                "{} {} {}\n",
                format!("{:>width$}", line.line_num, width = gutter_width + 1).blue().bold(),
                "|".blue(),
                line.text
            ));
            format_annotations(&mut out, line, gutter_width);
            prev_line_num = Some(line.line_num);
        }

        self.format_footer(&mut out, diagnostic, gutter_width);
        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity = "error".red().bold();
        match diagnostic.code {
            Some(ref code) => out.push_str(&format!(
                "{}[{}]: {}\n",
                severity,
                code.0.as_str().red().bold(),
                diagnostic.message.bold()
            )),
            None => out.push_str(&format!("{}: {}\n", severity, diagnostic.message.bold())),
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic, gutter_width: usize) {
        let indent = " ".repeat(gutter_width + 1);
        for note in &diagnostic.notes {
            out.push_str(&format!("{} {} {}: {}\n", indent, "=".cyan(), "note".cyan().bold(), note));
        }
        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!("{} {} {}: {}\n", indent, "=".cyan(), "help".cyan().bold(), help));
        }
    }

    fn collect_annotated_lines<'d>(&self, diagnostic: &'d Diagnostic) -> Vec<AnnotatedLine<'d>> {
        let mut lines_map: BTreeMap<u32, AnnotatedLine<'d>> = BTreeMap::new();

        for label in &diagnostic.labels {
            let line_num = label.span.line;
            let entry = lines_map.entry(line_num).or_insert_with(|| AnnotatedLine {
                line_num,
                text: self.get_line(line_num).unwrap_or("").to_string(),
                annotations: Vec::new(),
            });
            let col = label.span.column as usize;
            let width = word_width(&entry.text, col);
            entry.annotations.push(Annotation {
                col,
                width,
                style: label.style,
                message: label.message.as_deref(),
            });
        }

        lines_map.into_values().collect()
    }

    /// Source line text by 1-based line number.
    fn get_line(&self, line_num: u32) -> Option<&'a str> {
        let index = (line_num as usize).checked_sub(1)?;
        self.source.lines().nth(index)
    }
}

/// Labels underline the whole identifier they point at, or one character.
fn word_width(text: &str, col: usize) -> usize {
    text.chars()
        .skip(col)
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .count()
        .max(1)
}

/// Whitespace that lines up with `text` up to `col`, keeping tabs.
fn indent_to(text: &str, col: usize) -> String {
    let mut chars = text.chars();
    (0..col)
        .map(|_| match chars.next() {
            Some('\t') => '\t',
            _ => ' ',
        })
        .collect()
}

fn format_annotations(out: &mut String, line: &AnnotatedLine<'_>, gutter_width: usize) {
    let mut sorted: Vec<&Annotation<'_>> = line.annotations.iter().collect();
    sorted.sort_by_key(|a| (a.style != LabelStyle::Primary, a.col));

    let end = sorted.iter().map(|a| a.col + a.width).max().unwrap_or(0);
    let mut marks: Vec<char> = indent_to(&line.text, end).chars().collect();
    for ann in &sorted {
        let ch = match ann.style {
            LabelStyle::Primary => '^',
            LabelStyle::Secondary => '-',
        };
        for mark in &mut marks[ann.col..ann.col + ann.width] {
            if mark.is_whitespace() {
                *mark = ch;
            }
        }
    }
    let underline = color_underline(marks.iter().collect::<String>().trim_end());
    let gutter = format!("{} {}", " ".repeat(gutter_width + 1), "|".blue());

    let messages: Vec<(usize, LabelStyle, &str)> = sorted
        .iter()
        .filter_map(|a| a.message.map(|m| (a.col, a.style, m)))
        .collect();
    match messages.as_slice() {
        [] => out.push_str(&format!("{} {}\n", gutter, underline)),
        [(_, style, msg)] => out.push_str(&format!("{} {} {}\n", gutter, underline, style_message(msg, *style))),
        _ => {
            out.push_str(&format!("{} {}\n", gutter, underline));
            let mut by_column = messages.clone();
            by_column.sort_by_key(|(col, _, _)| std::cmp::Reverse(*col));
            for (col, style, msg) in by_column {
                out.push_str(&format!(
                    "{} {}{} {}\n",
                    gutter,
                    indent_to(&line.text, col),
                    style_message("|", style),
                    style_message(msg, style)
                ));
            }
        }
    }
}

fn style_message(msg: &str, style: LabelStyle) -> String {
    match style {
        LabelStyle::Primary => msg.red().bold().to_string(),
        LabelStyle::Secondary => msg.blue().to_string(),
    }
}

/// Color the underline characters (^ in red, - in blue).
fn color_underline(s: &str) -> String {
    let mut result = String::new();
    let mut run = String::new();
    let mut current = None;

    for ch in s.chars() {
        let kind = matches!(ch, '^' | '-').then_some(ch);
        if kind != current && !run.is_empty() {
            result.push_str(&flush_run(&run, current));
            run.clear();
        }
        run.push(ch);
        current = kind;
    }
    if !run.is_empty() {
        result.push_str(&flush_run(&run, current));
    }
    result
}

fn flush_run(run: &str, kind: Option<char>) -> String {
    match kind {
        Some('^') => run.red().bold().to_string(),
        Some('-') => run.blue().to_string(),
        _ => run.to_string(),
    }
}
