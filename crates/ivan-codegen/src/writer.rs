// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Line-oriented text output with indentation.

use std::ops::{Deref, DerefMut};

const DEFAULT_INDENT: &str = "    ";

/// Accumulates generated text line by line.
///
/// Text is indented when a line is completed, using the level current at
/// that moment. Empty lines are never indented.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<String>,
    pending: String,
    level: usize,
    indent_unit: String,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::with_indent_unit(DEFAULT_INDENT)
    }

    pub fn with_indent_unit(unit: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            pending: String::new(),
            level: 0,
            indent_unit: unit.into(),
        }
    }

    /// Append `text`. Every `\n` completes the current line.
    pub fn write(&mut self, text: &str) {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.pending.push_str(first);
        }
        for part in parts {
            self.complete_line();
            self.pending.push_str(part);
        }
    }

    pub fn writeln(&mut self, text: &str) {
        self.write(text);
        self.complete_line();
    }

    pub fn blank_line(&mut self) {
        self.writeln("");
    }

    /// Run `body` one indentation level deeper.
    ///
    /// The level is restored when `body` returns, including through `?`
    /// or a panic.
    pub fn with_indent<R>(&mut self, body: impl FnOnce(&mut CodeWriter) -> R) -> R {
        let mut guard = IndentGuard::new(self);
        body(&mut guard)
    }

    pub fn indent_level(&self) -> usize {
        self.level
    }

    /// Completed lines followed by the unfinished one, if any.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.lines.clone();
        if !self.pending.is_empty() {
            lines.push(self.pending.clone());
        }
        lines
    }

    pub fn finish(self) -> String {
        let mut output = String::new();
        for line in &self.lines {
            output.push_str(line);
            output.push('\n');
        }
        output.push_str(&self.pending);
        output
    }

    fn complete_line(&mut self) {
        let text = std::mem::take(&mut self.pending);
        if text.is_empty() {
            self.lines.push(text);
        } else {
            self.lines.push(format!("{}{}", self.indent_unit.repeat(self.level), text));
        }
    }
}

/// Restores the indentation level on drop.
struct IndentGuard<'a> {
    writer: &'a mut CodeWriter,
}

impl<'a> IndentGuard<'a> {
    fn new(writer: &'a mut CodeWriter) -> Self {
        writer.level += 1;
        Self { writer }
    }
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        self.writer.level -= 1;
    }
}

impl Deref for IndentGuard<'_> {
    type Target = CodeWriter;

    fn deref(&self) -> &CodeWriter {
        self.writer
    }
}

impl DerefMut for IndentGuard<'_> {
    fn deref_mut(&mut self) -> &mut CodeWriter {
        self.writer
    }
}
