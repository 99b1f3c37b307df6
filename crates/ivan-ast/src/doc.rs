// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Documentation attached to declarations.

use crate::Span;

/// The documentation block of one declaration.
///
/// Always holds at least one line. Empty strings stand for blank lines
/// inside the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocString {
    lines: Vec<String>,
    span: Span,
}

/// Returned when building a [`DocString`] without any lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDocString;

impl DocString {
    pub fn new(lines: Vec<String>, span: Span) -> Result<Self, EmptyDocString> {
        if lines.is_empty() {
            return Err(EmptyDocString);
        }
        Ok(Self { lines, span })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Where the `/**` of this block starts.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Render as a `/** ... */` block, one entry per output line.
    pub fn block_lines(&self) -> Vec<String> {
        let mut result = Vec::with_capacity(self.lines.len() + 2);
        result.push("/**".to_string());
        for line in &self.lines {
            if line.is_empty() {
                result.push(" *".to_string());
            } else {
                result.push(format!(" * {}", line));
            }
        }
        result.push("*/".to_string());
        result
    }

    /// Render as `///` line comments.
    pub fn line_comment_lines(&self) -> Vec<String> {
        self.lines.iter().map(|line| format!("/// {}", line)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> DocString {
        DocString::new(lines.iter().map(|s| s.to_string()).collect(), Span::new(1, 0)).unwrap()
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(DocString::new(Vec::new(), Span::new(1, 0)), Err(EmptyDocString));
    }

    #[test]
    fn block_style() {
        assert_eq!(
            doc(&["a", "", "b"]).block_lines(),
            vec!["/**", " * a", " *", " * b", "*/"]
        );
    }

    #[test]
    fn line_style() {
        assert_eq!(
            doc(&["a", "", "b"]).line_comment_lines(),
            vec!["/// a", "/// ", "/// b"]
        );
    }
}
