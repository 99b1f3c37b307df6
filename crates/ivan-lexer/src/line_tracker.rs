// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Byte offset to line/column conversion.

use ivan_ast::Span;

/// Converts byte offsets into [`Span`]s, scanning the source only once.
///
/// Offsets must be queried in non-decreasing order.
pub struct LineTracker<'a> {
    source: &'a str,
    /// Everything before `scanned` has been checked for newlines.
    scanned: usize,
    line: u32,
    line_start: usize,
}

impl<'a> LineTracker<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            scanned: 0,
            line: 1,
            line_start: 0,
        }
    }

    pub fn span_at(&mut self, offset: usize) -> Span {
        debug_assert!(
            offset >= self.scanned,
            "LineTracker queried backwards ({} < {})",
            offset,
            self.scanned
        );
        let offset = offset.min(self.source.len());
        if offset > self.scanned {
            let chunk = &self.source.as_bytes()[self.scanned..offset];
            for (i, byte) in chunk.iter().enumerate() {
                if *byte == b'\n' {
                    self.line += 1;
                    self.line_start = self.scanned + i + 1;
                }
            }
            self.scanned = offset;
        }
        let column = self.source[self.line_start..offset].chars().count();
        Span::new(self.line, column as u32)
    }
}
