//! Byte offset to line/column conversion.

/// Pre-computed line start offsets for a document
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    content_len: usize,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(content.match_indices('\n').map(|(i, _)| i + 1));
        Self {
            line_starts,
            content_len: content.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where the 1-indexed `line` starts
    pub fn get_line_start_byte(&self, line: usize) -> Option<usize> {
        line.checked_sub(1).and_then(|i| self.line_starts.get(i).copied())
    }

    /// 1-indexed (line, column) for a byte offset. Columns count bytes.
    ///
    /// Offsets past the end are clamped to the end of the content.
    pub fn line_col(&self, byte_offset: usize) -> (usize, usize) {
        let offset = byte_offset.min(self.content_len);
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line - 1];
        (line, offset - line_start + 1)
    }
}
