// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing

//! Line index for tracking line boundaries in the text buffer.
//!
//! Maintains an array of line start offsets so that (line, column) positions
//! can be converted to buffer offsets without scanning. Range inserts and
//! removals update the array incrementally.

/// Tracks line boundaries in a text buffer.
///
/// `line_starts[0]` is always 0 and the array is strictly ascending.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new line index with a single empty line.
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
        }
    }

    /// Rebuilds the line index from the given content.
    ///
    /// O(n); only needed when a whole document is loaded.
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.line_starts.clear();
        self.line_starts.push(0);

        let mut offset = 0;
        for ch in content {
            offset += 1;
            if ch == '\n' {
                self.line_starts.push(offset);
            }
        }
    }

    /// Returns the number of lines. Always at least one.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the character offset where the given line starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Returns the character offset of the end of the given line.
    ///
    /// For all lines except the last, this points at the newline character.
    /// For the last line, this equals `total_len`.
    pub fn line_end(&self, line: usize, total_len: usize) -> Option<usize> {
        if line >= self.line_count() {
            return None;
        }

        if line + 1 < self.line_count() {
            Some(self.line_starts[line + 1] - 1)
        } else {
            Some(total_len)
        }
    }

    /// Returns the length of the given line, excluding the newline.
    pub fn line_len(&self, line: usize, total_len: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = self.line_end(line, total_len)?;
        Some(end - start)
    }

    /// Returns the line number containing the given character offset.
    ///
    /// A newline character belongs to the line it terminates.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Updates the index after `text` was inserted at `offset`.
    ///
    /// Line starts after the insertion point shift by the inserted length and
    /// one new start is spliced in after every `'\n'` of `text`.
    pub fn apply_insert(&mut self, offset: usize, text: &str) {
        let line = self.line_at_offset(offset);

        let mut new_starts = Vec::new();
        let mut len = 0;
        for ch in text.chars() {
            len += 1;
            if ch == '\n' {
                new_starts.push(offset + len);
            }
        }
        if len == 0 {
            return;
        }

        for start in self.line_starts.iter_mut().skip(line + 1) {
            *start += len;
        }
        let at = line + 1;
        self.line_starts.splice(at..at, new_starts);
    }

    /// Updates the index after the characters `start..end` were removed.
    ///
    /// Line starts inside `(start, end]` belonged to removed newlines and
    /// are dropped; later starts shift down by the removed length.
    pub fn apply_remove(&mut self, start: usize, end: usize) {
        if end <= start {
            return;
        }
        let removed = end - start;
        self.line_starts.retain(|&s| s <= start || s > end);
        for s in self.line_starts.iter_mut() {
            if *s > end {
                *s -= removed;
            }
        }
    }

    /// Returns the raw line_starts array (for debug validation).
    #[cfg(any(debug_assertions, test))]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
