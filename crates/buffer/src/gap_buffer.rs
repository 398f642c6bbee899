// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing

//! Gap buffer storage for the document text.
//!
//! Characters live in a single array with a movable gap. Every primitive edit
//! first moves the gap to the edit offset, so consecutive edits at nearby
//! offsets (typing, backspacing, indenting a run of lines) stay cheap.

const INITIAL_GAP_SIZE: usize = 64;
const GAP_GROWTH_FACTOR: usize = 2;

/// A gap buffer over `char`s.
///
/// Logical offsets exclude the gap; physical indices include it.
#[derive(Debug)]
pub struct GapBuffer {
    /// [pre-gap content | gap | post-gap content]
    data: Vec<char>,
    gap_start: usize,
    gap_end: usize,
}

impl GapBuffer {
    /// Creates a new empty gap buffer.
    pub fn new() -> Self {
        Self {
            data: vec!['\0'; INITIAL_GAP_SIZE],
            gap_start: 0,
            gap_end: INITIAL_GAP_SIZE,
        }
    }

    /// Creates a gap buffer holding `text`, with the gap at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        let mut data: Vec<char> = text.chars().collect();
        let len = data.len();
        data.resize(len + INITIAL_GAP_SIZE, '\0');
        let capacity = data.len();
        Self {
            data,
            gap_start: len,
            gap_end: capacity,
        }
    }

    /// Logical length in chars.
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Moves the gap so that it starts at logical offset `pos`.
    ///
    /// O(distance moved).
    pub fn move_gap_to(&mut self, pos: usize) {
        let pos = pos.min(self.len());
        if pos < self.gap_start {
            let shift = self.gap_start - pos;
            self.data
                .copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start = pos;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            let shift = pos - self.gap_start;
            self.data
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Grows the gap in place until it holds at least `min_size` slots.
    /// The gap start does not move.
    fn ensure_gap(&mut self, min_size: usize) {
        if self.gap_len() >= min_size {
            return;
        }
        let needed = min_size - self.gap_len();
        let growth = needed.max(self.data.len() * GAP_GROWTH_FACTOR);

        let old_len = self.data.len();
        let post_gap_len = old_len - self.gap_end;
        let new_len = old_len + growth;
        self.data.resize(new_len, '\0');
        if post_gap_len > 0 {
            self.data
                .copy_within(self.gap_end..old_len, new_len - post_gap_len);
        }
        self.gap_end = new_len - post_gap_len;
    }

    /// Inserts `text` at logical offset `offset`.
    ///
    /// Returns the number of chars inserted.
    pub fn insert_str(&mut self, offset: usize, text: &str) -> usize {
        let count = text.chars().count();
        if count == 0 {
            return 0;
        }
        self.move_gap_to(offset);
        self.ensure_gap(count);
        for ch in text.chars() {
            self.data[self.gap_start] = ch;
            self.gap_start += 1;
        }
        count
    }

    /// Removes the logical range `start..end` and returns the removed text.
    ///
    /// The range is clamped to the buffer length.
    pub fn remove(&mut self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        if start >= end {
            return String::new();
        }
        self.move_gap_to(start);
        let count = end - start;
        let removed: String = self.data[self.gap_end..self.gap_end + count]
            .iter()
            .collect();
        self.gap_end += count;
        removed
    }

    /// Returns the character at the given logical offset.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.len() {
            return None;
        }
        let physical = if pos < self.gap_start {
            pos
        } else {
            pos + self.gap_len()
        };
        Some(self.data[physical])
    }

    /// Iterates over all characters in logical order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.data[..self.gap_start]
            .iter()
            .chain(self.data[self.gap_end..].iter())
            .copied()
    }

    /// Returns the logical range `start..end` as a String.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        if start >= end {
            return String::new();
        }
        self.chars().skip(start).take(end - start).collect()
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in self.chars() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}
