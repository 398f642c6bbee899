// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Position in the buffer as (line, column) where both are 0-indexed.
///
/// Columns count `char`s. A column equal to the line length is the
/// end-of-line boundary; it is a valid position but not an indexable character.
// Chunk: docs/chunks/text_selection_model - Selection anchor and range API (added Ord)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Returns the same line at a different column.
    pub fn with_col(self, col: usize) -> Self {
        Self { line: self.line, col }
    }

    /// Returns the two positions in document order.
    pub fn ordered(a: Position, b: Position) -> (Position, Position) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.col.cmp(&other.col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Line terminator convention used when text leaves the buffer.
///
/// Internally every line break is stored as `'\n'`; the convention only
/// matters when rendering the whole document or handing text to the clipboard.
// Chunk: docs/chunks/line_endings - End-of-line convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }

    /// Detects the convention from the first line break in `text`.
    ///
    /// Returns `None` when the text contains no line break at all.
    pub fn detect(text: &str) -> Option<LineEnding> {
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\n' => return Some(LineEnding::Lf),
                '\r' if chars.peek() == Some(&'\n') => return Some(LineEnding::CrLf),
                '\r' => return Some(LineEnding::Cr),
                _ => {}
            }
        }
        None
    }

    /// Rewrites `\r\n` and lone `\r` as `\n`.
    pub fn normalize(text: &str) -> std::borrow::Cow<'_, str> {
        if !text.contains('\r') {
            return std::borrow::Cow::Borrowed(text);
        }
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == '\r' {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            } else {
                out.push(ch);
            }
        }
        std::borrow::Cow::Owned(out)
    }

    /// Replaces every `\n` in `text` with this convention.
    pub fn apply(self, text: &str) -> String {
        match self {
            LineEnding::Lf => text.to_string(),
            other => text.replace('\n', other.as_str()),
        }
    }
}

/// Information about which lines were dirtied by a mutation.
/// Accumulated by the edit session so a view can redraw once per command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DirtyLines {
    /// No lines changed (e.g., cursor-only movement or no-op deletion).
    #[default]
    None,
    /// A single line changed (most insertions, deletions within a line).
    Single(usize),
    /// A range of lines changed [from, to).
    Range { from: usize, to: usize },
    /// Everything from a line to the end of the buffer changed.
    /// Used whenever an edit adds or removes line breaks.
    FromLineToEnd(usize),
}

impl DirtyLines {
    /// Returns the dirty region for an edit spanning `start..end`.
    pub fn for_edit(start: Position, end: Position) -> Self {
        if start.line == end.line {
            DirtyLines::Single(start.line)
        } else {
            DirtyLines::FromLineToEnd(start.line)
        }
    }

    /// Returns true if no lines were dirtied.
    pub fn is_none(&self) -> bool {
        matches!(self, DirtyLines::None)
    }

    /// Returns the starting line of the dirty region, if any.
    pub fn start_line(&self) -> Option<usize> {
        match self {
            DirtyLines::None => None,
            DirtyLines::Single(line) | DirtyLines::FromLineToEnd(line) => Some(*line),
            DirtyLines::Range { from, .. } => Some(*from),
        }
    }

    /// Merges another dirty region into this one, producing the smallest
    /// region that covers both.
    pub fn merge(&mut self, other: DirtyLines) {
        let merged = match (&*self, &other) {
            (DirtyLines::None, _) => other,
            (_, DirtyLines::None) => return,
            (DirtyLines::FromLineToEnd(a), b) | (b, DirtyLines::FromLineToEnd(a)) => {
                let b = b.start_line().unwrap_or(*a);
                DirtyLines::FromLineToEnd((*a).min(b))
            }
            (DirtyLines::Single(a), DirtyLines::Single(b)) if a == b => DirtyLines::Single(*a),
            (a, b) => {
                let (a_from, a_to) = a.bounds();
                let (b_from, b_to) = b.bounds();
                DirtyLines::Range {
                    from: a_from.min(b_from),
                    to: a_to.max(b_to),
                }
            }
        };
        *self = merged;
    }

    /// Half-open line bounds of a `Single` or `Range` region.
    fn bounds(&self) -> (usize, usize) {
        match self {
            DirtyLines::Single(line) => (*line, *line + 1),
            DirtyLines::Range { from, to } => (*from, *to),
            DirtyLines::None | DirtyLines::FromLineToEnd(_) => (0, 0),
        }
    }
}
