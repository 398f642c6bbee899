// Chunk: docs/chunks/edit_notification - Post-edit notification and coordinate rebasing

//! The notification raised after every primitive edit.
//!
//! Anything that stores a [`Position`] outside the buffer (the session's
//! cursor and anchor, a saved caret, a dragged range, another view's scroll
//! anchor) must translate it through each notification, otherwise it may
//! point past the end of a line or at the wrong text.

use crate::action::{ActionKind, EditKind};
use crate::types::{DirtyLines, Position};

/// Describes one applied primitive edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditNotification {
    pub action: ActionKind,
    pub kind: EditKind,
    /// Start of the edited range.
    pub start: Position,
    /// For an insert, the end of the inserted text; for a delete, the end of
    /// the removed range in pre-edit coordinates.
    pub end: Position,
    /// The inserted or removed text.
    pub text: String,
    /// Net change in line count.
    pub line_delta: isize,
    /// Column shift applied to text following the edit on its last line.
    pub column_delta: isize,
    pub dirty: DirtyLines,
}

impl EditNotification {
    pub(crate) fn new(
        action: ActionKind,
        kind: EditKind,
        start: Position,
        end: Position,
        text: String,
    ) -> Self {
        let lines = (end.line - start.line) as isize;
        let cols = end.col as isize - start.col as isize;
        let (line_delta, column_delta) = match kind {
            EditKind::Insert => (lines, cols),
            EditKind::Delete => (-lines, -cols),
        };
        let dirty = DirtyLines::for_edit(start, end);
        Self {
            action,
            kind,
            start,
            end,
            text,
            line_delta,
            column_delta,
            dirty,
        }
    }

    pub fn is_insert(&self) -> bool {
        self.kind == EditKind::Insert
    }

    /// Translates a pre-edit position into post-edit coordinates.
    ///
    /// Positions before the edit are unchanged. An insert pushes positions at
    /// or after its start forward. A delete collapses positions inside the
    /// removed range onto its start and pulls later positions back.
    pub fn rebase(&self, pos: Position) -> Position {
        match self.kind {
            EditKind::Insert => {
                if pos < self.start {
                    pos
                } else if pos.line == self.start.line {
                    Position::new(self.end.line, self.end.col + (pos.col - self.start.col))
                } else {
                    Position::new(pos.line + (self.end.line - self.start.line), pos.col)
                }
            }
            EditKind::Delete => {
                if pos <= self.start {
                    pos
                } else if pos <= self.end {
                    self.start
                } else if pos.line == self.end.line {
                    Position::new(self.start.line, self.start.col + (pos.col - self.end.col))
                } else {
                    Position::new(pos.line - (self.end.line - self.start.line), pos.col)
                }
            }
        }
    }

    /// Like [`rebase`](Self::rebase), for the end of a stored range: an
    /// insert exactly at the position lands after it, so the range does not
    /// grow over the inserted text.
    pub fn rebase_end(&self, pos: Position) -> Position {
        if self.is_insert() && pos == self.start {
            pos
        } else {
            self.rebase(pos)
        }
    }

    /// Rebases a stored `(start, end)` range, in either order. An empty range
    /// moves as one position.
    pub fn rebase_range(&self, a: Position, b: Position) -> (Position, Position) {
        if a == b {
            let pos = self.rebase(a);
            (pos, pos)
        } else if a < b {
            (self.rebase(a), self.rebase_end(b))
        } else {
            (self.rebase_end(a), self.rebase(b))
        }
    }
}
