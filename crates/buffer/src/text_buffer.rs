// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing

//! TextBuffer owns the document and its undo history.
//!
//! It combines a gap buffer (character storage) with a line index (line
//! boundaries) and exposes exactly two mutation primitives, [`insert_text`]
//! and [`delete_text`]. Both validate their coordinates before touching
//! storage, append one [`EditRecord`] to the history, remember the position
//! of the change and return an [`EditNotification`] describing it.
//!
//! Cursor and selection are not stored here; they belong to the
//! [`EditSession`](crate::EditSession) that drives the buffer.
//!
//! [`insert_text`]: TextBuffer::insert_text
//! [`delete_text`]: TextBuffer::delete_text

use tracing::{debug, trace};

use crate::action::{ActionKind, EditKind};
use crate::error::{EditError, EditResult};
use crate::gap_buffer::GapBuffer;
use crate::history::{EditRecord, UndoHistory};
use crate::line_index::LineIndex;
use crate::notification::EditNotification;
use crate::types::{LineEnding, Position};

/// Outcome of replaying one undo group (or redo group) against the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    /// Where the cursor belongs after the replay.
    pub cursor: Position,
    /// The primitive edits applied, in order.
    pub edits: Vec<EditNotification>,
}

/// A multi-line text document with grouped undo/redo.
#[derive(Debug)]
pub struct TextBuffer {
    buffer: GapBuffer,
    line_index: LineIndex,
    line_ending: LineEnding,
    read_only: bool,
    history: UndoHistory,
    last_change: Option<Position>,
    /// Notifications not yet drained by external views; `None` when disabled.
    journal: Option<Vec<EditNotification>>,
    /// Mutation counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self {
            buffer: GapBuffer::new(),
            line_index: LineIndex::new(),
            line_ending: LineEnding::default(),
            read_only: false,
            history: UndoHistory::new(),
            last_change: None,
            journal: None,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    /// Creates a text buffer initialized with the given content.
    ///
    /// Line breaks are normalized and the line-ending convention is taken
    /// from the first one found. The load is not an undoable edit.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        let line_ending = LineEnding::detect(content).unwrap_or_default();
        let content = LineEnding::normalize(content);
        let mut line_index = LineIndex::new();
        line_index.rebuild(content.chars());

        Self {
            buffer: GapBuffer::from_str(&content),
            line_index,
            line_ending,
            ..Self::new()
        }
    }

    // ==================== Accessors ====================

    /// Returns the number of lines in the buffer. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Returns the length of the given line in chars, excluding the line break.
    pub fn line_len(&self, line: usize) -> EditResult<usize> {
        self.line_index
            .line_len(line, self.buffer.len())
            .ok_or(EditError::InvalidLine(line))
    }

    /// Returns the text of the given line without its line break.
    pub fn line_text(&self, line: usize) -> EditResult<String> {
        let (start, end) = self.line_bounds(line)?;
        Ok(self.buffer.slice(start, end))
    }

    /// Returns the characters of the given line without its line break.
    pub fn line_chars(&self, line: usize) -> EditResult<Vec<char>> {
        let (start, end) = self.line_bounds(line)?;
        Ok((start..end).filter_map(|i| self.buffer.char_at(i)).collect())
    }

    fn line_bounds(&self, line: usize) -> EditResult<(usize, usize)> {
        let total_len = self.buffer.len();
        let start = self
            .line_index
            .line_start(line)
            .ok_or(EditError::InvalidLine(line))?;
        let end = self
            .line_index
            .line_end(line, total_len)
            .ok_or(EditError::InvalidLine(line))?;
        Ok((start, end))
    }

    /// Returns the total character count, line breaks included.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the entire document with `'\n'` line breaks.
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    /// Returns the entire document using the buffer's line-ending convention.
    pub fn content_with_line_endings(&self) -> String {
        self.line_ending.apply(&self.content())
    }

    /// Returns the text of `start..end`.
    pub fn text_range(&self, start: Position, end: Position) -> EditResult<String> {
        let (from, to) = self.range_offsets(start, end)?;
        Ok(self.buffer.slice(from, to))
    }

    /// The end-of-document position.
    pub fn end_position(&self) -> Position {
        let last_line = self.line_count() - 1;
        let col = self.line_len(last_line).unwrap_or(0);
        Position::new(last_line, col)
    }

    /// Returns true if `pos` addresses a character or a line end.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        self.line_len(pos.line).is_ok_and(|len| pos.col <= len)
    }

    /// Clamps `pos` onto the document.
    pub fn clamp_position(&self, pos: Position) -> Position {
        let line = pos.line.min(self.line_count() - 1);
        let col = pos.col.min(self.line_len(line).unwrap_or(0));
        Position::new(line, col)
    }

    fn offset_of(&self, pos: Position) -> EditResult<usize> {
        if !self.is_valid_position(pos) {
            return Err(EditError::invalid_position(pos));
        }
        let line_start = self
            .line_index
            .line_start(pos.line)
            .ok_or(EditError::InvalidLine(pos.line))?;
        Ok(line_start + pos.col)
    }

    fn range_offsets(&self, start: Position, end: Position) -> EditResult<(usize, usize)> {
        let invalid = || EditError::InvalidRange { start, end };
        if end < start {
            return Err(invalid());
        }
        let from = self.offset_of(start).map_err(|_| invalid())?;
        let to = self.offset_of(end).map_err(|_| invalid())?;
        Ok((from, to))
    }

    // ==================== Flags ====================

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Marks the buffer read-only. The flag is advisory: edit commands check
    /// it, the primitives below do not.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Returns true when the document differs from the last saved state.
    pub fn is_modified(&self) -> bool {
        self.history.is_modified()
    }

    /// Records the current state as saved.
    pub fn mark_saved(&mut self) {
        self.history.mark_saved();
    }

    /// Position of the most recent change, if any.
    pub fn last_change_pos(&self) -> Option<Position> {
        self.last_change
    }

    // ==================== Notification journal ====================

    /// Starts keeping every edit notification until drained.
    pub fn enable_notification_journal(&mut self) {
        self.journal.get_or_insert_with(Vec::new);
    }

    /// Returns and clears the journaled notifications.
    pub fn drain_notifications(&mut self) -> Vec<EditNotification> {
        self.journal.as_mut().map(std::mem::take).unwrap_or_default()
    }

    // ==================== Validation ====================

    /// Debug assertion: verifies that the incremental line_index matches
    /// a fresh rebuild from the buffer content.
    ///
    /// Checks every 64th mutation; compiled out in release builds.
    #[cfg(debug_assertions)]
    fn assert_line_index_consistent(&mut self) {
        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }
        let mut expected = LineIndex::new();
        expected.rebuild(self.buffer.chars());
        let actual = self.line_index.line_starts();
        let expected_starts = expected.line_starts();
        assert_eq!(
            actual, expected_starts,
            "line_index drift detected after {} mutations!\n  buffer len: {}\n  actual line_starts:   {:?}\n  expected line_starts: {:?}",
            self.debug_mutation_count, self.buffer.len(), actual, expected_starts,
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_line_index_consistent(&mut self) {}

    // ==================== Mutations ====================

    /// Inserts `text` at `pos`.
    ///
    /// `text` may contain line breaks in any convention; they are stored as
    /// `'\n'`. The returned notification's `end` is the position just after
    /// the inserted text. An empty `text` changes nothing and records nothing.
    pub fn insert_text(
        &mut self,
        pos: Position,
        text: &str,
        action: ActionKind,
    ) -> EditResult<EditNotification> {
        let text = LineEnding::normalize(text);
        let note = self.apply_insert(pos, &text, action)?;
        if !note.text.is_empty() {
            self.history.record(EditRecord {
                kind: EditKind::Insert,
                start: note.start,
                end: note.end,
                text: note.text.clone(),
                action,
            });
        }
        Ok(note)
    }

    /// Deletes the half-open range `start..end`.
    ///
    /// Lines spanned by the range are joined. An empty range changes nothing
    /// and records nothing.
    pub fn delete_text(
        &mut self,
        start: Position,
        end: Position,
        action: ActionKind,
    ) -> EditResult<EditNotification> {
        let note = self.apply_delete(start, end, action)?;
        if !note.text.is_empty() {
            self.history.record(EditRecord {
                kind: EditKind::Delete,
                start: note.start,
                end: note.end,
                text: note.text.clone(),
                action,
            });
        }
        Ok(note)
    }

    fn apply_insert(
        &mut self,
        pos: Position,
        text: &str,
        action: ActionKind,
    ) -> EditResult<EditNotification> {
        let offset = self.offset_of(pos)?;
        let count = self.buffer.insert_str(offset, text);
        if count == 0 {
            return Ok(EditNotification::new(
                action,
                EditKind::Insert,
                pos,
                pos,
                String::new(),
            ));
        }
        self.line_index.apply_insert(offset, text);

        let end = match text.rfind('\n') {
            Some(idx) => Position::new(
                pos.line + text.matches('\n').count(),
                text[idx + 1..].chars().count(),
            ),
            None => pos.with_col(pos.col + count),
        };
        trace!(?action, start = %pos, end = %end, "insert");

        self.assert_line_index_consistent();
        self.last_change = Some(end);
        Ok(self.publish(EditNotification::new(
            action,
            EditKind::Insert,
            pos,
            end,
            text.to_string(),
        )))
    }

    fn apply_delete(
        &mut self,
        start: Position,
        end: Position,
        action: ActionKind,
    ) -> EditResult<EditNotification> {
        let (from, to) = self.range_offsets(start, end)?;
        if from == to {
            return Ok(EditNotification::new(
                action,
                EditKind::Delete,
                start,
                start,
                String::new(),
            ));
        }
        let removed = self.buffer.remove(from, to);
        self.line_index.apply_remove(from, to);
        trace!(?action, start = %start, end = %end, "delete");

        self.assert_line_index_consistent();
        self.last_change = Some(start);
        Ok(self.publish(EditNotification::new(
            action,
            EditKind::Delete,
            start,
            end,
            removed,
        )))
    }

    fn publish(&mut self, note: EditNotification) -> EditNotification {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(note.clone());
        }
        note
    }

    // ==================== Undo / Redo ====================
    // Chunk: docs/chunks/undo_history - Grouped undo/redo history

    /// Opens an undo group; see [`UndoHistory::begin_group`].
    pub fn begin_undo_group(&mut self, merge: bool) {
        self.history.begin_group(merge);
    }

    /// Closes the innermost undo group; see [`UndoHistory::flush_group`].
    pub fn flush_undo_group(&mut self) {
        self.history.flush_group();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Label of the action the next undo reverts, e.g. "typing".
    pub fn undo_description(&self) -> Option<&'static str> {
        self.history.undo_description()
    }

    /// Label of the action the next redo reapplies.
    pub fn redo_description(&self) -> Option<&'static str> {
        self.history.redo_description()
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// Reverts the most recent undo group.
    ///
    /// Records are reverted newest first. The cursor lands at the start of an
    /// undone insert, or at the end of the text an undone delete restored, as
    /// decided by the last record reverted.
    pub fn undo(&mut self) -> EditResult<Replay> {
        let records = self
            .history
            .step_undo()
            .ok_or(EditError::EmptyHistoryStack)?;
        debug!(records = records.len(), "undo");

        let mut edits = Vec::with_capacity(records.len());
        let mut cursor = Position::default();
        for record in records.iter().rev() {
            let note = match record.kind {
                EditKind::Insert => {
                    let note = self.apply_delete(record.start, record.end, record.action)?;
                    cursor = note.start;
                    note
                }
                EditKind::Delete => {
                    let note = self.apply_insert(record.start, &record.text, record.action)?;
                    cursor = note.end;
                    note
                }
            };
            edits.push(note);
        }
        Ok(Replay { cursor, edits })
    }

    /// Reapplies the most recently undone group.
    ///
    /// Records are reapplied oldest first. The cursor lands at the end of a
    /// redone insert or at the start of a redone delete.
    pub fn redo(&mut self) -> EditResult<Replay> {
        let records = self
            .history
            .step_redo()
            .ok_or(EditError::EmptyHistoryStack)?;
        debug!(records = records.len(), "redo");

        let mut edits = Vec::with_capacity(records.len());
        let mut cursor = Position::default();
        for record in &records {
            let note = match record.kind {
                EditKind::Insert => {
                    let note = self.apply_insert(record.start, &record.text, record.action)?;
                    cursor = note.end;
                    note
                }
                EditKind::Delete => {
                    let note = self.apply_delete(record.start, record.end, record.action)?;
                    cursor = note.start;
                    note
                }
            };
            edits.push(note);
        }
        Ok(Replay { cursor, edits })
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
