// Chunk: docs/chunks/edit_session - Edit commands over a buffer with cursor, anchor and selection
// Chunk: docs/chunks/text_selection_model - Selection anchor and range API

//! The edit session: high-level edit commands over one [`TextBuffer`].
//!
//! A session owns the buffer, the cursor and selection anchor, and the
//! transient state of interactive operations (overwrite mode, a pushed
//! selection, the caret saved while a drop indicator is shown, a text drag in
//! progress). Every command is a transaction: it opens an undo group, issues
//! primitive edits, flushes the group, then places the cursor and asks the
//! view to keep it visible.
//!
//! Every stored position is rebased through each primitive edit, so none of
//! them can point past the end of a line after an edit elsewhere.
//!
//! Commands are split across submodules by concern:
//! - `editing`: typing, deletion, clipboard, replace
//! - `indent`: Tab and Shift+Tab
//! - `case`: case transforms
//! - `drag_drop`: drag source and drop target

mod case;
mod drag_drop;
mod editing;
mod indent;

pub use case::{capitalize, sentence_case, swap_case};
pub use drag_drop::{negotiate_drop_effect, DropEffect};

use tracing::debug;

use crate::action::ActionKind;
use crate::auto_indent::{self, IndentContext, IndentEdit};
use crate::collaborators::{EditorView, NullView};
use crate::config::{EditorConfig, SourceOptions};
use crate::error::{EditError, EditResult};
use crate::grapheme::{word_boundary_left, word_boundary_right};
use crate::notification::EditNotification;
use crate::text_buffer::{Replay, TextBuffer};
use crate::types::{DirtyLines, Position};

/// A selected text range being dragged out of this session.
#[derive(Debug, Clone, Copy)]
struct DraggedText {
    start: Position,
    end: Position,
}

/// High-level editing over a [`TextBuffer`].
pub struct EditSession {
    buffer: TextBuffer,
    config: EditorConfig,
    cursor: Position,
    anchor: Position,
    overwrite: bool,
    /// The next typed character may join the trailing typing group.
    merge_undo: bool,
    last_replace_len: usize,
    /// Selections saved by `with_pushed_selection`, innermost last.
    pushed_selections: Vec<(Position, Position)>,
    /// Caret position saved while the drop indicator is shown.
    saved_caret: Option<Position>,
    dragged: Option<DraggedText>,
    dirty: DirtyLines,
    view: Box<dyn EditorView>,
}

impl EditSession {
    /// Creates a session over `buffer` with the cursor at the document start.
    pub fn new(buffer: TextBuffer, config: EditorConfig) -> Self {
        Self {
            buffer,
            config,
            cursor: Position::default(),
            anchor: Position::default(),
            overwrite: false,
            merge_undo: false,
            last_replace_len: 0,
            pushed_selections: Vec::new(),
            saved_caret: None,
            dragged: None,
            dirty: DirtyLines::None,
            view: Box::new(NullView),
        }
    }

    /// Creates a session over a new empty document using the configured
    /// line-ending convention.
    pub fn empty(config: EditorConfig) -> Self {
        let mut buffer = TextBuffer::new();
        buffer.set_line_ending(config.line_ending);
        Self::new(buffer, config)
    }

    /// Attaches the view that receives visibility, scroll and caret requests.
    pub fn with_view(mut self, view: Box<dyn EditorView>) -> Self {
        self.view = view;
        self
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Mutable access for flags (read-only, line ending, save point).
    ///
    /// Edits made directly through the buffer bypass cursor rebasing.
    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Switches the document type's brace options and auto-indent.
    pub fn set_source_options(&mut self, options: SourceOptions, auto_indent: bool) {
        self.config.source = options;
        self.config.auto_indent = auto_indent;
    }

    /// Lines changed since the last call.
    pub fn take_dirty_lines(&mut self) -> DirtyLines {
        std::mem::take(&mut self.dirty)
    }

    // ==================== Cursor and selection ====================

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    /// The selection as (start, end) in document order. Empty when the
    /// anchor sits on the cursor.
    pub fn selection(&self) -> (Position, Position) {
        Position::ordered(self.anchor, self.cursor)
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    /// The selected text, if anything is selected.
    pub fn selected_text(&self) -> Option<String> {
        if !self.has_selection() {
            return None;
        }
        let (start, end) = self.selection();
        self.buffer.text_range(start, end).ok()
    }

    /// Moves the cursor and collapses the selection. Clamped to the document.
    pub fn set_cursor(&mut self, pos: Position) {
        let pos = self.buffer.clamp_position(pos);
        self.collapse_to(pos);
    }

    /// Moves the cursor, keeping the anchor. Clamped to the document.
    pub fn extend_selection_to(&mut self, pos: Position) {
        self.cursor = self.buffer.clamp_position(pos);
        self.merge_undo = false;
        self.view.ensure_visible(self.cursor);
    }

    /// Sets anchor and cursor. Both are clamped to the document.
    pub fn set_selection(&mut self, anchor: Position, cursor: Position) {
        self.anchor = self.buffer.clamp_position(anchor);
        self.extend_selection_to(cursor);
    }

    pub fn select_all(&mut self) {
        let end = self.buffer.end_position();
        self.set_selection(Position::default(), end);
    }

    /// Moves to the start of the previous word, crossing to the end of the
    /// previous line at column 0.
    pub fn move_word_left(&mut self, extend: bool) -> EditResult<()> {
        let pos = self.cursor;
        let target = if pos.col == 0 {
            match pos.line.checked_sub(1) {
                Some(line) => Position::new(line, self.buffer.line_len(line)?),
                None => pos,
            }
        } else {
            let chars = self.buffer.line_chars(pos.line)?;
            pos.with_col(word_boundary_left(&chars, pos.col))
        };
        self.move_to(target, extend);
        Ok(())
    }

    /// Moves to the end of the next word, crossing to the start of the next
    /// line at a line end.
    pub fn move_word_right(&mut self, extend: bool) -> EditResult<()> {
        let pos = self.cursor;
        let chars = self.buffer.line_chars(pos.line)?;
        let target = if pos.col >= chars.len() {
            if pos.line + 1 < self.buffer.line_count() {
                Position::new(pos.line + 1, 0)
            } else {
                pos
            }
        } else {
            pos.with_col(word_boundary_right(&chars, pos.col))
        };
        self.move_to(target, extend);
        Ok(())
    }

    fn move_to(&mut self, pos: Position, extend: bool) {
        if extend {
            self.extend_selection_to(pos);
        } else {
            self.collapse_to(pos);
        }
    }

    /// Places anchor and cursor at `pos` and asks the view to show it.
    fn collapse_to(&mut self, pos: Position) {
        self.anchor = pos;
        self.cursor = pos;
        self.merge_undo = false;
        self.view.ensure_visible(pos);
    }

    // ==================== Modes ====================

    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    /// Flips overwrite mode and asks the view to redraw the caret.
    pub fn toggle_overwrite(&mut self) {
        self.overwrite = !self.overwrite;
        self.merge_undo = false;
        self.view.update_caret();
    }

    /// Moves the cursor to the position of the most recent change.
    pub fn goto_last_change(&mut self) {
        if let Some(pos) = self.buffer.last_change_pos() {
            let pos = self.buffer.clamp_position(pos);
            self.collapse_to(pos);
        }
    }

    /// Length of the text inserted by the most recent replace.
    pub fn last_replace_len(&self) -> usize {
        self.last_replace_len
    }

    /// Runs `f`, then restores the selection that was active before it,
    /// translated through every edit `f` made.
    pub fn with_pushed_selection<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.pushed_selections.push((self.anchor, self.cursor));
        let result = f(self);
        if let Some((anchor, cursor)) = self.pushed_selections.pop() {
            self.anchor = anchor;
            self.cursor = cursor;
        }
        result
    }

    // ==================== Undo / Redo ====================

    pub fn can_undo(&self) -> bool {
        self.buffer.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.buffer.can_redo()
    }

    /// Reverts the most recent undo group and collapses the selection at the
    /// position the replay reports.
    pub fn undo(&mut self) -> EditResult<()> {
        self.ensure_editable()?;
        let replay = self.buffer.undo()?;
        self.finish_replay(replay);
        Ok(())
    }

    /// Reapplies the most recently undone group.
    pub fn redo(&mut self) -> EditResult<()> {
        self.ensure_editable()?;
        let replay = self.buffer.redo()?;
        self.finish_replay(replay);
        Ok(())
    }

    fn finish_replay(&mut self, replay: Replay) {
        for note in &replay.edits {
            self.after_edit(note);
        }
        let pos = self.buffer.clamp_position(replay.cursor);
        self.collapse_to(pos);
    }

    // ==================== Primitive plumbing ====================

    fn ensure_editable(&self) -> EditResult<()> {
        if self.buffer.is_read_only() {
            return Err(EditError::BufferReadOnly);
        }
        Ok(())
    }

    /// Runs `f` inside one undo group. The group is flushed even when `f`
    /// fails.
    fn in_undo_group<T>(
        &mut self,
        merge: bool,
        f: impl FnOnce(&mut Self) -> EditResult<T>,
    ) -> EditResult<T> {
        self.merge_undo = false;
        self.buffer.begin_undo_group(merge);
        let result = f(self);
        self.buffer.flush_undo_group();
        result
    }

    fn indent_context(&self) -> IndentContext {
        IndentContext {
            options: self.config.source,
            tab_size: self.config.tab_size,
            insert_tabs: self.config.insert_tabs,
            overwrite: self.overwrite,
        }
    }

    /// Inserts `text` and runs the auto-indent hook.
    ///
    /// Returns the position after the inserted text, moved past any
    /// follow-up edit the hook made.
    fn insert_at(&mut self, pos: Position, text: &str, action: ActionKind) -> EditResult<Position> {
        let note = self.buffer.insert_text(pos, text, action)?;
        self.after_edit(&note);
        let mut end = note.end;

        if self.config.auto_indent {
            if let Some(edit) = auto_indent::plan(&self.buffer, &note, &self.indent_context())? {
                debug!(?edit, "applying auto-indent");
                let follow = match edit {
                    IndentEdit::Insert { at, text } => {
                        self.buffer.insert_text(at, &text, ActionKind::AutoIndent)?
                    }
                    IndentEdit::Delete { start, end } => {
                        self.buffer.delete_text(start, end, ActionKind::AutoIndent)?
                    }
                };
                self.after_edit(&follow);
                end = follow.rebase(end);
            }
        }
        Ok(end)
    }

    fn delete_range(&mut self, start: Position, end: Position, action: ActionKind) -> EditResult<()> {
        let note = self.buffer.delete_text(start, end, action)?;
        self.after_edit(&note);
        Ok(())
    }

    /// Translates every stored position through `note` and records the
    /// dirty lines.
    fn after_edit(&mut self, note: &EditNotification) {
        self.cursor = note.rebase(self.cursor);
        self.anchor = note.rebase(self.anchor);
        for (anchor, cursor) in &mut self.pushed_selections {
            (*anchor, *cursor) = note.rebase_range(*anchor, *cursor);
        }
        if let Some(caret) = self.saved_caret.as_mut() {
            *caret = note.rebase(*caret);
        }
        if let Some(dragged) = self.dragged.as_mut() {
            (dragged.start, dragged.end) = note.rebase_range(dragged.start, dragged.end);
        }
        self.dirty.merge(note.dirty.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(doc: &str) -> EditSession {
        EditSession::new(TextBuffer::from_str(doc), EditorConfig::default())
    }

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    // ==================== Selection ====================

    #[test]
    fn test_selection_is_ordered() {
        let mut s = session("hello\nworld");
        s.set_selection(p(1, 2), p(0, 1));
        assert_eq!(s.selection(), (p(0, 1), p(1, 2)));
        assert_eq!(s.selected_text().as_deref(), Some("ello\nwo"));
    }

    #[test]
    fn test_set_cursor_clamps_and_collapses() {
        let mut s = session("ab\ncd");
        s.set_selection(p(0, 0), p(1, 1));
        s.set_cursor(p(7, 9));
        assert_eq!(s.cursor(), p(1, 2));
        assert!(!s.has_selection());
    }

    #[test]
    fn test_select_all() {
        let mut s = session("ab\ncd");
        s.select_all();
        assert_eq!(s.selection(), (p(0, 0), p(1, 2)));
    }

    #[test]
    fn test_word_movement_crosses_lines() {
        let mut s = session("foo bar\nbaz");
        s.set_cursor(p(0, 4));
        s.move_word_right(false).unwrap();
        assert_eq!(s.cursor(), p(0, 7));
        s.move_word_right(false).unwrap();
        assert_eq!(s.cursor(), p(1, 0));
        s.move_word_left(false).unwrap();
        assert_eq!(s.cursor(), p(0, 7));
        s.move_word_left(true).unwrap();
        assert_eq!(s.selection(), (p(0, 4), p(0, 7)));
    }

    // ==================== Rebasing ====================

    #[test]
    fn test_pushed_selection_is_rebased() {
        let mut s = session("one two three");
        s.set_selection(p(0, 8), p(0, 13));
        s.with_pushed_selection(|s| {
            s.set_cursor(p(0, 0));
            s.type_char('>').unwrap();
            s.type_char('>').unwrap();
        });
        assert_eq!(s.selection(), (p(0, 10), p(0, 15)));
        assert_eq!(s.selected_text().as_deref(), Some("three"));
    }

    #[test]
    fn test_pushed_selection_does_not_grow_over_insert_at_its_end() {
        let mut s = session("one two");
        s.set_selection(p(0, 0), p(0, 3));
        s.with_pushed_selection(|s| {
            s.set_cursor(p(0, 3));
            s.type_char('!').unwrap();
        });
        assert_eq!(s.buffer().content(), "one! two");
        assert_eq!(s.selected_text().as_deref(), Some("one"));
    }

    #[test]
    fn test_dirty_lines_accumulate() {
        let mut s = session("a\nb\nc");
        s.set_cursor(p(2, 1));
        s.type_char('x').unwrap();
        s.set_cursor(p(0, 1));
        s.type_char('y').unwrap();
        assert_eq!(s.take_dirty_lines(), DirtyLines::Range { from: 0, to: 3 });
        assert_eq!(s.take_dirty_lines(), DirtyLines::None);
    }

    // ==================== Modes ====================

    #[test]
    fn test_goto_last_change() {
        let mut s = session("abc\ndef");
        s.goto_last_change();
        assert_eq!(s.cursor(), p(0, 0));
        s.set_cursor(p(1, 1));
        s.type_char('x').unwrap();
        s.set_cursor(p(0, 0));
        s.goto_last_change();
        assert_eq!(s.cursor(), p(1, 2));
    }

    #[test]
    fn test_toggle_overwrite_breaks_typing_merge() {
        let mut s = session("");
        s.type_char('a').unwrap();
        s.toggle_overwrite();
        s.type_char('b').unwrap();
        s.undo().unwrap();
        assert_eq!(s.buffer().content(), "a");
    }

    #[test]
    fn test_read_only_blocks_undo() {
        let mut s = session("abc");
        s.type_char('x').unwrap();
        s.buffer_mut().set_read_only(true);
        assert!(matches!(s.undo(), Err(EditError::BufferReadOnly)));
    }

    #[test]
    fn test_set_source_options() {
        let mut s = session("");
        let options = SourceOptions {
            brace_ansi: true,
            ..SourceOptions::default()
        };
        s.set_source_options(options, false);
        assert!(s.config().source.brace_ansi);
        assert!(!s.config().auto_indent);
    }
}
