// Chunk: docs/chunks/edit_session - Edit commands over a buffer with cursor, anchor and selection

//! Typing, deletion, clipboard and replace commands.

use super::EditSession;
use crate::action::ActionKind;
use crate::collaborators::{Clipboard, ClipboardText};
use crate::error::EditResult;
use crate::grapheme::{grapheme_boundary_left, grapheme_boundary_right};
use crate::types::{LineEnding, Position};

const ESCAPE: char = '\u{1b}';

impl EditSession {
    /// Types one character at the cursor.
    ///
    /// A selection is replaced. In overwrite mode the grapheme under the
    /// cursor is replaced. Consecutive characters join one undo group.
    /// `'\n'` and `'\r'` type a newline; Escape is ignored.
    pub fn type_char(&mut self, ch: char) -> EditResult<()> {
        match ch {
            '\n' | '\r' => return self.type_newline(),
            ESCAPE => return Ok(()),
            _ => {}
        }
        self.ensure_editable()?;

        let selected = self.has_selection();
        let merge = self.merge_undo && !selected;
        self.in_undo_group(merge, |s| {
            let pos = s.clear_selection_for_typing()?;
            if s.overwrite && !selected {
                let chars = s.buffer.line_chars(pos.line)?;
                if pos.col < chars.len() {
                    let next = grapheme_boundary_right(&chars, pos.col);
                    s.delete_range(pos, pos.with_col(next), ActionKind::Typing)?;
                }
            }
            let mut utf8 = [0; 4];
            let end = s.insert_at(pos, ch.encode_utf8(&mut utf8), ActionKind::Typing)?;
            s.collapse_to(end);
            Ok(())
        })?;
        self.merge_undo = true;
        Ok(())
    }

    /// Types a line break at the cursor.
    ///
    /// In overwrite mode, on any line but the last, this only moves the cursor
    /// to the start of the next line.
    pub fn type_newline(&mut self) -> EditResult<()> {
        self.ensure_editable()?;
        if self.overwrite && !self.has_selection() && self.cursor.line + 1 < self.buffer.line_count()
        {
            let next = Position::new(self.cursor.line + 1, 0);
            self.collapse_to(next);
            return Ok(());
        }

        let merge = self.merge_undo && !self.has_selection();
        self.in_undo_group(merge, |s| {
            let pos = s.clear_selection_for_typing()?;
            let end = s.insert_at(pos, "\n", ActionKind::Typing)?;
            s.collapse_to(end);
            Ok(())
        })
    }

    /// Deletes the selection, if any, ahead of typed text. Returns where the
    /// typed text goes.
    fn clear_selection_for_typing(&mut self) -> EditResult<Position> {
        if !self.has_selection() {
            return Ok(self.cursor);
        }
        let (start, end) = self.selection();
        self.delete_range(start, end, ActionKind::Delete)?;
        Ok(start)
    }

    /// Deletes the grapheme before the cursor, joining with the previous
    /// line at column 0. Deletes the selection instead when there is one.
    pub fn backspace(&mut self) -> EditResult<()> {
        self.ensure_editable()?;
        if self.has_selection() {
            return self.delete_selected(ActionKind::Delete);
        }

        let pos = self.cursor;
        let start = if pos.col > 0 {
            let chars = self.buffer.line_chars(pos.line)?;
            pos.with_col(grapheme_boundary_left(&chars, pos.col))
        } else if let Some(line) = pos.line.checked_sub(1) {
            Position::new(line, self.buffer.line_len(line)?)
        } else {
            return Ok(());
        };

        self.view.ensure_visible(start);
        self.delete_range(start, pos, ActionKind::Backspace)?;
        self.collapse_to(start);
        Ok(())
    }

    /// Deletes the grapheme after the cursor, joining with the next line at a
    /// line end. Deletes the selection instead when there is one.
    pub fn delete_forward(&mut self) -> EditResult<()> {
        self.ensure_editable()?;
        if self.has_selection() {
            return self.delete_selected(ActionKind::Delete);
        }

        let pos = self.cursor;
        let chars = self.buffer.line_chars(pos.line)?;
        let end = if pos.col < chars.len() {
            pos.with_col(grapheme_boundary_right(&chars, pos.col))
        } else if pos.line + 1 < self.buffer.line_count() {
            Position::new(pos.line + 1, 0)
        } else {
            return Ok(());
        };

        self.delete_range(pos, end, ActionKind::Delete)?;
        self.collapse_to(pos);
        self.view.update_caret();
        Ok(())
    }

    /// Deletes the selected text. Does nothing without a selection.
    pub fn delete_selection(&mut self) -> EditResult<()> {
        if !self.has_selection() {
            return Ok(());
        }
        self.ensure_editable()?;
        self.delete_selected(ActionKind::DeleteSelection)
    }

    fn delete_selected(&mut self, action: ActionKind) -> EditResult<()> {
        let (start, end) = self.selection();
        self.in_undo_group(false, |s| s.delete_range(start, end, action))?;
        self.collapse_to(start);
        Ok(())
    }

    /// Copies the selection to `clipboard` using the document's line-ending
    /// convention, then deletes it. Does nothing without a selection.
    pub fn cut(&mut self, clipboard: &mut dyn Clipboard) -> EditResult<()> {
        self.ensure_editable()?;
        if !self.has_selection() {
            return Ok(());
        }
        let (start, end) = self.selection();
        let text = self.buffer.text_range(start, end)?;
        clipboard.put_text(ClipboardText::internal(
            &self.buffer.line_ending().apply(&text),
        ));

        self.delete_range(start, end, ActionKind::Cut)?;
        self.collapse_to(start);
        Ok(())
    }

    /// Copies the selection to `clipboard`. Does nothing without a selection.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) {
        if let Some(text) = self.selected_text() {
            clipboard.put_text(ClipboardText::internal(
                &self.buffer.line_ending().apply(&text),
            ));
        }
    }

    /// Replaces the selection (or inserts at the cursor) with the clipboard
    /// text. Does nothing when the clipboard holds no text.
    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) -> EditResult<()> {
        self.ensure_editable()?;
        let Some(payload) = clipboard.get_text() else {
            return Ok(());
        };

        let end = self.in_undo_group(false, |s| {
            let (start, end) = s.selection();
            s.delete_range(start, end, ActionKind::Paste)?;
            s.insert_at(start, payload.text(), ActionKind::Paste)
        })?;
        self.collapse_to(end);
        Ok(())
    }

    /// Replaces the selection with `text` and selects the inserted text.
    ///
    /// The inserted length is kept for [`last_replace_len`](Self::last_replace_len).
    pub fn replace_selection(&mut self, text: &str) -> EditResult<()> {
        self.ensure_editable()?;
        let (start, end) = self.selection();
        let inserted = self.in_undo_group(false, |s| {
            s.delete_range(start, end, ActionKind::Replace)?;
            s.insert_at(start, text, ActionKind::Replace)
        })?;

        self.last_replace_len = LineEnding::normalize(text).chars().count();
        self.anchor = start;
        self.cursor = inserted;
        self.view.ensure_visible(inserted);
        Ok(())
    }

    /// Deletes from the cursor to the end of the next word, or the
    /// selection when there is one.
    pub fn delete_word(&mut self) -> EditResult<()> {
        self.ensure_editable()?;
        if !self.has_selection() {
            self.move_word_right(true)?;
        }
        if !self.has_selection() {
            return Ok(());
        }
        self.delete_selected(ActionKind::Delete)
    }

    /// Deletes from the start of the previous word to the cursor, or the
    /// selection when there is one.
    pub fn delete_word_back(&mut self) -> EditResult<()> {
        self.ensure_editable()?;
        if !self.has_selection() {
            self.move_word_left(true)?;
        }
        if !self.has_selection() {
            return Ok(());
        }
        self.delete_selected(ActionKind::Delete)
    }
}
