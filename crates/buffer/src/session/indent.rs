// Chunk: docs/chunks/tab_stops - Tab stop arithmetic for indent, unindent and auto-indent

//! Tab and Shift+Tab.

use tracing::debug;

use super::EditSession;
use crate::action::ActionKind;
use crate::error::EditResult;
use crate::tabs::{indent_unit, overwrite_tab_col, previous_stop_col, unindent_len, visual_column};
use crate::types::Position;

impl EditSession {
    /// Tab key.
    ///
    /// With a selection spanning lines, indents every line of it by one unit.
    /// Otherwise inserts fill to the next tab stop, replacing a selection on
    /// the current line. In overwrite mode, steps over existing text toward
    /// the next stop instead.
    pub fn tab(&mut self) -> EditResult<()> {
        self.ensure_editable()?;
        if self.spans_lines() {
            return self.shift_lines(true);
        }

        let chars = self.buffer.line_chars(self.cursor.line)?;
        if self.overwrite && !self.has_selection() && self.cursor.col < chars.len() {
            let col = overwrite_tab_col(&chars, self.cursor.col, self.config.tab_size);
            self.collapse_to(self.cursor.with_col(col));
            return Ok(());
        }

        let (start, end) = self.selection();
        let visual = visual_column(&chars, start.col, self.config.tab_size);
        let fill = indent_unit(self.config.insert_tabs, self.config.tab_size, visual);
        let end = self.in_undo_group(false, |s| {
            s.delete_range(start, end, ActionKind::Typing)?;
            s.insert_at(start, &fill, ActionKind::Typing)
        })?;
        self.collapse_to(end);
        Ok(())
    }

    /// Shift+Tab.
    ///
    /// With a selection spanning lines, strips one unit of indentation from
    /// every line of it. Otherwise moves the cursor back to the previous tab
    /// stop without editing.
    pub fn untab(&mut self) -> EditResult<()> {
        self.ensure_editable()?;
        if self.spans_lines() {
            return self.shift_lines(false);
        }

        let pos = self.cursor;
        if pos.col > 0 {
            let chars = self.buffer.line_chars(pos.line)?;
            let col = previous_stop_col(&chars, pos.col, self.config.tab_size);
            self.collapse_to(pos.with_col(col));
        }
        Ok(())
    }

    fn spans_lines(&self) -> bool {
        let (start, end) = self.selection();
        start.line != end.line
    }

    /// Indents or unindents every line the selection touches.
    ///
    /// The selection is first widened to whole lines. A selection ending at
    /// column 0 leaves that last line alone.
    fn shift_lines(&mut self, indent: bool) -> EditResult<()> {
        let (start, end) = self.selection();
        let first = start.line;
        let (last, new_end) = if end.col == 0 {
            (end.line - 1, end)
        } else if end.line + 1 >= self.buffer.line_count() {
            (end.line, end.with_col(self.buffer.line_len(end.line)?))
        } else {
            (end.line, Position::new(end.line + 1, 0))
        };
        self.anchor = Position::new(first, 0);
        self.cursor = new_end;

        let fill = if self.config.insert_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.config.tab_size)
        };
        debug!(first, last, indent, "shifting lines");

        self.in_undo_group(false, |s| {
            for line in first..=last {
                let at = Position::new(line, 0);
                if indent {
                    s.insert_at(at, &fill, ActionKind::Indent)?;
                } else {
                    let chars = s.buffer.line_chars(line)?;
                    let n = unindent_len(&chars, s.config.tab_size);
                    if n > 0 {
                        s.delete_range(at, at.with_col(n), ActionKind::Unindent)?;
                    }
                }
            }
            Ok(())
        })?;

        self.anchor = Position::new(first, 0);
        self.view.ensure_visible(self.cursor);
        Ok(())
    }
}
