// Chunk: docs/chunks/edit_session - Edit commands over a buffer with cursor, anchor and selection

//! Drag source and drop target.
//!
//! A drag out of the session starts with [`EditSession::begin_drag`], which
//! opens an undo group, and finishes with [`EditSession::end_drag`], which
//! removes the source text for a move and closes the group. A drop onto the
//! same session inside that window lands in the same group, so a move within
//! one document undoes in one step.

use tracing::debug;

use super::{DraggedText, EditSession};
use crate::action::ActionKind;
use crate::collaborators::{ClipboardText, ScrollDirection};
use crate::error::EditResult;
use crate::types::Position;

/// What a drop does to the dragged data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    None,
    Copy,
    Move,
}

/// Effect answered to a drag source. A request for anything but a copy
/// becomes a copy while the copy modifier is held and a move otherwise.
pub fn negotiate_drop_effect(requested: DropEffect, copy_modifier: bool) -> DropEffect {
    if requested == DropEffect::Copy || copy_modifier {
        DropEffect::Copy
    } else {
        DropEffect::Move
    }
}

impl EditSession {
    fn accepts_drops(&self) -> bool {
        !self.buffer.is_read_only() && !self.config.disable_drag_drop
    }

    /// A drag entered the view. `has_text` is whether the payload offers text.
    pub fn drag_enter(
        &mut self,
        has_text: bool,
        pos: Position,
        copy_modifier: bool,
        requested: DropEffect,
    ) -> DropEffect {
        if !has_text || !self.accepts_drops() {
            return DropEffect::None;
        }
        self.show_drop_indicator(pos);
        negotiate_drop_effect(requested, copy_modifier)
    }

    /// A drag moved over the view. `edge` is set when the pointer sits in a
    /// scroll margin.
    pub fn drag_over(
        &mut self,
        pos: Position,
        copy_modifier: bool,
        requested: DropEffect,
        edge: Option<ScrollDirection>,
    ) -> DropEffect {
        if !self.accepts_drops() {
            self.hide_drop_indicator();
            return DropEffect::None;
        }
        if let Some(direction) = edge {
            self.hide_drop_indicator();
            self.view.scroll(direction);
        }
        self.show_drop_indicator(pos);
        negotiate_drop_effect(requested, copy_modifier)
    }

    /// The drag left the view.
    pub fn drag_leave(&mut self) {
        self.hide_drop_indicator();
    }

    /// Drops `payload` at `pos`.
    ///
    /// Dropping text dragged from this session back inside its own selection
    /// only moves the cursor and answers [`DropEffect::None`]. Otherwise the
    /// text is inserted and left selected.
    pub fn drop(
        &mut self,
        payload: &ClipboardText,
        pos: Position,
        copy_modifier: bool,
        requested: DropEffect,
    ) -> EditResult<DropEffect> {
        self.hide_drop_indicator();
        if !self.accepts_drops() {
            return Ok(DropEffect::None);
        }
        let pos = self.buffer.clamp_position(pos);

        if self.dragged.is_some() {
            let (start, end) = self.selection();
            if start <= pos && pos < end {
                self.collapse_to(pos);
                return Ok(DropEffect::None);
            }
        }

        let end = if self.dragged.is_some() {
            self.insert_at(pos, payload.text(), ActionKind::DragDrop)?
        } else {
            self.in_undo_group(false, |s| {
                s.insert_at(pos, payload.text(), ActionKind::DragDrop)
            })?
        };
        debug!(at = %pos, end = %end, "dropped text");

        self.anchor = pos;
        self.cursor = end;
        self.view.ensure_visible(end);
        Ok(negotiate_drop_effect(requested, copy_modifier))
    }

    /// Starts dragging the selection out of this session.
    ///
    /// Returns the payload to hand the drag source, or `None` without a
    /// selection.
    pub fn begin_drag(&mut self) -> Option<ClipboardText> {
        let text = self.selected_text()?;
        let (start, end) = self.selection();
        self.dragged = Some(DraggedText { start, end });
        self.buffer.begin_undo_group(false);
        Some(ClipboardText::internal(&self.buffer.line_ending().apply(&text)))
    }

    /// Finishes a drag started by [`begin_drag`](Self::begin_drag). A move
    /// removes the source text, wherever edits since the drag started left it.
    pub fn end_drag(&mut self, effect: DropEffect) -> EditResult<()> {
        let Some(dragged) = self.dragged else {
            return Ok(());
        };
        let result = if effect == DropEffect::Move && !self.buffer.is_read_only() {
            self.delete_range(dragged.start, dragged.end, ActionKind::DragDrop)
        } else {
            Ok(())
        };
        self.buffer.flush_undo_group();
        self.dragged = None;
        result
    }

    pub fn is_dragging_text(&self) -> bool {
        self.dragged.is_some()
    }

    /// Shows the drop indicator at `pos`, saving the caret the first time.
    fn show_drop_indicator(&mut self, pos: Position) {
        if self.saved_caret.is_none() {
            self.saved_caret = Some(self.cursor);
        }
        let pos = self.buffer.clamp_position(pos);
        self.view.show_drop_indicator(pos);
    }

    /// Hides the drop indicator and puts the saved caret back.
    fn hide_drop_indicator(&mut self) {
        if let Some(caret) = self.saved_caret.take() {
            self.cursor = self.buffer.clamp_position(caret);
            self.view.hide_drop_indicator();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorConfig, TextBuffer};

    fn session(doc: &str) -> EditSession {
        EditSession::new(TextBuffer::from_str(doc), EditorConfig::default())
    }

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    #[test]
    fn test_negotiate_drop_effect() {
        assert_eq!(negotiate_drop_effect(DropEffect::Copy, false), DropEffect::Copy);
        assert_eq!(negotiate_drop_effect(DropEffect::Move, true), DropEffect::Copy);
        assert_eq!(negotiate_drop_effect(DropEffect::Move, false), DropEffect::Move);
        assert_eq!(negotiate_drop_effect(DropEffect::None, false), DropEffect::Move);
    }

    #[test]
    fn test_external_drop_inserts_and_selects() {
        let mut s = session("hello world");
        let payload = ClipboardText::external("big ");
        let effect = s.drop(&payload, p(0, 6), false, DropEffect::Copy).unwrap();
        assert_eq!(effect, DropEffect::Copy);
        assert_eq!(s.buffer().content(), "hello big world");
        assert_eq!(s.selection(), (p(0, 6), p(0, 10)));
        assert_eq!(s.buffer().undo_description(), Some("drag and drop"));
    }

    #[test]
    fn test_move_within_document_is_one_undo_step() {
        let mut s = session("alpha beta");
        s.set_selection(p(0, 0), p(0, 6));
        let payload = s.begin_drag().unwrap();
        assert!(s.is_dragging_text());
        let effect = s.drop(&payload, p(0, 10), false, DropEffect::Move).unwrap();
        assert_eq!(effect, DropEffect::Move);
        s.end_drag(effect).unwrap();
        assert!(!s.is_dragging_text());
        assert_eq!(s.buffer().content(), "betaalpha ");

        s.undo().unwrap();
        assert_eq!(s.buffer().content(), "alpha beta");
        assert!(!s.can_undo());
    }

    #[test]
    fn test_drop_inside_own_selection_only_moves_cursor() {
        let mut s = session("alpha beta");
        s.set_selection(p(0, 0), p(0, 5));
        let payload = s.begin_drag().unwrap();
        let effect = s.drop(&payload, p(0, 2), false, DropEffect::Move).unwrap();
        assert_eq!(effect, DropEffect::None);
        s.end_drag(effect).unwrap();
        assert_eq!(s.buffer().content(), "alpha beta");
        assert_eq!(s.cursor(), p(0, 2));
        assert!(!s.can_undo());
    }

    #[test]
    fn test_drag_refused_when_disabled_or_read_only() {
        let config = EditorConfig {
            disable_drag_drop: true,
            ..EditorConfig::default()
        };
        let mut s = EditSession::new(TextBuffer::from_str("x"), config);
        assert_eq!(s.drag_enter(true, p(0, 0), false, DropEffect::Move), DropEffect::None);

        let mut s = session("x");
        s.buffer_mut().set_read_only(true);
        assert_eq!(
            s.drag_over(p(0, 0), false, DropEffect::Move, None),
            DropEffect::None
        );
        let payload = ClipboardText::external("y");
        assert_eq!(
            s.drop(&payload, p(0, 0), false, DropEffect::Copy).unwrap(),
            DropEffect::None
        );
        assert_eq!(s.buffer().content(), "x");
    }

    #[test]
    fn test_drag_restores_caret_on_leave() {
        let mut s = session("abc\ndef");
        s.set_cursor(p(1, 2));
        s.drag_enter(true, p(0, 1), false, DropEffect::Copy);
        s.drag_over(p(0, 2), false, DropEffect::Copy, None);
        s.drag_leave();
        assert_eq!(s.cursor(), p(1, 2));
    }
}
