// Chunk: docs/chunks/edit_session - Edit commands over a buffer with cursor, anchor and selection

//! Case transforms over the selection.

use super::EditSession;
use crate::action::ActionKind;
use crate::error::EditResult;

/// Lowercases uppercase letters and uppercases lowercase ones.
pub fn swap_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_lowercase() {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Uppercases the first letter after whitespace (or at the start) and
/// lowercases every other letter.
pub fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut armed = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            armed = true;
            out.push(ch);
        } else if ch.is_alphabetic() {
            push_cased(&mut out, ch, armed);
            armed = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Uppercases the first letter of each sentence and lowercases every other
/// letter.
///
/// A sentence starts at the beginning of the text and after a `.` followed
/// by anything but a digit, so `3.14` does not end one.
pub fn sentence_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut armed = true;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '.' {
            if chars.peek().is_some_and(|next| !next.is_ascii_digit()) {
                armed = true;
            }
            out.push(ch);
        } else if ch.is_alphabetic() {
            push_cased(&mut out, ch, armed);
            armed = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn push_cased(out: &mut String, ch: char, upper: bool) {
    if upper {
        out.extend(ch.to_uppercase());
    } else {
        out.extend(ch.to_lowercase());
    }
}

impl EditSession {
    pub fn lower_case(&mut self) -> EditResult<()> {
        self.transform_selection(ActionKind::LowerCase, |text| text.to_lowercase())
    }

    pub fn upper_case(&mut self) -> EditResult<()> {
        self.transform_selection(ActionKind::UpperCase, |text| text.to_uppercase())
    }

    pub fn swap_case(&mut self) -> EditResult<()> {
        self.transform_selection(ActionKind::SwapCase, swap_case)
    }

    pub fn capitalize(&mut self) -> EditResult<()> {
        self.transform_selection(ActionKind::Capitalize, capitalize)
    }

    pub fn sentence_case(&mut self) -> EditResult<()> {
        self.transform_selection(ActionKind::Sentencize, sentence_case)
    }

    /// Replaces the selected text with `f(text)` as one undo step.
    ///
    /// The replacement stays selected with the cursor at its start. Does
    /// nothing without a selection.
    fn transform_selection(
        &mut self,
        action: ActionKind,
        f: impl FnOnce(&str) -> String,
    ) -> EditResult<()> {
        let Some(text) = self.selected_text() else {
            return Ok(());
        };
        self.ensure_editable()?;

        let replacement = f(&text);
        let (start, end) = self.selection();
        let inserted = self.in_undo_group(false, |s| {
            s.delete_range(start, end, action)?;
            s.insert_at(start, &replacement, action)
        })?;

        self.anchor = inserted;
        self.cursor = start;
        self.view.ensure_visible(start);
        Ok(())
    }
}
