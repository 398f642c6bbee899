// Chunk: docs/chunks/auto_indent - Auto-indent and auto-brace rules

//! Auto-indent and auto-brace decisions.
//!
//! After the session inserts typed text it asks [`plan`] whether the edit
//! calls for a follow-up edit: copying the previous line's indentation onto a
//! new line, indenting after an open brace, spacing a function-call paren, or
//! dedenting a close brace. The answer is an [`IndentEdit`] which the session
//! applies as a raw `AutoIndent` edit inside the undo group that is already
//! open, so one undo reverts the keystroke and its side effect together.
//!
//! Only edits tagged [`ActionKind::Typing`] trigger rules, and a follow-up
//! edit never triggers another one.

use tracing::debug;

use crate::action::ActionKind;
use crate::config::SourceOptions;
use crate::error::EditResult;
use crate::notification::EditNotification;
use crate::tabs::{dedent_width, indent_unit, leading_blanks, visual_column};
use crate::text_buffer::TextBuffer;
use crate::types::Position;

/// Which side of a bracket pair a character is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brace {
    Open,
    Close,
}

/// Classifies `{([<` as open and `})]>` as close braces.
pub fn classify_brace(ch: char) -> Option<Brace> {
    match ch {
        '{' | '(' | '[' | '<' => Some(Brace::Open),
        '}' | ')' | ']' | '>' => Some(Brace::Close),
        _ => None,
    }
}

/// Classifies `text` when it is exactly one brace character.
pub fn single_brace(text: &str) -> Option<Brace> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => classify_brace(ch),
        _ => None,
    }
}

fn is_open(ch: Option<&char>) -> bool {
    ch.copied().and_then(classify_brace) == Some(Brace::Open)
}

fn is_close(ch: Option<&char>) -> bool {
    ch.copied().and_then(classify_brace) == Some(Brace::Close)
}

/// Settings the rules depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentContext {
    pub options: SourceOptions,
    pub tab_size: usize,
    pub insert_tabs: bool,
    pub overwrite: bool,
}

impl IndentContext {
    fn unit(&self, visual_col: usize) -> String {
        indent_unit(self.insert_tabs, self.tab_size, visual_col)
    }

    fn brace_style(&self) -> bool {
        self.options.brace_gnu || self.options.brace_ansi
    }
}

/// A follow-up edit decided by [`plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndentEdit {
    Insert { at: Position, text: String },
    Delete { start: Position, end: Position },
}

/// Decides the follow-up edit, if any, for an insert the session just made.
///
/// `note` must describe the most recent edit to `buffer`.
pub fn plan(
    buffer: &TextBuffer,
    note: &EditNotification,
    ctx: &IndentContext,
) -> EditResult<Option<IndentEdit>> {
    if !note.is_insert() || note.action != ActionKind::Typing {
        return Ok(None);
    }

    if note.text == "\n" {
        if ctx.overwrite {
            return Ok(None);
        }
        return newline_indent(buffer, note.end, ctx);
    }

    let brace = single_brace(&note.text);
    let (y, x) = (note.end.line, note.end.col);

    if ctx.options.fn_brace && note.text == "(" {
        let chars = buffer.line_chars(y)?;
        if x > 1 && chars[x - 2].is_alphanumeric() {
            debug!(line = y, "spacing function paren");
            return Ok(Some(IndentEdit::Insert {
                at: Position::new(y, x - 1),
                text: " ".to_string(),
            }));
        }
    } else if ctx.options.brace_gnu && brace == Some(Brace::Open) {
        let chars = buffer.line_chars(y)?;
        let indent = leading_blanks(&chars);
        if indent + 1 == chars.len() {
            debug!(line = y, "indenting GNU open brace");
            return Ok(Some(IndentEdit::Insert {
                at: Position::new(y, x - 1),
                text: ctx.unit(visual_column(&chars, indent, ctx.tab_size)),
            }));
        }
    } else if ctx.brace_style() && brace == Some(Brace::Close) {
        let chars = buffer.line_chars(y)?;
        let indent = leading_blanks(&chars);
        if y > 0 && indent > 0 && indent + 1 == chars.len() {
            let n = if chars[indent - 1] == '\t' {
                1
            } else {
                dedent_width(visual_column(&chars, indent, ctx.tab_size), ctx.tab_size)
                    .min(indent)
            };
            debug!(line = y, removed = n, "dedenting close brace");
            return Ok(Some(IndentEdit::Delete {
                start: Position::new(y, x - 1 - n),
                end: Position::new(y, x - 1),
            }));
        }
    }

    Ok(None)
}

/// Indentation for the line a typed newline just opened at `at`.
fn newline_indent(
    buffer: &TextBuffer,
    at: Position,
    ctx: &IndentContext,
) -> EditResult<Option<IndentEdit>> {
    let Some(prev_line) = at.line.checked_sub(1) else {
        return Ok(None);
    };
    let prev = buffer.line_chars(prev_line)?;
    let last = prev.last();
    let mut indent = leading_blanks(&prev);

    let text = if indent > 0 {
        if ctx.options.brace_gnu && is_close(last) && indent + 1 == prev.len() {
            if prev[indent - 1] == '\t' {
                indent -= 1;
            } else {
                let visual = visual_column(&prev, indent, ctx.tab_size);
                indent -= dedent_width(visual, ctx.tab_size).min(indent);
            }
        }
        let mut text: String = prev[..indent].iter().collect();
        if ctx.brace_style() && is_open(last) {
            text.push_str(&ctx.unit(visual_column(&prev, indent, ctx.tab_size)));
        }
        text
    } else if ctx.brace_style() && is_open(last) {
        ctx.unit(0)
    } else {
        String::new()
    };

    if text.is_empty() {
        return Ok(None);
    }
    debug!(line = at.line, width = text.chars().count(), "copying indentation");
    Ok(Some(IndentEdit::Insert { at, text }))
}
