// Chunk: docs/chunks/text_buffer - Text buffer data structure with gap buffer backing
// Chunk: docs/chunks/edit_session - Edit commands over a buffer with cursor, anchor and selection

//! quire-buffer: the editable text core of a syntax-aware editor.
//!
//! This crate provides a gap buffer-backed document with grouped undo/redo,
//! an edit session that turns user commands into primitive edits, and the
//! auto-indent rules that follow typed text.
//!
//! # Overview
//!
//! [`TextBuffer`] owns the text as a sequence of lines and exposes exactly
//! two mutations, [`insert_text`](TextBuffer::insert_text) and
//! [`delete_text`](TextBuffer::delete_text). Each is tagged with the
//! [`ActionKind`] that caused it, recorded in the [`UndoHistory`], and
//! reported back as an [`EditNotification`].
//!
//! [`EditSession`] layers a cursor, a selection anchor and modes (overwrite,
//! drag in progress) on top. Its commands (typing, deletion, clipboard, tab
//! and untab, case changes, drag and drop) each open one undo group, so one
//! undo reverts one command, and consecutive typing merges into one step.
//!
//! # Example
//!
//! ```
//! use quire_buffer::{EditSession, EditorConfig, Position, SourceOptions, TextBuffer};
//!
//! let config = EditorConfig {
//!     insert_tabs: false,
//!     source: SourceOptions { brace_ansi: true, ..SourceOptions::default() },
//!     ..EditorConfig::default()
//! };
//! let mut session = EditSession::new(TextBuffer::from_str("fn main() {"), config);
//!
//! // A newline after an open brace indents one level.
//! session.set_cursor(Position::new(0, 11));
//! session.type_newline().unwrap();
//! assert_eq!(session.buffer().content(), "fn main() {\n    ");
//! assert_eq!(session.cursor(), Position::new(1, 4));
//!
//! // The newline and its indentation undo together.
//! session.undo().unwrap();
//! assert_eq!(session.buffer().content(), "fn main() {");
//! ```
//!
//! # Dirty Line Tracking
//!
//! Every notification carries a [`DirtyLines`] value; the session
//! accumulates them until [`EditSession::take_dirty_lines`] is called, so a
//! view can redraw only what changed.
//!
//! - `DirtyLines::None` - No visual change
//! - `DirtyLines::Single(line)` - Only one line changed
//! - `DirtyLines::Range { from, to }` - Lines `from..to` changed
//! - `DirtyLines::FromLineToEnd(line)` - Lines were split or joined

mod action;
pub mod auto_indent;
mod collaborators;
mod config;
mod error;
mod gap_buffer;
pub mod grapheme;
mod history;
mod line_index;
mod notification;
mod session;
pub mod tabs;
mod text_buffer;
mod types;

pub use action::{ActionKind, EditKind};
pub use auto_indent::{Brace, IndentContext, IndentEdit};
pub use collaborators::{
    Clipboard, ClipboardText, EditorView, MemoryClipboard, NullView, ScrollDirection,
};
pub use config::{EditorConfig, SourceOptions};
pub use error::{EditError, EditResult};
pub use history::{EditRecord, UndoGroup, UndoHistory};
pub use notification::EditNotification;
pub use session::{
    capitalize, negotiate_drop_effect, sentence_case, swap_case, DropEffect, EditSession,
};
pub use text_buffer::{Replay, TextBuffer};
pub use types::{DirtyLines, LineEnding, Position};
