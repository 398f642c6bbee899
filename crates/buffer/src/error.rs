// Chunk: docs/chunks/edit_errors - Error kinds for buffer primitives and edit commands

//! Errors reported by buffer primitives and edit commands.
//!
//! Positional errors (`InvalidPosition`, `InvalidRange`, `InvalidLine`) are
//! contract violations: callers are expected to validate coordinates first,
//! so seeing one usually means a stored position was not rebased after an edit.
//! `BufferReadOnly` and `EmptyHistoryStack` are ordinary runtime states.

use thiserror::Error;

use crate::types::Position;

/// Error returned by [`TextBuffer`](crate::TextBuffer) and
/// [`EditSession`](crate::EditSession) operations.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("invalid text position {line}:{col}")]
    InvalidPosition { line: usize, col: usize },

    #[error("invalid text range {start}..{end}")]
    InvalidRange { start: Position, end: Position },

    #[error("line {0} is out of bounds")]
    InvalidLine(usize),

    #[error("buffer is read-only")]
    BufferReadOnly,

    #[error("nothing to undo or redo")]
    EmptyHistoryStack,

    #[error("invalid editor configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse editor configuration")]
    ConfigParse(#[from] serde_json::Error),
}

impl EditError {
    pub(crate) fn invalid_position(pos: Position) -> Self {
        EditError::InvalidPosition {
            line: pos.line,
            col: pos.col,
        }
    }
}

/// Result alias used throughout the crate.
pub type EditResult<T> = Result<T, EditError>;
