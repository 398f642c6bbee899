// Chunk: docs/chunks/undo_history - Grouped undo/redo history

/// The user-level action that produced a primitive edit.
///
/// Every insert and delete carries one of these so the history can describe
/// undo steps and the auto-indent engine can tell typing from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Typing,
    Delete,
    Backspace,
    Cut,
    Paste,
    Replace,
    DragDrop,
    Indent,
    Unindent,
    AutoIndent,
    LowerCase,
    UpperCase,
    SwapCase,
    Capitalize,
    Sentencize,
    DeleteSelection,
}

impl ActionKind {
    /// Human-readable label for "Undo <label>" menu entries.
    pub fn description(self) -> &'static str {
        match self {
            ActionKind::Typing => "typing",
            ActionKind::Delete => "delete",
            ActionKind::Backspace => "backspace",
            ActionKind::Cut => "cut",
            ActionKind::Paste => "paste",
            ActionKind::Replace => "replace",
            ActionKind::DragDrop => "drag and drop",
            ActionKind::Indent => "indent",
            ActionKind::Unindent => "unindent",
            ActionKind::AutoIndent => "auto indent",
            ActionKind::LowerCase => "lower case",
            ActionKind::UpperCase => "upper case",
            ActionKind::SwapCase => "swap case",
            ActionKind::Capitalize => "capitalize",
            ActionKind::Sentencize => "sentence case",
            ActionKind::DeleteSelection => "delete selection",
        }
    }

    /// Actions that may be coalesced into a trailing typing group.
    pub fn is_mergeable(self) -> bool {
        matches!(self, ActionKind::Typing | ActionKind::AutoIndent)
    }
}

/// Whether a primitive edit added or removed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Insert,
    Delete,
}
