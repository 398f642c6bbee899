// Chunk: docs/chunks/collaborators - View and clipboard interfaces consumed by the edit session
//!
//! Interfaces to the world outside the buffer: the view that draws the caret
//! and scrolls, and the clipboard transport.
//!
//! Both are thin ("humble object" pattern): editing logic stays in the
//! session and an implementation only forwards to the platform.

use crate::types::Position;

/// Direction to scroll while dragging near a view edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Requests the session makes of the view showing it.
///
/// Every method defaults to doing nothing, so headless callers and tests only
/// implement what they observe.
pub trait EditorView {
    fn ensure_visible(&mut self, _pos: Position) {}
    fn scroll_up(&mut self) {}
    fn scroll_down(&mut self) {}
    fn scroll_left(&mut self) {}
    fn scroll_right(&mut self) {}
    fn show_drop_indicator(&mut self, _pos: Position) {}
    fn hide_drop_indicator(&mut self) {}
    fn update_caret(&mut self) {}

    /// Scrolls one step in `direction`.
    fn scroll(&mut self, direction: ScrollDirection) {
        match direction {
            ScrollDirection::Up => self.scroll_up(),
            ScrollDirection::Down => self.scroll_down(),
            ScrollDirection::Left => self.scroll_left(),
            ScrollDirection::Right => self.scroll_right(),
        }
    }
}

/// A view that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl EditorView for NullView {}

/// Text as it sits on the clipboard.
///
/// Text copied by this editor carries one trailing NUL terminator and is
/// marked internal; its length is the raw length minus that terminator.
/// Anything else is treated as a NUL-terminated platform string and ends at
/// its first NUL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardText {
    raw: String,
    internal: bool,
}

impl ClipboardText {
    /// Wraps text copied from an edit session.
    pub fn internal(text: &str) -> Self {
        let mut raw = String::with_capacity(text.len() + 1);
        raw.push_str(text);
        raw.push('\0');
        Self {
            raw,
            internal: true,
        }
    }

    /// Wraps a payload that arrived from another application.
    pub fn external(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            internal: false,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// The text to paste.
    pub fn text(&self) -> &str {
        if self.internal {
            let end = self
                .raw
                .char_indices()
                .last()
                .map_or(0, |(idx, _)| idx);
            &self.raw[..end]
        } else {
            match self.raw.find('\0') {
                Some(end) => &self.raw[..end],
                None => &self.raw,
            }
        }
    }
}

/// Clipboard transport.
pub trait Clipboard {
    /// Current clipboard payload, if it holds text.
    fn get_text(&mut self) -> Option<ClipboardText>;
    /// Replaces the clipboard payload.
    fn put_text(&mut self, text: ClipboardText);
}

/// A process-local clipboard.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    content: Option<ClipboardText>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<ClipboardText> {
        self.content.clone()
    }

    fn put_text(&mut self, text: ClipboardText) {
        self.content = Some(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_payload_drops_terminator_only() {
        let payload = ClipboardText::internal("a\0b");
        assert!(payload.is_internal());
        assert_eq!(payload.text(), "a\0b");
    }

    #[test]
    fn test_external_payload_truncates_at_nul() {
        assert_eq!(ClipboardText::external("abc\0def").text(), "abc");
        assert_eq!(ClipboardText::external("abc").text(), "abc");
    }

    #[test]
    fn test_empty_payloads() {
        assert_eq!(ClipboardText::external("").text(), "");
        assert_eq!(ClipboardText::internal("").text(), "");
    }

    #[test]
    fn test_memory_clipboard_round_trip() {
        let mut clipboard = MemoryClipboard::new();
        assert!(clipboard.get_text().is_none());
        clipboard.put_text(ClipboardText::internal("hi"));
        assert_eq!(clipboard.get_text().unwrap().text(), "hi");
    }
}
