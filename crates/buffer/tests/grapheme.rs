// Chunk: docs/chunks/grapheme_cluster_awareness - Grapheme cluster awareness integration tests

//! Integration tests for grapheme-aware editing operations.
//!
//! Backspace, Delete and overwrite-mode typing must treat a grapheme cluster
//! as one unit so they never leave half an emoji or a dangling combining mark.

use quire_buffer::{EditSession, EditorConfig, Position, TextBuffer};

/// Man, ZWJ, woman, ZWJ, girl, ZWJ, boy: one grapheme of 7 chars.
const FAMILY: &str = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}";

/// Regional indicators U and S: one flag grapheme of 2 chars.
const FLAG: &str = "\u{1F1FA}\u{1F1F8}";

fn session(doc: &str) -> EditSession {
    EditSession::new(TextBuffer::from_str(doc), EditorConfig::default())
}

// ==================== Backspace Tests ====================

#[test]
fn test_backspace_deletes_zwj_emoji_entirely() {
    let mut s = session(&format!("a{FAMILY}b"));
    s.set_cursor(Position::new(0, 8));
    s.backspace().unwrap();
    assert_eq!(s.buffer().content(), "ab");
    assert_eq!(s.cursor(), Position::new(0, 1));
}

#[test]
fn test_backspace_deletes_combining_character_sequence() {
    let mut s = session("ae\u{0301}b");
    s.set_cursor(Position::new(0, 3));
    s.backspace().unwrap();
    assert_eq!(s.buffer().content(), "ab");
    assert_eq!(s.cursor(), Position::new(0, 1));
}

#[test]
fn test_backspace_deletes_flag() {
    let mut s = session(FLAG);
    s.set_cursor(Position::new(0, 2));
    s.backspace().unwrap();
    assert!(s.buffer().is_empty());
}

#[test]
fn test_backspace_grapheme_undo_restores_whole_cluster() {
    let mut s = session(&format!("x{FAMILY}"));
    s.set_cursor(Position::new(0, 8));
    s.backspace().unwrap();
    s.undo().unwrap();
    assert_eq!(s.buffer().content(), format!("x{FAMILY}"));
    assert_eq!(s.cursor(), Position::new(0, 8));
}

// ==================== Delete Forward Tests ====================

#[test]
fn test_delete_forward_deletes_zwj_emoji_entirely() {
    let mut s = session(&format!("a{FAMILY}b"));
    s.set_cursor(Position::new(0, 1));
    s.delete_forward().unwrap();
    assert_eq!(s.buffer().content(), "ab");
    assert_eq!(s.cursor(), Position::new(0, 1));
}

#[test]
fn test_delete_forward_deletes_combining_sequence() {
    let mut s = session("ae\u{0301}b");
    s.set_cursor(Position::new(0, 1));
    s.delete_forward().unwrap();
    assert_eq!(s.buffer().content(), "ab");
}

#[test]
fn test_delete_forward_ascii_is_single_char() {
    let mut s = session("hello");
    s.set_cursor(Position::new(0, 1));
    s.delete_forward().unwrap();
    assert_eq!(s.buffer().content(), "hllo");
}

// ==================== Overwrite Tests ====================

#[test]
fn test_overwrite_replaces_whole_grapheme() {
    let mut s = session(&format!("{FLAG}!"));
    s.toggle_overwrite();
    s.type_char('x').unwrap();
    assert_eq!(s.buffer().content(), "x!");
    assert_eq!(s.cursor(), Position::new(0, 1));
}

// ==================== Word Tests ====================

#[test]
fn test_delete_word_back_over_cjk() {
    let mut s = session("abc \u{4F60}\u{597D}");
    s.set_cursor(Position::new(0, 6));
    s.delete_word_back().unwrap();
    let content = s.buffer().content();
    assert!(content.starts_with("abc "));
    assert!(content.chars().count() < 6);
}
