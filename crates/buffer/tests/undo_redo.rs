// Chunk: docs/chunks/undo_history - Grouped undo/redo history

//! Property tests: any sequence of session commands can be undone back to
//! the starting document, and redone back to the final one.

use proptest::prelude::*;
use quire_buffer::{
    ClipboardText, Clipboard, EditSession, EditorConfig, MemoryClipboard, Position, SourceOptions,
    TextBuffer,
};

#[derive(Debug, Clone)]
enum Command {
    Type(char),
    Newline,
    Backspace,
    Delete,
    Paste(String),
    Select(usize, usize, usize, usize),
    Tab,
    Untab,
    UpperCase,
    DeleteWordBack,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => prop::char::range('a', 'e').prop_map(Command::Type),
        1 => prop::sample::select(vec!['{', '}', '(', ' ', '\t']).prop_map(Command::Type),
        1 => Just(Command::Newline),
        1 => Just(Command::Backspace),
        1 => Just(Command::Delete),
        1 => "[a-c\n]{0,4}".prop_map(Command::Paste),
        2 => (0..4usize, 0..8usize, 0..4usize, 0..8usize)
            .prop_map(|(a, b, c, d)| Command::Select(a, b, c, d)),
        1 => Just(Command::Tab),
        1 => Just(Command::Untab),
        1 => Just(Command::UpperCase),
        1 => Just(Command::DeleteWordBack),
    ]
}

fn run(s: &mut EditSession, clipboard: &mut MemoryClipboard, command: &Command) {
    let result = match command {
        Command::Type(ch) => s.type_char(*ch),
        Command::Newline => s.type_newline(),
        Command::Backspace => s.backspace(),
        Command::Delete => s.delete_forward(),
        Command::Paste(text) => {
            clipboard.put_text(ClipboardText::internal(text));
            s.paste(clipboard)
        }
        Command::Select(a, b, c, d) => {
            s.set_selection(Position::new(*a, *b), Position::new(*c, *d));
            Ok(())
        }
        Command::Tab => s.tab(),
        Command::Untab => s.untab(),
        Command::UpperCase => s.upper_case(),
        Command::DeleteWordBack => s.delete_word_back(),
    };
    result.unwrap();
}

fn config() -> EditorConfig {
    EditorConfig {
        insert_tabs: false,
        source: SourceOptions {
            brace_ansi: true,
            fn_brace: true,
            ..SourceOptions::default()
        },
        ..EditorConfig::default()
    }
}

proptest! {
    #[test]
    fn prop_undo_all_restores_start(
        doc in "[a-c \n]{0,12}",
        commands in prop::collection::vec(command(), 1..24),
    ) {
        let mut clipboard = MemoryClipboard::new();
        let mut s = EditSession::new(TextBuffer::from_str(&doc), config());
        for command in &commands {
            run(&mut s, &mut clipboard, command);
        }
        let edited = s.buffer().content();

        while s.can_undo() {
            s.undo().unwrap();
        }
        prop_assert_eq!(s.buffer().content(), doc.clone());
        prop_assert!(!s.buffer().is_modified());

        while s.can_redo() {
            s.redo().unwrap();
        }
        prop_assert_eq!(s.buffer().content(), edited);
    }

    #[test]
    fn prop_cursor_always_valid(
        doc in "[a-c \n]{0,12}",
        commands in prop::collection::vec(command(), 1..24),
    ) {
        let mut clipboard = MemoryClipboard::new();
        let mut s = EditSession::new(TextBuffer::from_str(&doc), config());
        for command in &commands {
            run(&mut s, &mut clipboard, command);
            prop_assert!(s.buffer().is_valid_position(s.cursor()));
            prop_assert!(s.buffer().is_valid_position(s.anchor()));
        }
    }
}
