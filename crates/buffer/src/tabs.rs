// Chunk: docs/chunks/tab_stops - Tab stop arithmetic for indent, unindent and auto-indent

//! Tab stop arithmetic over a line's characters.
//!
//! Columns in the buffer count chars; a tab is one char but advances the
//! *visual* column to the next multiple of the tab size. Indent, unindent and
//! the auto-indent rules all need to move between the two.

/// Largest supported tab size.
pub const MAX_TAB_SIZE: usize = 64;

fn width(tab_size: usize) -> usize {
    tab_size.clamp(1, MAX_TAB_SIZE)
}

/// Indentation whitespace: space or tab.
pub fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Number of leading blank chars on a line.
pub fn leading_blanks(chars: &[char]) -> usize {
    chars.iter().take_while(|c| is_blank(**c)).count()
}

/// Visual column of char column `col`.
pub fn visual_column(chars: &[char], col: usize, tab_size: usize) -> usize {
    let tab = width(tab_size);
    chars.iter().take(col).fold(0, |visual, &ch| {
        if ch == '\t' {
            visual / tab * tab + tab
        } else {
            visual + 1
        }
    })
}

/// Fill that advances from `visual_col` to the next tab stop: one tab, or the
/// matching run of spaces.
pub fn indent_unit(insert_tabs: bool, tab_size: usize, visual_col: usize) -> String {
    if insert_tabs {
        "\t".to_string()
    } else {
        let tab = width(tab_size);
        " ".repeat(tab - visual_col % tab)
    }
}

/// How many leading chars one unindent step strips from a line.
///
/// Spaces are consumed up to the tab size; a tab met before that ends the
/// run and is consumed with it.
pub fn unindent_len(chars: &[char], tab_size: usize) -> usize {
    let tab = width(tab_size);
    let mut pos = 0;
    let mut spaces = 0;
    while pos < chars.len() {
        match chars[pos] {
            ' ' => {
                pos += 1;
                spaces += 1;
                if spaces >= tab {
                    break;
                }
            }
            '\t' => {
                pos += 1;
                break;
            }
            _ => break,
        }
    }
    pos
}

/// Char column of the tab stop before `col`, found by walking the line.
///
/// A cursor exactly on a stop moves to the stop before it. When the walk
/// steps over a tab that straddles the target stop, the column after that
/// tab is returned.
pub fn previous_stop_col(chars: &[char], col: usize, tab_size: usize) -> usize {
    if col == 0 {
        return 0;
    }
    let tab = width(tab_size);
    let visual = visual_column(chars, col, tab);
    let mut target = visual / tab * tab;
    if target == visual && target > 0 {
        target -= tab;
    }

    let mut current = 0;
    let mut i = 0;
    while current < target && i < chars.len() {
        if chars[i] == '\t' {
            current = current / tab * tab + tab;
        } else {
            current += 1;
        }
        i += 1;
    }
    i
}

/// Overwrite-mode Tab: the column reached by stepping over existing chars
/// toward the next stop. Stops right after a literal tab or at line end.
pub fn overwrite_tab_col(chars: &[char], col: usize, tab_size: usize) -> usize {
    let tab = width(tab_size);
    let mut remaining = tab - visual_column(chars, col, tab) % tab;
    let mut col = col;
    while remaining > 0 && col < chars.len() {
        let ch = chars[col];
        col += 1;
        if ch == '\t' {
            break;
        }
        remaining -= 1;
    }
    col
}

/// How many blank chars a dedent removes from an indentation of `indent`
/// chars to land on the previous stop.
pub fn dedent_width(indent: usize, tab_size: usize) -> usize {
    let tab = width(tab_size);
    match indent % tab {
        0 => tab,
        rem => rem,
    }
    .min(indent)
}
