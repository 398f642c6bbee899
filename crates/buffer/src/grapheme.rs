// Chunk: docs/chunks/grapheme_cluster_awareness - Grapheme cluster boundary helpers

//! Grapheme cluster and word boundary detection over a line's characters.
//!
//! The buffer stores `char`s, but Backspace, Delete and overwrite-typing should
//! remove what the user perceives as one character: a ZWJ emoji sequence, a
//! base letter plus combining marks, a regional-indicator flag pair. Word
//! deletion uses the Unicode word boundaries of the same crate.
//!
//! All offsets here are char offsets within a single line.

use unicode_segmentation::UnicodeSegmentation;

/// Char offsets of every grapheme start in `chars`, followed by `chars.len()`.
fn grapheme_starts(chars: &[char]) -> Vec<usize> {
    let s: String = chars.iter().collect();
    let mut starts = Vec::new();
    let mut idx = 0;
    for grapheme in s.graphemes(true) {
        starts.push(idx);
        idx += grapheme.chars().count();
    }
    starts.push(idx);
    starts
}

/// Returns the start of the grapheme cluster immediately before `char_offset`.
///
/// Inside a cluster this is the start of that cluster. Returns 0 at offset 0.
pub fn grapheme_boundary_left(chars: &[char], char_offset: usize) -> usize {
    if char_offset == 0 || chars.is_empty() {
        return 0;
    }
    let char_offset = char_offset.min(chars.len());

    // An ASCII char always begins a cluster (lines never hold CR LF).
    if chars[char_offset - 1].is_ascii() {
        return char_offset - 1;
    }

    grapheme_starts(chars)
        .into_iter()
        .take_while(|&start| start < char_offset)
        .last()
        .unwrap_or(0)
}

/// Returns the end of the grapheme cluster at or containing `char_offset`.
///
/// Returns `chars.len()` at or past the end of the line.
pub fn grapheme_boundary_right(chars: &[char], char_offset: usize) -> usize {
    if char_offset >= chars.len() {
        return chars.len();
    }

    let current = chars[char_offset];
    if current.is_ascii() && chars.get(char_offset + 1).map_or(true, |c| c.is_ascii()) {
        return char_offset + 1;
    }

    grapheme_starts(chars)
        .into_iter()
        .find(|&start| start > char_offset)
        .unwrap_or(chars.len())
}

/// A word-bound segment of a line in char offsets.
struct Segment {
    start: usize,
    end: usize,
    blank: bool,
}

fn word_segments(chars: &[char]) -> Vec<Segment> {
    let s: String = chars.iter().collect();
    let mut segments = Vec::new();
    let mut idx = 0;
    for word in s.split_word_bounds() {
        let len = word.chars().count();
        segments.push(Segment {
            start: idx,
            end: idx + len,
            blank: word.chars().all(char::is_whitespace),
        });
        idx += len;
    }
    segments
}

/// Returns the end of the next word to the right of `char_offset`.
///
/// Whitespace runs are skipped, then one word segment (an identifier, a number,
/// or a single punctuation character) is consumed.
pub fn word_boundary_right(chars: &[char], char_offset: usize) -> usize {
    let from = char_offset.min(chars.len());
    let mut pos = from;
    for seg in word_segments(chars).iter().filter(|s| s.end > from) {
        if seg.blank {
            pos = seg.end;
        } else {
            return seg.end;
        }
    }
    pos
}

/// Returns the start of the previous word to the left of `char_offset`.
pub fn word_boundary_left(chars: &[char], char_offset: usize) -> usize {
    let from = char_offset.min(chars.len());
    let mut pos = from;
    for seg in word_segments(chars).iter().rev().filter(|s| s.start < from) {
        if seg.blank {
            pos = seg.start;
        } else {
            return seg.start;
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    // ==================== grapheme_boundary_left ====================

    #[test]
    fn test_left_ascii() {
        let c = chars("hello");
        assert_eq!(grapheme_boundary_left(&c, 5), 4);
        assert_eq!(grapheme_boundary_left(&c, 1), 0);
        assert_eq!(grapheme_boundary_left(&c, 0), 0);
    }

    #[test]
    fn test_left_combining_mark() {
        // "e" + U+0301 is one cluster
        let c = chars("ae\u{0301}");
        assert_eq!(grapheme_boundary_left(&c, 3), 1);
    }

    #[test]
    fn test_left_zwj_sequence() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let c = chars(&format!("a{}", family));
        assert_eq!(grapheme_boundary_left(&c, c.len()), 1);
    }

    #[test]
    fn test_left_flag_pair() {
        let c = chars("\u{1F1FA}\u{1F1F8}");
        assert_eq!(grapheme_boundary_left(&c, 2), 0);
    }

    // ==================== grapheme_boundary_right ====================

    #[test]
    fn test_right_ascii() {
        let c = chars("abc");
        assert_eq!(grapheme_boundary_right(&c, 0), 1);
        assert_eq!(grapheme_boundary_right(&c, 3), 3);
    }

    #[test]
    fn test_right_ascii_followed_by_combining_mark() {
        let c = chars("e\u{0301}x");
        assert_eq!(grapheme_boundary_right(&c, 0), 2);
    }

    #[test]
    fn test_right_emoji_sequence() {
        let family = "\u{1F468}\u{200D}\u{1F469}";
        let c = chars(&format!("{}b", family));
        assert_eq!(grapheme_boundary_right(&c, 0), 3);
    }

    // ==================== word boundaries ====================

    #[test]
    fn test_word_right_skips_leading_whitespace() {
        let c = chars("foo   bar(baz");
        assert_eq!(word_boundary_right(&c, 0), 3);
        assert_eq!(word_boundary_right(&c, 3), 9);
        assert_eq!(word_boundary_right(&c, 9), 10);
        assert_eq!(word_boundary_right(&c, 13), 13);
    }

    #[test]
    fn test_word_right_from_middle_of_word() {
        let c = chars("hello world");
        assert_eq!(word_boundary_right(&c, 2), 5);
    }

    #[test]
    fn test_word_left() {
        let c = chars("foo   bar");
        assert_eq!(word_boundary_left(&c, 9), 6);
        assert_eq!(word_boundary_left(&c, 6), 0);
        assert_eq!(word_boundary_left(&c, 2), 0);
        assert_eq!(word_boundary_left(&c, 0), 0);
    }

    #[test]
    fn test_word_left_over_trailing_whitespace_only() {
        let c = chars("   ");
        assert_eq!(word_boundary_left(&c, 3), 0);
    }
}
