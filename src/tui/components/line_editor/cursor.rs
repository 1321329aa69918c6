//! Cell arithmetic for the LineEditor.
//!
//! Buffer offsets are bytes, screen positions are cells (one per code point).
//! A `Cell` is relative to the editor origin: `row` counts rows below the
//! prompt row, `col` is the absolute terminal column.

/// A screen cell relative to the editor's origin row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Cell reached after laying out `text` from `from`, wrapping at `cols`.
///
/// Every run between newlines moves the cell by div/mod of its length against
/// the column count. A newline moves to column 0 of the following row.
pub(super) fn advance(from: Cell, text: &str, cols: usize) -> Cell {
    let cols = cols.max(1);
    let mut cell = from;
    for (i, run) in text.split('\n').enumerate() {
        if i > 0 {
            cell = Cell::new(cell.row + 1, 0);
        }
        let linear = cell.col + run.chars().count();
        cell = Cell::new(cell.row + linear / cols, linear % cols);
    }
    cell
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

fn is_separator(b: u8) -> bool {
    b == b' ' || b == b'\n'
}

/// Nearest index before `pos` that starts a word: the buffer start or one
/// past a separator. Returns `pos` unchanged when `pos` is 0.
pub(super) fn prev_word_start(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    (0..pos)
        .rev()
        .find(|&i| i == 0 || is_separator(bytes[i - 1]))
        .unwrap_or(pos)
}

/// Nearest index after `pos` that follows a separator, or the buffer end.
/// Returns `pos` unchanged when already at the end.
pub(super) fn next_word_start(text: &str, pos: usize) -> usize {
    let bytes = text.as_bytes();
    (pos + 1..=text.len())
        .find(|&i| i == text.len() || is_separator(bytes[i - 1]))
        .unwrap_or(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- advance ---------------------------------------------------------

    #[test]
    fn test_advance_within_row() {
        assert_eq!(advance(Cell::new(0, 2), "abc", 10), Cell::new(0, 5));
    }

    #[test]
    fn test_advance_exact_fill_moves_to_next_row() {
        // 8 cells from column 2 fill a 10-wide row completely
        assert_eq!(advance(Cell::new(0, 2), "abcdefgh", 10), Cell::new(1, 0));
    }

    #[test]
    fn test_advance_spans_several_rows() {
        let text = "a".repeat(25);
        assert_eq!(advance(Cell::new(0, 2), &text, 10), Cell::new(2, 7));
    }

    #[test]
    fn test_advance_newline_starts_new_row() {
        assert_eq!(advance(Cell::new(0, 2), "ab\ncd", 10), Cell::new(1, 2));
        assert_eq!(advance(Cell::new(0, 2), "ab\n", 10), Cell::new(1, 0));
    }

    #[test]
    fn test_advance_counts_code_points_not_bytes() {
        // "café" is 5 bytes but 4 cells
        assert_eq!(advance(Cell::new(0, 0), "café", 10), Cell::new(0, 4));
    }

    // -- char boundaries -------------------------------------------------

    #[test]
    fn test_char_boundaries_multibyte() {
        let s = "a🔥b";
        assert_eq!(prev_char_boundary(s, 5), 1);
        assert_eq!(prev_char_boundary(s, 1), 0);
        assert_eq!(next_char_boundary(s, 1), 5);
        assert_eq!(next_char_boundary(s, 5), 6);
    }

    // -- word starts -----------------------------------------------------

    #[test]
    fn test_prev_word_from_end() {
        assert_eq!(prev_word_start("hello world", 11), 6);
    }

    #[test]
    fn test_prev_word_from_word_start_goes_to_previous_word() {
        assert_eq!(prev_word_start("hello world", 6), 0);
    }

    #[test]
    fn test_prev_word_at_start_is_noop() {
        assert_eq!(prev_word_start("hello", 0), 0);
    }

    #[test]
    fn test_next_word_from_start() {
        assert_eq!(next_word_start("hello world", 0), 6);
    }

    #[test]
    fn test_next_word_last_word_lands_on_end() {
        assert_eq!(next_word_start("hello world", 6), 11);
    }

    #[test]
    fn test_next_word_at_end_is_noop() {
        assert_eq!(next_word_start("hello", 5), 5);
    }

    #[test]
    fn test_word_starts_are_separator_adjacent_or_boundaries() {
        let text = "one two  three\nfour";
        for pos in 0..=text.len() {
            for target in [prev_word_start(text, pos), next_word_start(text, pos)] {
                assert!(
                    target == 0
                        || target == text.len()
                        || is_separator(text.as_bytes()[target - 1]),
                    "pos {pos} landed on {target}"
                );
            }
        }
    }

    #[test]
    fn test_word_starts_respect_multibyte_text() {
        let text = "café latte";
        assert_eq!(next_word_start(text, 0), 6);
        assert_eq!(prev_word_start(text, text.len()), 6);
        assert!(text.is_char_boundary(prev_word_start(text, 3)));
    }
}
