//! # LineEditor Component
//!
//! Bounded single- or multi-line text input drawn directly onto a
//! `TerminalSurface`, below the status bar.
//!
//! ## Responsibilities
//!
//! - Capture text input up to a fixed capacity
//! - Handle editing (backspace, cursor movement, word jumps)
//! - Handle submission against a caller-chosen match key
//! - Forward page keys to the `UiController`
//! - Grow the input region upwards when the text soft-wraps past the bottom row,
//!   and give the rows back when it shrinks
//!
//! ## Screen Model
//!
//! The editor is attached at an origin cell (just after the prompt). Every
//! byte index in the buffer maps to a cell relative to that origin; wrapping
//! happens at the terminal's column count and `'\n'` starts a new row. When the
//! text needs more rows than remain below the origin, the content row just
//! above the status bar is deleted, which scrolls the status bar and the input
//! region up by one. `shifted_rows()` reports how many times that happened; the
//! editor hands it to the `UiController` after every key so page redraws stay
//! above the input, and the next prompt restores the layout.

mod cursor;

use std::fmt;
use std::io;

use log::debug;

use crate::tui::event::Key;
use crate::tui::terminal::TerminalSurface;
use crate::tui::ui::UiController;

use cursor::{
    Cell, advance, next_char_boundary, next_word_start, prev_char_boundary, prev_word_start,
};

#[derive(Debug, PartialEq, Eq)]
pub enum EditorError {
    /// A capacity of zero leaves no room for even the terminator slot.
    ZeroCapacity,
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::ZeroCapacity => write!(f, "Input capacity must be at least 1"),
        }
    }
}

impl std::error::Error for EditorError {}

/// Text input bound to a screen origin.
///
/// # State
///
/// - `buffer`: text being typed; holds at most `capacity - 1` bytes
/// - `committed`: trimmed text of the last submission, returned by `get_buffer`
///   until the next edit
/// - `write_index`: insertion point, always on a char boundary
/// - `lines`: rows the text occupies below the origin row
/// - `shifted`: rows the input region has been scrolled up over the content
pub struct LineEditor {
    buffer: String,
    committed: String,
    capacity: usize,
    write_index: usize,
    lines: usize,
    shifted: usize,
    origin_row: usize,
    origin_col: usize,
}

impl LineEditor {
    pub fn new(capacity: usize) -> Result<Self, EditorError> {
        if capacity == 0 {
            return Err(EditorError::ZeroCapacity);
        }
        Ok(Self {
            buffer: String::new(),
            committed: String::new(),
            capacity,
            write_index: 0,
            lines: 0,
            shifted: 0,
            origin_row: 0,
            origin_col: 0,
        })
    }

    /// Current text; after a submit, the trimmed submitted line.
    pub fn get_buffer(&self) -> &str {
        if self.buffer.is_empty() {
            &self.committed
        } else {
            &self.buffer
        }
    }

    pub fn get_length(&self) -> usize {
        self.get_buffer().len()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.committed.clear();
        self.write_index = 0;
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    pub fn end_index(&self) -> usize {
        self.buffer.len()
    }

    pub fn wrapped_rows(&self) -> usize {
        self.lines
    }

    pub fn shifted_rows(&self) -> usize {
        self.shifted
    }

    /// Apply one key event. Returns `true` when `event` was `match_key` and the
    /// buffer was submitted.
    ///
    /// Return inserts a newline instead of submitting whenever the match key is
    /// something else. Up/Down are ignored; a full buffer ignores further text.
    pub fn consume_event<T: TerminalSurface>(
        &mut self,
        event: Option<Key>,
        match_key: Key,
        ui: &mut UiController<T>,
    ) -> io::Result<bool> {
        let Some(key) = event else {
            return Ok(false);
        };

        let submitted = key == match_key;
        if submitted {
            self.commit();
        } else {
            match key {
                Key::Char(c) => self.insert(c, ui.surface())?,
                Key::Return => self.insert('\n', ui.surface())?,
                Key::Backspace | Key::Delete => self.erase(ui.surface())?,
                Key::Left => {
                    if self.write_index > 0 {
                        let to = prev_char_boundary(&self.buffer, self.write_index);
                        self.move_cursor(to, ui.surface())?;
                    }
                }
                Key::Right => {
                    if self.write_index < self.buffer.len() {
                        let to = next_char_boundary(&self.buffer, self.write_index);
                        self.move_cursor(to, ui.surface())?;
                    }
                }
                Key::CtrlLeft => {
                    let to = prev_word_start(&self.buffer, self.write_index);
                    self.move_cursor(to, ui.surface())?;
                }
                Key::CtrlRight => {
                    let to = next_word_start(&self.buffer, self.write_index);
                    self.move_cursor(to, ui.surface())?;
                }
                Key::PageUp => ui.page_prev()?,
                Key::PageDown => ui.page_next()?,
                Key::Up | Key::Down | Key::CtrlUp | Key::CtrlDown => {}
                // Interrupt and Resize are the run loop's business; an unmatched submit key is inert.
                Key::MultiLineSubmit | Key::Interrupt | Key::Resize => {}
            }
        }

        ui.set_input_shift(self.shifted);
        ui.surface().refresh()?;
        Ok(submitted)
    }

    /// Bind the editor to the cell just after a freshly drawn prompt and draw the buffer there.
    pub(crate) fn attach<T: TerminalSurface>(
        &mut self,
        origin_row: usize,
        origin_col: usize,
        surface: &mut T,
    ) -> io::Result<()> {
        self.origin_row = origin_row;
        self.origin_col = origin_col;
        self.lines = 0;
        self.shifted = 0;
        self.render_from(0, surface)
    }

    fn commit(&mut self) {
        self.committed = self.buffer.trim().to_string();
        self.buffer.clear();
        self.write_index = 0;
        debug!("Input submitted ({} bytes)", self.committed.len());
    }

    fn insert<T: TerminalSurface>(&mut self, c: char, surface: &mut T) -> io::Result<()> {
        if self.buffer.len() + c.len_utf8() > self.capacity - 1 {
            debug!("Input buffer full at {} bytes, dropping {:?}", self.buffer.len(), c);
            return Ok(());
        }
        self.committed.clear();
        let at = self.write_index;
        self.buffer.insert(at, c);
        self.write_index += c.len_utf8();
        self.render_from(at, surface)
    }

    fn erase<T: TerminalSurface>(&mut self, surface: &mut T) -> io::Result<()> {
        if self.write_index == 0 {
            return Ok(());
        }
        let (rows, cols) = surface.get_size()?;
        let prev = prev_char_boundary(&self.buffer, self.write_index);
        let removed = self.cell_at(prev, cols);
        let cursor = self.cell_at(self.write_index, cols);
        let end = self.cell_at(self.buffer.len(), cols);

        self.committed.clear();
        self.buffer.drain(prev..self.write_index);
        self.write_index = prev;

        if removed.row == cursor.row && end.row == cursor.row && self.is_visible(cursor, rows) {
            // Tail stays on this row: shift it left in place.
            let (row, col) = self.screen(removed, rows);
            surface.delete_char_at(row, col)?;
            surface.move_to(row, col)
        } else {
            self.render_from(prev, surface)
        }
    }

    fn move_cursor<T: TerminalSurface>(&mut self, to: usize, surface: &mut T) -> io::Result<()> {
        if to == self.write_index {
            return Ok(());
        }
        self.write_index = to;
        self.place_cursor(surface)
    }

    /// Redraw the buffer from byte `index` onwards, then put the cursor at `write_index`.
    fn render_from<T: TerminalSurface>(&mut self, index: usize, surface: &mut T) -> io::Result<()> {
        let (rows, cols) = surface.get_size()?;
        self.fit_rows(rows, cols, surface)?;

        let mut cell = self.cell_at(index, cols);
        if self.is_visible(cell, rows) {
            let (row, col) = self.screen(cell, rows);
            surface.move_to(row, col)?;
        }
        for c in self.buffer[index..].chars() {
            if c == '\n' {
                if self.is_visible(cell, rows) {
                    surface.clear_to_line_end()?;
                }
                cell = Cell::new(cell.row + 1, 0);
            } else {
                if self.is_visible(cell, rows) {
                    surface.put_char(if c.is_control() { ' ' } else { c })?;
                }
                cell.col += 1;
                if cell.col < cols {
                    continue;
                }
                cell = Cell::new(cell.row + 1, 0);
            }
            if self.is_visible(cell, rows) {
                let (row, col) = self.screen(cell, rows);
                surface.move_to(row, col)?;
            }
        }

        // Blank what a longer, earlier text left behind.
        if self.is_visible(cell, rows) {
            surface.clear_to_line_end()?;
        }
        for row in self.origin_row + cell.row + 1..rows {
            surface.move_to(row, 0)?;
            surface.clear_to_line_end()?;
        }

        self.place_cursor(surface)
    }

    /// Scroll the input region up or down until the text fits below the origin.
    fn fit_rows<T: TerminalSurface>(
        &mut self,
        rows: usize,
        cols: usize,
        surface: &mut T,
    ) -> io::Result<()> {
        self.lines = self.cell_at(self.buffer.len(), cols).row;
        let bottom = rows.saturating_sub(1);

        // origin_row - 1 is the status bar; origin_row - 2 the last content row.
        while self.origin_row + self.lines > bottom && self.origin_row >= 2 {
            surface.move_to(self.origin_row - 2, 0)?;
            surface.delete_line()?;
            self.origin_row -= 1;
            self.shifted += 1;
            debug!("Input region grew to {} rows", self.lines + 1);
        }
        while self.shifted > 0 && self.origin_row + self.lines < bottom {
            surface.move_to(self.origin_row - 1, 0)?;
            surface.insert_line()?;
            self.origin_row += 1;
            self.shifted -= 1;
            debug!("Input region shrank to {} rows", self.lines + 1);
        }
        Ok(())
    }

    fn place_cursor<T: TerminalSurface>(&self, surface: &mut T) -> io::Result<()> {
        let (rows, cols) = surface.get_size()?;
        let (row, col) = self.screen(self.cell_at(self.write_index, cols), rows);
        surface.move_to(row, col)
    }

    /// Cell of byte `index`, relative to the origin row.
    fn cell_at(&self, index: usize, cols: usize) -> Cell {
        advance(Cell::new(0, self.origin_col), &self.buffer[..index], cols)
    }

    fn is_visible(&self, cell: Cell, rows: usize) -> bool {
        self.origin_row + cell.row < rows
    }

    /// Absolute screen position of `cell`, clamped to the bottom row.
    fn screen(&self, cell: Cell, rows: usize) -> (usize, usize) {
        let row = (self.origin_row + cell.row).min(rows.saturating_sub(1));
        (row, cell.col)
    }
}
