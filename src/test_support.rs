//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;

use crate::tui::event::Key;
use crate::tui::terminal::TerminalSurface;

/// An in-memory character grid standing in for a real terminal.
///
/// Line and character editing follow curses semantics: `insert_line` pushes
/// the cursor row down and drops the bottom row, `delete_line` pulls the rows
/// below up and blanks the bottom row.
pub struct GridSurface {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<char>>,
    cursor: (usize, usize),
    events: VecDeque<Key>,
    /// Sizes applied, in order, as each queued `Key::Resize` is read.
    resizes: VecDeque<(usize, usize)>,
}

impl GridSurface {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![' '; cols]; rows],
            cursor: (0, 0),
            events: VecDeque::new(),
            resizes: VecDeque::new(),
        }
    }

    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.events.extend(keys);
    }

    /// Queue a resize to `rows x cols`; the grid changes size when the event is read.
    pub fn push_resize(&mut self, rows: usize, cols: usize) {
        self.resizes.push_back((rows, cols));
        self.events.push_back(Key::Resize);
    }

    /// Change size now; the grid comes back blank.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.cells = vec![vec![' '; cols]; rows];
        self.cursor = (self.cursor.0.min(rows - 1), self.cursor.1.min(cols - 1));
    }

    /// The row's text with trailing blanks trimmed.
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row].iter().collect::<String>().trim_end().to_string()
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    fn blank_row(&self) -> Vec<char> {
        vec![' '; self.cols]
    }
}

impl TerminalSurface for GridSurface {
    fn init(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn quit(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> std::io::Result<()> {
        for row in &mut self.cells {
            row.fill(' ');
        }
        Ok(())
    }

    fn move_to(&mut self, row: usize, col: usize) -> std::io::Result<()> {
        self.cursor = (row.min(self.rows - 1), col.min(self.cols - 1));
        Ok(())
    }

    fn refresh(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn get_event(&mut self) -> std::io::Result<Option<Key>> {
        let event = self.events.pop_front();
        if event == Some(Key::Resize) {
            if let Some((rows, cols)) = self.resizes.pop_front() {
                self.resize(rows, cols);
            }
        }
        Ok(event)
    }

    fn get_cursor(&mut self) -> std::io::Result<(usize, usize)> {
        Ok(self.cursor)
    }

    fn get_size(&mut self) -> std::io::Result<(usize, usize)> {
        Ok((self.rows, self.cols))
    }

    fn clear_to_line_end(&mut self) -> std::io::Result<()> {
        let (row, col) = self.cursor;
        self.cells[row][col..].fill(' ');
        Ok(())
    }

    fn put_char(&mut self, c: char) -> std::io::Result<()> {
        let (row, col) = self.cursor;
        self.cells[row][col] = c;
        self.cursor = if col + 1 < self.cols {
            (row, col + 1)
        } else if row + 1 < self.rows {
            (row + 1, 0)
        } else {
            (row, col)
        };
        Ok(())
    }

    fn insert_line(&mut self) -> std::io::Result<()> {
        let blank = self.blank_row();
        self.cells.insert(self.cursor.0, blank);
        self.cells.truncate(self.rows);
        Ok(())
    }

    fn delete_line(&mut self) -> std::io::Result<()> {
        let blank = self.blank_row();
        self.cells.remove(self.cursor.0);
        self.cells.push(blank);
        Ok(())
    }

    fn delete_char_at(&mut self, row: usize, col: usize) -> std::io::Result<()> {
        self.move_to(row, col)?;
        let (row, col) = self.cursor;
        self.cells[row].remove(col);
        self.cells[row].push(' ');
        Ok(())
    }
}
