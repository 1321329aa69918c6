//! # UiController
//!
//! Owns the screen layout and the `Book` of rendered output.
//!
//! ```text
//! row 0                 ┐
//! ...                   │ content region: current page
//! content_rows - 1      ┘
//! content_rows          ── status bar: "Page X of Y"
//! content_rows + 1      ┐
//! ...                   │ input region: prompt + LineEditor
//! rows - 1              ┘
//! ```
//!
//! Every redraw of the content region or status bar puts the terminal cursor
//! back where it was, so an edit in progress is not disturbed. While the
//! input has grown upwards over the content region, redraws stop short of it:
//! the status bar is drawn `shifted` rows higher and only the content rows
//! still above it are repainted.

use std::io;

use log::debug;

use crate::tui::components::{Book, LineEditor, Page};
use crate::tui::terminal::TerminalSurface;

/// Column the status label starts at, leaving a few `=` visible on the left.
const STATUS_LABEL_COL: usize = 3;

pub fn status_label(current: usize, total: usize) -> String {
    format!(" Page {current} of {total} (page up/down = navigate) ")
}

pub struct UiController<T: TerminalSurface> {
    surface: T,
    book: Book,
    content_rows: usize,
    cols: usize,
    input_rows: usize,
    /// Rows the input region currently covers above its home row.
    shifted: usize,
}

impl<T: TerminalSurface> UiController<T> {
    pub fn new(surface: T) -> Self {
        Self {
            surface,
            book: Book::new(1, 1),
            content_rows: 0,
            cols: 0,
            input_rows: 1,
            shifted: 0,
        }
    }

    pub fn surface(&mut self) -> &mut T {
        &mut self.surface
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn content_rows(&self) -> usize {
        self.content_rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Size the content region for `input_rows` rows of input plus the status bar.
    pub fn layout(&mut self, input_rows: usize) -> io::Result<()> {
        let (rows, cols) = self.surface.get_size()?;
        self.content_rows = rows.saturating_sub(input_rows + 1);
        self.cols = cols;
        self.input_rows = input_rows;
        self.shifted = 0;
        self.book.reset(self.content_rows, self.cols);
        debug!(
            "Layout: {} content rows x {} cols, {} input rows",
            self.content_rows, self.cols, input_rows
        );
        Ok(())
    }

    /// Re-read the terminal size and reflow the book's text into the new geometry.
    ///
    /// The reflowed book starts again at page 1. The input region is left
    /// blank; the caller redraws its prompt.
    pub fn relayout(&mut self) -> io::Result<()> {
        let text: String = self.book.pages().iter().map(Page::source_text).collect();
        self.layout(self.input_rows)?;
        self.clear_and_print(&text)
    }

    /// Record how far the editor has pushed the status bar up.
    pub(crate) fn set_input_shift(&mut self, rows: usize) {
        self.shifted = rows.min(self.content_rows);
    }

    /// Append `text` to the book and redraw the current page and status bar.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        let (row, col) = self.surface.get_cursor()?;
        self.book.append_text(text);
        self.draw_page()?;
        self.draw_status_bar()?;
        self.surface.move_to(row, col)?;
        self.surface.refresh()
    }

    /// Clear the input region and draw `prefix + separator` followed by the editor's buffer.
    pub fn print_command_prompt(
        &mut self,
        prefix: &str,
        separator: &str,
        editor: &mut LineEditor,
    ) -> io::Result<()> {
        let (rows, _) = self.surface.get_size()?;
        if editor.shifted_rows() > 0 || self.shifted > 0 {
            // The input region grew over the content; restore the layout.
            self.shifted = 0;
            self.draw_page()?;
            self.draw_status_bar()?;
        }

        let input_row = self.content_rows + 1;
        for row in input_row..rows {
            self.surface.move_to(row, 0)?;
            self.surface.clear_to_line_end()?;
        }
        self.surface.move_to(input_row, 0)?;
        self.surface.put_str(prefix)?;
        self.surface.put_str(separator)?;

        let origin_col = prefix.chars().count() + separator.chars().count();
        editor.attach(input_row, origin_col, &mut self.surface)?;
        self.shifted = editor.shifted_rows();
        self.surface.refresh()
    }

    /// Clear the whole screen and start a fresh book holding `text`.
    pub fn clear_and_print(&mut self, text: &str) -> io::Result<()> {
        self.surface.clear()?;
        self.surface.move_to(0, 0)?;
        self.book.reset(self.content_rows, self.cols);
        self.print(text)
    }

    pub fn page_next(&mut self) -> io::Result<()> {
        if self.book.next() {
            debug!("Page {} of {}", self.book.current_index(), self.book.page_count());
            self.redraw_current()?;
        }
        Ok(())
    }

    pub fn page_prev(&mut self) -> io::Result<()> {
        if self.book.prev() {
            debug!("Page {} of {}", self.book.current_index(), self.book.page_count());
            self.redraw_current()?;
        }
        Ok(())
    }

    fn redraw_current(&mut self) -> io::Result<()> {
        let (row, col) = self.surface.get_cursor()?;
        self.draw_page()?;
        self.draw_status_bar()?;
        self.surface.move_to(row, col)?;
        self.surface.refresh()
    }

    /// Content rows not covered by the input region.
    fn visible_rows(&self) -> usize {
        self.content_rows - self.shifted
    }

    /// Clear every uncovered content row and draw the current page into it.
    fn draw_page(&mut self) -> io::Result<()> {
        let visible = self.visible_rows();
        let page = self.book.current_page();
        let mut lines = page.lines();
        for row in 0..visible {
            self.surface.move_to(row, 0)?;
            self.surface.clear_to_line_end()?;
            if let Some(line) = lines.next() {
                for c in line.chars() {
                    self.surface.put_char(if c.is_control() { ' ' } else { c })?;
                }
            }
        }
        Ok(())
    }

    fn draw_status_bar(&mut self) -> io::Result<()> {
        let row = self.visible_rows();
        self.surface.move_to(row, 0)?;
        self.surface.clear_to_line_end()?;
        self.surface.put_str(&"=".repeat(self.cols))?;

        let label = status_label(self.book.current_index(), self.book.page_count());
        let room = self.cols.saturating_sub(STATUS_LABEL_COL);
        if room > 0 {
            self.surface.move_to(row, STATUS_LABEL_COL)?;
            let visible: String = label.chars().take(room).collect();
            self.surface.put_str(&visible)?;
        }
        Ok(())
    }
}
