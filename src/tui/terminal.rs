//! # Terminal Surface
//!
//! The character-cell capability the editor and UI render through.
//!
//! `TerminalSurface` is the seam: the editor and `UiController` only ever talk
//! to it, so tests drive them against an in-memory grid while the binary uses
//! `CrosstermSurface`. Coordinates are `(row, col)`, zero-based.

use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use crossterm::cursor::{MoveTo, Show};
use crossterm::event::{self, Event};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use log::{debug, info};

use super::event::{Key, translate};

/// Insert a blank line at the cursor row, pushing the rows below down.
const INSERT_LINE: &str = "\x1b[L";
/// Delete the cursor row, pulling the rows below up.
const DELETE_LINE: &str = "\x1b[M";
/// Delete the character under the cursor, shifting the rest of the row left.
const DELETE_CHAR: &str = "\x1b[P";

pub trait TerminalSurface {
    fn init(&mut self) -> std::io::Result<()>;
    fn quit(&mut self) -> std::io::Result<()>;
    fn clear(&mut self) -> std::io::Result<()>;
    fn move_to(&mut self, row: usize, col: usize) -> std::io::Result<()>;
    fn refresh(&mut self) -> std::io::Result<()>;

    /// Next key event, or `None` right away when nothing is pending.
    fn get_event(&mut self) -> std::io::Result<Option<Key>>;

    fn get_cursor(&mut self) -> std::io::Result<(usize, usize)>;

    /// Terminal size as `(rows, cols)`.
    fn get_size(&mut self) -> std::io::Result<(usize, usize)>;

    fn clear_to_line_end(&mut self) -> std::io::Result<()>;
    fn put_char(&mut self, c: char) -> std::io::Result<()>;

    fn put_str(&mut self, text: &str) -> std::io::Result<()> {
        for c in text.chars() {
            self.put_char(c)?;
        }
        Ok(())
    }

    fn insert_line(&mut self) -> std::io::Result<()>;
    fn delete_line(&mut self) -> std::io::Result<()>;
    fn delete_char_at(&mut self, row: usize, col: usize) -> std::io::Result<()>;
}

/// `TerminalSurface` over crossterm: raw mode on the alternate screen.
///
/// The cursor is tracked locally rather than queried, since a position
/// report would race the key events on stdin.
pub struct CrosstermSurface {
    out: Stdout,
    cursor: (usize, usize),
    /// Last size reported by the terminal, used to follow autowrap.
    size: (usize, usize),
    active: bool,
}

impl Default for CrosstermSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermSurface {
    pub fn new() -> Self {
        Self {
            out: stdout(),
            cursor: (0, 0),
            size: (0, 0),
            active: false,
        }
    }

    fn clamp_u16(v: usize) -> u16 {
        u16::try_from(v).unwrap_or(u16::MAX)
    }
}

impl TerminalSurface for CrosstermSurface {
    fn init(&mut self) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Show, MoveTo(0, 0))?;
        self.cursor = (0, 0);
        self.get_size()?;
        self.active = true;
        info!("Terminal initialised (raw mode, alternate screen)");
        Ok(())
    }

    fn quit(&mut self) -> std::io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        info!("Terminal restored");
        Ok(())
    }

    fn clear(&mut self) -> std::io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    fn move_to(&mut self, row: usize, col: usize) -> std::io::Result<()> {
        self.cursor = (row, col);
        queue!(self.out, MoveTo(Self::clamp_u16(col), Self::clamp_u16(row)))
    }

    fn refresh(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    fn get_event(&mut self) -> std::io::Result<Option<Key>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key_event) => Ok(translate(key_event)),
            Event::Resize(cols, rows) => {
                debug!("Terminal resized to {}x{}", cols, rows);
                self.size = (rows as usize, cols as usize);
                Ok(Some(Key::Resize))
            }
            _ => Ok(None),
        }
    }

    fn get_cursor(&mut self) -> std::io::Result<(usize, usize)> {
        Ok(self.cursor)
    }

    fn get_size(&mut self) -> std::io::Result<(usize, usize)> {
        let (cols, rows) = terminal::size()?;
        self.size = (rows as usize, cols as usize);
        Ok(self.size)
    }

    fn clear_to_line_end(&mut self) -> std::io::Result<()> {
        queue!(self.out, Clear(ClearType::UntilNewLine))
    }

    fn put_char(&mut self, c: char) -> std::io::Result<()> {
        queue!(self.out, Print(c))?;
        let (rows, cols) = self.size;
        let (row, col) = self.cursor;
        self.cursor = if col + 1 < cols {
            (row, col + 1)
        } else if row + 1 < rows {
            (row + 1, 0)
        } else {
            (row, col)
        };
        Ok(())
    }

    fn insert_line(&mut self) -> std::io::Result<()> {
        queue!(self.out, Print(INSERT_LINE))
    }

    fn delete_line(&mut self) -> std::io::Result<()> {
        queue!(self.out, Print(DELETE_LINE))
    }

    fn delete_char_at(&mut self, row: usize, col: usize) -> std::io::Result<()> {
        self.move_to(row, col)?;
        queue!(self.out, Print(DELETE_CHAR))
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}
