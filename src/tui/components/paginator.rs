//! # Paginator
//!
//! Splits arbitrary text into screen-sized, word-wrapped pages.
//!
//! ```text
//! Book
//! ├── pages: Vec<Page>     // ordered, never empty
//! ├── current: usize       // 0-based, reported 1-based
//! └── rows × cols          // capacity of every page
//!
//! Page
//! └── lines: Vec<Line>     // at most `rows`, the tail page's last may be open
//! ```
//!
//! ## Wrapping
//!
//! Greedy word-wrap. A line ends on a literal `\n`, or when a word character
//! arrives at a full line. In the latter case the word in progress moves to
//! the next line if the whole word fits in `cols`; a longer word is split at
//! the line edge. Whitespace never forces a break, so whitespace at a wrap
//! point stays at the end of the line it follows and is simply not rendered
//! past column `cols`.
//!
//! A page is full once it holds `rows` closed lines. The next character opens
//! a new tail page; nothing is dropped at a page boundary.

use log::debug;

/// How a line was terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// Still accepting text (only ever the last line of the tail page).
    Open,
    /// Ended by a literal `\n` in the source text.
    Newline,
    /// Ended by a wrap break inserted by the paginator.
    Wrap,
}

/// One screen row of already-wrapped text.
#[derive(Debug, Clone)]
pub struct Line {
    text: String,
    width: usize,
    end: LineEnd,
}

impl Line {
    fn new() -> Self {
        Self {
            text: String::new(),
            width: 0,
            end: LineEnd::Open,
        }
    }

    fn push(&mut self, c: char) {
        self.text.push(c);
        self.width += 1;
    }

    /// Byte offset just past the last whitespace, i.e. where the trailing word starts.
    fn word_start(&self) -> usize {
        self.text
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8())
    }

    /// Detach the trailing word, returning it with its width in cells.
    fn split_word(&mut self, at: usize) -> (String, usize) {
        let word = self.text.split_off(at);
        let width = word.chars().count();
        self.width -= width;
        (word, width)
    }

    pub fn end(&self) -> LineEnd {
        self.end
    }

    /// The raw line text, including any whitespace past the last column.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One screen-full of wrapped text.
#[derive(Debug, Clone)]
pub struct Page {
    lines: Vec<Line>,
    rows: usize,
    cols: usize,
}

impl Page {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            lines: Vec::with_capacity(rows),
            rows,
            cols,
        }
    }

    /// Number of cells the page can hold.
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.text.is_empty())
    }

    /// Full once every row is used and the last one is closed.
    fn is_full(&self) -> bool {
        self.lines.len() >= self.rows
            && self.lines.last().is_some_and(|l| l.end != LineEnd::Open)
    }

    fn has_open_line(&self) -> bool {
        self.lines.last().is_some_and(|l| l.end == LineEnd::Open)
    }

    pub fn raw_lines(&self) -> &[Line] {
        &self.lines
    }

    /// Rendered rows, each clipped to the page width.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(move |line| clip(&line.text, self.cols))
    }

    /// Rendered content: visible rows joined by line breaks.
    pub fn content(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    /// The source text this page was built from, with wrap breaks removed.
    pub fn source_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            if line.end == LineEnd::Newline {
                out.push('\n');
            }
        }
        out
    }
}

/// First `cols` cells of `text`.
fn clip(text: &str, cols: usize) -> &str {
    match text.char_indices().nth(cols) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

/// Ordered pages plus the page currently on screen.
#[derive(Debug)]
pub struct Book {
    pages: Vec<Page>,
    current: usize,
    rows: usize,
    cols: usize,
}

impl Book {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut book = Self {
            pages: Vec::new(),
            current: 0,
            rows: 1,
            cols: 1,
        };
        book.reset(rows, cols);
        book
    }

    /// Discard all pages and start over with one empty page of `rows × cols`.
    pub fn reset(&mut self, rows: usize, cols: usize) {
        self.rows = rows.max(1);
        self.cols = cols.max(1);
        self.release();
        self.pages.push(Page::new(self.rows, self.cols));
        self.current = 0;
    }

    /// Release every page, leaving a single empty page of the current size.
    pub fn clear(&mut self) {
        self.reset(self.rows, self.cols);
    }

    fn release(&mut self) {
        let released = self.pages.drain(..).count();
        if released > 1 {
            debug!("Released {} pages", released);
        }
    }

    /// Word-wrap `text` onto the tail page, opening new pages as needed.
    pub fn append_text(&mut self, text: &str) {
        let cols = self.cols;
        for (i, c) in text.char_indices() {
            if c == '\n' {
                self.open_line().end = LineEnd::Newline;
                continue;
            }

            let line = self.open_line();
            if line.width < cols || c.is_whitespace() {
                line.push(c);
                continue;
            }

            // Line is full and a word character arrived.
            let word_start = line.word_start();
            let fragment_width = line.text[word_start..].chars().count();
            let word_end = text[i..]
                .find(char::is_whitespace)
                .map_or(text.len(), |n| i + n);
            let word_width = fragment_width + text[i..word_end].chars().count();

            if word_start > 0 && word_width <= cols {
                let (fragment, width) = line.split_word(word_start);
                line.end = LineEnd::Wrap;
                let next = self.open_line();
                next.text = fragment;
                next.width = width;
            } else {
                line.end = LineEnd::Wrap;
            }
            self.open_line().push(c);
        }
    }

    /// The tail page's open line, opening a new line or page when needed.
    fn open_line(&mut self) -> &mut Line {
        if self.tail().is_full() {
            self.pages.push(Page::new(self.rows, self.cols));
            debug!("Opened page {}", self.pages.len());
        }
        let (rows, cols) = (self.rows, self.cols);
        let tail = self.tail_mut();
        if !tail.has_open_line() {
            debug_assert!(tail.lines.len() < rows, "page of {rows}x{cols} overflowed");
            tail.lines.push(Line::new());
        }
        let last = tail.lines.len() - 1;
        &mut tail.lines[last]
    }

    fn tail(&self) -> &Page {
        &self.pages[self.pages.len() - 1]
    }

    fn tail_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Advance to the next page. Returns `false` (and changes nothing) at the tail.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.pages.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns `false` (and changes nothing) at the head.
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// 1-based index of the current page.
    pub fn current_index(&self) -> usize {
        self.current + 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.current]
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}
