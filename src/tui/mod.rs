//! # TUI Adapter
//!
//! Runs the prompt loop: reads lines through the `LineEditor`, turns them
//! into `Command`s, executes them against the `NoteStore` and prints the
//! results through the `UiController`.
//!
//! This is the only module that knows about crossterm (via `terminal`).
//!
//! ## Polling
//!
//! Input is polled, never awaited. Every wait loop (main prompt, note title,
//! note body, search term) asks the surface for a key, feeds it to the editor
//! and sleeps for the poll interval when nothing is pending. Each iteration
//! checks the session's `CancelToken` first, so Ctrl+C unwinds nested prompts
//! at their next poll. A resize reflows the printed text into the new geometry
//! and redraws the prompt with whatever was being typed.

pub mod components;
pub mod event;
pub mod terminal;
pub mod ui;

use std::io;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::core::command::{Command, format_listing, format_note};
use crate::core::config::ResolvedConfig;
use crate::core::store::{NoteStore, StoreError, resolve_body};
use crate::core::CancelToken;
use crate::tui::components::LineEditor;
use crate::tui::event::Key;
use crate::tui::terminal::{CrosstermSurface, TerminalSurface};
use crate::tui::ui::UiController;

const PROMPT: &str = ">";
const SEPARATOR: &str = " ";

pub const SPLASH: &str = r"_________________________________________________________________________________
    _     _                          __
    /|   /                         /    )                                       /
---/-| -/-----__--_/_----__-------/---------__---_--_---_--_----__----__----__-/-
  /  | /    /   ) /    /___)     /        /   ) / /  ) / /  ) /   ) /   ) /   /
_/___|/____(___/_(_ __(___ _____(____/___(___/_/_/__/_/_/__/_(___(_/___/_(___/___

Commands:
new - Create a new note
list - List all notes
delete [id] - Delete a note
find [query] - Search all notes
[id] - View a note matching this id
clear - Clear the screen
exit - Quit
";

const NOT_FOUND: &str = "Unable to locate the given note";

/// Open the store, take over the terminal and run until `exit` or Ctrl+C.
pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let store = NoteStore::open(&config.db_path).map_err(io::Error::other)?;

    let mut surface = CrosstermSurface::new();
    surface.init()?;

    let mut session = Session::new(surface, store, &config, CancelToken::new())?;
    let result = session.run();
    let restored = session.ui.surface().quit();
    result.and(restored)
}

/// Everything one run of the prompt loop owns.
pub struct Session<T: TerminalSurface> {
    ui: UiController<T>,
    editor: LineEditor,
    store: NoteStore,
    cancel: CancelToken,
    poll_interval: Duration,
}

impl<T: TerminalSurface> Session<T> {
    pub fn new(
        surface: T,
        store: NoteStore,
        config: &ResolvedConfig,
        cancel: CancelToken,
    ) -> io::Result<Self> {
        let editor = LineEditor::new(config.input_capacity).map_err(io::Error::other)?;
        let mut ui = UiController::new(surface);
        ui.layout(config.input_rows)?;
        Ok(Self {
            ui,
            editor,
            store,
            cancel,
            poll_interval: config.poll_interval,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.show(SPLASH)?;
        while let Some(line) = self.await_line(Key::Return)? {
            let command = Command::parse(&line);
            debug!("Command: {:?}", command);
            match command {
                Command::Exit => break,
                Command::Clear => self.show(SPLASH)?,
                Command::List => self.list()?,
                Command::Create => self.create()?,
                Command::Search(None) => self.search_prompt()?,
                Command::Search(Some(term)) => self.search(&term)?,
                Command::Delete(id) => self.delete(id)?,
                Command::View(id) => self.view(id)?,
                Command::Unknown(text) => {
                    self.show(&format!("Unknown command \"{text}\" (type clear for help)"))?
                }
            }
        }
        info!("Prompt loop finished");
        Ok(())
    }

    /// Poll until a non-empty line is submitted with `submit`, or the session is cancelled.
    fn await_line(&mut self, submit: Key) -> io::Result<Option<String>> {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(None);
            }
            match self.ui.surface().get_event()? {
                None => thread::sleep(self.poll_interval),
                Some(Key::Interrupt) => self.cancel.cancel(),
                Some(Key::Resize) => {
                    self.ui.relayout()?;
                    self.ui
                        .print_command_prompt(PROMPT, SEPARATOR, &mut self.editor)?;
                }
                Some(key) => {
                    if !self.editor.consume_event(Some(key), submit, &mut self.ui)? {
                        continue;
                    }
                    let line = self.editor.get_buffer().to_string();
                    if !line.is_empty() {
                        return Ok(Some(line));
                    }
                    self.prompt()?;
                }
            }
        }
    }

    /// Replace the screen with `text` and open an empty prompt.
    fn show(&mut self, text: &str) -> io::Result<()> {
        self.ui.clear_and_print(text)?;
        self.prompt()
    }

    fn prompt(&mut self) -> io::Result<()> {
        self.editor.clear();
        self.ui
            .print_command_prompt(PROMPT, SEPARATOR, &mut self.editor)
    }

    fn list(&mut self) -> io::Result<()> {
        let notes = self.store.list();
        let text = if notes.is_empty() {
            "There are no notes yet".to_string()
        } else {
            format_listing(&notes, self.ui.cols())
        };
        self.show(&text)
    }

    fn create(&mut self) -> io::Result<()> {
        self.show("Write a title for your note...")?;
        let Some(title) = self.await_line(Key::Return)? else {
            return Ok(());
        };

        self.show(&format!(
            "Title: {title}\nNow write the body of your note (file:path to import a text file, F2 to save)..."
        ))?;
        let Some(body) = self.await_line(Key::MultiLineSubmit)? else {
            return Ok(());
        };

        let created = resolve_body(&body)
            .map_err(StoreError::from)
            .and_then(|body| self.store.create(&title, &body));
        let message = match created {
            Ok(id) => {
                debug!("Note {} created from the prompt", id);
                "Note created!"
            }
            Err(e) => {
                warn!("Failed to create note: {}", e);
                "There was an issue creating your note... please try again"
            }
        };
        self.show(message)
    }

    fn search_prompt(&mut self) -> io::Result<()> {
        self.show("Enter your search term...")?;
        if let Some(term) = self.await_line(Key::Return)? {
            self.search(&term)?;
        }
        Ok(())
    }

    fn search(&mut self, term: &str) -> io::Result<()> {
        let hits = self.store.search(term);
        let text = match hits.as_slice() {
            [] => "Could not locate any matches".to_string(),
            [note] => format_note(note),
            _ => format!(
                "Multiple entries found, pick an id...\n{}",
                format_listing(&hits, self.ui.cols())
            ),
        };
        self.show(&text)
    }

    fn delete(&mut self, id: u32) -> io::Result<()> {
        let message = match self.store.delete(id) {
            Ok(()) => "The note has been deleted",
            Err(StoreError::NotFound(_)) => NOT_FOUND,
            Err(e) => {
                warn!("Failed to delete note {}: {}", id, e);
                "There was an issue deleting the note... please try again"
            }
        };
        self.show(message)
    }

    fn view(&mut self, id: u32) -> io::Result<()> {
        let text = match self.store.fetch(id) {
            Some(note) => format_note(note),
            None => NOT_FOUND.to_string(),
        };
        self.show(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::GridSurface;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config() -> ResolvedConfig {
        ResolvedConfig {
            db_path: PathBuf::from("unused.json"),
            input_capacity: 256,
            input_rows: 1,
            poll_interval: Duration::ZERO,
            log_level: log::LevelFilter::Off,
            warnings: Vec::new(),
        }
    }

    fn session(keys: Vec<Key>) -> (TempDir, Session<GridSurface>) {
        let dir = tempfile::tempdir().unwrap();
        let store = NoteStore::open(dir.path().join("notes.json")).unwrap();
        let mut surface = GridSurface::new(24, 40);
        surface.push_keys(keys);
        let session = Session::new(surface, store, &config(), CancelToken::new()).unwrap();
        (dir, session)
    }

    fn line(text: &str) -> Vec<Key> {
        let mut keys: Vec<Key> = text.chars().map(Key::Char).collect();
        keys.push(Key::Return);
        keys
    }

    fn script(parts: &[Vec<Key>]) -> Vec<Key> {
        parts.concat()
    }

    // -- lifecycle ---

    #[test]
    fn test_exit_ends_loop() {
        let (_dir, mut session) = session(line("exit"));
        session.run().unwrap();
        assert!(!session.cancel.is_cancelled());
    }

    #[test]
    fn test_interrupt_ends_loop() {
        let (_dir, mut session) = session(script(&[line("list"), vec![Key::Interrupt]]));
        session.run().unwrap();
        assert!(session.cancel.is_cancelled());
    }

    #[test]
    fn test_splash_on_start() {
        let (_dir, mut session) = session(line("exit"));
        session.run().unwrap();
        let pages = session.ui.book().pages();
        assert!(pages.iter().any(|page| page.source_text().contains("Commands:")));
    }

    #[test]
    fn test_resize_reflows_output_and_keeps_typed_text() {
        let (_dir, mut session) = session(vec![Key::Char('a'), Key::Char('b')]);
        session.ui.surface().push_resize(12, 30);
        session.ui.surface().push_keys([Key::Char('c'), Key::Interrupt]);

        session.run().unwrap();

        assert_eq!((session.ui.content_rows(), session.ui.cols()), (10, 30));
        assert_eq!(session.ui.book().cols(), 30);
        let source: String = session
            .ui
            .book()
            .pages()
            .iter()
            .map(|page| page.source_text())
            .collect();
        assert_eq!(source, SPLASH);
        assert_eq!(session.editor.get_buffer(), "abc");
        assert!(session.ui.surface().row_text(10).starts_with("=== Page 1"));
        assert_eq!(session.ui.surface().row_text(11), "> abc");
    }

    #[test]
    fn test_empty_submit_reprompts() {
        let (_dir, mut session) =
            session(script(&[vec![Key::Char(' '), Key::Return], line("exit")]));
        session.run().unwrap();
        assert!(!session.cancel.is_cancelled());
    }

    // -- create / view ---

    #[test]
    fn test_create_then_view() {
        let mut keys = script(&[line("new"), line("Groceries")]);
        keys.extend([
            Key::Char('m'),
            Key::Char('i'),
            Key::Char('l'),
            Key::Char('k'),
            Key::Return,
            Key::Char('e'),
            Key::Char('g'),
            Key::Char('g'),
            Key::Char('s'),
            Key::MultiLineSubmit,
        ]);
        keys.extend(line("1"));
        keys.push(Key::Interrupt);
        let (_dir, mut session) = session(keys);

        session.run().unwrap();

        let note = session.store.fetch(1).unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.body, "milk\neggs");

        let surface = session.ui.surface();
        assert_eq!(surface.row_text(0), "ID:    1");
        assert_eq!(surface.row_text(1), "Title: Groceries");
        assert_eq!(surface.row_text(2), "milk");
        assert_eq!(surface.row_text(3), "eggs");
    }

    #[test]
    fn test_interrupt_during_body_creates_nothing() {
        let keys = script(&[line("new"), line("Draft"), vec![Key::Char('x'), Key::Interrupt]]);
        let (_dir, mut session) = session(keys);

        session.run().unwrap();

        assert!(session.store.list().is_empty());
    }

    #[test]
    fn test_create_with_missing_import_reports_failure() {
        let keys = script(&[
            line("new"),
            line("Imported"),
            "file:/definitely/not/here.txt"
                .chars()
                .map(Key::Char)
                .chain([Key::MultiLineSubmit])
                .collect(),
            line("exit"),
        ]);
        let (_dir, mut session) = session(keys);

        session.run().unwrap();

        assert!(session.store.list().is_empty());
        assert_eq!(
            session.ui.book().pages()[0].source_text(),
            "There was an issue creating your note... please try again"
        );
    }

    #[test]
    fn test_view_missing_note() {
        let (_dir, mut session) = session(script(&[line("7"), line("exit")]));
        session.run().unwrap();
        assert_eq!(session.ui.surface().row_text(0), NOT_FOUND);
    }

    // -- search / list / delete ---

    #[test]
    fn test_search_results() {
        let (_dir, mut session) = session(script(&[line("find cat"), line("exit")]));
        session.store.create("cats", "meow").unwrap();
        session.store.create("catalog", "items").unwrap();

        session.run().unwrap();

        let surface = session.ui.surface();
        assert_eq!(surface.row_text(0), "Multiple entries found, pick an id...");
        assert_eq!(surface.row_text(1), "(1) cats");
        assert_eq!(surface.row_text(2), "(2) catalog");
    }

    #[test]
    fn test_search_single_hit_shows_note() {
        let (_dir, mut session) =
            session(script(&[line("search"), line("meow"), line("exit")]));
        session.store.create("cats", "meow").unwrap();

        session.run().unwrap();

        assert_eq!(session.ui.surface().row_text(0), "ID:    1");
    }

    #[test]
    fn test_search_no_hits() {
        let (_dir, mut session) = session(script(&[line("find dogs"), line("exit")]));
        session.run().unwrap();
        assert_eq!(
            session.ui.surface().row_text(0),
            "Could not locate any matches"
        );
    }

    #[test]
    fn test_list_and_delete() {
        let (_dir, mut session) =
            session(script(&[line("delete 1"), line("delete 1"), line("list"), line("exit")]));
        session.store.create("first", "").unwrap();
        session.store.create("second", "").unwrap();

        session.run().unwrap();

        assert!(session.store.fetch(1).is_none());
        assert_eq!(session.ui.surface().row_text(0), "(2) second");
    }

    #[test]
    fn test_unknown_command() {
        let (_dir, mut session) = session(script(&[line("dance"), line("exit")]));
        session.run().unwrap();
        assert!(session.ui.surface().row_text(0).starts_with("Unknown command"));
    }
}
