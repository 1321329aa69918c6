use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Logical key codes consumed by the editor and the application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable code point (already decoded from multi-byte input).
    Char(char),
    Return,
    /// Commits multi-line input; Return inserts a newline while this is the match key.
    MultiLineSubmit,
    Backspace,
    Delete,
    Left,
    Right,
    CtrlLeft,
    CtrlRight,
    Up,
    Down,
    CtrlUp,
    CtrlDown,
    PageUp,
    PageDown,
    /// Ctrl+C: cancel every pending wait.
    Interrupt,
    /// The terminal changed size; the layout must be rebuilt.
    Resize,
}

/// Translate a crossterm key event into a `Key`, dropping anything we don't handle.
pub fn translate(key_event: KeyEvent) -> Option<Key> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match (ctrl, key_event.code) {
        (true, KeyCode::Char('c')) => Some(Key::Interrupt),
        (true, KeyCode::Left) => Some(Key::CtrlLeft),
        (true, KeyCode::Right) => Some(Key::CtrlRight),
        (true, KeyCode::Up) => Some(Key::CtrlUp),
        (true, KeyCode::Down) => Some(Key::CtrlDown),
        // Other control chords are not text.
        (true, KeyCode::Char(_)) => None,
        (_, KeyCode::Char(c)) => Some(Key::Char(c)),
        (_, KeyCode::Enter) => Some(Key::Return),
        (_, KeyCode::F(2)) => Some(Key::MultiLineSubmit),
        (_, KeyCode::Backspace) => Some(Key::Backspace),
        (_, KeyCode::Delete) => Some(Key::Delete),
        (_, KeyCode::Left) => Some(Key::Left),
        (_, KeyCode::Right) => Some(Key::Right),
        (_, KeyCode::Up) => Some(Key::Up),
        (_, KeyCode::Down) => Some(Key::Down),
        (_, KeyCode::PageUp) => Some(Key::PageUp),
        (_, KeyCode::PageDown) => Some(Key::PageDown),
        _ => None,
    }
}
