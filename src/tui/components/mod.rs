//! # TUI Components
//!
//! Building blocks the `UiController` composes.
//!
//! - `Book` / `Page`: word-wrapped, paginated output (stateful, pure)
//! - `LineEditor`: bounded text input drawn onto a `TerminalSurface`
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── paginator.rs     (Book, Page, Line)
//! └── line_editor/     (LineEditor plus cell arithmetic)
//! ```

pub mod line_editor;
pub mod paginator;

pub use line_editor::{EditorError, LineEditor};
pub use paginator::{Book, Line, LineEnd, Page};
