//! # Core Application Logic
//!
//! Everything NoteCommander does that isn't drawing to the terminal.
//!
//! ```text
//!     ┌──────────────┐   Command    ┌──────────────┐
//!     │     TUI      │ ───────────► │     CORE     │
//!     │ (tui module) │ ◄─────────── │ (this module)│
//!     └──────────────┘  plain text  └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cancel`]: `CancelToken`, checked by every wait loop
//! - [`command`]: `Command` parsing and result formatting
//! - [`config`]: layered settings
//! - [`store`]: `NoteStore`, notes persisted as JSON

pub mod cancel;
pub mod command;
pub mod config;
pub mod store;

pub use cancel::CancelToken;
pub use command::Command;
pub use store::{Note, NoteStore, StoreError};
