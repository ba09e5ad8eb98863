//! Undo/redo for checklist edits.
//!
//! Every mutation in [`crate::ops`] builds the command that reverses it and
//! hands it to an optional [`UndoHistory`]. Replaying a command goes back
//! through the same mutation functions, so undoing registers the redo step
//! and redoing registers the next undo step.
//!
//! Inverses for edits that change membership or order (delete, delete many,
//! replace, move) are full snapshots of the prior item list. Each such entry
//! holds a copy of the list, trading memory for an inverse that is always
//! exact.

mod command;
mod history;

pub use command::{Action, Command};
pub use history::{HistoryConfig, HistoryEntry, Recording, UndoHistory, DEFAULT_MAX_DEPTH};
