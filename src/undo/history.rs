//! Undo/redo history for one open document.
//!
//! [`UndoHistory`] keeps two stacks of [`Command`]s and a recording mode.
//! The mutation API hands every inverse it builds to [`UndoHistory::register`];
//! the recording mode decides where it lands:
//!
//! ```text
//! mode       register(cmd) pushes onto    redo stack
//! ---------  --------------------------   ----------
//! Forward    undo stack                   cleared (new branch)
//! Undoing    redo stack                   kept
//! Redoing    undo stack                   kept
//! ```
//!
//! `undo()` pops a command, switches to `Undoing` and replays it through the
//! mutation API, which registers the redo entry on its own. `redo()` is the
//! mirror image. There is no separate redo construction path.
//!
//! # Invariants
//!
//! 1. The redo stack is cleared whenever a forward edit is registered.
//! 2. `undo_stack.len() <= config.max_depth` after any operation (when bounded).
//! 3. The recording mode is `Forward` whenever control is outside `undo`/`redo`.
//! 4. A failed replay puts the command back where it came from.

use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

use crate::change::{Change, ChangeOrigin};
use crate::models::ChecklistDocument;
use crate::ops::EditError;

use super::command::{Action, Command};

/// Default number of undo steps kept.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Configuration for the undo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of undo steps to keep (0 = unlimited).
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl HistoryConfig {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// No depth limit.
    pub fn unlimited() -> Self {
        Self { max_depth: 0 }
    }
}

/// Where registered commands currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recording {
    #[default]
    Forward,
    /// Replaying an undo entry; carries the entry's action so the redo entry
    /// keeps the same label.
    Undoing(Action),
    /// Replaying a redo entry.
    Redoing(Action),
}

/// A command plus the action it was recorded for.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub action: Action,
    pub command: Command,
}

/// Dual-stack undo/redo history.
pub struct UndoHistory {
    /// Entries available for undo (newest at back).
    undo_stack: VecDeque<HistoryEntry>,
    /// Entries available for redo (newest at back).
    redo_stack: VecDeque<HistoryEntry>,
    recording: Recording,
    config: HistoryConfig,
}

impl fmt::Debug for UndoHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoHistory")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("recording", &self.recording)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl UndoHistory {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            recording: Recording::Forward,
            config,
        }
    }

    /// Record the inverse of an edit that was just applied.
    ///
    /// While replaying, `action` is ignored in favour of the action of the
    /// entry being replayed.
    pub fn register(&mut self, action: Action, command: Command) {
        match self.recording {
            Recording::Forward => {
                self.redo_stack.clear();
                self.push_undo(HistoryEntry { action, command });
            }
            Recording::Undoing(replayed) => {
                self.redo_stack.push_back(HistoryEntry {
                    action: replayed,
                    command,
                });
            }
            Recording::Redoing(replayed) => {
                self.push_undo(HistoryEntry {
                    action: replayed,
                    command,
                });
            }
        }
    }

    /// Origin to attach to a change made under the current recording mode.
    pub fn origin(&self) -> ChangeOrigin {
        match self.recording {
            Recording::Forward => ChangeOrigin::User,
            Recording::Undoing(_) => ChangeOrigin::Undo,
            Recording::Redoing(_) => ChangeOrigin::Redo,
        }
    }

    pub fn recording(&self) -> Recording {
        self.recording
    }

    /// Undo the most recent entry.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(change))` if an entry was undone
    /// - `Ok(None)` if there is nothing to undo
    /// - `Err(error)` if the entry no longer applies (it stays on the undo stack)
    pub fn undo(&mut self, doc: &mut ChecklistDocument) -> Result<Option<Change>, EditError> {
        let Some(entry) = self.undo_stack.pop_back() else {
            return Ok(None);
        };
        debug!(action = %entry.action, "undo");

        self.recording = Recording::Undoing(entry.action);
        let result = entry.command.apply(doc, Some(&mut *self));
        self.recording = Recording::Forward;

        match result {
            Ok(change) => Ok(Some(change)),
            Err(e) => {
                self.undo_stack.push_back(entry);
                Err(e)
            }
        }
    }

    /// Redo the most recently undone entry.
    ///
    /// Same return convention as [`UndoHistory::undo`]; a failing entry stays
    /// on the redo stack.
    pub fn redo(&mut self, doc: &mut ChecklistDocument) -> Result<Option<Change>, EditError> {
        let Some(entry) = self.redo_stack.pop_back() else {
            return Ok(None);
        };
        debug!(action = %entry.action, "redo");

        self.recording = Recording::Redoing(entry.action);
        let result = entry.command.apply(doc, Some(&mut *self));
        self.recording = Recording::Forward;

        match result {
            Ok(change) => Ok(Some(change)),
            Err(e) => {
                self.redo_stack.push_back(entry);
                Err(e)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the entry `undo()` would replay.
    pub fn undo_label(&self) -> Option<&'static str> {
        self.undo_stack.back().map(|e| e.action.label())
    }

    /// Label of the entry `redo()` would replay.
    pub fn redo_label(&self) -> Option<&'static str> {
        self.redo_stack.back().map(|e| e.action.label())
    }

    /// Undo entries, most recent first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter().rev()
    }

    /// Redo entries, most recent first.
    pub fn redo_entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.redo_stack.iter().rev()
    }

    /// Total number of items held by snapshots across both stacks.
    pub fn retained_items(&self) -> usize {
        self.undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .map(|e| e.command.retained_items())
            .sum()
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo_stack.push_back(entry);
        if self.config.max_depth > 0 {
            while self.undo_stack.len() > self.config.max_depth {
                self.undo_stack.pop_front();
            }
        }
    }
}
