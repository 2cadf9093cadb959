// SPDX-License-Identifier: MIT OR Apache-2.0
//! Undo/redo history over whole-document snapshots.
//!
//! Every persisted mutation pushes a deep snapshot of the document as
//! it was immediately before the change. Undo and redo swap the current
//! document with the top of the respective stack; both are no-ops on
//! empty stacks, never errors.

use crate::document::Document;

/// Maximum undo depth before the oldest snapshot is evicted
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Linear undo/redo stacks of document snapshots.
///
/// Depth is bounded: pushing past the configured maximum drops the
/// oldest entry, so undo bottoms out after at most that many steps.
#[derive(Debug, Clone, Default)]
pub struct DocumentHistory {
    /// Past snapshots, older to newer
    past: Vec<Document>,
    /// Redo candidates, in undo order
    future: Vec<Document>,
    max_depth: usize,
}

impl DocumentHistory {
    /// Create a history with the default depth cap
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_HISTORY_DEPTH)
    }

    /// Create a history with a custom depth cap
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            max_depth,
        }
    }

    /// Push the pre-mutation snapshot.
    ///
    /// Any redo branch is invalidated: new persisted edits clear the
    /// future stack.
    pub fn push(&mut self, snapshot: Document) {
        self.future.clear();
        self.past.push(snapshot);
        while self.past.len() > self.max_depth {
            self.past.remove(0);
        }
        tracing::debug!(undo_depth = self.past.len(), "History snapshot pushed");
    }

    /// Pop the most recent past snapshot, parking the current document
    /// on the redo stack. Returns `None` (leaving both stacks alone)
    /// when there is nothing to undo.
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let previous = self.past.pop()?;
        self.future.push(current.clone());
        tracing::debug!(undo_remaining = self.past.len(), "Undo");
        Some(previous)
    }

    /// Symmetric to [`undo`](Self::undo): pop the redo stack, parking
    /// the current document on the past stack.
    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let next = self.future.pop()?;
        self.past.push(current.clone());
        tracing::debug!(redo_remaining = self.future.len(), "Redo");
        Some(next)
    }

    /// Whether undo is available
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether redo is available
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of past snapshots
    pub fn undo_count(&self) -> usize {
        self.past.len()
    }

    /// Number of redo candidates
    pub fn redo_count(&self) -> usize {
        self.future.len()
    }

    /// The configured depth cap
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Drop all snapshots
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}
