//! Linear undo/redo over whole-document snapshots.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::model::Document;
use crate::scene::Scene;

pub const DEFAULT_LIMIT: usize = 200;

#[derive(Clone, Debug)]
pub struct History {
    undo: Vec<Document>,
    redo: Vec<Document>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Records the scene as it is now, ahead of a mutation.
    pub fn snapshot_before_change(&mut self, scene: &Scene) {
        self.record(scene.snapshot());
    }

    /// Pushes an already-taken snapshot. Any new mutation invalidates the
    /// forward history.
    pub fn record(&mut self, snapshot: Document) {
        self.undo.push(snapshot);
        if self.undo.len() > self.limit {
            let overflow = self.undo.len() - self.limit;
            self.undo.drain(0..overflow);
        }
        self.redo.clear();
    }

    /// Returns whether the scene changed.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        let Some(prev) = self.undo.pop() else {
            return false;
        };
        self.redo.push(scene.snapshot());
        scene.restore(prev);
        true
    }

    /// Returns whether the scene changed.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push(scene.snapshot());
        scene.restore(next);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
