// Block history
//
// Snapshot-based undo for the block list. Undo restores the previous
// snapshot; there is no redo.

use crate::models::time_block::TimeBlock;

/// Ordered block-list snapshots, oldest first.
#[derive(Debug, Clone)]
pub struct BlockHistory {
    entries: Vec<Vec<TimeBlock>>,
    /// Maximum number of snapshots to keep
    max_history: usize,
}

impl Default for BlockHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl BlockHistory {
    /// Start with a single empty snapshot.
    pub fn new(max_history: usize) -> Self {
        Self {
            entries: vec![Vec::new()],
            max_history: max_history.max(2),
        }
    }

    /// Record a snapshot taken after a committed mutation.
    pub fn push(&mut self, snapshot: Vec<TimeBlock>) {
        self.entries.push(snapshot);

        // Trim oldest snapshots past the limit
        while self.entries.len() > self.max_history {
            self.entries.remove(0);
        }
    }

    /// Drop the latest snapshot and return the one before it.
    /// `None` when fewer than two snapshots exist.
    pub fn undo(&mut self) -> Option<Vec<TimeBlock>> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        self.entries.last().cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.entries.len() >= 2
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&[TimeBlock]> {
        self.entries.last().map(Vec::as_slice)
    }
}
