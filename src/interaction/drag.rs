// Block drag system
//
// Tracks the drag-lock on a block while it is moved or resized.
// - Move: both edges follow the pointer
// - ResizeTop / ResizeBottom: only the grabbed edge follows

use crate::models::time_block::{BlockId, TimeBlock};

/// Which handle of the block is being dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragAction {
    /// Block body - shifts start and end together
    Move,
    /// Top edge - adjusts start time
    ResizeTop,
    /// Bottom edge - adjusts end time
    ResizeBottom,
}

impl DragAction {
    /// Returns true if this action changes the block's duration
    pub fn is_resize(&self) -> bool {
        matches!(self, DragAction::ResizeTop | DragAction::ResizeBottom)
    }
}

/// Context for an active drag
#[derive(Clone, Debug)]
pub struct DragContext {
    pub block_id: BlockId,
    pub action: DragAction,
    /// The block as it was when the lock engaged, restored on cancel
    pub original: TimeBlock,
    /// Number of movement ticks that were accepted
    pub accepted_ticks: usize,
}

impl DragContext {
    pub fn from_block(block: &TimeBlock, action: DragAction) -> Self {
        Self {
            block_id: block.id,
            action,
            original: block.clone(),
            accepted_ticks: 0,
        }
    }

    /// Record a movement tick; returns whether it was accepted.
    pub fn record(&mut self, accepted: bool) -> bool {
        if accepted {
            self.accepted_ticks += 1;
        }
        accepted
    }

    /// True once at least one tick changed the block.
    pub fn has_moved(&self) -> bool {
        self.accepted_ticks > 0
    }
}
