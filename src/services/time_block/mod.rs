//! Block lifecycle service.
//!
//! Owns the committed block list, the drawing preview and the undo history.
//! Every committed mutation pushes one history snapshot; drag ticks and
//! auto-merges do not.

mod history;

pub use history::BlockHistory;

use crate::error::{Result, ScheduleError};
use crate::interaction::drag::DragAction;
use crate::models::schedule::HOUR_24;
use crate::models::time_block::{BlockId, DayInterval, TimeBlock};
use crate::services::grid::{CellGrid, BLOCK_INSET};
use crate::services::merge::{apply_block_merge, find_block_merge};

#[derive(Debug, Clone)]
pub struct TimeBlockService {
    blocks: Vec<TimeBlock>,
    preview: Vec<TimeBlock>,
    history: BlockHistory,
    next_id: u64,
}

impl Default for TimeBlockService {
    fn default() -> Self {
        Self::new(100)
    }
}

impl TimeBlockService {
    pub fn new(history_limit: usize) -> Self {
        Self {
            blocks: Vec::new(),
            preview: Vec::new(),
            history: BlockHistory::new(history_limit),
            next_id: 1,
        }
    }

    /// Committed blocks.
    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    /// Uncommitted blocks of the draw in progress.
    pub fn preview(&self) -> &[TimeBlock] {
        &self.preview
    }

    pub fn history(&self) -> &BlockHistory {
        &self.history
    }

    pub fn find(&self, id: BlockId) -> Option<&TimeBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    fn next_block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    fn commit(&mut self) {
        self.history.push(self.blocks.clone());
    }

    fn layout_interval(&mut self, interval: &DayInterval, grid: &CellGrid) -> TimeBlock {
        let geometry = grid.block_geometry(interval.column, interval.start_time, interval.end_time);
        TimeBlock {
            id: self.next_block_id(),
            start_time: interval.start_time,
            end_time: interval.end_time,
            real_start_time: interval.start_time as f64,
            real_end_time: interval.end_time as f64,
            column: interval.column,
            top: geometry.top,
            left: geometry.left,
            width: geometry.width,
            height: geometry.height,
            is_temp: false,
        }
    }

    /// Replace the working set with decoded intervals.
    pub fn load_intervals(&mut self, intervals: &[DayInterval], grid: &CellGrid) {
        let blocks: Vec<TimeBlock> = intervals
            .iter()
            .map(|interval| self.layout_interval(interval, grid))
            .collect();
        log::debug!("Loaded {} blocks", blocks.len());
        self.blocks = blocks;
        self.preview.clear();
        self.commit();
    }

    /// Recompute pixel geometry from block times after a grid rebuild.
    pub fn relayout(&mut self, grid: &CellGrid) {
        for block in &mut self.blocks {
            let geometry = grid.block_geometry(block.column, block.start_time, block.end_time);
            block.top = geometry.top;
            block.left = geometry.left;
            block.width = geometry.width;
            block.height = geometry.height;
            block.real_start_time = block.start_time as f64;
            block.real_end_time = block.end_time as f64;
        }
        self.preview.clear();
    }

    /// Turn the grid's selected cells into one block per touched column.
    ///
    /// While `drawing` the blocks become the preview; otherwise they are
    /// committed. The selection is cleared either way. Returns the number
    /// of blocks built.
    pub fn build_from_selection(&mut self, grid: &mut CellGrid, drawing: bool) -> usize {
        let ms_time = grid.ms_time();
        let width = grid.block_width();

        let mut spans: Vec<(usize, usize, usize)> = Vec::new();
        for (index, cell) in grid.cells().iter().enumerate() {
            if !cell.is_selected {
                continue;
            }
            match spans.iter_mut().find(|(column, _, _)| *column == cell.column) {
                Some(span) => span.2 = index,
                None => spans.push((cell.column, index, index)),
            }
        }
        if spans.is_empty() {
            return 0;
        }

        let mut built = Vec::with_capacity(spans.len());
        for (column, first, last) in spans {
            let start_cell = grid.cells()[first];
            let end_cell = grid.cells()[last];
            let start_time = start_cell.row as i64 * ms_time;
            let end_time = (end_cell.row as i64 + 1) * ms_time;
            built.push(TimeBlock {
                id: self.next_block_id(),
                start_time,
                end_time,
                real_start_time: start_time as f64,
                real_end_time: end_time as f64,
                column,
                top: start_cell.position.y,
                left: start_cell.position.x + BLOCK_INSET,
                width,
                height: end_cell.position.bottom - start_cell.position.y,
                is_temp: drawing,
            });
        }

        let count = built.len();
        if drawing {
            self.preview = built;
        } else {
            log::debug!("Committed {} drawn blocks", count);
            self.blocks.extend(built);
            self.commit();
            self.preview.clear();
        }
        grid.clear_selection();
        count
    }

    pub fn clear_preview(&mut self) {
        self.preview.clear();
    }

    /// Apply one pointer movement to a dragged block.
    ///
    /// Ticks that would push the block more than a third of a timeframe
    /// past either day edge, or shrink it below one timeframe, are ignored
    /// and return false. Displayed times are re-rounded from the real times
    /// held before this tick.
    pub fn drag_tick(
        &mut self,
        id: BlockId,
        action: DragAction,
        movement_y: f64,
        mouse_speed: f64,
        grid: &CellGrid,
    ) -> bool {
        let ms_time = grid.ms_time();
        let ms = ms_time as f64;
        let mpp = grid.millis_per_pixel();
        let slack = ms / 3.0;
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            return false;
        };

        let rounded_start = ((block.real_start_time / ms).round() as i64 * ms_time).abs();
        let rounded_end = (block.real_end_time / ms).round() as i64 * ms_time;
        let delta = movement_y * mouse_speed;

        match action {
            DragAction::Move => {
                let new_top = block.top + delta;
                let diff = (new_top - block.top) * mpp;
                let new_start = block.real_start_time + diff;
                let new_end = block.real_end_time + diff;
                if new_start < -slack || new_end > HOUR_24 as f64 + slack || new_end - new_start < ms {
                    return false;
                }
                block.start_time = rounded_start;
                block.end_time = rounded_end;
                block.real_start_time = new_start;
                block.real_end_time = new_end;
                block.top = new_top;
            }
            DragAction::ResizeTop => {
                let old_top = block.top;
                let new_top = old_top + delta;
                let diff = (new_top - old_top) * mpp;
                let new_start = block.real_start_time + diff;
                if new_start < -slack || block.real_end_time - new_start < ms {
                    return false;
                }
                block.start_time = rounded_start;
                block.real_start_time = new_start;
                block.top = new_top;
                block.height += old_top - new_top;
            }
            DragAction::ResizeBottom => {
                let new_height = block.height + delta;
                let diff = (new_height - block.height) * mpp;
                let new_end = block.real_end_time + diff;
                if new_end > HOUR_24 as f64 + slack || new_end - block.real_start_time < ms {
                    return false;
                }
                block.end_time = rounded_end.min(HOUR_24);
                block.real_end_time = new_end;
                block.height = new_height;
            }
        }
        true
    }

    /// Snap a dragged block to the grid and commit it.
    ///
    /// Move snaps both edges, the resize actions only the dragged one.
    /// Returns false, leaving the block as is, when the snapped block would
    /// be shorter than one timeframe.
    pub fn settle(&mut self, id: BlockId, action: DragAction, grid: &CellGrid) -> bool {
        let ms_time = grid.ms_time();
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) else {
            return false;
        };

        let start_row = grid.snap_row(block.real_start_time);
        let end_row = grid.snap_row(block.real_end_time);
        let snapped_start = start_row as i64 * ms_time;
        let snapped_end = (end_row as i64 * ms_time).min(HOUR_24);

        match action {
            DragAction::Move => {
                if snapped_end - snapped_start < ms_time {
                    return false;
                }
                block.top = grid.row_edge(start_row);
                block.height = grid.row_edge(end_row) - block.top;
                block.start_time = snapped_start;
                block.end_time = snapped_end;
            }
            DragAction::ResizeTop => {
                if block.end_time - snapped_start < ms_time {
                    return false;
                }
                let bottom = block.bottom();
                block.top = grid.row_edge(start_row);
                block.height = bottom - block.top;
                block.start_time = snapped_start;
            }
            DragAction::ResizeBottom => {
                if snapped_end - block.start_time < ms_time {
                    return false;
                }
                block.height = grid.row_edge(end_row) - block.top;
                block.end_time = snapped_end;
            }
        }
        block.real_start_time = block.start_time as f64;
        block.real_end_time = block.end_time as f64;

        log::debug!(
            "Settled {} after {:?}: {}..{}",
            block.id,
            action,
            block.start_time,
            block.end_time
        );
        self.commit();
        true
    }

    /// Put back a block captured before a cancelled drag. Not recorded.
    pub fn restore_block(&mut self, original: TimeBlock) {
        match self.blocks.iter_mut().find(|b| b.id == original.id) {
            Some(block) => *block = original,
            None => self.blocks.push(original),
        }
    }

    /// Replace a block's content and commit.
    pub fn replace_block(&mut self, updated: TimeBlock) -> Result<()> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id == updated.id)
            .ok_or(ScheduleError::UnknownBlock(updated.id))?;
        *block = updated;
        self.commit();
        Ok(())
    }

    /// Apply the first pending auto-merge, if any. Not recorded in history.
    pub fn merge_pass(&mut self) -> bool {
        let Some(merge) = find_block_merge(&self.blocks) else {
            return false;
        };
        let id = self.next_block_id();
        log::debug!("Auto-merge {:?} into {}", merge, id);
        self.blocks = apply_block_merge(&self.blocks, merge, id);
        true
    }

    pub fn delete_block(&mut self, id: BlockId) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        if self.blocks.len() == before {
            return false;
        }
        log::debug!("Deleted {}", id);
        self.commit();
        true
    }

    /// Restore the previous snapshot. No-op with fewer than two snapshots.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.blocks = snapshot;
                self.preview.clear();
                true
            }
            None => false,
        }
    }
}
