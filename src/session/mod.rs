//! Editor session.
//!
//! One owned value that wires the cell grid, the parser pipelines and the
//! block service together. The host feeds it container sizes, schedules
//! and input events; settled changes come back through a
//! [`ScheduleListener`] as UTC schedule groups.

use crate::config::SchedulerConfig;
use crate::error::{Result, ScheduleError};
use crate::interaction::{CustomTimeEditor, DragAction, DragContext, DrawContext, TimeField};
use crate::models::cell::Point;
use crate::models::schedule::ScheduleGroup;
use crate::models::time_block::{BlockId, TimeBlock};
use crate::services::grid::{CellGrid, GridLayout};
use crate::services::parser::{decode_input, encode_output};
use crate::services::time_block::TimeBlockService;
use crate::utils::time::resolve_tz_offset;

/// Receives the schedule every time the committed blocks settle.
#[cfg_attr(test, mockall::automock)]
pub trait ScheduleListener {
    fn on_change(&mut self, groups: &[ScheduleGroup]);
}

impl<F> ScheduleListener for F
where
    F: FnMut(&[ScheduleGroup]),
{
    fn on_change(&mut self, groups: &[ScheduleGroup]) {
        self(groups)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Delete,
    Backspace,
    Z,
    Other,
}

/// Events from the host's input source, delivered while attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Point),
    /// `movement_y` is the raw vertical delta since the last move.
    PointerMove { position: Point, movement_y: f64 },
    PointerUp,
    PointerLeave,
    Key { code: KeyCode, ctrl: bool },
}

pub struct EditorSession {
    config: SchedulerConfig,
    tz_offset: i64,
    grid: CellGrid,
    blocks: TimeBlockService,
    draw: Option<DrawContext>,
    drag: Option<DragContext>,
    custom_time: CustomTimeEditor,
    hovered: Option<BlockId>,
    attached: bool,
    listener: Option<Box<dyn ScheduleListener>>,
}

impl EditorSession {
    /// Validate the configuration and build the grid for a container.
    pub fn new(config: SchedulerConfig, width: f64, height: f64) -> Result<Self> {
        config.validate()?;
        let grid = CellGrid::build(GridLayout::from_config(&config, width, height))?;
        let tz_offset = resolve_tz_offset(config.required_tz_offset_ms);
        log::info!(
            "Scheduler session: {} columns, {} min timeframe, tz offset {} ms",
            config.columns.len(),
            config.timeframe_minutes,
            tz_offset
        );

        Ok(Self {
            blocks: TimeBlockService::new(config.history_limit),
            config,
            tz_offset,
            grid,
            draw: None,
            drag: None,
            custom_time: CustomTimeEditor::new(),
            hovered: None,
            attached: false,
            listener: None,
        })
    }

    /// Builder form of [`EditorSession::set_schedule`].
    pub fn with_schedule(mut self, groups: &[ScheduleGroup]) -> Self {
        self.set_schedule(groups);
        self
    }

    pub fn set_listener<L>(&mut self, listener: L)
    where
        L: ScheduleListener + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    // --- accessors ---

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Working offset in ms behind UTC.
    pub fn tz_offset(&self) -> i64 {
        self.tz_offset
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn blocks(&self) -> &[TimeBlock] {
        self.blocks.blocks()
    }

    pub fn preview(&self) -> &[TimeBlock] {
        self.blocks.preview()
    }

    pub fn block(&self, id: BlockId) -> Option<&TimeBlock> {
        self.blocks.find(id)
    }

    pub fn custom_time(&self) -> &CustomTimeEditor {
        &self.custom_time
    }

    pub fn hovered(&self) -> Option<BlockId> {
        self.hovered
    }

    /// A drag-lock is engaged; change notifications are held back.
    pub fn is_locked(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_drawing(&self) -> bool {
        self.draw.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Fill colour for a block.
    pub fn block_color(&self, block: &TimeBlock) -> &str {
        let colors = &self.config.block_colors;
        if block.is_temp {
            colors.temp.as_str()
        } else if self.hovered == Some(block.id) {
            colors.hover.as_str()
        } else if self.draw.is_some() {
            colors.draw.as_str()
        } else {
            colors.common.as_str()
        }
    }

    /// Committed blocks encoded as UTC schedule groups.
    pub fn current_schedule(&self) -> Vec<ScheduleGroup> {
        encode_output(self.blocks.blocks(), self.tz_offset, &self.config.columns)
    }

    // --- external input ---

    /// Replace the blocks with an externally supplied schedule.
    pub fn set_schedule(&mut self, groups: &[ScheduleGroup]) {
        self.cancel();
        let intervals = decode_input(groups, self.config.columns.len(), self.tz_offset);
        self.blocks.load_intervals(&intervals, &self.grid);
        self.hovered = None;
        log::info!("Schedule replaced: {} groups, {} blocks", groups.len(), intervals.len());
    }

    /// Change the required offset; `None` falls back to the host's.
    ///
    /// Current blocks keep their UTC meaning and move on screen.
    pub fn set_timezone_offset(&mut self, required: Option<i64>) {
        self.config.required_tz_offset_ms = required;
        let offset = resolve_tz_offset(required);
        if offset == self.tz_offset {
            return;
        }

        self.cancel();
        let groups = self.current_schedule();
        self.tz_offset = offset;
        let intervals = decode_input(&groups, self.config.columns.len(), offset);
        self.blocks.load_intervals(&intervals, &self.grid);
        self.hovered = None;
        log::info!("Timezone offset resolved to {} ms", offset);
    }

    /// Rebuild the grid for a new container size and re-lay out blocks.
    /// On error the previous grid stays in place.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        let grid = CellGrid::build(GridLayout::from_config(&self.config, width, height))?;
        self.cancel();
        self.grid = grid;
        self.blocks.relayout(&self.grid);
        Ok(())
    }

    // --- draw to create ---

    pub fn start_drawing(&mut self, position: Point) -> bool {
        if self.drag.is_some() || self.custom_time.is_editing() {
            return false;
        }
        if !self.grid.select_range(position, position) {
            return false;
        }
        self.blocks.build_from_selection(&mut self.grid, true);
        self.draw = Some(DrawContext::new(position));
        true
    }

    /// Recompute the preview for the rectangle up to `position`.
    pub fn draw_to(&mut self, position: Point) -> bool {
        let Some(draw) = self.draw.as_mut() else {
            return false;
        };
        draw.update(position);
        let start = draw.start;
        if !self.grid.select_range(start, position) {
            return false;
        }
        self.blocks.build_from_selection(&mut self.grid, true) > 0
    }

    /// Commit the drawn blocks. Returns how many were added.
    pub fn finish_drawing(&mut self) -> usize {
        let Some(draw) = self.draw.take() else {
            return 0;
        };
        self.blocks.clear_preview();
        if !self.grid.select_range(draw.start, draw.current) {
            return 0;
        }
        let added = self.blocks.build_from_selection(&mut self.grid, false);
        if added > 0 {
            self.settle_merges();
            self.emit_change();
        }
        added
    }

    // --- drag ---

    /// Engage the drag-lock on a block. Blocks shorter than one timeframe
    /// are read-only.
    pub fn begin_drag(&mut self, id: BlockId, action: DragAction) -> bool {
        if self.drag.is_some() || self.draw.is_some() || self.custom_time.is_editing() {
            return false;
        }
        let Some(block) = self.blocks.find(id) else {
            return false;
        };
        if !block.is_adjustable(self.grid.ms_time()) {
            log::debug!("{} is below one timeframe; drag refused", id);
            return false;
        }
        self.drag = Some(DragContext::from_block(block, action));
        true
    }

    /// Feed one pointer movement to the locked block.
    pub fn drag_by(&mut self, movement_y: f64) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let accepted = self.blocks.drag_tick(
            drag.block_id,
            drag.action,
            movement_y,
            self.config.mouse_speed,
            &self.grid,
        );
        drag.record(accepted)
    }

    /// Release the lock: snap, merge, notify.
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if !drag.has_moved() {
            return false;
        }
        if !self.blocks.settle(drag.block_id, drag.action, &self.grid) {
            self.blocks.restore_block(drag.original);
            return false;
        }
        self.settle_merges();
        self.emit_change();
        true
    }

    /// Abandon any draw or drag in progress without committing.
    pub fn cancel(&mut self) -> bool {
        let mut cancelled = false;
        if let Some(drag) = self.drag.take() {
            log::debug!("Drag of {} cancelled", drag.block_id);
            self.blocks.restore_block(drag.original);
            cancelled = true;
        }
        if self.draw.take().is_some() {
            self.blocks.clear_preview();
            self.grid.clear_selection();
            cancelled = true;
        }
        cancelled
    }

    // --- hover and hotkeys ---

    /// Track the block under the pointer. Frozen while a custom edit is open.
    pub fn hover(&mut self, id: Option<BlockId>) {
        if self.custom_time.is_editing() {
            return;
        }
        self.hovered = id.filter(|id| self.blocks.find(*id).is_some());
    }

    /// Whether the hovered block may be moved or resized.
    pub fn is_allowing(&self) -> bool {
        self.hovered
            .and_then(|id| self.blocks.find(id))
            .is_some_and(|block| block.is_adjustable(self.grid.ms_time()))
    }

    pub fn delete_block(&mut self, id: BlockId) -> bool {
        if self.drag.is_some() || !self.blocks.delete_block(id) {
            return false;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        self.emit_change();
        true
    }

    pub fn undo(&mut self) -> bool {
        if self.drag.is_some() || !self.blocks.undo() {
            return false;
        }
        self.settle_merges();
        self.hovered = self.hovered.filter(|id| self.blocks.find(*id).is_some());
        self.emit_change();
        true
    }

    /// Start receiving events through [`EditorSession::handle_event`].
    pub fn attach(&mut self) {
        self.attached = true;
        log::info!("Scheduler input attached");
    }

    pub fn detach(&mut self) {
        self.cancel();
        self.attached = false;
        log::info!("Scheduler input detached");
    }

    /// Dispatch a host input event. Returns whether it changed anything.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if !self.attached {
            return false;
        }
        match event {
            InputEvent::PointerDown(position) => self.start_drawing(position),
            InputEvent::PointerMove { position, movement_y } => {
                if self.drag.is_some() {
                    self.drag_by(movement_y)
                } else {
                    self.draw_to(position)
                }
            }
            InputEvent::PointerUp => {
                if self.drag.is_some() {
                    self.end_drag()
                } else {
                    self.finish_drawing() > 0
                }
            }
            InputEvent::PointerLeave => self.cancel(),
            InputEvent::Key { code, ctrl } => {
                if self.custom_time.is_editing() {
                    return false;
                }
                match (code, ctrl) {
                    (KeyCode::Delete | KeyCode::Backspace, _) => match self.hovered {
                        Some(id) => self.delete_block(id),
                        None => false,
                    },
                    (KeyCode::Z, true) => self.undo(),
                    _ => false,
                }
            }
        }
    }

    // --- custom time ---

    pub fn begin_custom_time(&mut self, id: BlockId) -> Result<()> {
        self.cancel();
        let block = self.blocks.find(id).ok_or(ScheduleError::UnknownBlock(id))?;
        self.custom_time.begin(block);
        self.hovered = Some(id);
        Ok(())
    }

    pub fn set_custom_time(&mut self, time: Option<i64>, field: TimeField) -> Result<()> {
        self.custom_time.set_time(time, field)
    }

    pub fn set_custom_time_str(&mut self, input: &str, field: TimeField) -> Result<()> {
        self.custom_time.set_time_str(input, field)
    }

    pub fn reset_custom_time(&mut self) {
        self.custom_time.reset();
    }

    /// Apply the edited times. The editor stays open on error.
    pub fn commit_custom_time(&mut self) -> Result<()> {
        let updated = self.custom_time.build_update(self.grid.millis_per_pixel())?;
        self.blocks.replace_block(updated)?;
        self.custom_time.finish();
        self.settle_merges();
        self.emit_change();
        Ok(())
    }

    pub fn close_custom_time(&mut self) {
        self.custom_time.finish();
    }

    // --- internals ---

    fn settle_merges(&mut self) {
        let mut passes = 0;
        while self.blocks.merge_pass() {
            passes += 1;
        }
        if passes > 0 {
            log::debug!("Auto-merge settled after {} passes", passes);
            self.hovered = self.hovered.filter(|id| self.blocks.find(*id).is_some());
        }
    }

    fn emit_change(&mut self) {
        if self.drag.is_some() {
            return;
        }
        let groups = self.current_schedule();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_change(&groups);
        }
    }
}
