//! Manual time entry for a single block.
//!
//! The editor works on a copy of the block's times. Nothing reaches the
//! block list until [`CustomTimeEditor::build_update`] succeeds and the
//! caller commits the returned block.

use crate::error::{Result, ScheduleError};
use crate::models::cell::Point;
use crate::models::schedule::{HOUR_24, MINUTE};
use crate::models::time_block::{BlockId, TimeBlock};
use crate::utils::time::{format_time_with_seconds, parse_time_of_day};

/// Which side of the range an entry edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

/// `HH:MM:SS` strings shown in the editor's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTime {
    pub start: String,
    pub end: String,
}

impl DisplayTime {
    fn from_times(start_time: i64, end_time: i64) -> Self {
        Self {
            start: format_time_with_seconds(start_time),
            end: format_time_with_seconds(end_time),
        }
    }
}

impl Default for DisplayTime {
    fn default() -> Self {
        Self::from_times(0, 0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomTimeEditor {
    original: Option<TimeBlock>,
    start_time: i64,
    end_time: i64,
    display: DisplayTime,
    error: Option<String>,
    position: Option<Point>,
}

impl CustomTimeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the editor on a block.
    pub fn begin(&mut self, block: &TimeBlock) {
        let top = if block.height > 20.0 {
            block.bottom() + 5.0
        } else {
            block.top + 25.0
        };
        self.position = Some(Point::new(block.left, top));
        self.start_time = block.start_time;
        self.end_time = block.end_time;
        self.display = DisplayTime::from_times(block.start_time, block.end_time);
        self.error = None;
        self.original = Some(block.clone());
    }

    pub fn is_editing(&self) -> bool {
        self.original.is_some()
    }

    pub fn block_id(&self) -> Option<BlockId> {
        self.original.as_ref().map(|b| b.id)
    }

    /// Pending `(start, end)` in ms-of-day.
    pub fn times(&self) -> (i64, i64) {
        (self.start_time, self.end_time)
    }

    pub fn display_time(&self) -> &DisplayTime {
        &self.display
    }

    /// Inline error message of the last rejected entry.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Where the editor pops up, below the block or just under its top.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Set one side of the range. An end of `0` means the end of the day.
    /// `None` and values outside `0..=HOUR_24` are rejected and the
    /// previous value kept.
    pub fn set_time(&mut self, time: Option<i64>, field: TimeField) -> Result<()> {
        if !self.is_editing() {
            return Err(ScheduleError::NotEditing);
        }
        let Some(time) = time else {
            let err = ScheduleError::TimeIsNull;
            self.error = Some(err.to_string());
            return Err(err);
        };
        if !(0..=HOUR_24).contains(&time) {
            let err = ScheduleError::TimeOutOfRange(time);
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.error = None;

        match field {
            TimeField::Start => {
                self.start_time = time;
                self.display.start = format_time_with_seconds(time);
            }
            TimeField::End => {
                self.end_time = if time == 0 { HOUR_24 } else { time };
                self.display.end = format_time_with_seconds(time);
            }
        }
        Ok(())
    }

    /// Set one side from `HH:MM` or `HH:MM:SS`. An empty entry counts as
    /// a missing time.
    pub fn set_time_str(&mut self, input: &str, field: TimeField) -> Result<()> {
        if input.trim().is_empty() {
            return self.set_time(None, field);
        }
        match parse_time_of_day(input) {
            Ok(time) => self.set_time(Some(time), field),
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Back to the block's own times.
    pub fn reset(&mut self) {
        let Some(block) = &self.original else {
            return;
        };
        self.start_time = block.start_time;
        self.end_time = block.end_time;
        self.display = DisplayTime::from_times(block.start_time, block.end_time);
        self.error = None;
    }

    /// The edited block, re-positioned by the time deltas.
    ///
    /// Ranges leaving the day or under a minute are rejected with an inline error and the
    /// editor stays open.
    pub fn build_update(&mut self, millis_per_pixel: f64) -> Result<TimeBlock> {
        let Some(original) = &self.original else {
            return Err(ScheduleError::NotEditing);
        };
        if self.start_time < 0 || self.end_time > HOUR_24 {
            let time = if self.start_time < 0 { self.start_time } else { self.end_time };
            let err = ScheduleError::TimeOutOfRange(time);
            self.error = Some(err.to_string());
            return Err(err);
        }
        if self.end_time - self.start_time < MINUTE {
            let err = ScheduleError::RangeTooShort;
            self.error = Some(err.to_string());
            return Err(err);
        }

        let top_shift = (self.start_time - original.start_time) as f64 / millis_per_pixel;
        let bottom_shift = (self.end_time - original.end_time) as f64 / millis_per_pixel;

        Ok(TimeBlock {
            start_time: self.start_time,
            end_time: self.end_time,
            real_start_time: self.start_time as f64,
            real_end_time: self.end_time as f64,
            top: original.top + top_shift,
            height: original.height + bottom_shift - top_shift,
            ..original.clone()
        })
    }

    /// Close the editor.
    pub fn finish(&mut self) {
        *self = Self::default();
    }
}
