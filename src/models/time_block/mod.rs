// Time block module
// Per-column intervals in the editor's working timezone

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::time::format_block_label;

/// Unique identifier for a visual block. A monotonic counter owned by the
/// block service; a fresh id is issued whenever a block is recreated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// A block drawn on one day column.
///
/// `start_time`/`end_time` are the displayed, timeframe-rounded values;
/// `real_start_time`/`real_end_time` follow the pointer during a drag and
/// may briefly leave `[0, HOUR_24]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: BlockId,
    pub start_time: i64,
    pub end_time: i64,
    pub real_start_time: f64,
    pub real_end_time: f64,
    pub column: usize,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub is_temp: bool,
}

impl TimeBlock {
    /// Displayed duration in milliseconds.
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Lower pixel edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Blocks shorter than one timeframe cannot be moved or resized.
    pub fn is_adjustable(&self, ms_time: i64) -> bool {
        self.duration() >= ms_time
    }

    /// `"HH:MM / HH:MM"`, with a day-end shown as `24:00`.
    pub fn label(&self) -> String {
        format_block_label(self.start_time, self.end_time)
    }

    pub fn interval(&self) -> DayInterval {
        DayInterval::new(self.column, self.start_time, self.end_time)
    }
}

/// A decoded interval on a column index, before layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayInterval {
    pub column: usize,
    pub start_time: i64,
    pub end_time: i64,
}

impl DayInterval {
    pub fn new(column: usize, start_time: i64, end_time: i64) -> Self {
        Self {
            column,
            start_time,
            end_time,
        }
    }

    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }
}

/// An output interval tagged with its column's mask weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fragment {
    pub start_time: i64,
    pub end_time: i64,
    pub weight: u64,
}

impl Fragment {
    pub fn new(start_time: i64, end_time: i64, weight: u64) -> Self {
        Self {
            start_time,
            end_time,
            weight,
        }
    }

    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }
}
