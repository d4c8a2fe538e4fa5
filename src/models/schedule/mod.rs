// Schedule module
// External wire format: one time range applied to a set of day columns

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Milliseconds in one day.
pub const HOUR_24: i64 = 86_400_000;

/// Milliseconds in one minute.
pub const MINUTE: i64 = 60_000;

/// A time range repeated on every column whose bit is set in `mask`.
///
/// Times are milliseconds from midnight. Serialized as
/// `{"startTime": .., "endTime": .., "mask": ..}`.
///
/// # Examples
/// ```
/// use week_scheduler::models::schedule::ScheduleGroup;
///
/// let group = ScheduleGroup::new(0, 15_000, 0b11);
/// assert_eq!(group.columns(7), vec![0, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGroup {
    pub start_time: i64,
    pub end_time: i64,
    pub mask: u64,
}

impl ScheduleGroup {
    pub fn new(start_time: i64, end_time: i64, mask: u64) -> Self {
        Self {
            start_time,
            end_time,
            mask,
        }
    }

    /// Length of the range in milliseconds.
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Whether the group applies to the given column index.
    pub fn applies_to(&self, column: usize) -> bool {
        column < u64::BITS as usize && self.mask & (1 << column) != 0
    }

    /// Column indexes selected by the mask, lowest first.
    ///
    /// Bits at or beyond `column_count` are not reported.
    pub fn columns(&self, column_count: usize) -> Vec<usize> {
        (0..column_count).filter(|&c| self.applies_to(c)).collect()
    }

    /// Check range and mask against a column count.
    pub fn validate(&self, column_count: usize) -> Result<()> {
        if self.start_time < 0 || self.end_time > HOUR_24 || self.end_time <= self.start_time {
            return Err(ScheduleError::InvalidGroup {
                start_time: self.start_time,
                end_time: self.end_time,
            });
        }

        if column_count < u64::BITS as usize && self.mask >> column_count != 0 {
            return Err(ScheduleError::MaskOutOfRange {
                mask: self.mask,
                columns: column_count,
            });
        }

        Ok(())
    }
}
