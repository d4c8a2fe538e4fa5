//! Error types for schedule editing.

use thiserror::Error;

use crate::models::time_block::BlockId;

/// Errors raised by the schedule core.
///
/// All of them are local and recoverable: the session keeps its last
/// known-good state whenever one is returned.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Timeframe must be a positive divisor of 1440 minutes.
    #[error("timeframe of {0} minutes does not divide a day")]
    InvalidTimeframe(u32),

    /// At least one day column is required.
    #[error("scheduler needs at least one column")]
    NoColumns,

    /// Masks are 64 bits wide.
    #[error("scheduler supports at most 64 columns, got {0}")]
    TooManyColumns(usize),

    /// Column weights must run 1, 2, 4, ... in column order.
    #[error("column {index} has weight {weight}, expected {expected}")]
    InvalidColumnWeight {
        index: usize,
        weight: u64,
        expected: u64,
    },

    /// Container too small to hold the drawable area.
    #[error("container {width}x{height} leaves no drawable area")]
    InvalidLayout { width: f64, height: f64 },

    /// A schedule group with an empty or inverted range.
    #[error("schedule group {start_time}..{end_time} is empty or out of range")]
    InvalidGroup { start_time: i64, end_time: i64 },

    /// A mask with bits beyond the configured columns.
    #[error("mask {mask} does not fit in {columns} columns")]
    MaskOutOfRange { mask: u64, columns: usize },

    #[error("Time is null")]
    TimeIsNull,

    #[error("Time out of day range")]
    TimeOutOfRange(i64),

    #[error("Range < 1 min")]
    RangeTooShort,

    #[error("cannot parse time of day: {0:?}")]
    UnparseableTime(String),

    #[error("block not found: {0}")]
    UnknownBlock(BlockId),

    /// Custom time operation without an opened block.
    #[error("no block is being edited")]
    NotEditing,

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid schedule json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
