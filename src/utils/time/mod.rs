// Time utility functions
// Timezone resolution and time-of-day formatting

use chrono::{Local, NaiveTime, Timelike};

use crate::error::{Result, ScheduleError};
use crate::models::schedule::HOUR_24;

/// Offset of the host's local timezone, in milliseconds *behind* UTC.
///
/// Follows the `UTC - local` convention, so a UTC+3 host yields
/// `-10_800_000`.
pub fn local_offset_ms() -> i64 {
    let local_minus_utc = Local::now().offset().local_minus_utc() as i64;
    -local_minus_utc * 1000
}

/// Pick the working offset: the required one if given, else the host's.
pub fn resolve_tz_offset(required: Option<i64>) -> i64 {
    match required {
        Some(offset) => offset,
        None => local_offset_ms(),
    }
}

fn naive_time(ms: i64) -> NaiveTime {
    let ms = ms.rem_euclid(HOUR_24);
    let secs = (ms / 1000) as u32;
    let nanos = ((ms % 1000) * 1_000_000) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos).unwrap_or(NaiveTime::MIN)
}

/// `HH:MM` for a ms-of-day value; a full day wraps to `00:00`.
pub fn format_time_of_day(ms: i64) -> String {
    naive_time(ms).format("%H:%M").to_string()
}

/// `HH:MM:SS` for a ms-of-day value.
pub fn format_time_with_seconds(ms: i64) -> String {
    naive_time(ms).format("%H:%M:%S").to_string()
}

/// Label drawn inside a block. The end is shown as `24:00` rather than
/// `00:00` when it sits on the day boundary.
pub fn format_block_label(start_time: i64, end_time: i64) -> String {
    let end = if end_time == HOUR_24 {
        "24:00".to_string()
    } else {
        format_time_of_day(end_time)
    };
    format!("{} / {}", format_time_of_day(start_time), end)
}

/// Parse `HH:MM` or `HH:MM:SS` into ms-of-day. `24:00` maps to the day end.
pub fn parse_time_of_day(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed == "24:00" || trimmed == "24:00:00" {
        return Ok(HOUR_24);
    }

    let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ScheduleError::UnparseableTime(input.to_string()))?;

    Ok(time.num_seconds_from_midnight() as i64 * 1000 + (time.nanosecond() / 1_000_000) as i64)
}
