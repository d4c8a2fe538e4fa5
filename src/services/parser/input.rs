use crate::models::schedule::{ScheduleGroup, HOUR_24};
use crate::models::time_block::DayInterval;

/// Expand each group into one interval per selected column, shifted into
/// the working timezone.
///
/// Offsets count ms *behind* UTC, so the shift is `time - tz_offset`.
/// Results may fall outside `[0, HOUR_24]`; see [`correct_day_wrap`].
pub fn parse_groups(
    groups: &[ScheduleGroup],
    column_count: usize,
    tz_offset: i64,
) -> Vec<DayInterval> {
    let mut intervals = Vec::new();
    for group in groups {
        let columns = group.columns(column_count);
        if columns.len() as u32 != group.mask.count_ones() {
            log::warn!(
                "Mask {} has bits beyond {} columns; extra days ignored",
                group.mask,
                column_count
            );
        }

        let start = group.start_time - tz_offset;
        let end = group.end_time - tz_offset;
        intervals.extend(columns.into_iter().map(|column| DayInterval::new(column, start, end)));
    }
    intervals
}

/// Move intervals that spill past midnight onto the neighbouring column,
/// splitting the ones that straddle it.
///
/// Output order: intervals already inside the day, then those pushed to the
/// next day, then those pulled to the previous day. Each input yields at
/// most two fragments and zero-length remainders are dropped.
pub fn correct_day_wrap(intervals: &[DayInterval], column_count: usize) -> Vec<DayInterval> {
    if column_count == 0 {
        return Vec::new();
    }

    let mut current_day = Vec::new();
    let mut next_day = Vec::new();
    let mut prev_day = Vec::new();

    for interval in intervals {
        let DayInterval {
            column,
            start_time,
            end_time,
        } = *interval;

        if start_time >= 0 && end_time <= HOUR_24 {
            current_day.push(*interval);
        } else if start_time >= 0 {
            let next_column = if column + 1 >= column_count { 0 } else { column + 1 };
            let new_start = start_time - HOUR_24;
            let new_end = end_time - HOUR_24;

            if new_start > 0 {
                next_day.push(DayInterval::new(next_column, new_start, new_end));
                continue;
            }

            if start_time < HOUR_24 {
                next_day.push(DayInterval::new(column, start_time, HOUR_24));
            }
            next_day.push(DayInterval::new(next_column, 0, new_end));
        } else if end_time <= HOUR_24 {
            let prev_column = if column == 0 { column_count - 1 } else { column - 1 };
            let new_start = HOUR_24 + start_time;
            let new_end = HOUR_24 + end_time;

            if new_end < HOUR_24 {
                prev_day.push(DayInterval::new(prev_column, new_start, new_end));
                continue;
            }

            prev_day.push(DayInterval::new(prev_column, new_start, HOUR_24));
            if end_time != 0 {
                prev_day.push(DayInterval::new(column, 0, end_time));
            }
        } else {
            log::warn!(
                "Interval {}..{} on column {} is longer than a day; clamped",
                start_time,
                end_time,
                column
            );
            current_day.push(DayInterval::new(column, 0, HOUR_24));
        }
    }

    current_day.extend(next_day);
    current_day.extend(prev_day);
    current_day
}

/// Decode external groups into per-column intervals in the working timezone.
///
/// Groups with an empty or out-of-day range are skipped.
pub fn decode_input(
    groups: &[ScheduleGroup],
    column_count: usize,
    tz_offset: i64,
) -> Vec<DayInterval> {
    let valid: Vec<ScheduleGroup> = groups
        .iter()
        .filter(|group| {
            let ok = group.start_time >= 0
                && group.end_time <= HOUR_24
                && group.end_time > group.start_time;
            if !ok {
                log::warn!(
                    "Skipping schedule group {}..{} (mask {})",
                    group.start_time,
                    group.end_time,
                    group.mask
                );
            }
            ok
        })
        .copied()
        .collect();

    let intervals = correct_day_wrap(&parse_groups(&valid, column_count, tz_offset), column_count);
    log::debug!(
        "Decoded {} schedule groups into {} intervals (offset {} ms)",
        groups.len(),
        intervals.len(),
        tz_offset
    );
    intervals
}
