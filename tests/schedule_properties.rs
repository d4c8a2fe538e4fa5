// Property-based tests for the schedule pipelines
// Decode/encode round trips, timezone symmetry, day-wrap conservation and
// merge idempotence over random inputs

use proptest::prelude::*;

use week_scheduler::models::column::default_columns;
use week_scheduler::models::time_block::{BlockId, DayInterval, Fragment, TimeBlock};
use week_scheduler::services::merge::merge_fragments;
use week_scheduler::services::parser::{correct_day_wrap, decode_input, encode_output};
use week_scheduler::{ScheduleGroup, HOUR_24};

const MINUTE: i64 = 60_000;

fn to_blocks(intervals: &[DayInterval]) -> Vec<TimeBlock> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, interval)| TimeBlock {
            id: BlockId(i as u64),
            start_time: interval.start_time,
            end_time: interval.end_time,
            real_start_time: interval.start_time as f64,
            real_end_time: interval.end_time as f64,
            column: interval.column,
            top: 0.0,
            left: 0.0,
            width: 0.0,
            height: 0.0,
            is_temp: false,
        })
        .collect()
}

/// One `(column, start, end)` per set mask bit, sorted.
fn expand(groups: &[ScheduleGroup], column_count: usize) -> Vec<(usize, i64, i64)> {
    let mut expanded: Vec<_> = groups
        .iter()
        .flat_map(|g| g.columns(column_count).into_iter().map(move |c| (c, g.start_time, g.end_time)))
        .collect();
    expanded.sort_unstable();
    expanded
}

/// Disjoint, non-touching minute-aligned intervals for every weekday.
fn weekly_groups() -> impl Strategy<Value = Vec<ScheduleGroup>> {
    prop::collection::vec(prop::collection::btree_set(0..=1440i64, 0..8), 7).prop_map(|days| {
        days.into_iter()
            .enumerate()
            .flat_map(|(column, marks)| {
                let marks: Vec<i64> = marks.into_iter().collect();
                marks
                    .chunks_exact(2)
                    .map(|pair| ScheduleGroup::new(pair[0] * MINUTE, pair[1] * MINUTE, 1 << column))
                    .collect::<Vec<_>>()
            })
            .collect()
    })
}

fn fragments() -> impl Strategy<Value = Vec<Fragment>> {
    prop::collection::vec(
        (0..7u32, 0..HOUR_24, 1..4 * 3_600_000i64)
            .prop_map(|(column, start, len)| Fragment::new(start, (start + len).min(HOUR_24), 1 << column)),
        0..24,
    )
}

proptest! {
    /// Property: with no offset, decoding then encoding gives back the
    /// same per-day coverage
    #[test]
    fn prop_round_trip_without_offset(groups in weekly_groups()) {
        let columns = default_columns();
        let blocks = to_blocks(&decode_input(&groups, columns.len(), 0));
        let encoded = encode_output(&blocks, 0, &columns);

        prop_assert_eq!(expand(&encoded, 7), expand(&groups, 7));
    }

    /// Property: decoding with an offset and encoding with the same offset
    /// is a no-op for ranges that stay inside the day
    #[test]
    fn prop_timezone_symmetry(
        start in 0..1200i64,
        len in 1..240i64,
        column in 0..7usize,
        offset_minutes in -720..720i64,
    ) {
        let start = start * MINUTE;
        let end = start + len * MINUTE;
        let offset = offset_minutes * MINUTE;
        prop_assume!(start - offset >= 0 && end - offset <= HOUR_24);

        let columns = default_columns();
        let groups = vec![ScheduleGroup::new(start, end, 1 << column)];
        let decoded = decode_input(&groups, columns.len(), offset);
        prop_assert_eq!(decoded.len(), 1);

        let encoded = encode_output(&to_blocks(&decoded), offset, &columns);
        prop_assert_eq!(encoded, groups);
    }

    /// Property: wrapping around midnight neither loses nor adds time,
    /// and every piece lands inside a day
    #[test]
    fn prop_day_wrap_conserves_duration(
        start in -HOUR_24..HOUR_24,
        len in 1..=HOUR_24,
        column in 0..7usize,
    ) {
        let end = start + len;
        prop_assume!(!(start < 0 && end > HOUR_24));

        let corrected = correct_day_wrap(&[DayInterval::new(column, start, end)], 7);
        let total: i64 = corrected.iter().map(|i| i.duration()).sum();

        prop_assert_eq!(total, len);
        for interval in &corrected {
            prop_assert!(interval.start_time >= 0 && interval.end_time <= HOUR_24);
            prop_assert!(interval.column < 7);
        }
    }

    /// Property: merging an already merged fragment list changes nothing
    #[test]
    fn prop_merge_is_idempotent(fragments in fragments()) {
        let columns = default_columns();
        let once = merge_fragments(&fragments, &columns);
        let twice = merge_fragments(&once, &columns);
        prop_assert_eq!(once, twice);
    }

    /// Property: merged fragments of one column never touch or overlap
    #[test]
    fn prop_merged_fragments_are_disjoint(fragments in fragments()) {
        let merged = merge_fragments(&fragments, &default_columns());
        for (i, a) in merged.iter().enumerate() {
            for b in merged.iter().skip(i + 1).filter(|b| b.weight == a.weight) {
                prop_assert!(a.end_time < b.start_time || b.end_time < a.start_time);
            }
        }
    }
}

#[test]
fn test_wrap_example_on_two_columns() {
    let corrected = correct_day_wrap(&[DayInterval::new(0, 80_000_000, 120_000_000)], 2);
    assert_eq!(
        corrected,
        vec![
            DayInterval::new(0, 80_000_000, HOUR_24),
            DayInterval::new(1, 0, 33_600_000),
        ]
    );
    let total: i64 = corrected.iter().map(|i| i.duration()).sum();
    assert_eq!(total, 40_000_000);
}
