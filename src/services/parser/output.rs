use crate::models::column::SchedulerColumn;
use crate::models::schedule::{ScheduleGroup, HOUR_24};
use crate::models::time_block::{Fragment, TimeBlock};
use crate::services::merge::merge_fragments;

/// Shift blocks back to UTC (`time + tz_offset`) and tag each piece with
/// its column's mask weight, splitting pieces that cross midnight.
pub fn apply_output_offset(
    blocks: &[TimeBlock],
    tz_offset: i64,
    columns: &[SchedulerColumn],
) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let column_count = columns.len();

    for block in blocks {
        let Some(column) = columns.get(block.column) else {
            log::warn!("Block {} sits on unknown column {}; skipped", block.id, block.column);
            continue;
        };
        let weight = column.weight;
        let start = block.start_time + tz_offset;
        let end = block.end_time + tz_offset;

        if start < 0 {
            let prev_column = if block.column == 0 { column_count - 1 } else { block.column - 1 };
            let prev_weight = columns[prev_column].weight;
            let new_start = HOUR_24 + start;
            let new_end = HOUR_24 + end;

            if new_end < HOUR_24 {
                fragments.push(Fragment::new(new_start, new_end, prev_weight));
                continue;
            }

            fragments.push(Fragment::new(new_start, HOUR_24, prev_weight));
            if end != 0 {
                fragments.push(Fragment::new(0, end, weight));
            }
            continue;
        }

        if end > HOUR_24 {
            let next_column = if block.column + 1 >= column_count { 0 } else { block.column + 1 };
            let next_weight = columns[next_column].weight;
            let new_start = start - HOUR_24;
            let new_end = end - HOUR_24;

            if new_start > 0 {
                fragments.push(Fragment::new(new_start, new_end, next_weight));
                continue;
            }

            if start != HOUR_24 {
                fragments.push(Fragment::new(start, HOUR_24, weight));
            }
            fragments.push(Fragment::new(0, new_end, next_weight));
            continue;
        }

        fragments.push(Fragment::new(start, end, weight));
    }

    fragments
}

/// Collapse merged fragments into schedule groups: one group per distinct
/// `(start, end)` pair, in first-seen order, with the weights of every
/// fragment sharing that pair combined into the mask.
///
/// Weights are OR-ed; after [`merge_fragments`] a column contributes at
/// most once per pair, so this equals their sum.
pub fn group_fragments(fragments: &[Fragment]) -> Vec<ScheduleGroup> {
    let mut groups: Vec<ScheduleGroup> = Vec::new();
    for fragment in fragments {
        match groups
            .iter_mut()
            .find(|g| g.start_time == fragment.start_time && g.end_time == fragment.end_time)
        {
            Some(group) => group.mask |= fragment.weight,
            None => groups.push(ScheduleGroup::new(
                fragment.start_time,
                fragment.end_time,
                fragment.weight,
            )),
        }
    }
    groups
}

/// Full output pipeline: offset to UTC, merge per column, rebuild masks.
pub fn encode_output(
    blocks: &[TimeBlock],
    tz_offset: i64,
    columns: &[SchedulerColumn],
) -> Vec<ScheduleGroup> {
    let fragments = apply_output_offset(blocks, tz_offset, columns);
    let merged = merge_fragments(&fragments, columns);
    let groups = group_fragments(&merged);
    log::debug!(
        "Encoded {} blocks into {} fragments, {} groups",
        blocks.len(),
        merged.len(),
        groups.len()
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::column::default_columns;
    use crate::models::time_block::BlockId;
    use pretty_assertions::assert_eq;

    fn block(column: usize, start_time: i64, end_time: i64) -> TimeBlock {
        TimeBlock {
            id: BlockId(column as u64),
            start_time,
            end_time,
            real_start_time: start_time as f64,
            real_end_time: end_time as f64,
            column,
            top: 0.0,
            left: 0.0,
            width: 0.0,
            height: 0.0,
            is_temp: false,
        }
    }

    fn pair() -> Vec<TimeBlock> {
        vec![block(5, 0, 15_000), block(1, 0, 15_000)]
    }

    #[test]
    fn test_zero_offset_tags_weights() {
        assert_eq!(
            apply_output_offset(&pair(), 0, &default_columns()),
            vec![Fragment::new(0, 15_000, 32), Fragment::new(0, 15_000, 2)]
        );
    }

    #[test]
    fn test_previous_day_full_block() {
        assert_eq!(
            apply_output_offset(&pair(), -30_000, &default_columns()),
            vec![
                Fragment::new(86_370_000, 86_385_000, 16),
                Fragment::new(86_370_000, 86_385_000, 1),
            ]
        );
    }

    #[test]
    fn test_previous_day_split() {
        assert_eq!(
            apply_output_offset(&pair(), -5_000, &default_columns()),
            vec![
                Fragment::new(86_395_000, HOUR_24, 16),
                Fragment::new(0, 10_000, 32),
                Fragment::new(86_395_000, HOUR_24, 1),
                Fragment::new(0, 10_000, 2),
            ]
        );
    }

    #[test]
    fn test_next_day_full_block() {
        assert_eq!(
            apply_output_offset(&pair(), HOUR_24 + 1_000, &default_columns()),
            vec![Fragment::new(1_000, 16_000, 64), Fragment::new(1_000, 16_000, 4)]
        );
    }

    #[test]
    fn test_next_day_split() {
        assert_eq!(
            apply_output_offset(&pair(), HOUR_24 - 1_000, &default_columns()),
            vec![
                Fragment::new(86_399_000, HOUR_24, 32),
                Fragment::new(0, 14_000, 64),
                Fragment::new(86_399_000, HOUR_24, 2),
                Fragment::new(0, 14_000, 4),
            ]
        );
    }

    #[test]
    fn test_sunday_wraps_to_monday() {
        let blocks = vec![block(6, 82_800_000, HOUR_24)];
        assert_eq!(
            apply_output_offset(&blocks, 3_600_000, &default_columns()),
            vec![Fragment::new(0, 3_600_000, 1)]
        );
    }

    #[test]
    fn test_unknown_column_is_skipped() {
        let blocks = vec![block(9, 0, 1_000)];
        assert!(apply_output_offset(&blocks, 0, &default_columns()).is_empty());
    }

    #[test]
    fn test_group_builds_masks_in_first_seen_order() {
        let fragments = vec![
            Fragment::new(0, 15_000, 1),
            Fragment::new(90_000, 190_000, 2),
            Fragment::new(0, 15_000, 8),
            Fragment::new(0, 15_000, 16),
        ];
        assert_eq!(
            group_fragments(&fragments),
            vec![
                ScheduleGroup::new(0, 15_000, 25),
                ScheduleGroup::new(90_000, 190_000, 2),
            ]
        );
    }

    #[test]
    fn test_encode_reproduces_mask_three() {
        let blocks = vec![block(0, 0, 15_000), block(1, 0, 15_000)];
        assert_eq!(
            encode_output(&blocks, 0, &default_columns()),
            vec![ScheduleGroup::new(0, 15_000, 3)]
        );
    }

    #[test]
    fn test_encode_joins_blocks_split_at_midnight() {
        // 22:00-24:00 Monday and 00:00-02:00 Tuesday shifted by -1h
        let blocks = vec![block(0, 22 * 3_600_000, HOUR_24), block(1, 0, 2 * 3_600_000)];
        assert_eq!(
            encode_output(&blocks, -3_600_000, &default_columns()),
            vec![
                ScheduleGroup::new(21 * 3_600_000, HOUR_24, 1),
                ScheduleGroup::new(0, 3_600_000, 2),
            ]
        );
    }
}
