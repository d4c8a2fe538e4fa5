//! Interval merging per day column.
//!
//! Two flavours: [`merge_fragments`] works on UTC output fragments by time,
//! while [`find_block_merge`] / [`apply_block_merge`] work on visual blocks
//! by pixel extent and drive the editor's auto-merge.

use crate::models::column::SchedulerColumn;
use crate::models::time_block::{BlockId, Fragment, TimeBlock};

/// Pixel slack when deciding whether two blocks touch.
pub const TOUCH_TOLERANCE: f64 = 1.0;

/// Coalesce fragments of the same column that touch or overlap.
///
/// Columns are visited in configuration order and fragments sorted by start
/// time; a run of touching fragments collapses into one. The result is
/// normalized, so merging it again changes nothing.
pub fn merge_fragments(fragments: &[Fragment], columns: &[SchedulerColumn]) -> Vec<Fragment> {
    let mut merged = Vec::with_capacity(fragments.len());

    for column in columns {
        let mut column_fragments: Vec<Fragment> = fragments
            .iter()
            .filter(|f| f.weight == column.weight)
            .copied()
            .collect();
        column_fragments.sort_by_key(|f| f.start_time);

        let mut iter = column_fragments.into_iter();
        let Some(mut current) = iter.next() else {
            continue;
        };

        for next in iter {
            if next.start_time <= current.end_time {
                current.end_time = current.end_time.max(next.end_time);
            } else {
                merged.push(current);
                current = next;
            }
        }
        merged.push(current);
    }

    merged
}

/// A pending auto-merge between two blocks of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMerge {
    /// Adjacent or overlapping: replace both with one spanning block
    Join { upper: BlockId, lower: BlockId },
    /// `inner` lies within `outer`: keep only `outer`
    Absorb { outer: BlockId, inner: BlockId },
}

/// Find the first merge among blocks of a column.
///
/// Columns are scanned in order of first appearance, blocks by their top
/// edge; only adjacent pairs after sorting are compared.
pub fn find_block_merge(blocks: &[TimeBlock]) -> Option<BlockMerge> {
    let mut columns: Vec<usize> = Vec::new();
    for block in blocks {
        if !columns.contains(&block.column) {
            columns.push(block.column);
        }
    }

    for column in columns {
        let mut in_column: Vec<&TimeBlock> = blocks.iter().filter(|b| b.column == column).collect();
        if in_column.len() < 2 {
            continue;
        }
        in_column.sort_by(|a, b| a.top.total_cmp(&b.top));

        for pair in in_column.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            let current_end = current.bottom();
            let next_end = next.bottom();

            if current_end <= next_end + TOUCH_TOLERANCE && current_end >= next.top - TOUCH_TOLERANCE {
                return Some(BlockMerge::Join {
                    upper: current.id,
                    lower: next.id,
                });
            }
            if next.top <= current_end && next.top >= current.top {
                return Some(BlockMerge::Absorb {
                    outer: current.id,
                    inner: next.id,
                });
            }
        }
    }

    None
}

/// Apply a merge, giving the surviving block `new_id`. The survivor is
/// appended after the untouched blocks.
pub fn apply_block_merge(blocks: &[TimeBlock], merge: BlockMerge, new_id: BlockId) -> Vec<TimeBlock> {
    let (first, second) = match merge {
        BlockMerge::Join { upper, lower } => (upper, lower),
        BlockMerge::Absorb { outer, inner } => (outer, inner),
    };
    let (Some(upper), Some(lower)) = (
        blocks.iter().find(|b| b.id == first),
        blocks.iter().find(|b| b.id == second),
    ) else {
        return blocks.to_vec();
    };

    let survivor = match merge {
        BlockMerge::Join { .. } => TimeBlock {
            id: new_id,
            start_time: upper.start_time,
            end_time: lower.end_time,
            real_start_time: upper.start_time as f64,
            real_end_time: lower.end_time as f64,
            column: upper.column,
            top: upper.top,
            left: upper.left,
            width: upper.width,
            height: lower.top - upper.top + lower.height,
            is_temp: false,
        },
        BlockMerge::Absorb { .. } => TimeBlock {
            id: new_id,
            ..upper.clone()
        },
    };

    let mut result: Vec<TimeBlock> = blocks
        .iter()
        .filter(|b| b.id != first && b.id != second)
        .cloned()
        .collect();
    result.push(survivor);
    result
}
