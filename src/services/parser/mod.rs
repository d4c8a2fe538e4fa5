//! Conversion between external schedule groups and per-day intervals.
//!
//! The input direction decodes masks and shifts times into the working
//! timezone; the output direction shifts back to UTC, tags intervals with
//! column weights, merges them and rebuilds masks.

mod input;
mod output;

pub use input::{correct_day_wrap, decode_input, parse_groups};
pub use output::{apply_output_offset, encode_output, group_fragments};
