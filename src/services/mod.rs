// Service module exports
// Pure schedule algorithms and the block lifecycle service

pub mod grid;
pub mod merge;
pub mod parser;
pub mod schedule_io;
pub mod time_block;
