// Module exports for models
// Plain data shared by the parser, grid and block services

pub mod cell;
pub mod column;
pub mod schedule;
pub mod time_block;
