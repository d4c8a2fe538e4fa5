// Cell module
// Virtual grid cells used for hit-testing and draw selection

use serde::{Deserialize, Serialize};

/// A pixel position relative to the scheduler container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Absolute edges of a cell. Bounds are inclusive on every side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub right: f64,
    pub bottom: f64,
}

impl CellRect {
    pub fn contains(&self, point: Point) -> bool {
        self.x <= point.x && point.x <= self.right && self.y <= point.y && point.y <= self.bottom
    }
}

/// One timeframe slot of one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Time-slot index within the day
    pub row: usize,
    /// Day column index
    pub column: usize,
    pub position: CellRect,
    pub is_selected: bool,
}
