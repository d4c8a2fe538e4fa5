//! Virtual cell grid for the week area.
//!
//! Derives a dense `columns × rows` grid from the container size and the
//! timeframe, hit-tests pointer positions against it and converts between
//! rows, pixels and milliseconds.

use crate::config::SchedulerConfig;
use crate::error::{Result, ScheduleError};
use crate::models::cell::{Cell, CellRect, Point};
use crate::models::schedule::{HOUR_24, MINUTE};

/// Horizontal inset of a block inside its column.
pub const BLOCK_INSET: f64 = 5.0;
/// Share of the column width a block occupies.
pub const BLOCK_WIDTH_RATIO: f64 = 0.75;

/// Inputs that determine the grid. Any change means a full rebuild.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub width: f64,
    pub height: f64,
    pub column_count: usize,
    pub timeframe_minutes: u32,
    pub helper_width: f64,
    pub header_height: f64,
    pub bottom_height: f64,
}

impl GridLayout {
    pub fn from_config(config: &SchedulerConfig, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            column_count: config.columns.len(),
            timeframe_minutes: config.timeframe_minutes,
            helper_width: config.helper_width,
            header_height: config.header_height,
            bottom_height: config.bottom_height,
        }
    }
}

/// Pixel rectangle of a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGeometry {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    layout: GridLayout,
    cells: Vec<Cell>,
    row_count: usize,
    width_step: f64,
    height_step: f64,
    millis_per_pixel: f64,
    ms_time: i64,
}

impl CellGrid {
    /// Build the grid, column-major then row-minor.
    pub fn build(layout: GridLayout) -> Result<Self> {
        let tf = layout.timeframe_minutes;
        if tf == 0 || tf > 1440 || 1440 % tf != 0 {
            return Err(ScheduleError::InvalidTimeframe(tf));
        }
        if layout.column_count == 0 {
            return Err(ScheduleError::NoColumns);
        }

        let area_width = layout.width - layout.helper_width;
        let area_height = layout.height - layout.header_height - layout.bottom_height;
        if !(area_width > 0.0 && area_height > 0.0) {
            return Err(ScheduleError::InvalidLayout {
                width: layout.width,
                height: layout.height,
            });
        }

        let row_count = (1440 / tf) as usize;
        let width_step = area_width / layout.column_count as f64;
        let height_step = area_height / row_count as f64;
        let millis_per_pixel = HOUR_24 as f64 / area_height;

        let mut cells = Vec::with_capacity(layout.column_count * row_count);
        for column in 0..layout.column_count {
            let x = layout.helper_width + width_step * column as f64;
            for row in 0..row_count {
                let y = layout.header_height + height_step * row as f64;
                cells.push(Cell {
                    row,
                    column,
                    position: CellRect {
                        x,
                        y,
                        right: layout.helper_width + width_step * (column + 1) as f64,
                        bottom: layout.header_height + height_step * (row + 1) as f64,
                    },
                    is_selected: false,
                });
            }
        }

        log::debug!(
            "Built {}x{} cell grid: width_step={:.2}, height_step={:.2}, ms/px={:.2}",
            layout.column_count,
            row_count,
            width_step,
            height_step,
            millis_per_pixel
        );

        Ok(Self {
            layout,
            cells,
            row_count,
            width_step,
            height_step,
            millis_per_pixel,
            ms_time: tf as i64 * MINUTE,
        })
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn width_step(&self) -> f64 {
        self.width_step
    }

    pub fn height_step(&self) -> f64 {
        self.height_step
    }

    pub fn millis_per_pixel(&self) -> f64 {
        self.millis_per_pixel
    }

    /// Milliseconds per row.
    pub fn ms_time(&self) -> i64 {
        self.ms_time
    }

    /// Index of the last row's cell in the first column.
    pub fn max_cell_index(&self) -> usize {
        self.row_count - 1
    }

    /// Clamp a point into the drawable area and return the first cell
    /// containing it. Shared edges resolve to the lower index.
    pub fn find_cell(&self, point: Point) -> Option<usize> {
        let layout = &self.layout;
        let mut p = point;
        if p.x >= layout.width - BLOCK_INSET {
            p.x = layout.width - BLOCK_INSET;
        }
        if p.x <= layout.helper_width {
            p.x = layout.helper_width;
        }
        if p.y <= layout.header_height {
            p.y = layout.header_height;
        }
        if p.y >= layout.height - layout.bottom_height {
            p.y = layout.height - layout.bottom_height - 1.0;
        }

        self.cells.iter().position(|cell| cell.position.contains(p))
    }

    /// Mark every cell inside the rectangle spanned by the cells under
    /// `start` and `end` (corners inclusive). Returns false when either
    /// corner misses the grid.
    pub fn select_range(&mut self, start: Point, end: Point) -> bool {
        let (Some(first), Some(last)) = (self.find_cell(start), self.find_cell(end)) else {
            return false;
        };
        let (a, b) = (self.cells[first], self.cells[last]);
        let (min_row, max_row) = (a.row.min(b.row), a.row.max(b.row));
        let (min_col, max_col) = (a.column.min(b.column), a.column.max(b.column));

        for cell in &mut self.cells {
            cell.is_selected = (min_row..=max_row).contains(&cell.row)
                && (min_col..=max_col).contains(&cell.column);
        }
        true
    }

    pub fn clear_selection(&mut self) {
        for cell in &mut self.cells {
            cell.is_selected = false;
        }
    }

    /// Selected cells in grid order.
    pub fn selected_cells(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|cell| cell.is_selected).collect()
    }

    /// Top pixel of `row`; rows past the end map to the bottom of the area.
    pub fn row_edge(&self, row: usize) -> f64 {
        match self.cells.iter().find(|cell| cell.row == row) {
            Some(cell) => cell.position.y,
            None => self.cells[self.max_cell_index()].position.bottom,
        }
    }

    /// Nearest row boundary for a time value, never negative.
    pub fn snap_row(&self, time: f64) -> usize {
        (time / self.ms_time as f64).round().abs() as usize
    }

    pub fn column_left(&self, column: usize) -> f64 {
        self.layout.helper_width + self.width_step * column as f64
    }

    pub fn block_width(&self) -> f64 {
        self.width_step * BLOCK_WIDTH_RATIO
    }

    /// Pixel rectangle for a time range on a column.
    pub fn block_geometry(&self, column: usize, start_time: i64, end_time: i64) -> BlockGeometry {
        BlockGeometry {
            top: start_time as f64 / self.millis_per_pixel + self.layout.header_height,
            left: self.column_left(column) + BLOCK_INSET,
            width: self.block_width(),
            height: (end_time - start_time) as f64 / self.millis_per_pixel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn layout() -> GridLayout {
        GridLayout {
            width: 1000.0,
            height: 1000.0,
            column_count: 7,
            timeframe_minutes: 60,
            helper_width: 80.0,
            header_height: 80.0,
            bottom_height: 20.0,
        }
    }

    #[test]
    fn test_metrics() {
        let grid = CellGrid::build(layout()).unwrap();
        assert_eq!(grid.cells().len(), 7 * 24);
        assert!((grid.width_step() - 920.0 / 7.0).abs() < 1e-9);
        assert!((grid.height_step() - 900.0 / 24.0).abs() < 1e-9);
        assert!((grid.millis_per_pixel() - 96_000.0).abs() < 1e-9);
        assert_eq!(grid.ms_time(), 3_600_000);
        assert_eq!(grid.max_cell_index(), 23);
    }

    #[test]
    fn test_cells_are_column_major_and_contiguous() {
        let grid = CellGrid::build(layout()).unwrap();
        let cells = grid.cells();
        assert_eq!((cells[0].column, cells[0].row), (0, 0));
        assert_eq!((cells[24].column, cells[24].row), (1, 0));
        assert_eq!(cells[0].position.bottom, cells[1].position.y);
        assert_eq!(cells[0].position.right, cells[24].position.x);
        assert_eq!(cells[0].position.y, 80.0);
    }

    #[test_case(30)]
    #[test_case(15)]
    fn test_row_count_follows_timeframe(minutes: u32) {
        let grid = CellGrid::build(GridLayout { timeframe_minutes: minutes, ..layout() }).unwrap();
        assert_eq!(grid.row_count(), (1440 / minutes) as usize);
    }

    #[test]
    fn test_rejects_degenerate_layout() {
        let err = CellGrid::build(GridLayout { height: 90.0, ..layout() }).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidLayout { .. }));
        assert!(CellGrid::build(GridLayout { timeframe_minutes: 7, ..layout() }).is_err());
        assert!(CellGrid::build(GridLayout { column_count: 0, ..layout() }).is_err());
    }

    #[test]
    fn test_find_cell_inside() {
        let grid = CellGrid::build(layout()).unwrap();
        let idx = grid.find_cell(Point::new(300.0, 200.0)).unwrap();
        let cell = grid.cells()[idx];
        assert_eq!(cell.column, 1);
        assert_eq!(cell.row, 3);
    }

    #[test]
    fn test_find_cell_clamps_outside_points() {
        let grid = CellGrid::build(layout()).unwrap();
        assert_eq!(grid.find_cell(Point::new(0.0, 0.0)), Some(0));

        let idx = grid.find_cell(Point::new(5000.0, 5000.0)).unwrap();
        let cell = grid.cells()[idx];
        assert_eq!((cell.column, cell.row), (6, 23));
    }

    #[test]
    fn test_shared_edge_resolves_to_lower_index() {
        let grid = CellGrid::build(layout()).unwrap();
        let edge = grid.cells()[0].position.bottom;
        assert_eq!(grid.find_cell(Point::new(100.0, edge)), Some(0));
    }

    #[test]
    fn test_select_range_is_corner_to_corner() {
        let mut grid = CellGrid::build(layout()).unwrap();
        assert!(grid.select_range(Point::new(400.0, 300.0), Point::new(150.0, 130.0)));

        let selected = grid.selected_cells();
        // columns 0..=2, rows 1..=5
        assert_eq!(selected.len(), 3 * 5);
        assert!(selected.iter().all(|c| c.column <= 2 && (1..=5).contains(&c.row)));

        grid.clear_selection();
        assert!(grid.selected_cells().is_empty());
    }

    #[test]
    fn test_row_edge_past_end_is_area_bottom() {
        let grid = CellGrid::build(layout()).unwrap();
        assert_eq!(grid.row_edge(0), 80.0);
        assert!((grid.row_edge(24) - 980.0).abs() < 1e-9);
    }

    #[test]
    fn test_block_geometry() {
        let grid = CellGrid::build(layout()).unwrap();
        let geometry = grid.block_geometry(2, 3_600_000, 7_200_000);
        assert!((geometry.top - 117.5).abs() < 1e-9);
        assert!((geometry.height - 37.5).abs() < 1e-9);
        assert!((geometry.left - (80.0 + 2.0 * 920.0 / 7.0 + 5.0)).abs() < 1e-9);
        assert!((geometry.width - 920.0 / 7.0 * 0.75).abs() < 1e-9);
    }
}
