use crate::models::cell::Point;

/// Rectangle of an in-progress draw, from the pointer-down position to the
/// latest pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawContext {
    pub start: Point,
    pub current: Point,
}

impl DrawContext {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn update(&mut self, position: Point) {
        self.current = position;
    }
}
