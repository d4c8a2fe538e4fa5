//! Pointer-driven interaction state.
//!
//! These types hold what an in-progress gesture needs between events; the
//! block mutations themselves live in [`crate::services::time_block`].

pub mod custom_time;
pub mod draw;
pub mod drag;

pub use custom_time::{CustomTimeEditor, DisplayTime, TimeField};
pub use draw::DrawContext;
pub use drag::{DragAction, DragContext};
