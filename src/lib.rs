// Week Scheduler Library
// Editing core for weekly bitmask schedules: cell grid, time blocks,
// timezone correction and schedule encoding

pub mod config;
pub mod error;
pub mod interaction;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

pub use config::SchedulerConfig;
pub use error::{Result, ScheduleError};
pub use models::schedule::{ScheduleGroup, HOUR_24};
pub use session::{EditorSession, InputEvent, KeyCode, ScheduleListener};
