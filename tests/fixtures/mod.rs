// Test fixtures - reusable test data
// Provides consistent sessions and schedules across all test files

#![allow(dead_code)]

use week_scheduler::models::column::SchedulerColumn;
use week_scheduler::{EditorSession, ScheduleGroup, SchedulerConfig};

pub const HOUR: i64 = 3_600_000;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Sample configurations
pub mod configs {
    use super::*;

    /// Default layout pinned to UTC
    pub fn utc() -> SchedulerConfig {
        SchedulerConfig {
            required_tz_offset_ms: Some(0),
            ..SchedulerConfig::default()
        }
    }

    /// UTC+3, i.e. three hours ahead of the wire format
    pub fn moscow() -> SchedulerConfig {
        SchedulerConfig {
            required_tz_offset_ms: Some(-3 * HOUR),
            ..SchedulerConfig::default()
        }
    }

    /// Two columns with 30 minute rows
    pub fn two_day_half_hour() -> SchedulerConfig {
        SchedulerConfig {
            timeframe_minutes: 30,
            columns: vec![
                SchedulerColumn::new(1, "Weekday", "Wd"),
                SchedulerColumn::new(2, "Weekend", "We"),
            ],
            required_tz_offset_ms: Some(0),
            ..SchedulerConfig::default()
        }
    }
}

/// Sample schedules
pub mod schedules {
    use super::*;

    /// Monday and Tuesday, first 15 seconds
    pub fn mask_three() -> Vec<ScheduleGroup> {
        vec![ScheduleGroup::new(0, 15_000, 3)]
    }

    /// Office hours Monday to Friday
    pub fn office_hours() -> Vec<ScheduleGroup> {
        vec![ScheduleGroup::new(9 * HOUR, 18 * HOUR, 0b001_1111)]
    }

    /// Late evening every day of the week
    pub fn late_evening() -> Vec<ScheduleGroup> {
        vec![ScheduleGroup::new(22 * HOUR, 24 * HOUR, 0b111_1111)]
    }
}

/// Session on a 1000x1000 container: 37.5px rows, 96_000 ms per pixel.
pub fn session(config: SchedulerConfig, groups: &[ScheduleGroup]) -> EditorSession {
    init_logging();
    EditorSession::new(config, 1000.0, 1000.0)
        .unwrap()
        .with_schedule(groups)
}
