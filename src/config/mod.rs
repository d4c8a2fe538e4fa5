// Scheduler configuration
// Options recognized by an editor session, loadable from TOML

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::column::{default_columns, default_row_labels, SchedulerColumn};
use crate::models::schedule::MINUTE;

/// Colours handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockColors {
    pub common: String,
    pub temp: String,
    pub draw: String,
    pub hover: String,
}

impl Default for BlockColors {
    fn default() -> Self {
        Self {
            common: "#ff5722".to_string(),
            temp: "#c6a700".to_string(),
            draw: "#ff8a50".to_string(),
            hover: "#ff3d00".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Minutes per grid row; must divide 1440
    pub timeframe_minutes: u32,
    pub columns: Vec<SchedulerColumn>,
    /// Display-only labels for the time helper column
    pub row_labels: Vec<String>,
    /// Width of the time helper column on the left
    pub helper_width: f64,
    /// Height of the day header row
    pub header_height: f64,
    /// Height of the strip below the last row
    pub bottom_height: f64,
    pub base_z_index: i32,
    /// Pointer movement multiplier for move/resize
    pub mouse_speed: f64,
    /// Working offset in ms behind UTC; the host's offset when absent
    pub required_tz_offset_ms: Option<i64>,
    pub block_colors: BlockColors,
    /// Maximum retained undo snapshots
    pub history_limit: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timeframe_minutes: 60,
            columns: default_columns(),
            row_labels: default_row_labels(),
            helper_width: 80.0,
            header_height: 80.0,
            bottom_height: 20.0,
            base_z_index: 0,
            mouse_speed: 3.0,
            required_tz_offset_ms: None,
            block_colors: BlockColors::default(),
            history_limit: 100,
        }
    }
}

impl SchedulerConfig {
    /// Milliseconds in one timeframe.
    pub fn ms_time(&self) -> i64 {
        self.timeframe_minutes as i64 * MINUTE
    }

    /// Grid rows per day.
    pub fn row_count(&self) -> usize {
        (1440 / self.timeframe_minutes.max(1)) as usize
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.timeframe_minutes == 0
            || self.timeframe_minutes > 1440
            || 1440 % self.timeframe_minutes != 0
        {
            return Err(ScheduleError::InvalidTimeframe(self.timeframe_minutes));
        }

        if self.columns.is_empty() {
            return Err(ScheduleError::NoColumns);
        }

        if self.columns.len() > u64::BITS as usize {
            return Err(ScheduleError::TooManyColumns(self.columns.len()));
        }

        for (index, column) in self.columns.iter().enumerate() {
            let expected = 1u64 << index;
            if column.weight != expected {
                return Err(ScheduleError::InvalidColumnWeight {
                    index,
                    weight: column.weight,
                    expected,
                });
            }
        }

        Ok(())
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ScheduleError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read scheduler config from {}", path.display()))?;
        let config = Self::from_toml_str(&data)
            .with_context(|| format!("failed to parse scheduler config from {}", path.display()))?;
        log::debug!(
            "Loaded scheduler config from {}: timeframe={}m, columns={}",
            path.display(),
            config.timeframe_minutes,
            config.columns.len()
        );
        Ok(config)
    }
}
