// Schedule persistence
// JSON load/save of the ScheduleGroup wire format

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Error as SerdeError;

use crate::error::ScheduleError;
use crate::models::schedule::ScheduleGroup;

/// Parse a JSON array of schedule groups.
pub fn schedule_from_json(input: &str) -> Result<Vec<ScheduleGroup>, ScheduleError> {
    Ok(serde_json::from_str(input)?)
}

pub fn schedule_to_json(groups: &[ScheduleGroup]) -> Result<String, ScheduleError> {
    Ok(serde_json::to_string_pretty(groups)?)
}

/// Load a schedule file. A missing file is an empty schedule.
pub fn load_schedule(path: &Path) -> Result<Vec<ScheduleGroup>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read schedule from {}", path.display()))?;
    let groups = serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    Ok(groups)
}

pub fn save_schedule(path: &Path, groups: &[ScheduleGroup]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = schedule_to_json(groups)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write schedule to {}", path.display()))?;
    log::debug!("Saved {} schedule groups to {}", groups.len(), path.display());
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize schedule from {}",
        path.display()
    ))
}
