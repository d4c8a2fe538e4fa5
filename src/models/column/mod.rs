// Column module
// Day-of-week columns and their mask weights

use serde::{Deserialize, Serialize};

/// One day column of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerColumn {
    /// Bit weight of this column inside a schedule mask (`2^index`)
    pub weight: u64,
    /// Full display name
    pub full: String,
    /// Short display name
    pub short: String,
}

impl SchedulerColumn {
    pub fn new(weight: u64, full: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            weight,
            full: full.into(),
            short: short.into(),
        }
    }
}

/// Monday through Sunday with weights 1..64.
pub fn default_columns() -> Vec<SchedulerColumn> {
    [
        ("Monday", "Mon"),
        ("Tuesday", "Tue"),
        ("Wednesday", "Wed"),
        ("Thursday", "Thu"),
        ("Friday", "Fri"),
        ("Saturday", "Sat"),
        ("Sunday", "Sun"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (full, short))| SchedulerColumn::new(1 << i, *full, *short))
    .collect()
}

/// Time labels shown beside the grid.
pub fn default_row_labels() -> Vec<String> {
    [
        "01:00", "04:00", "07:00", "10:00", "13:00", "17:00", "20:00", "23:00",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
