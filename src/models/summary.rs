use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-day rollup of coaching activity, derived on demand from a
/// CoachEvent collection. Never persisted directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoachDaySummary {
    pub day: NaiveDate,
    pub journaling_entries: usize,
    pub reframes: usize,
    pub plans_committed: usize,
    /// All tags seen that day, ranked by descending frequency; ties keep
    /// first-seen order.
    pub top_tags: Vec<String>,
}

/// Per-day focus aggregate, supplied by the focus-analytics collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyMoodFocus {
    pub day: NaiveDate,
    pub session_count: usize,
    pub total_duration: u32,
    pub avg_duration: f64,
}
