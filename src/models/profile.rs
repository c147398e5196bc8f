use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only view of the user's profile, supplied by a `ProfileSource`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub now: DateTime<Utc>,
    pub weekly_goal_minutes: u32,
    pub current_streak_days: u32,
    pub best_day_minutes: u32,
    pub badges: Vec<String>,
}
