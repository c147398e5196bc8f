use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed focus session, read from the host app's history store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub date_time: DateTime<Utc>,
    pub duration_minutes: u32,
}
