use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::models::{Session, UserSnapshot};

/// Read-only view of the user's profile, owned by the host app.
pub trait ProfileSource: Send + Sync {
    fn snapshot(&self) -> Result<UserSnapshot>;
}

/// Focus-session history, owned by the host app. Bounds are optional and
/// inclusive.
pub trait HistorySource: Send + Sync {
    fn sessions(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Session>>;
}
