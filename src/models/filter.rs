use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Query object for `analytics::filter_events`. All fields optional;
/// active criteria combine with AND semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachFilter {
    /// Keep events carrying at least one of these tags.
    pub tags_any: Option<HashSet<String>>,
    /// Inclusive lower calendar-date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper calendar-date bound.
    pub to: Option<NaiveDate>,
    /// Case-insensitive substring match against guidance or promptId.
    pub text_query: Option<String>,
}

impl CoachFilter {
    pub fn is_empty(&self) -> bool {
        self.tags_any.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.text_query.is_none()
    }
}
