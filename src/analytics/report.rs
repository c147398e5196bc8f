use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::analytics::{correlate, summarize};
use crate::models::{CoachDaySummary, CoachEvent, DailyMoodFocus, Session, UserSnapshot};
use crate::sources::ProfileSource;

/// Aggregate payload for the progress screen: profile snapshot, per-day
/// coaching summaries, and the coaching/focus correlation when the data
/// supports one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub snapshot: UserSnapshot,
    pub coach_days: Vec<CoachDaySummary>,
    pub focus_days: Vec<DailyMoodFocus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_focus_correlation: Option<f64>,
}

/// Roll focus sessions up into per-day aggregates, sorted ascending.
pub fn daily_mood_focus(sessions: &[Session]) -> Vec<DailyMoodFocus> {
    let mut days: BTreeMap<chrono::NaiveDate, Vec<u32>> = BTreeMap::new();
    for session in sessions {
        days.entry(session.date_time.date_naive())
            .or_default()
            .push(session.duration_minutes);
    }

    days.into_iter()
        .map(|(day, durations)| {
            let total: u32 = durations.iter().sum();
            DailyMoodFocus {
                day,
                session_count: durations.len(),
                total_duration: total,
                avg_duration: total as f64 / durations.len() as f64,
            }
        })
        .collect()
}

/// Build the progress payload from a profile source, the stored coach
/// events, and the focus session history.
pub fn progress_report(
    profile: &dyn ProfileSource,
    events: &[CoachEvent],
    sessions: &[Session],
) -> Result<ProgressReport> {
    let snapshot = profile.snapshot()?;
    let coach_days = summarize(events);
    let focus_days = daily_mood_focus(sessions);
    let plan_focus_correlation = correlate(&coach_days, &focus_days);

    Ok(ProgressReport {
        snapshot,
        coach_days,
        focus_days,
        plan_focus_correlation,
    })
}
