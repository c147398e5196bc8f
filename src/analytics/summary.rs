use std::collections::{BTreeMap, HashMap};

use crate::models::{CoachDaySummary, CoachEvent, Outcome};

/// Group events into per-day summaries, sorted ascending by day.
/// Empty input yields empty output.
pub fn summarize(events: &[CoachEvent]) -> Vec<CoachDaySummary> {
    let mut days: BTreeMap<chrono::NaiveDate, Vec<&CoachEvent>> = BTreeMap::new();
    for event in events {
        days.entry(event.at.date_naive()).or_default().push(event);
    }

    days.into_iter()
        .map(|(day, day_events)| CoachDaySummary {
            day,
            journaling_entries: day_events.len(),
            reframes: day_events
                .iter()
                .filter(|e| e.outcome == Some(Outcome::Reframed))
                .count(),
            plans_committed: day_events
                .iter()
                .filter(|e| e.outcome == Some(Outcome::Planned))
                .count(),
            top_tags: rank_tags(&day_events),
        })
        .collect()
}

/// Rank a day's tags by descending frequency; ties keep first-seen order.
fn rank_tags(events: &[&CoachEvent]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for event in events {
        for tag in &event.tags {
            if !counts.contains_key(tag.as_str()) {
                first_seen.push(tag.as_str());
            }
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(usize, &str)> = first_seen
        .iter()
        .enumerate()
        .map(|(order, tag)| (order, *tag))
        .collect();
    ranked.sort_by(|a, b| counts[b.1].cmp(&counts[a.1]).then(a.0.cmp(&b.0)));

    ranked.into_iter().map(|(_, tag)| tag.to_string()).collect()
}
