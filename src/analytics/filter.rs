use crate::models::{CoachEvent, CoachFilter};

/// Apply a query to an event collection, preserving original order.
/// Unset criteria are skipped; active ones combine with AND. An
/// all-default filter returns the input unchanged.
pub fn filter_events(events: &[CoachEvent], filter: &CoachFilter) -> Vec<CoachEvent> {
    events
        .iter()
        .filter(|event| matches(event, filter))
        .cloned()
        .collect()
}

fn matches(event: &CoachEvent, filter: &CoachFilter) -> bool {
    if let Some(tags_any) = &filter.tags_any {
        if !event.tags.iter().any(|tag| tags_any.contains(tag)) {
            return false;
        }
    }

    let day = event.at.date_naive();
    if let Some(from) = filter.from {
        if day < from {
            return false;
        }
    }
    if let Some(to) = filter.to {
        if day > to {
            return false;
        }
    }

    if let Some(query) = &filter.text_query {
        let query = query.to_lowercase();
        let in_guidance = event
            .guidance
            .as_ref()
            .map(|g| g.to_lowercase().contains(&query))
            .unwrap_or(false);
        let in_prompt_id = event.prompt_id.to_lowercase().contains(&query);
        if !in_guidance && !in_prompt_id {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Phase;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::HashSet;

    fn event(day: u32, prompt_id: &str, guidance: Option<&str>, tags: &[&str]) -> CoachEvent {
        CoachEvent {
            at: Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0).unwrap(),
            phase: Phase::Reframe,
            prompt_id: prompt_id.into(),
            guidance: guidance.map(str::to_string),
            outcome: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn fixture() -> Vec<CoachEvent> {
        vec![
            event(1, "reframe_60", Some("all-or-nothing pattern"), &["anxiety"]),
            event(2, "plan_61", None, &["sleep"]),
            event(3, "open_62", Some("catastrophizing"), &["anxiety", "overwhelm"]),
        ]
    }

    #[test]
    fn empty_filter_returns_input_unchanged() {
        let events = fixture();
        assert_eq!(filter_events(&events, &CoachFilter::default()), events);
    }

    #[test]
    fn tags_any_keeps_overlapping_events() {
        let events = fixture();
        let filter = CoachFilter {
            tags_any: Some(HashSet::from(["anxiety".to_string()])),
            ..Default::default()
        };
        let kept = filter_events(&events, &filter);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|e| e.tags.contains(&"anxiety".to_string())));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let events = fixture();
        let filter = CoachFilter {
            from: NaiveDate::from_ymd_opt(2025, 3, 2),
            to: NaiveDate::from_ymd_opt(2025, 3, 3),
            ..Default::default()
        };
        let kept = filter_events(&events, &filter);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].prompt_id, "plan_61");
    }

    #[test]
    fn text_query_is_case_insensitive_over_guidance_and_prompt_id() {
        let events = fixture();

        let by_guidance = CoachFilter {
            text_query: Some("REFRAME".into()),
            ..Default::default()
        };
        // Matches promptId "reframe_60".
        assert_eq!(filter_events(&events, &by_guidance).len(), 1);

        let by_text = CoachFilter {
            text_query: Some("Catastroph".into()),
            ..Default::default()
        };
        assert_eq!(filter_events(&events, &by_text)[0].prompt_id, "open_62");
    }

    #[test]
    fn criteria_combine_with_and() {
        let events = fixture();
        let filter = CoachFilter {
            tags_any: Some(HashSet::from(["anxiety".to_string()])),
            from: NaiveDate::from_ymd_opt(2025, 3, 3),
            ..Default::default()
        };
        let kept = filter_events(&events, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].prompt_id, "open_62");
    }
}
