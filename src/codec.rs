use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};

use crate::models::{CoachEvent, Outcome, Phase};

pub const CSV_HEADER: &str = "timestamp,phase,promptId,guidance,outcome,tags";

/// Encode one event as a JSON object. Absent guidance/outcome are omitted.
pub fn to_json(event: &CoachEvent) -> Result<String> {
    serde_json::to_string(event).context("failed to encode coach event as JSON")
}

/// Decode one event from JSON. Missing required fields and unknown
/// phase/outcome strings fail explicitly; nothing is defaulted.
pub fn from_json(json: &str) -> Result<CoachEvent> {
    serde_json::from_str(json).context("failed to decode coach event from JSON")
}

/// Encode one event as a CSV row in the fixed column order
/// `timestamp,phase,promptId,guidance,outcome,tags`, tags joined with `;`.
pub fn to_csv_row(event: &CoachEvent) -> String {
    let fields = [
        event.at.to_rfc3339(),
        event.phase.as_str().to_string(),
        event.prompt_id.clone(),
        event.guidance.clone().unwrap_or_default(),
        event
            .outcome
            .map(|o| o.as_str().to_string())
            .unwrap_or_default(),
        event.tags.join(";"),
    ];

    fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decode one event from a CSV row produced by `to_csv_row`.
pub fn from_csv_row(row: &str) -> Result<CoachEvent> {
    let fields = split_fields(row)?;
    if fields.len() != 6 {
        bail!("expected 6 CSV columns, found {}", fields.len());
    }

    if fields[0].is_empty() {
        bail!("CSV row is missing a timestamp");
    }
    let at = parse_datetime(&fields[0])?;
    let phase = Phase::from_str(&fields[1])?;

    let guidance = if fields[3].is_empty() {
        None
    } else {
        Some(fields[3].clone())
    };
    let outcome = if fields[4].is_empty() {
        None
    } else {
        Some(Outcome::from_str(&fields[4])?)
    };
    let tags = if fields[5].is_empty() {
        Vec::new()
    } else {
        fields[5].split(';').map(str::to_string).collect()
    };

    Ok(CoachEvent {
        at,
        phase,
        prompt_id: fields[2].clone(),
        guidance,
        outcome,
        tags,
    })
}

/// Export a full event collection with the header row.
pub fn to_csv(events: &[CoachEvent]) -> String {
    let mut out = String::from(CSV_HEADER);
    for event in events {
        out.push('\n');
        out.push_str(&to_csv_row(event));
    }
    out
}

/// Import a full export. Records may span physical lines when guidance
/// contains quoted newlines.
pub fn from_csv(text: &str) -> Result<Vec<CoachEvent>> {
    let mut records = split_records(text)?.into_iter();

    let header = records
        .next()
        .ok_or_else(|| anyhow!("CSV export is empty"))?;
    if header != CSV_HEADER {
        bail!("unexpected CSV header '{header}'");
    }

    records
        .filter(|record| !record.is_empty())
        .map(|record| from_csv_row(&record))
        .collect()
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid timestamp '{value}': {err}"))
}

/// Standard CSV quoting: wrap when the field carries a comma, quote,
/// or newline, doubling embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn split_fields(row: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
    }

    if in_quotes {
        bail!("unterminated quote in CSV row");
    }
    fields.push(current);
    Ok(fields)
}

/// Split an export into logical records: newlines inside quoted fields do
/// not terminate a record.
fn split_records(text: &str) -> Result<Vec<String>> {
    let mut records = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in text.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '\n' if !in_quotes => records.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if in_quotes {
        bail!("unterminated quote in CSV export");
    }
    if !current.is_empty() {
        records.push(current);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event() -> CoachEvent {
        CoachEvent {
            at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
            phase: Phase::Reframe,
            prompt_id: "reframe_60".into(),
            guidance: Some("This sounds like all-or-nothing thinking.".into()),
            outcome: Some(Outcome::Reframed),
            tags: vec!["anxiety".into(), "overwhelm".into()],
        }
    }

    fn bare_event() -> CoachEvent {
        CoachEvent {
            at: Utc.with_ymd_and_hms(2025, 3, 2, 7, 0, 0).unwrap(),
            phase: Phase::Open,
            prompt_id: "open_61".into(),
            guidance: None,
            outcome: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn json_round_trip() {
        for e in [event(), bare_event()] {
            let json = to_json(&e).unwrap();
            assert_eq!(from_json(&json).unwrap(), e);
        }
    }

    #[test]
    fn json_omits_absent_optionals() {
        let json = to_json(&bare_event()).unwrap();
        assert!(!json.contains("guidance"));
        assert!(!json.contains("outcome"));
        assert!(json.contains("promptId"));
    }

    #[test]
    fn json_missing_timestamp_is_rejected() {
        let err = from_json(r#"{"phase":"open","promptId":"open_61","tags":[]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn json_unknown_phase_is_rejected() {
        let err = from_json(
            r#"{"at":"2025-03-02T07:00:00Z","phase":"ruminate","promptId":"x","tags":[]}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn csv_round_trip() {
        for e in [event(), bare_event()] {
            let row = to_csv_row(&e);
            assert_eq!(from_csv_row(&row).unwrap(), e);
        }
    }

    #[test]
    fn csv_round_trip_with_hostile_guidance() {
        let mut e = event();
        e.guidance = Some("line one\nhe said \"stop\", then left".into());
        let row = to_csv_row(&e);
        assert_eq!(from_csv_row(&row).unwrap(), e);
    }

    #[test]
    fn csv_row_uses_fixed_column_order() {
        let row = to_csv_row(&event());
        assert!(row.starts_with("2025-03-01T09:30:00+00:00,reframe,reframe_60,"));
        assert!(row.ends_with("anxiety;overwhelm"));
    }

    #[test]
    fn csv_missing_timestamp_is_rejected() {
        assert!(from_csv_row(",open,open_61,,,").is_err());
    }

    #[test]
    fn csv_wrong_column_count_is_rejected() {
        assert!(from_csv_row("2025-03-02T07:00:00+00:00,open,open_61").is_err());
    }

    #[test]
    fn csv_unknown_outcome_is_rejected() {
        let row = "2025-03-02T07:00:00+00:00,open,open_61,,deferred,";
        assert!(from_csv_row(row).is_err());
    }

    #[test]
    fn csv_document_round_trip_spans_newlines() {
        let mut hostile = event();
        hostile.guidance = Some("first\nsecond, \"third\"".into());
        let events = vec![event(), hostile, bare_event()];

        let doc = to_csv(&events);
        assert!(doc.starts_with(CSV_HEADER));
        assert_eq!(from_csv(&doc).unwrap(), events);
    }

    #[test]
    fn csv_document_requires_header() {
        let row = to_csv_row(&bare_event());
        assert!(from_csv(&row).is_err());
    }
}
