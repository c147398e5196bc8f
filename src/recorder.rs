use std::sync::{Arc, Mutex};

use anyhow::Result;
use log::warn;

use crate::clock::Clock;
use crate::config::CoachConfig;
use crate::models::{CoachEvent, JournalEntry, Outcome, Phase};
use crate::prompts::PromptCatalog;
use crate::signals::ReplySignals;

/// Receives every produced CoachEvent. Implementations may persist,
/// forward, or drop events; delivery is best effort.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &CoachEvent) -> Result<()>;
}

/// Receives the raw reply paired with each event.
pub trait JournalSink: Send + Sync {
    fn append(&self, entry: &JournalEntry) -> Result<()>;
}

/// Builds immutable CoachEvents from phase transitions and forwards them
/// to the injected sinks. Sink failures are logged here and never reach
/// the conversation flow.
pub struct EventRecorder {
    config: CoachConfig,
    events: Arc<dyn EventSink>,
    journal: Arc<dyn JournalSink>,
}

impl EventRecorder {
    pub fn new(config: CoachConfig, events: Arc<dyn EventSink>, journal: Arc<dyn JournalSink>) -> Self {
        Self {
            config,
            events,
            journal,
        }
    }

    /// Build the event for one consumed reply and dispatch it.
    pub fn record(
        &self,
        phase: Phase,
        reply: &str,
        signals: &ReplySignals,
        outcome: Option<Outcome>,
        guidance: Option<String>,
        clock: &dyn Clock,
    ) -> CoachEvent {
        let at = clock.now();

        let event = CoachEvent {
            at,
            phase,
            prompt_id: PromptCatalog::prompt_id(phase, at.date_naive()),
            guidance: guidance.and_then(|g| self.clamp_guidance(g)),
            outcome,
            tags: signals.tags.clone(),
        };

        if let Err(err) = self.events.publish(&event) {
            warn!("event sink rejected coach event: {err:#}");
        }

        let entry = JournalEntry {
            at,
            text: reply.to_string(),
        };
        if let Err(err) = self.journal.append(&entry) {
            warn!("journal sink rejected entry: {err:#}");
        }

        event
    }

    /// Cap guidance at the configured length, keeping a trailing `...`
    /// marker. Empty guidance is normalized to absent.
    fn clamp_guidance(&self, guidance: String) -> Option<String> {
        if guidance.is_empty() {
            return None;
        }
        let max = self.config.guidance_max_chars;
        if guidance.chars().count() <= max {
            return Some(guidance);
        }
        let kept: String = guidance.chars().take(max.saturating_sub(3)).collect();
        Some(format!("{kept}..."))
    }
}

/// In-memory sink backed by a shared Vec; the default for tests and for
/// hosts that flush events themselves.
#[derive(Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<CoachEvent>>>,
    journal: Arc<Mutex<Vec<JournalEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CoachEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn journal(&self) -> Vec<JournalEntry> {
        self.journal.lock().unwrap().clone()
    }
}

impl EventSink for MemorySink {
    fn publish(&self, event: &CoachEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

impl JournalSink for MemorySink {
    fn append(&self, entry: &JournalEntry) -> Result<()> {
        self.journal.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use anyhow::anyhow;
    use chrono::{TimeZone, Utc};

    struct FailingSink;

    impl EventSink for FailingSink {
        fn publish(&self, _event: &CoachEvent) -> Result<()> {
            Err(anyhow!("sink offline"))
        }
    }

    impl JournalSink for FailingSink {
        fn append(&self, _entry: &JournalEntry) -> Result<()> {
            Err(anyhow!("sink offline"))
        }
    }

    fn recorder_with(events: Arc<dyn EventSink>, journal: Arc<dyn JournalSink>) -> EventRecorder {
        EventRecorder::new(CoachConfig::default(), events, journal)
    }

    #[test]
    fn guidance_is_truncated_with_marker() {
        let sink = Arc::new(MemorySink::new());
        let recorder = recorder_with(sink.clone(), sink.clone());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());

        let long = "x".repeat(500);
        let event = recorder.record(
            Phase::Reframe,
            "reply",
            &ReplySignals::default(),
            None,
            Some(long),
            &clock,
        );

        let guidance = event.guidance.unwrap();
        assert_eq!(guidance.chars().count(), 200);
        assert!(guidance.ends_with("..."));
    }

    #[test]
    fn short_guidance_is_untouched() {
        let sink = Arc::new(MemorySink::new());
        let recorder = recorder_with(sink.clone(), sink.clone());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());

        let event = recorder.record(
            Phase::Reframe,
            "reply",
            &ReplySignals::default(),
            None,
            Some("all-or-nothing".into()),
            &clock,
        );
        assert_eq!(event.guidance.as_deref(), Some("all-or-nothing"));
    }

    #[test]
    fn prompt_id_tracks_clock_date() {
        let sink = Arc::new(MemorySink::new());
        let recorder = recorder_with(sink.clone(), sink.clone());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());

        let event = recorder.record(
            Phase::Open,
            "reply",
            &ReplySignals::default(),
            None,
            None,
            &clock,
        );
        assert_eq!(event.prompt_id, "open_60");
        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.journal()[0].text, "reply");
    }

    #[test]
    fn sink_failures_do_not_propagate() {
        let failing = Arc::new(FailingSink);
        let recorder = recorder_with(failing.clone(), failing);
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());

        // Must return the event despite both sinks erroring.
        let event = recorder.record(
            Phase::Plan,
            "reply",
            &ReplySignals::default(),
            Some(Outcome::Planned),
            None,
            &clock,
        );
        assert_eq!(event.outcome, Some(Outcome::Planned));
    }
}
