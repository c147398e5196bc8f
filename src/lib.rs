//! Coaching engine and activity analytics for the Stillmind wellness app.
//!
//! The host app drives a [`CoachEngine`] one reply at a time; every
//! consumed reply becomes an immutable [`models::CoachEvent`] pushed to
//! the injected sinks. Stored events feed the analytics side (daily
//! summaries, filtering, coaching/focus correlation) and the JSON/CSV
//! export codec independently of any live conversation.

pub mod analytics;
pub mod clock;
pub mod codec;
pub mod config;
pub mod db;
pub mod engine;
pub mod models;
pub mod prompts;
pub mod recorder;
pub mod signals;
pub mod sources;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CoachConfig;
pub use db::CoachStore;
pub use engine::CoachEngine;
pub use models::{
    CoachDaySummary, CoachEvent, CoachFilter, CoachPrompt, CoachStep, DailyMoodFocus,
    JournalEntry, Outcome, Phase, Session, UserSnapshot,
};
pub use prompts::PromptCatalog;
pub use recorder::{EventRecorder, EventSink, JournalSink, MemorySink};
pub use sources::{HistorySource, ProfileSource};
