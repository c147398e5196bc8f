pub mod event;
pub mod filter;
pub mod profile;
pub mod session;
pub mod summary;

pub use event::{CoachEvent, CoachPrompt, CoachStep, JournalEntry, Outcome, Phase};
pub use filter::CoachFilter;
pub use profile::UserSnapshot;
pub use session::Session;
pub use summary::{CoachDaySummary, DailyMoodFocus};
