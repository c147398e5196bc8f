pub mod correlation;
pub mod filter;
pub mod report;
pub mod summary;

pub use correlation::correlate;
pub use filter::filter_events;
pub use report::{daily_mood_focus, progress_report, ProgressReport};
pub use summary::summarize;
