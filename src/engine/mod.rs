pub mod coach;
pub mod phases;

pub use coach::CoachEngine;
