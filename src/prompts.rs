use chrono::{Datelike, NaiveDate};

use crate::models::{CoachPrompt, Phase};

/// Opening prompts and follow-ups per phase, in a fixed order. Selection
/// is `index % len`, never random, so replaying the same step sequence
/// always yields the same text.
const STABILIZE: &[&str] = &[
    "Let's take a slow breath together. What's present for you right now?",
    "Before anything else, notice your breathing. How does this moment feel?",
    "Settle in for a second. What's on your mind as we start?",
];

const OPEN: &[&str] = &[
    "Tell me more about what's been going on today.",
    "What's been taking up the most space in your head lately?",
    "Walk me through what happened, in your own words.",
];

const REFLECT: &[&str] = &[
    "When you sit with that, what feeling comes up first?",
    "What do you think is underneath that reaction?",
    "How did your body respond when that happened?",
];

const REFRAME: &[&str] = &[
    "Is there another way to read that situation?",
    "What would you tell a friend who said that about themselves?",
    "What's one piece of evidence that doesn't fit that story?",
];

const PLAN: &[&str] = &[
    "What's one small thing you could do about this before tomorrow?",
    "What would a five-minute first step look like?",
    "When exactly could you try that, and what might get in the way?",
];

const CLOSE: &[&str] = &[
    "Nice work today. Take what you wrote with you — see you next time.",
];

/// Phase-indexed prompt lookup with deterministic selection.
pub struct PromptCatalog;

impl PromptCatalog {
    fn prompts(phase: Phase) -> &'static [&'static str] {
        match phase {
            Phase::Stabilize => STABILIZE,
            Phase::Open => OPEN,
            Phase::Reflect => REFLECT,
            Phase::Reframe => REFRAME,
            Phase::Plan => PLAN,
            Phase::Close => CLOSE,
        }
    }

    /// Select the prompt for `index` steps spent inside `phase`.
    pub fn prompt_for(phase: Phase, index: usize) -> CoachPrompt {
        let prompts = Self::prompts(phase);
        CoachPrompt {
            phase,
            text: prompts[index % prompts.len()].to_string(),
        }
    }

    /// Stable event identifier: a pure function of phase and calendar
    /// date, so engines sharing a clock agree on ids.
    pub fn prompt_id(phase: Phase, date: NaiveDate) -> String {
        format!("{}_{}", phase.as_str(), date.ordinal())
    }
}
