use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered stages of a coaching conversation. Traversal is forward-or-hold
/// only; `Close` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Stabilize,
    Open,
    Reflect,
    Reframe,
    Plan,
    Close,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Stabilize => "stabilize",
            Phase::Open => "open",
            Phase::Reflect => "reflect",
            Phase::Reframe => "reframe",
            Phase::Plan => "plan",
            Phase::Close => "close",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "stabilize" => Ok(Phase::Stabilize),
            "open" => Ok(Phase::Open),
            "reflect" => Ok(Phase::Reflect),
            "reframe" => Ok(Phase::Reframe),
            "plan" => Ok(Phase::Plan),
            "close" => Ok(Phase::Close),
            _ => Err(anyhow!("unknown coach phase '{value}'")),
        }
    }
}

/// What the user accomplished in the turn that produced an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Reframed,
    Planned,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Reframed => "reframed",
            Outcome::Planned => "planned",
        }
    }

    pub fn from_str(value: &str) -> Result<Self> {
        match value {
            "reframed" => Ok(Outcome::Reframed),
            "planned" => Ok(Outcome::Planned),
            _ => Err(anyhow!("unknown coach outcome '{value}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoachPrompt {
    pub phase: Phase,
    pub text: String,
}

/// Returned by every `CoachEngine::next` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoachStep {
    pub prompt: CoachPrompt,
}

/// The unit of record for all downstream analytics. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoachEvent {
    pub at: DateTime<Utc>,
    pub phase: Phase,
    pub prompt_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub tags: Vec<String>,
}

/// Raw reply text, 1:1 with each CoachEvent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub at: DateTime<Utc>,
    pub text: String,
}
