use crate::models::{Outcome, Phase};
use crate::signals::ReplySignals;

/// One entry of the conversation table: the phase itself plus the
/// functions that read an outcome and guidance out of the reply signals
/// while the conversation sits in that phase.
pub struct PhaseDef {
    pub phase: Phase,
    pub outcome: fn(&ReplySignals) -> Option<Outcome>,
    pub guidance: fn(&ReplySignals) -> Option<String>,
}

fn no_outcome(_signals: &ReplySignals) -> Option<Outcome> {
    None
}

fn no_guidance(_signals: &ReplySignals) -> Option<String> {
    None
}

fn reframe_outcome(signals: &ReplySignals) -> Option<Outcome> {
    signals.distortion.map(|_| Outcome::Reframed)
}

fn reframe_guidance(signals: &ReplySignals) -> Option<String> {
    signals.distortion.map(|label| {
        format!("This sounds like {label} thinking. What would a gentler reading be?")
    })
}

fn plan_outcome(signals: &ReplySignals) -> Option<Outcome> {
    if signals.commitment {
        Some(Outcome::Planned)
    } else {
        None
    }
}

/// The fixed conversation order. The engine walks this table forward or
/// holds in place; it never skips or reverses.
pub const PHASES: &[PhaseDef] = &[
    PhaseDef {
        phase: Phase::Stabilize,
        outcome: no_outcome,
        guidance: no_guidance,
    },
    PhaseDef {
        phase: Phase::Open,
        outcome: no_outcome,
        guidance: no_guidance,
    },
    PhaseDef {
        phase: Phase::Reflect,
        outcome: no_outcome,
        guidance: no_guidance,
    },
    PhaseDef {
        phase: Phase::Reframe,
        outcome: reframe_outcome,
        guidance: reframe_guidance,
    },
    PhaseDef {
        phase: Phase::Plan,
        outcome: plan_outcome,
        guidance: no_guidance,
    },
    PhaseDef {
        phase: Phase::Close,
        outcome: no_outcome,
        guidance: no_guidance,
    },
];
