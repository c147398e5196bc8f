use std::sync::Arc;

use log::debug;

use crate::clock::Clock;
use crate::config::CoachConfig;
use crate::engine::phases::PHASES;
use crate::models::{CoachStep, Phase};
use crate::prompts::PromptCatalog;
use crate::recorder::{EventRecorder, EventSink, JournalSink};
use crate::signals::{self, ReplySignals};

/// Drives one coaching conversation through the fixed phase table.
///
/// Not safe for concurrent `next()` calls; callers serialize per
/// conversation. All time flows through the injected clock.
pub struct CoachEngine {
    config: CoachConfig,
    clock: Arc<dyn Clock>,
    recorder: EventRecorder,
    phase_index: usize,
    /// Prompts already issued within the current phase; drives follow-up
    /// selection.
    steps_in_phase: usize,
    started: bool,
}

impl CoachEngine {
    pub fn new(
        config: CoachConfig,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventSink>,
        journal: Arc<dyn JournalSink>,
    ) -> Self {
        let recorder = EventRecorder::new(config.clone(), events, journal);
        Self {
            config,
            clock,
            recorder,
            phase_index: 0,
            steps_in_phase: 0,
            started: false,
        }
    }

    /// Engine on the real wall clock, for hosts that do not inject one.
    pub fn with_system_clock(
        config: CoachConfig,
        events: Arc<dyn EventSink>,
        journal: Arc<dyn JournalSink>,
    ) -> Self {
        Self::new(config, Arc::new(crate::clock::SystemClock), events, journal)
    }

    pub fn current_phase(&self) -> Phase {
        PHASES[self.phase_index].phase
    }

    pub fn is_closed(&self) -> bool {
        self.current_phase() == Phase::Close
    }

    /// Advance the conversation by one turn.
    ///
    /// The first call ignores `reply`, returns the stabilize prompt, and
    /// emits no event. Every later call consumes the reply in the current
    /// phase, records a CoachEvent, then either advances (if the reply is
    /// rich enough) or holds with a follow-up prompt. Once `close` is
    /// reached, calls are idempotent no-ops returning the close prompt.
    pub fn next(&mut self, reply: Option<&str>) -> CoachStep {
        if !self.started {
            self.started = true;
            return self.issue_prompt();
        }

        if self.is_closed() {
            return CoachStep {
                prompt: PromptCatalog::prompt_for(Phase::Close, 0),
            };
        }

        let reply = reply.unwrap_or("");
        let signals = signals::detect(reply, &self.config);
        let def = &PHASES[self.phase_index];

        let outcome = (def.outcome)(&signals);
        let guidance = (def.guidance)(&signals);
        self.recorder.record(
            def.phase,
            reply,
            &signals,
            outcome,
            guidance,
            self.clock.as_ref(),
        );

        let richness = self.richness(reply, &signals);
        if richness >= self.config.advance_threshold && self.phase_index + 1 < PHASES.len() {
            debug!(
                "advancing {} -> {} (richness {richness})",
                def.phase.as_str(),
                PHASES[self.phase_index + 1].phase.as_str()
            );
            self.phase_index += 1;
            self.steps_in_phase = 0;
        }

        self.issue_prompt()
    }

    /// Heuristic for how informative a reply is: character length plus a
    /// weight per detected signal.
    fn richness(&self, reply: &str, signals: &ReplySignals) -> u32 {
        let signal_count = signals.tags.len() as u32 + u32::from(signals.distortion.is_some());
        reply.trim().chars().count() as u32 + self.config.signal_weight * signal_count
    }

    fn issue_prompt(&mut self) -> CoachStep {
        let prompt = PromptCatalog::prompt_for(self.current_phase(), self.steps_in_phase);
        self.steps_in_phase += 1;
        CoachStep { prompt }
    }
}
