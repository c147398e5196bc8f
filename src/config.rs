/// Configuration for the coaching engine with tunable thresholds.
#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// Richness a reply must reach before the conversation advances to the
    /// next phase.
    pub advance_threshold: u32,

    /// Richness contribution of each detected signal (tag or distortion).
    pub signal_weight: u32,

    /// Maximum tags attached to a single event.
    pub max_tags: usize,

    /// Maximum guidance length; longer text is cut and suffixed with `...`.
    pub guidance_max_chars: usize,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            advance_threshold: 30,
            signal_weight: 15,
            max_tags: 6,
            guidance_max_chars: 200,
        }
    }
}
