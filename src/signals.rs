use crate::config::CoachConfig;

/// One semantic tag with the substrings that trigger it.
struct Lexicon {
    tag: &'static str,
    keywords: &'static [&'static str],
}

/// Keyword lexicons for reply tagging. Matching is lowercase substring
/// membership; any hit contributes the lexicon's tag.
const LEXICONS: &[Lexicon] = &[
    Lexicon {
        tag: "anxiety",
        keywords: &["anxious", "worried", "panicky", "on edge"],
    },
    Lexicon {
        tag: "sleep",
        keywords: &["sleep", "insomnia", "bedtime", "awake at night"],
    },
    Lexicon {
        tag: "overwhelm",
        keywords: &["everything", "too much", "overwhelmed", "drowning"],
    },
    Lexicon {
        tag: "gratitude",
        keywords: &["grateful", "thankful", "appreciate"],
    },
    Lexicon {
        tag: "low_energy",
        keywords: &["tired", "exhausted", "drained", "no energy"],
    },
    Lexicon {
        tag: "focus_restart",
        keywords: &["restart", "reset", "refocus", "start over"],
    },
    Lexicon {
        tag: "self_doubt",
        keywords: &["not good enough", "failure", "i can't do", "useless"],
    },
    Lexicon {
        tag: "mood_low",
        keywords: &["sad", "down", "hopeless", "empty"],
    },
];

/// A recognized unhealthy thought pattern and the absolutist markers that
/// reveal it.
struct DistortionMarker {
    label: &'static str,
    markers: &'static [&'static str],
}

const DISTORTIONS: &[DistortionMarker] = &[
    DistortionMarker {
        label: "all-or-nothing",
        markers: &["always", "never", "everything", "everyone", "nothing ever"],
    },
    DistortionMarker {
        label: "catastrophizing",
        markers: &["disaster", "worst case", "ruined", "it's over"],
    },
    DistortionMarker {
        label: "should-statements",
        markers: &["i should have", "i must", "i have to be"],
    },
];

const COMMITMENT_MARKERS: &[&str] = &["i can", "i will", "i'll", "i am going to", "i'm going to"];

/// Everything the detector can read out of one reply. Pure data; the
/// engine and recorder interpret it per phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplySignals {
    /// Deduplicated, ascending-sorted, capped at the configured maximum.
    pub tags: Vec<String>,
    pub distortion: Option<&'static str>,
    pub commitment: bool,
}

/// Classify one reply. Deterministic and side-effect free; empty or
/// unrecognized text simply yields empty signals.
pub fn detect(text: &str, config: &CoachConfig) -> ReplySignals {
    let lowered = text.to_lowercase();

    let mut tags: Vec<String> = LEXICONS
        .iter()
        .filter(|lexicon| lexicon.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|lexicon| lexicon.tag.to_string())
        .collect();

    // Contract: dedup, sort ascending, then cap.
    tags.sort();
    tags.dedup();
    tags.truncate(config.max_tags);

    let distortion = DISTORTIONS
        .iter()
        .find(|d| d.markers.iter().any(|m| lowered.contains(m)))
        .map(|d| d.label);

    let commitment = COMMITMENT_MARKERS.iter().any(|m| lowered.contains(m));

    ReplySignals {
        tags,
        distortion,
        commitment,
    }
}
