//! The affect classifier: pure text in, reading out.
//!
//! Classification is table-driven: the emotion lexicon with the most
//! word-boundary hits wins (table order breaks ties), intensity is bounded
//! arithmetic over match counts, and linguistic markers are independent
//! booleans. No state persists between calls.

use serde::{Deserialize, Serialize};

use crate::lexicon::{
    self, ABSOLUTIST, CATASTROPHIZING, EMOTION_LEXICONS, Emotion, INTENSIFIERS, MINIMIZING,
    SELF_BLAME, WITHDRAWAL,
};

/// Intensity bounds. 1 is a flat mention, 10 is acute distress.
pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;

/// Recommended depth of the coach's next response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseDepth {
    /// Acknowledge and move on.
    Light,
    /// Reflect and ask one open question.
    Standard,
    /// Slow down and explore the feeling.
    Deep,
    /// Stabilize first: grounding before any exploration.
    Grounding,
}

/// Linguistic markers detected in the message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub minimizing: bool,
    pub catastrophizing: bool,
    pub self_blame: bool,
    pub absolutist: bool,
    pub withdrawal: bool,
}

/// Result of classifying one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffectReading {
    pub emotion: Emotion,
    pub intensity: u8,
    pub markers: Markers,
    pub depth: ResponseDepth,
    /// Lexicon hits for the winning emotion; 0 for neutral.
    pub emotion_hits: usize,
}

/// Classify a member message.
#[must_use]
pub fn classify(text: &str) -> AffectReading {
    let lower = text.to_lowercase();

    let (emotion, emotion_hits) = dominant_emotion(&lower);
    let intensity = intensity_score(&lower, text, emotion_hits);
    let markers = detect_markers(&lower);
    let depth = depth_for(emotion, intensity);

    AffectReading {
        emotion,
        intensity,
        markers,
        depth,
        emotion_hits,
    }
}

/// The lexicon with the most hits wins; ties go to the earlier table.
fn dominant_emotion(lower: &str) -> (Emotion, usize) {
    let mut best = (Emotion::Neutral, 0usize);
    for (emotion, table) in EMOTION_LEXICONS {
        let hits = lexicon::count_matches(lower, table);
        if hits > best.1 {
            best = (*emotion, hits);
        }
    }
    best
}

/// Intensity: 2 + 2·emotion hits + intensifier hits + exclamation bonus
/// + shouting bonus, clamped to 1..=10. Neutral messages stay at 1.
fn intensity_score(lower: &str, original: &str, emotion_hits: usize) -> u8 {
    if emotion_hits == 0 {
        return MIN_INTENSITY;
    }

    let intensifiers = lexicon::count_matches(lower, INTENSIFIERS);
    let exclaims = usize::from(original.contains('!'));
    let shouting = usize::from(has_shouted_word(original));

    let raw = 2 + emotion_hits * 2 + intensifiers + exclaims + shouting;
    u8::try_from(raw)
        .unwrap_or(MAX_INTENSITY)
        .clamp(MIN_INTENSITY, MAX_INTENSITY)
}

/// A word of four or more letters written in full caps.
fn has_shouted_word(text: &str) -> bool {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .any(|w| w.len() >= 4 && w.chars().all(|c| c.is_ascii_uppercase()))
}

fn detect_markers(lower: &str) -> Markers {
    Markers {
        minimizing: lexicon::count_matches(lower, MINIMIZING) > 0,
        catastrophizing: lexicon::count_matches(lower, CATASTROPHIZING) > 0,
        self_blame: lexicon::count_matches(lower, SELF_BLAME) > 0,
        absolutist: lexicon::count_matches(lower, ABSOLUTIST) > 0,
        withdrawal: lexicon::count_matches(lower, WITHDRAWAL) > 0,
    }
}

/// Fixed (emotion, intensity band) → response depth table.
///
/// Crisis-leaning emotions at high intensity call for grounding before any
/// exploration; hope never needs more than a standard response.
#[must_use]
pub fn depth_for(emotion: Emotion, intensity: u8) -> ResponseDepth {
    match (emotion, intensity) {
        (Emotion::Neutral, _) => ResponseDepth::Light,
        (Emotion::Hope, _) => ResponseDepth::Standard,
        (
            Emotion::Overwhelm | Emotion::Anxiety | Emotion::Shame | Emotion::Numbness,
            8..=MAX_INTENSITY,
        ) => ResponseDepth::Grounding,
        (_, 7..=MAX_INTENSITY) => ResponseDepth::Deep,
        (_, 4..=6) => ResponseDepth::Standard,
        _ => ResponseDepth::Light,
    }
}
