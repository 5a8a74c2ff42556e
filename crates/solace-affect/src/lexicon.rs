//! Fixed phrase tables for affect classification.
//!
//! Twelve tables: seven emotion lexicons and five linguistic-marker tables,
//! plus the intensifier list used for intensity scoring. Phrases are matched
//! lowercase at word boundaries; tables are ordered, and order breaks ties.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotion label assigned to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Overwhelm,
    Anxiety,
    Sadness,
    Anger,
    Shame,
    Numbness,
    Hope,
    Neutral,
}

impl Emotion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overwhelm => "overwhelm",
            Self::Anxiety => "anxiety",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Shame => "shame",
            Self::Numbness => "numbness",
            Self::Hope => "hope",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotion lexicons, in tie-break priority order.
pub const EMOTION_LEXICONS: &[(Emotion, &[&str])] = &[
    (
        Emotion::Overwhelm,
        &[
            "overwhelmed",
            "too much",
            "drowning",
            "can't keep up",
            "buried",
            "swamped",
            "on my plate",
            "spread thin",
        ],
    ),
    (
        Emotion::Anxiety,
        &[
            "anxious",
            "worried",
            "panic",
            "racing",
            "on edge",
            "can't stop thinking",
            "what if",
            "nervous",
            "dreading",
        ],
    ),
    (
        Emotion::Sadness,
        &[
            "sad",
            "down lately",
            "crying",
            "tears",
            "lonely",
            "heavy",
            "grieving",
            "miss them",
        ],
    ),
    (
        Emotion::Anger,
        &[
            "angry",
            "furious",
            "frustrated",
            "sick of",
            "fed up",
            "unfair",
            "resent",
        ],
    ),
    (
        Emotion::Shame,
        &[
            "ashamed",
            "embarrassed",
            "failure",
            "not good enough",
            "worthless",
            "humiliated",
            "fraud",
            "letting everyone down",
        ],
    ),
    (
        Emotion::Numbness,
        &[
            "numb",
            "nothing matters",
            "don't care anymore",
            "empty inside",
            "going through the motions",
            "checked out",
            "flat",
        ],
    ),
    (
        Emotion::Hope,
        &[
            "hopeful",
            "better lately",
            "looking forward",
            "proud of",
            "excited",
            "grateful",
            "optimistic",
            "turning a corner",
        ],
    ),
];

/// Minimizing language: the speaker waves the feeling away.
pub const MINIMIZING: &[&str] = &[
    "i guess",
    "it's fine",
    "its fine",
    "not a big deal",
    "no big deal",
    "doesn't matter",
    "it's nothing",
    "could be worse",
    "i'm probably overreacting",
];

/// Catastrophizing language: a single event becomes total collapse.
pub const CATASTROPHIZING: &[&str] = &[
    "ruined",
    "disaster",
    "worst",
    "falling apart",
    "can't handle",
    "too late",
    "it's over",
    "everything is collapsing",
    "beyond repair",
];

/// Self-blame language.
pub const SELF_BLAME: &[&str] = &[
    "my fault",
    "i'm to blame",
    "i ruined",
    "i'm the problem",
    "should have known",
    "i keep failing",
];

/// Absolutist language: always/never framing.
pub const ABSOLUTIST: &[&str] = &[
    "always",
    "never",
    "every time",
    "everyone",
    "no one",
    "nothing works",
    "everything fails",
];

/// Withdrawal language: pulling away from contact.
pub const WITHDRAWAL: &[&str] = &[
    "leave me alone",
    "don't want to talk",
    "what's the point",
    "why bother",
    "i'm done",
    "give up",
    "no point anymore",
];

/// Intensifier words that raise the intensity score.
pub const INTENSIFIERS: &[&str] = &[
    "so",
    "really",
    "completely",
    "totally",
    "extremely",
    "absolutely",
    "constantly",
    "incredibly",
];

/// Count the phrases of `table` present in `lower` (word-boundary matches).
#[must_use]
pub fn count_matches(lower: &str, table: &[&str]) -> usize {
    table
        .iter()
        .filter(|phrase| contains_phrase(lower, phrase))
        .count()
}

/// Check for `phrase` in `lower` at word boundaries.
///
/// Both sides of the match must sit against non-alphanumeric characters, so
/// `sad` does not match inside `dismissed`.
#[must_use]
pub fn contains_phrase(lower: &str, phrase: &str) -> bool {
    let mut search_from = 0usize;
    while let Some(rel) = lower[search_from..].find(phrase) {
        let start = search_from + rel;
        let end = start + phrase.len();

        let before_ok = start == 0
            || lower[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_ascii_alphanumeric());
        let after_ok = end == lower.len()
            || lower[end..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_ascii_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        search_from = end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_matching_respects_word_boundaries() {
        assert!(contains_phrase("i feel sad today", "sad"));
        assert!(!contains_phrase("the case was dismissed", "sad"));
        assert!(contains_phrase("it's fine, i guess.", "i guess"));
        assert!(!contains_phrase("disguised", "i guess"));
    }

    #[test]
    fn phrase_matching_handles_edges() {
        assert!(contains_phrase("sad", "sad"));
        assert!(contains_phrase("so sad!", "sad"));
        assert!(!contains_phrase("", "sad"));
    }

    #[test]
    fn count_matches_counts_distinct_phrases() {
        let lower = "i'm overwhelmed, there is too much on my plate";
        assert_eq!(
            count_matches(lower, EMOTION_LEXICONS[0].1),
            3 // overwhelmed, too much, on my plate
        );
    }

    #[test]
    fn twelve_tables_exist() {
        // Seven emotion lexicons plus five marker tables.
        let marker_tables = [MINIMIZING, CATASTROPHIZING, SELF_BLAME, ABSOLUTIST, WITHDRAWAL];
        assert_eq!(EMOTION_LEXICONS.len() + marker_tables.len(), 12);
    }
}
