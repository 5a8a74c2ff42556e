//! Metadata inference tables and helpers.
//!
//! Classification here is keyword tables over lowercased text: rules as
//! data. Tables are ordered, so inferred lists are deterministic.

use solace_core::enums::{Difficulty, Temperament};

/// Maximum number of applicable patterns kept per chunk.
pub const MAX_PATTERNS: usize = 5;

/// Pattern name → trigger keywords.
pub const PATTERN_KEYWORDS: &[(&str, &[&str])] = &[
    ("burnout", &["burnout", "exhaustion", "depleted", "depletion"]),
    ("impostor_syndrome", &["impostor", "fraud", "fake", "imposter"]),
    ("identity_ceiling", &["ceiling", "roots", "origins", "betrayal"]),
    (
        "comparison",
        &["comparison", "comparing", "scrolling", "highlight reel"],
    ),
    (
        "decision_fatigue",
        &["decision", "paralysis", "overwhelm", "overthinking"],
    ),
    (
        "execution_breakdown",
        &["execution", "abandoner", "quit", "90%"],
    ),
    (
        "motivation_collapse",
        &["motivation", "purpose", "why", "meaningless"],
    ),
    (
        "relationship_erosion",
        &["relationship", "isolation", "lonely", "connection"],
    ),
    ("past_prison", &["past prison", "roots", "origins", "family"]),
    (
        "success_sabotage",
        &["success sabotage", "self-sabotage", "breakthrough"],
    ),
    (
        "compass_crisis",
        &["compass crisis", "validation", "identity fragmentation"],
    ),
    (
        "loyalty_conflict",
        &["loyalty", "leaving behind", "better than us"],
    ),
    (
        "origin_story_anchor",
        &["origin story", "past defines", "people like me"],
    ),
    (
        "depletion_dedication",
        &["depletion dedication", "sacrifice everything", "rest is weakness"],
    ),
    (
        "relationship_sacrifice",
        &["relationship sacrifice", "collateral damage", "isolation at the top"],
    ),
    (
        "comparison_collision",
        &["comparison collision", "their success", "everyone winning"],
    ),
];

/// Temperament → trigger keywords for research-protocol text.
pub const TEMPERAMENT_KEYWORDS: &[(Temperament, &[&str])] = &[
    (
        Temperament::Warrior,
        &["warrior", "action", "conquest", "battle", "fight", "intensity", "hiit"],
    ),
    (
        Temperament::Sage,
        &["sage", "wisdom", "contemplat", "reflect", "insight", "nature walk"],
    ),
    (
        Temperament::Connector,
        &["connector", "relationship", "connection", "community", "relational"],
    ),
    (
        Temperament::Builder,
        &["builder", "system", "optimiz", "data", "metric", "structured"],
    ),
];

/// Temperament → trigger keywords for daily-practice titles/instructions.
/// Creator-flavored keywords map to Builder (one taxonomy across sources).
pub const PRACTICE_TEMPERAMENT_KEYWORDS: &[(Temperament, &[&str])] = &[
    (
        Temperament::Sage,
        &[
            "prayer", "meditation", "journal", "contemplate", "reflect", "wisdom",
            "learning", "reading", "writing",
        ],
    ),
    (
        Temperament::Warrior,
        &[
            "movement", "workout", "exercise", "action", "strength", "push",
            "discipline", "prostration",
        ],
    ),
    (
        Temperament::Connector,
        &["worship", "community", "social", "blessing", "service", "connection"],
    ),
    (
        Temperament::Builder,
        &["visualization", "create", "imagine", "design", "vision"],
    ),
];

const EMERGENCY_KEYWORDS: &[&str] = &["emergency", "crisis", "60-second", "immediate", "urgent"];

/// Infer applicable patterns from chunk text, capped at [`MAX_PATTERNS`].
#[must_use]
pub fn infer_patterns(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    PATTERN_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(name, _)| (*name).to_string())
        .take(MAX_PATTERNS)
        .collect()
}

/// Infer matching temperaments from chunk text; `all` when nothing matches.
#[must_use]
pub fn infer_temperaments(text: &str) -> Vec<Temperament> {
    let lower = text.to_lowercase();
    let matched: Vec<Temperament> = TEMPERAMENT_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(t, _)| *t)
        .collect();
    if matched.is_empty() {
        vec![Temperament::All]
    } else {
        matched
    }
}

/// Infer a practice temperament from its title and instructions; defaults to
/// sage, matching the contemplative bent of the daily library.
#[must_use]
pub fn infer_practice_temperaments(title: &str, instructions: &str) -> Vec<Temperament> {
    let lower = format!("{title} {instructions}").to_lowercase();
    let matched: Vec<Temperament> = PRACTICE_TEMPERAMENT_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(t, _)| *t)
        .collect();
    if matched.is_empty() {
        vec![Temperament::Sage]
    } else {
        matched
    }
}

/// Extract a time-commitment range in minutes from free text.
///
/// Recognizes `10 minutes` and `5-30 minutes` spans anywhere in the text and
/// returns the overall (min, max). Falls back to (10, 20) when nothing is
/// found, matching the library's typical practice length.
#[must_use]
pub fn extract_time_commitment(text: &str) -> (u32, u32) {
    let spans = minute_spans(&text.to_lowercase());
    if spans.is_empty() {
        return (10, 20);
    }
    let min = spans.iter().map(|&(lo, _)| lo).min().unwrap_or(10);
    let max = spans.iter().map(|&(_, hi)| hi).max().unwrap_or(20);
    (min, max)
}

/// Scan for `N` or `N-M` immediately preceding `min`/`minute`.
fn minute_spans(lower: &str) -> Vec<(u32, u32)> {
    let bytes = lower.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0usize;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let Ok(first) = lower[start..i].parse::<u32>() else {
            continue;
        };
        let mut second = None;
        let mut j = i;
        if j < bytes.len() && bytes[j] == b'-' {
            j += 1;
            let second_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > second_start {
                second = lower[second_start..j].parse::<u32>().ok();
            }
        }
        if second.is_some() {
            i = j;
        }
        // Optional whitespace, then the unit.
        let mut k = i;
        while k < bytes.len() && bytes[k] == b' ' {
            k += 1;
        }
        if lower[k..].starts_with("min") {
            let hi = second.unwrap_or(first);
            spans.push((first.min(hi), first.max(hi)));
        }
    }
    spans
}

/// Infer difficulty from structural complexity of research-protocol text.
///
/// ≥5 numbered steps or multiple labeled options → advanced; ≥3 steps or an
/// explicit `protocol:` section → intermediate; else beginner.
#[must_use]
pub fn infer_difficulty(text: &str) -> Difficulty {
    let lower = text.to_lowercase();
    let steps = text
        .lines()
        .filter(|line| {
            let t = line.trim_start();
            let digits = t.chars().take_while(char::is_ascii_digit).count();
            digits > 0 && t.chars().nth(digits) == Some('.')
        })
        .count();
    let has_protocol = lower.contains("protocol:");
    let has_multiple_options = lower.contains("option 1:") || lower.contains("method 1:");

    if steps >= 5 || has_multiple_options {
        Difficulty::Advanced
    } else if steps >= 3 || has_protocol {
        Difficulty::Intermediate
    } else {
        Difficulty::Beginner
    }
}

/// Difficulty for matrix practices, from schedule rather than structure.
#[must_use]
pub fn difficulty_from_schedule(
    time_min: Option<u32>,
    frequency: &str,
    is_emergency: bool,
) -> Difficulty {
    if is_emergency {
        return Difficulty::Beginner;
    }
    let Some(time_min) = time_min else {
        return Difficulty::Intermediate;
    };
    let freq = frequency.to_lowercase();
    if freq.contains("daily") && time_min >= 20 {
        Difficulty::Advanced
    } else if freq.contains("daily") || freq.contains("week") {
        Difficulty::Intermediate
    } else if time_min <= 10 {
        Difficulty::Beginner
    } else {
        Difficulty::Intermediate
    }
}

/// Difficulty for daily practices, from time commitment alone:
/// <10 min beginner, 10–20 intermediate, >20 advanced.
#[must_use]
pub fn difficulty_from_time(time_min: Option<u32>, time_max: Option<u32>) -> Difficulty {
    let Some(minutes) = time_max.or(time_min) else {
        return Difficulty::Intermediate;
    };
    if minutes < 10 {
        Difficulty::Beginner
    } else if minutes <= 20 {
        Difficulty::Intermediate
    } else {
        Difficulty::Advanced
    }
}

/// Check whether the text describes an emergency intervention.
#[must_use]
pub fn is_emergency(text: &str) -> bool {
    let lower = text.to_lowercase();
    EMERGENCY_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Recommended practice frequency; daily when unstated.
#[must_use]
pub fn practice_frequency(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.contains("daily") || lower.contains("every day") {
        "daily".to_string()
    } else if lower.contains("weekly") || lower.contains("once a week") {
        "weekly".to_string()
    } else if lower.contains("as needed") || lower.contains("when needed") {
        "as-needed".to_string()
    } else {
        "daily".to_string()
    }
}

/// Extract clinical and user-facing framings, when present.
///
/// The dual-framing convention in the knowledge base:
/// `**Internal (Clinical)**: "..."` and `**External (User-facing)**: "..."`.
#[must_use]
pub fn extract_dual_framing(text: &str) -> (Option<String>, Option<String>) {
    (
        quoted_after(text, "**Internal (Clinical)**:"),
        quoted_after(text, "**External (User-facing)**:"),
    )
}

/// Text between the first pair of quotes following `marker`.
fn quoted_after(text: &str, marker: &str) -> Option<String> {
    let idx = text.find(marker)?;
    let rest = &text[idx + marker.len()..];
    let open = rest.find(['"', '\''])?;
    let quote = rest[open..].chars().next()?;
    let inner = &rest[open + quote.len_utf8()..];
    let close = inner.find(quote)?;
    let value = inner[..close].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Normalize a banner pattern name to a snake_case identifier.
#[must_use]
pub fn normalize_pattern_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn patterns_match_keywords_in_table_order() {
        let text = "Burnout and exhaustion feed the comparison trap of endless scrolling.";
        let patterns = infer_patterns(text);
        assert_eq!(patterns, vec!["burnout".to_string(), "comparison".to_string()]);
    }

    #[test]
    fn patterns_are_capped_at_five() {
        let text = "burnout impostor ceiling comparison decision execution motivation";
        assert_eq!(infer_patterns(text).len(), MAX_PATTERNS);
    }

    #[test]
    fn temperaments_default_to_all() {
        assert_eq!(infer_temperaments("nothing relevant"), vec![Temperament::All]);
        assert_eq!(
            infer_temperaments("a structured metric-driven system"),
            vec![Temperament::Builder]
        );
    }

    #[test]
    fn practice_temperaments_default_to_sage() {
        assert_eq!(
            infer_practice_temperaments("Morning Pages", "write three pages"),
            vec![Temperament::Sage]
        );
        assert_eq!(
            infer_practice_temperaments("Gratitude Visualization", "imagine the day"),
            vec![Temperament::Builder]
        );
    }

    #[rstest]
    #[case("takes 5-30 minutes total", (5, 30))]
    #[case("a 10 minute reset", (10, 10))]
    #[case("10 minutes first, then 25 minutes", (10, 25))]
    #[case("no time given", (10, 20))]
    fn time_commitment_extraction(#[case] text: &str, #[case] expected: (u32, u32)) {
        assert_eq!(extract_time_commitment(text), expected);
    }

    #[test]
    fn digits_without_unit_are_ignored() {
        assert_eq!(extract_time_commitment("chapter 12 of the book"), (10, 20));
    }

    #[test]
    fn difficulty_by_structure() {
        let advanced = "1. a\n2. b\n3. c\n4. d\n5. e\n";
        assert_eq!(infer_difficulty(advanced), Difficulty::Advanced);
        let advanced_options = "Option 1: fast\nOption 2: slow\n";
        assert_eq!(infer_difficulty(advanced_options), Difficulty::Advanced);
        let intermediate = "Protocol: breathe\n";
        assert_eq!(infer_difficulty(intermediate), Difficulty::Intermediate);
        assert_eq!(infer_difficulty("just breathe"), Difficulty::Beginner);
    }

    #[rstest]
    #[case(Some(25), "daily", false, Difficulty::Advanced)]
    #[case(Some(10), "daily", false, Difficulty::Intermediate)]
    #[case(Some(30), "3x/week", false, Difficulty::Intermediate)]
    #[case(Some(5), "ongoing", false, Difficulty::Beginner)]
    #[case(None, "ongoing", false, Difficulty::Intermediate)]
    #[case(Some(60), "daily", true, Difficulty::Beginner)]
    fn difficulty_by_schedule(
        #[case] time_min: Option<u32>,
        #[case] frequency: &str,
        #[case] emergency: bool,
        #[case] expected: Difficulty,
    ) {
        assert_eq!(difficulty_from_schedule(time_min, frequency, emergency), expected);
    }

    #[test]
    fn difficulty_by_time() {
        assert_eq!(difficulty_from_time(Some(5), Some(5)), Difficulty::Beginner);
        assert_eq!(difficulty_from_time(Some(10), Some(20)), Difficulty::Intermediate);
        assert_eq!(difficulty_from_time(Some(30), Some(45)), Difficulty::Advanced);
        assert_eq!(difficulty_from_time(None, None), Difficulty::Intermediate);
    }

    #[test]
    fn emergency_detection() {
        assert!(is_emergency("60-second grounding drill"));
        assert!(is_emergency("use in a crisis"));
        assert!(!is_emergency("a calm evening walk"));
    }

    #[test]
    fn frequency_defaults_to_daily() {
        assert_eq!(practice_frequency("do this every day"), "daily");
        assert_eq!(practice_frequency("once a week works"), "weekly");
        assert_eq!(practice_frequency("reach for it as needed"), "as-needed");
        assert_eq!(practice_frequency("whenever"), "daily");
    }

    #[test]
    fn dual_framing_extraction() {
        let text = "**Internal (Clinical)**: \"Cognitive defusion drill\"\n\
                    **External (User-facing)**: \"A way to unhook from a thought\"\n";
        let (clinical, user) = extract_dual_framing(text);
        assert_eq!(clinical.as_deref(), Some("Cognitive defusion drill"));
        assert_eq!(user.as_deref(), Some("A way to unhook from a thought"));
    }

    #[test]
    fn dual_framing_absent() {
        assert_eq!(extract_dual_framing("plain text"), (None, None));
    }

    #[test]
    fn pattern_name_normalization() {
        assert_eq!(normalize_pattern_name("COMPARISON CATASTROPHE"), "comparison_catastrophe");
        assert_eq!(normalize_pattern_name("Past-Prison "), "past_prison");
    }
}
