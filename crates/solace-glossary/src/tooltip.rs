//! Tooltip markup: `{{term||definition}}`.
//!
//! The web app renders these spans as hover/tap tooltips. This module
//! extracts them for analysis, injects glossary definitions into plain text,
//! and measures per-sentence tooltip density (dense sentences read badly).

use serde::Serialize;
use solace_core::entities::GlossaryEntry;

use crate::readability;

/// A tooltip found in protocol text, with definition readability attached.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Tooltip {
    pub term: String,
    pub definition: String,
    pub definition_len: usize,
    pub definition_word_count: usize,
    pub definition_grade: f64,
}

/// Tooltip count for one sentence.
#[derive(Debug, Clone, Serialize)]
pub struct SentenceDensity {
    pub sentence: String,
    pub tooltip_count: usize,
}

/// Extract all tooltips from text.
#[must_use]
pub fn extract_tooltips(text: &str) -> Vec<Tooltip> {
    let mut tooltips = Vec::new();
    for (_, term, definition) in tooltip_spans(text) {
        let complexity = readability::analyze_text_complexity(&definition);
        tooltips.push(Tooltip {
            definition_len: definition.len(),
            definition_word_count: complexity.word_count,
            definition_grade: readability::flesch_kincaid_grade(complexity),
            term,
            definition,
        });
    }
    tooltips
}

/// Replace every tooltip with its bare term.
#[must_use]
pub fn strip_tooltips(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((range, term, _)) = tooltip_spans(rest).into_iter().next() {
        out.push_str(&rest[..range.0]);
        out.push_str(&term);
        rest = &rest[range.1..];
    }
    out.push_str(rest);
    out
}

/// Inject glossary tooltips into plain text.
///
/// Longest terms match first so `prefrontal cortex` wins over `cortex`. Only
/// the first whole-word occurrence of each term is wrapped, matches inside
/// existing tooltip markup are skipped, and matches never overlap. Returns
/// the new text and the injected terms in document order.
#[must_use]
pub fn inject_tooltips(text: &str, glossary: &[GlossaryEntry]) -> (String, Vec<String>) {
    let lower = text.to_ascii_lowercase();
    let occupied: Vec<(usize, usize)> = tooltip_spans(text)
        .into_iter()
        .map(|(range, _, _)| range)
        .collect();

    let mut sorted: Vec<&GlossaryEntry> = glossary
        .iter()
        .filter(|e| e.tooltip_definition().is_some())
        .collect();
    sorted.sort_by_key(|e| std::cmp::Reverse(e.term.len()));

    let mut replacements: Vec<(usize, usize, String)> = Vec::new();
    for entry in sorted {
        let term_lower = entry.term.to_ascii_lowercase();
        if term_lower.is_empty() {
            continue;
        }
        let Some(definition) = entry.tooltip_definition() else {
            continue;
        };

        let mut search_from = 0usize;
        while let Some(rel) = lower[search_from..].find(&term_lower) {
            let start = search_from + rel;
            let end = start + term_lower.len();
            search_from = end;

            if !is_word_boundary(&lower, start, end) {
                continue;
            }
            let overlaps = occupied.iter().any(|&(s, e)| start < e && s < end)
                || replacements
                    .iter()
                    .any(|(s, e, _)| start < *e && *s < end);
            if overlaps {
                continue;
            }

            let original = &text[start..end];
            replacements.push((start, end, format!("{{{{{original}||{definition}}}}}")));
            break; // first occurrence only
        }
    }

    replacements.sort_by_key(|(start, _, _)| *start);
    let injected: Vec<String> = replacements
        .iter()
        .map(|(start, end, _)| text[*start..*end].to_string())
        .collect();

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for (start, end, replacement) in &replacements {
        out.push_str(&text[cursor..*start]);
        out.push_str(replacement);
        cursor = *end;
    }
    out.push_str(&text[cursor..]);

    (out, injected)
}

/// Count tooltips per sentence. Sentences are split on `.`/`!`/`?`.
#[must_use]
pub fn sentence_density(text: &str) -> Vec<SentenceDensity> {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .map(|sentence| SentenceDensity {
            sentence: sentence.trim().to_string(),
            tooltip_count: sentence.matches("{{").count(),
        })
        .collect()
}

/// Highest tooltip count in any single sentence.
#[must_use]
pub fn max_sentence_density(text: &str) -> usize {
    sentence_density(text)
        .iter()
        .map(|d| d.tooltip_count)
        .max()
        .unwrap_or(0)
}

/// Locate tooltip spans: `(byte range, term, definition)` per tooltip.
fn tooltip_spans(text: &str) -> Vec<((usize, usize), String, String)> {
    let mut spans = Vec::new();
    let mut search_from = 0usize;
    while let Some(rel) = text[search_from..].find("{{") {
        let open = search_from + rel;
        let Some(close_rel) = text[open..].find("}}") else {
            break;
        };
        let close = open + close_rel + 2;
        let inner = &text[open + 2..close - 2];
        if let Some((term, definition)) = inner.split_once("||") {
            spans.push((
                (open, close),
                term.trim().to_string(),
                definition.trim().to_string(),
            ));
        }
        search_from = close;
    }
    spans
}

fn is_word_boundary(lower: &str, start: usize, end: usize) -> bool {
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
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(term: &str, definition: &str) -> GlossaryEntry {
        GlossaryEntry {
            term: term.into(),
            category: "neuroscience".into(),
            clinical_definition: None,
            user_friendly: Some(definition.into()),
            analogy: None,
            why_it_matters: None,
            example_sentence: None,
            reading_level: None,
        }
    }

    #[test]
    fn extracts_tooltips_with_definition_stats() {
        let text = "Your {{vagus nerve||built-in calming system}} responds to slow breath.";
        let tooltips = extract_tooltips(text);
        assert_eq!(tooltips.len(), 1);
        assert_eq!(tooltips[0].term, "vagus nerve");
        assert_eq!(tooltips[0].definition, "built-in calming system");
        assert_eq!(tooltips[0].definition_word_count, 4);
    }

    #[test]
    fn strip_replaces_markup_with_terms() {
        let text = "Your {{vagus nerve||calming system}} and {{cortisol||stress messenger}}.";
        assert_eq!(strip_tooltips(text), "Your vagus nerve and cortisol.");
    }

    #[test]
    fn injects_first_whole_word_occurrence_only() {
        let glossary = vec![entry("cortisol", "your stress messenger")];
        let text = "Cortisol rises under stress. High cortisol lingers.";
        let (out, injected) = inject_tooltips(text, &glossary);
        assert_eq!(
            out,
            "{{Cortisol||your stress messenger}} rises under stress. High cortisol lingers."
        );
        assert_eq!(injected, vec!["Cortisol".to_string()]);
    }

    #[test]
    fn longer_terms_win_over_substrings() {
        let glossary = vec![
            entry("cortex", "outer brain layer"),
            entry("prefrontal cortex", "planning center"),
        ];
        let text = "The prefrontal cortex plans ahead.";
        let (out, _) = inject_tooltips(text, &glossary);
        assert_eq!(out, "The {{prefrontal cortex||planning center}} plans ahead.");
    }

    #[test]
    fn does_not_inject_inside_existing_markup() {
        let glossary = vec![entry("vagus nerve", "new definition")];
        let text = "Your {{vagus nerve||old definition}} stays as is.";
        let (out, injected) = inject_tooltips(text, &glossary);
        assert_eq!(out, text);
        assert!(injected.is_empty());
    }

    #[test]
    fn partial_word_matches_are_skipped() {
        let glossary = vec![entry("ism", "a belief system")];
        let text = "Optimism is not an ism here.";
        let (out, _) = inject_tooltips(text, &glossary);
        assert_eq!(out, "Optimism is not an {{ism||a belief system}} here.");
    }

    #[test]
    fn density_counts_per_sentence() {
        let text = "One {{a||x}} two {{b||y}}. Clean sentence. One {{c||z}} more!";
        let densities = sentence_density(text);
        assert_eq!(densities.len(), 3);
        assert_eq!(densities[0].tooltip_count, 2);
        assert_eq!(densities[1].tooltip_count, 0);
        assert_eq!(densities[2].tooltip_count, 1);
        assert_eq!(max_sentence_density(text), 2);
    }

    #[test]
    fn unterminated_markup_is_ignored() {
        let text = "Broken {{vagus nerve|| no close";
        assert!(extract_tooltips(text).is_empty());
        assert_eq!(strip_tooltips(text), text);
    }
}
