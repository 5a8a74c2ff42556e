//! Degraded-text detection and repair.
//!
//! Tooltip injection adds definition words to every sentence it touches, so
//! a text's reading grade can end up *worse* than before injection. Repair
//! tries the cheapest strategy first and keeps a change only when the grade
//! actually improves:
//!
//! 1. Simplify definitions: first sentence only, at most 12 words.
//! 2. Remove complex tooltips: drop any tooltip whose definition reads
//!    above the grade threshold.

use serde::Serialize;
use solace_core::entities::GlossaryEntry;
use tracing::debug;

use crate::readability;
use crate::tooltip::{self, Tooltip};

/// Definitions are truncated to this many words during simplification.
pub const MAX_DEFINITION_WORDS: usize = 12;

/// Default grade threshold for removing a tooltip outright.
pub const DEFAULT_MAX_DEFINITION_GRADE: f64 = 8.0;

/// Sentences carrying at least this many tooltips are flagged as dense.
pub const DENSE_SENTENCE_TOOLTIPS: usize = 3;

/// Strategy that produced a repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairStrategy {
    SimplifyDefinitions,
    RemoveComplexTooltips,
    NoChange,
}

/// Outcome of one repair attempt.
#[derive(Debug, Clone, Serialize)]
pub struct RepairOutcome {
    pub strategy: RepairStrategy,
    pub grade_before: f64,
    pub grade_after: f64,
    pub improved: bool,
    pub text: String,
}

/// Why a text is considered degraded.
#[derive(Debug, Clone, Serialize)]
pub struct DegradationAnalysis {
    pub grade_baseline: f64,
    pub grade_current: f64,
    pub tooltip_count: usize,
    pub max_sentence_density: usize,
    pub causes: Vec<String>,
}

/// A text is degraded when its grade rose above the pre-injection baseline.
#[must_use]
pub fn is_degraded(grade_baseline: f64, grade_current: f64) -> bool {
    grade_current > grade_baseline
}

/// Analyze a degraded text: which tooltips push the grade up and where.
#[must_use]
pub fn analyze_degradation(text: &str, grade_baseline: f64) -> Option<DegradationAnalysis> {
    let grade_current = readability::grade_of(text);
    if !is_degraded(grade_baseline, grade_current) {
        return None;
    }

    let tooltips = tooltip::extract_tooltips(text);
    let max_density = tooltip::max_sentence_density(text);

    let mut causes = Vec::new();
    if tooltips.iter().any(long_definition) {
        causes.push("definitions_too_long".to_string());
    }
    if tooltips
        .iter()
        .any(|t| t.definition_grade > DEFAULT_MAX_DEFINITION_GRADE)
    {
        causes.push("definitions_too_complex".to_string());
    }
    if max_density >= DENSE_SENTENCE_TOOLTIPS {
        causes.push("sentence_density_too_high".to_string());
    }

    Some(DegradationAnalysis {
        grade_baseline,
        grade_current,
        tooltip_count: tooltips.len(),
        max_sentence_density: max_density,
        causes,
    })
}

/// Simplify a definition: first sentence, capped at
/// [`MAX_DEFINITION_WORDS`] words.
#[must_use]
pub fn simplify_definition(definition: &str) -> String {
    let first_sentence = definition
        .split(['.', '!', '?'])
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(definition);

    let words: Vec<&str> = first_sentence.split_whitespace().collect();
    if words.len() > MAX_DEFINITION_WORDS {
        format!("{}...", words[..MAX_DEFINITION_WORDS].join(" "))
    } else {
        first_sentence.to_string()
    }
}

/// Rewrite every tooltip in the text with a simplified definition.
#[must_use]
pub fn simplify_all_tooltips(text: &str) -> String {
    rebuild_tooltips(text, |term, definition| {
        Some(format!("{{{{{term}||{}}}}}", simplify_definition(definition)))
    })
}

/// Remove tooltips whose definition reads above `max_grade`, leaving the bare
/// term. Returns the cleaned text and the number of tooltips removed.
#[must_use]
pub fn remove_complex_tooltips(text: &str, max_grade: f64) -> (String, usize) {
    let mut removed = 0usize;
    let cleaned = rebuild_tooltips(text, |term, definition| {
        if readability::grade_of(definition) > max_grade {
            removed += 1;
            Some(term.to_string())
        } else {
            None
        }
    });
    (cleaned, removed)
}

/// Repair a degraded text. Tries simplification, then removal; keeps the
/// first variant whose grade improves on the current one.
#[must_use]
pub fn repair_text(text: &str, max_grade: f64) -> RepairOutcome {
    let grade_before = readability::grade_of(text);

    let simplified = simplify_all_tooltips(text);
    let simplified_grade = readability::grade_of(&simplified);
    if simplified_grade < grade_before {
        debug!(grade_before, simplified_grade, "repair: simplified definitions");
        return RepairOutcome {
            strategy: RepairStrategy::SimplifyDefinitions,
            grade_before,
            grade_after: simplified_grade,
            improved: true,
            text: simplified,
        };
    }

    let (stripped, removed) = remove_complex_tooltips(text, max_grade);
    let stripped_grade = readability::grade_of(&stripped);
    if removed > 0 && stripped_grade < grade_before {
        debug!(grade_before, stripped_grade, removed, "repair: removed complex tooltips");
        return RepairOutcome {
            strategy: RepairStrategy::RemoveComplexTooltips,
            grade_before,
            grade_after: stripped_grade,
            improved: true,
            text: stripped,
        };
    }

    RepairOutcome {
        strategy: RepairStrategy::NoChange,
        grade_before,
        grade_after: grade_before,
        improved: false,
        text: text.to_string(),
    }
}

/// Re-inject after repair: strip all tooltips, then inject from the (already
/// deduplicated) glossary. Used when definitions changed upstream.
#[must_use]
pub fn reinject(text: &str, glossary: &[GlossaryEntry]) -> String {
    let bare = tooltip::strip_tooltips(text);
    tooltip::inject_tooltips(&bare, glossary).0
}

fn long_definition(tooltip: &Tooltip) -> bool {
    tooltip.definition_word_count > MAX_DEFINITION_WORDS
}

/// Walk tooltips in order, letting `edit` replace each whole span. `None`
/// keeps the span unchanged.
fn rebuild_tooltips(
    text: &str,
    mut edit: impl FnMut(&str, &str) -> Option<String>,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let Some(open) = rest.find("{{") else { break };
        let Some(close_rel) = rest[open..].find("}}") else {
            break;
        };
        let close = open + close_rel + 2;
        let inner = &rest[open + 2..close - 2];

        out.push_str(&rest[..open]);
        match inner.split_once("||") {
            Some((term, definition)) => {
                let term = term.trim();
                let definition = definition.trim();
                match edit(term, definition) {
                    Some(replacement) => out.push_str(&replacement),
                    None => out.push_str(&rest[open..close]),
                }
            }
            None => out.push_str(&rest[open..close]),
        }
        rest = &rest[close..];
    }
    out.push_str(rest);
    out
}
