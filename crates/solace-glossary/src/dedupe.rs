//! Case-insensitive glossary de-duplication.
//!
//! Terms accumulate from several extraction passes, so `Cortisol` and
//! `cortisol` can both appear. Duplicates are grouped by lowercased term and
//! the highest-quality entry wins.

use std::collections::BTreeMap;

use serde::Serialize;
use solace_core::entities::GlossaryEntry;
use tracing::debug;

/// One discarded duplicate, for the report.
#[derive(Debug, Clone, Serialize)]
pub struct DiscardedEntry {
    pub term: String,
    pub kept_term: String,
    pub kept_score: f64,
    pub discarded_score: f64,
}

/// Result of a de-duplication pass.
#[derive(Debug, Clone, Serialize)]
pub struct DedupeReport {
    pub input_terms: usize,
    pub output_terms: usize,
    pub duplicates_removed: usize,
    pub discarded: Vec<DiscardedEntry>,
}

/// Quality score for picking the best duplicate.
///
/// Field presence: user_friendly 10, clinical 8, analogy 7, why_it_matters 6,
/// example_sentence 5; plus definition length / 100; minus half the reading
/// level (lower reads better).
#[must_use]
pub fn entry_quality(entry: &GlossaryEntry) -> f64 {
    let mut score = 0.0;
    if entry.user_friendly.as_deref().is_some_and(|s| !s.is_empty()) {
        score += 10.0;
    }
    if entry
        .clinical_definition
        .as_deref()
        .is_some_and(|s| !s.is_empty())
    {
        score += 8.0;
    }
    if entry.analogy.as_deref().is_some_and(|s| !s.is_empty()) {
        score += 7.0;
    }
    if entry.why_it_matters.as_deref().is_some_and(|s| !s.is_empty()) {
        score += 6.0;
    }
    if entry
        .example_sentence
        .as_deref()
        .is_some_and(|s| !s.is_empty())
    {
        score += 5.0;
    }

    #[allow(clippy::cast_precision_loss)]
    if let Some(user_friendly) = entry.user_friendly.as_deref() {
        score += user_friendly.len() as f64 / 100.0;
    }

    score -= entry.reading_level.unwrap_or(10.0) * 0.5;
    score
}

/// Remove case-insensitive duplicate terms, keeping the best entry of each
/// group. Output is ordered by lowercased term.
#[must_use]
pub fn dedupe_glossary(entries: Vec<GlossaryEntry>) -> (Vec<GlossaryEntry>, DedupeReport) {
    let input_terms = entries.len();
    let mut groups: BTreeMap<String, Vec<GlossaryEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(entry.term.to_lowercase())
            .or_default()
            .push(entry);
    }

    let mut kept = Vec::with_capacity(groups.len());
    let mut discarded = Vec::new();

    for (term_lower, mut group) in groups {
        if group.len() == 1 {
            kept.push(group.remove(0));
            continue;
        }

        debug!(term = %term_lower, count = group.len(), "resolving duplicate glossary term");
        let mut scored: Vec<(f64, GlossaryEntry)> =
            group.into_iter().map(|e| (entry_quality(&e), e)).collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let (best_score, best) = scored.remove(0);
        for (score, entry) in scored {
            discarded.push(DiscardedEntry {
                term: entry.term,
                kept_term: best.term.clone(),
                kept_score: best_score,
                discarded_score: score,
            });
        }
        kept.push(best);
    }

    let report = DedupeReport {
        input_terms,
        output_terms: kept.len(),
        duplicates_removed: discarded.len(),
        discarded,
    };
    (kept, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(term: &str, user_friendly: Option<&str>, reading_level: Option<f64>) -> GlossaryEntry {
        GlossaryEntry {
            term: term.into(),
            category: "neuroscience".into(),
            clinical_definition: Some("clinical".into()),
            user_friendly: user_friendly.map(Into::into),
            analogy: None,
            why_it_matters: None,
            example_sentence: None,
            reading_level,
        }
    }

    #[test]
    fn richer_entry_wins() {
        let sparse = entry("Cortisol", None, Some(6.0));
        let rich = entry("cortisol", Some("Your body's stress messenger"), Some(6.0));

        let (kept, report) = dedupe_glossary(vec![sparse, rich]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].term, "cortisol");
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.discarded[0].term, "Cortisol");
    }

    #[test]
    fn lower_reading_level_breaks_field_ties() {
        let harder = entry("dopamine", Some("Reward chemical"), Some(12.0));
        let easier = entry("Dopamine", Some("Reward chemical"), Some(5.0));

        let (kept, _) = dedupe_glossary(vec![harder, easier]);
        assert_eq!(kept[0].term, "Dopamine");
    }

    #[test]
    fn unique_terms_pass_through() {
        let entries = vec![
            entry("amygdala", Some("Alarm center"), Some(7.0)),
            entry("cortisol", Some("Stress messenger"), Some(7.0)),
        ];
        let (kept, report) = dedupe_glossary(entries);
        assert_eq!(kept.len(), 2);
        assert_eq!(report.input_terms, 2);
        assert_eq!(report.output_terms, 2);
        assert_eq!(report.duplicates_removed, 0);
        // BTreeMap grouping orders output by term.
        assert_eq!(kept[0].term, "amygdala");
    }

    #[test]
    fn quality_scores_field_presence() {
        let full = GlossaryEntry {
            term: "coherence".into(),
            category: "neuroscience".into(),
            clinical_definition: Some("x".into()),
            user_friendly: Some("y".repeat(100)),
            analogy: Some("z".into()),
            why_it_matters: Some("w".into()),
            example_sentence: Some("v".into()),
            reading_level: Some(8.0),
        };
        // 10 + 8 + 7 + 6 + 5 + 100/100 - 8*0.5 = 33.0
        assert!((entry_quality(&full) - 33.0).abs() < 1e-9);
    }
}
