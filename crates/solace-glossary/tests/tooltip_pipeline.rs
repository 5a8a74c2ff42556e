//! Inject → validate → repair round trips over realistic protocol text.

use pretty_assertions::assert_eq;
use solace_core::entities::GlossaryEntry;
use solace_glossary::repair::{self, RepairStrategy};
use solace_glossary::tooltip;
use solace_glossary::{dedupe, readability};

fn entry(term: &str, user_friendly: &str, clinical: &str) -> GlossaryEntry {
    GlossaryEntry {
        term: term.into(),
        category: "neuroscience".into(),
        clinical_definition: Some(clinical.into()),
        user_friendly: Some(user_friendly.into()),
        analogy: None,
        why_it_matters: None,
        example_sentence: None,
        reading_level: Some(6.0),
    }
}

const PROTOCOL: &str = "\
When cortisol spikes, your amygdala takes over. Slow breathing tells the \
vagus nerve it is safe to downshift. Do this for one minute.";

#[test]
fn injection_round_trip_preserves_plain_text() {
    let glossary = vec![
        entry("cortisol", "your stress messenger", "primary glucocorticoid"),
        entry("amygdala", "your brain's alarm center", "limbic threat detector"),
        entry("vagus nerve", "your built-in brake", "tenth cranial nerve"),
    ];

    let (injected, terms) = tooltip::inject_tooltips(PROTOCOL, &glossary);
    assert_eq!(terms.len(), 3);
    assert_eq!(tooltip::extract_tooltips(&injected).len(), 3);

    // Stripping the markup restores the original text exactly.
    assert_eq!(tooltip::strip_tooltips(&injected), PROTOCOL);
}

#[test]
fn deduped_glossary_feeds_injection() {
    let glossary = vec![
        entry("Cortisol", "your stress messenger", "primary glucocorticoid"),
        GlossaryEntry {
            user_friendly: None,
            ..entry("cortisol", "", "primary glucocorticoid")
        },
    ];
    let (deduped, report) = dedupe::dedupe_glossary(glossary);
    assert_eq!(report.duplicates_removed, 1);

    let (injected, terms) = tooltip::inject_tooltips(PROTOCOL, &deduped);
    assert_eq!(terms, vec!["cortisol".to_string()]);
    assert!(injected.contains("{{cortisol||your stress messenger}}"));
}

#[test]
fn grade_rises_with_dense_definitions_and_repair_recovers() {
    let baseline = readability::grade_of(PROTOCOL);

    let verbose = vec![
        entry(
            "cortisol",
            "the primary glucocorticoid hormone synthesized by adrenal cortex tissue under hypothalamic pituitary regulation",
            "glucocorticoid",
        ),
        entry(
            "amygdala",
            "a bilateral subcortical limbic structure orchestrating physiological threat perception and autonomic mobilization",
            "limbic nucleus",
        ),
    ];
    let (injected, _) = tooltip::inject_tooltips(PROTOCOL, &verbose);
    let degraded_grade = readability::grade_of(&injected);
    assert!(repair::is_degraded(baseline, degraded_grade));

    let analysis = repair::analyze_degradation(&injected, baseline).expect("degraded");
    assert!(!analysis.causes.is_empty());

    let outcome = repair::repair_text(&injected, repair::DEFAULT_MAX_DEFINITION_GRADE);
    assert!(outcome.improved);
    assert!(outcome.grade_after < degraded_grade);
    assert_ne!(outcome.strategy, RepairStrategy::NoChange);
}

#[test]
fn validation_report_flags_dense_text() {
    use solace_core::entities::KnowledgeChunk;
    use solace_core::enums::{ChunkCategory, Difficulty, Temperament};

    let chunk = |id: &str, text: &str| KnowledgeChunk {
        id: id.into(),
        source_file: "kb-03.md".into(),
        file_number: 3,
        chunk_number: 1,
        text: text.into(),
        summary: id.into(),
        category: ChunkCategory::NeuralRewiring,
        patterns: vec![],
        temperaments: vec![Temperament::All],
        time_min: None,
        time_max: None,
        difficulty: Difficulty::Advanced,
        is_emergency: false,
        frequency: "daily".into(),
        clinical_framing: None,
        user_framing: None,
        states_created: vec![],
        kb_category: None,
        tokens_approx: 10,
    };

    let simple = chunk("simple", "Breathe in. Breathe out. Rest now.");
    let dense = chunk(
        "dense",
        "Neurophysiological consolidation necessitates deliberate parasympathetic activation alongside systematic interoceptive attentional redistribution methodology.",
    );

    let metrics = vec![
        readability::validate_chunk(&simple),
        readability::validate_chunk(&dense),
    ];
    let report = readability::ValidationReport::from_metrics(metrics);

    assert_eq!(report.chunk_count, 2);
    assert_eq!(report.needs_simplification_count, 1);
    assert_eq!(report.flagged.len(), 1);
    assert_eq!(report.flagged[0].chunk_id, "dense");
    assert!(report.flagged[0].priority_score >= 50);
}
