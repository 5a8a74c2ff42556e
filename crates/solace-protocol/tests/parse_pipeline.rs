//! End-to-end pipeline tests: normalize → parse → stats → fixtures.

use pretty_assertions::assert_eq;
use solace_core::enums::ChunkCategory;
use solace_protocol::normalize::normalize_text;
use solace_protocol::research::parse_research_protocols;
use solace_protocol::stats::ParseStats;
use solace_protocol::{fixtures, sections};

fn messy_export() -> String {
    let delim = "=".repeat(90);
    format!(
        "\u{feff}# SOURCE FILE: kb-05-emergency-tools.md\r\n\
         # ORIGINAL PATH: knowledge-base/kb-05-emergency-tools.md\r\n\
         \r\n\
         EMERGENCY TOOL 1: 60-Second Reset\r\n\
         When the \u{201c}crisis spike\u{201d} hits, breathe in for four counts\tand out\r\n\
         for eight. Repeat for one minute until the body settles.\r\n\
         \r\n\
         {delim}\r\n\
         # SOURCE FILE: kb-03-protocol-library.md\r\n\
         \r\n\
         PRACTICE 1: Comparison Detox (10-20 minutes, daily)\r\n\
         Practice: step away from the highlight reel and write one\r\n\
         personal win \u{2014} however small it feels today.\r\n"
    )
}

#[test]
fn normalized_export_parses_cleanly() {
    let normalized = normalize_text(&messy_export());
    assert!(!normalized.contains('\r'));
    assert!(!normalized.contains('\u{201c}'));

    let chunks = parse_research_protocols(&normalized).unwrap();
    assert_eq!(chunks.len(), 2);

    assert_eq!(chunks[0].category, ChunkCategory::EmergencyProtocol);
    assert!(chunks[0].is_emergency);
    assert_eq!(chunks[0].kb_category.as_deref(), Some("emergency-tools"));

    assert_eq!(chunks[1].category, ChunkCategory::ResearchProtocol);
    assert_eq!(chunks[1].time_min, Some(10));
    assert_eq!(chunks[1].time_max, Some(20));
    assert!(chunks[1].patterns.contains(&"comparison".to_string()));
}

#[test]
fn stats_summarize_the_parse() {
    let normalized = normalize_text(&messy_export());
    let chunks = parse_research_protocols(&normalized).unwrap();
    let stats = ParseStats::compute(&chunks);

    assert_eq!(stats.total_chunks, 2);
    assert_eq!(stats.emergency_count, 1);
    assert_eq!(stats.by_category["emergency-protocol"], 1);
    assert_eq!(stats.by_category["research-protocol"], 1);
    assert_eq!(stats.by_kb_category["emergency-tools"], 1);
    assert_eq!(stats.by_kb_category["protocol-library"], 1);
}

#[test]
fn fixture_of_the_export_reparses() {
    let normalized = normalize_text(&messy_export());
    let fixture = fixtures::research_fixture(&normalized, 1).unwrap();

    let chunks = parse_research_protocols(&fixture).unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].source_file, "kb-05-emergency-tools.md");
}

#[test]
fn delimiter_splitting_survives_normalization() {
    let normalized = normalize_text(&messy_export());
    let segments = sections::split_on_file_delimiters(&normalized);
    assert_eq!(segments.len(), 2);
}
