//! Serde roundtrip and schema-generation tests for the entity types.

use pretty_assertions::assert_eq;
use schemars::schema_for;
use solace_core::entities::{GlossaryEntry, KnowledgeChunk};
use solace_core::enums::{ChunkCategory, Difficulty, Temperament};
use solace_core::ids;

fn sample_chunk() -> KnowledgeChunk {
    KnowledgeChunk {
        id: ids::chunk_id("kb-05-emergency-tools.md", 3),
        source_file: "kb-05-emergency-tools.md".into(),
        file_number: 5,
        chunk_number: 3,
        text: "EMERGENCY TOOL 3: 60-Second Reset\nBreathe in for four counts.".into(),
        summary: "60-Second Reset".into(),
        category: ChunkCategory::EmergencyProtocol,
        patterns: vec!["decision_fatigue".into()],
        temperaments: vec![Temperament::All],
        time_min: Some(1),
        time_max: Some(1),
        difficulty: Difficulty::Beginner,
        is_emergency: true,
        frequency: "as-needed".into(),
        clinical_framing: Some("Acute parasympathetic downshift".into()),
        user_framing: Some("A fast way to settle your body".into()),
        states_created: vec!["calm".into()],
        kb_category: Some("emergency-tools".into()),
        tokens_approx: 16,
    }
}

#[test]
fn chunk_roundtrips_through_json() {
    let chunk = sample_chunk();
    let json = serde_json::to_string_pretty(&chunk).unwrap();
    let recovered: KnowledgeChunk = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, chunk);
}

#[test]
fn chunk_json_uses_expected_field_names() {
    let value = serde_json::to_value(sample_chunk()).unwrap();
    assert_eq!(value["category"], "emergency-protocol");
    assert_eq!(value["difficulty"], "beginner");
    assert_eq!(value["temperaments"][0], "all");
    assert_eq!(value["id"], "chk_kb-05-emergency-tools_003");
}

#[test]
fn glossary_entry_roundtrips_with_missing_fields() {
    let entry = GlossaryEntry {
        term: "vagus nerve".into(),
        category: "neuroscience".into(),
        clinical_definition: Some("Cranial nerve regulating rest state".into()),
        user_friendly: None,
        analogy: None,
        why_it_matters: None,
        example_sentence: None,
        reading_level: Some(9.4),
    };
    let json = serde_json::to_string(&entry).unwrap();
    let recovered: GlossaryEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, entry);
    assert_eq!(
        recovered.tooltip_definition(),
        Some("Cranial nerve regulating rest state")
    );
}

#[test]
fn schemas_generate_for_entities() {
    let chunk_schema = serde_json::to_value(schema_for!(KnowledgeChunk)).unwrap();
    assert!(chunk_schema["properties"]["patterns"].is_object());

    let entry_schema = serde_json::to_value(schema_for!(GlossaryEntry)).unwrap();
    assert!(entry_schema["properties"]["term"].is_object());
}
