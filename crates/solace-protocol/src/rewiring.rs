//! Parser for the neural-rewiring matrix file.
//!
//! The matrix covers pattern × temperament: `## N. PATTERN NAME PROTOCOLS`
//! headings introduce a pattern, `### PATTERN + WARRIOR TEMPERAMENT`
//! headings pick the temperament, and each practice is a level-4 heading:
//!
//! ```text
//! #### Practice 2: Blinder Walk Practice (20 minutes, 3x/week)
//! **Why This Rewires the Pattern**: ...
//! **How to Do It**: ...
//! **Expected Outcome**: ...
//! ```
//!
//! Emergency variants use `#### Emergency Protocol: Title` with
//! `**When to Use**:` and `**What to Do**:` fields instead.

use solace_core::entities::KnowledgeChunk;
use solace_core::enums::{ChunkCategory, Temperament};
use solace_core::ids;

use crate::error::ProtocolError;
use crate::infer;
use crate::sections;

/// Field markers recognized inside a practice block. Extraction for one
/// field stops at the next marker or a `---` rule.
const FIELD_MARKERS: &[&str] = &[
    "**Why This Rewires the Pattern**:",
    "**How to Do It**:",
    "**What to Do**:",
    "**Expected Outcome**:",
    "**When to Use**:",
];

/// One practice cell of the matrix, before flattening into a chunk.
#[derive(Debug)]
struct MatrixPractice {
    pattern: String,
    temperament: Option<Temperament>,
    title: String,
    is_emergency: bool,
    time_min: Option<u32>,
    time_max: Option<u32>,
    frequency: String,
    body: String,
}

/// Parse the rewiring matrix into knowledge chunks.
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidStructure`] when no pattern headings are
/// found.
pub fn parse_rewiring_protocols(
    content: &str,
    source_file: &str,
) -> Result<Vec<KnowledgeChunk>, ProtocolError> {
    let practices = collect_practices(content)?;

    let mut chunks = Vec::with_capacity(practices.len());
    for (index, practice) in practices.iter().enumerate() {
        let chunk_number = u32::try_from(index).unwrap_or(u32::MAX) + 1;
        chunks.push(practice_to_chunk(practice, source_file, chunk_number));
    }
    Ok(chunks)
}

fn collect_practices(content: &str) -> Result<Vec<MatrixPractice>, ProtocolError> {
    let lines: Vec<&str> = content.lines().collect();
    let line_offsets = sections::build_line_offsets(content);

    let mut practices = Vec::new();
    let mut current_pattern: Option<String> = None;
    let mut current_temperament: Option<Temperament> = None;
    let mut saw_pattern_heading = false;

    let mut i = 0usize;
    while i < lines.len() {
        let line = lines[i];
        match sections::atx_level(line) {
            Some(2) => {
                if let Some(pattern) = pattern_heading(&sections::atx_text(line)) {
                    current_pattern = Some(pattern);
                    current_temperament = None;
                    saw_pattern_heading = true;
                }
                i += 1;
            }
            Some(3) => {
                if let Some(temperament) = temperament_heading(&sections::atx_text(line)) {
                    current_temperament = Some(temperament);
                }
                i += 1;
            }
            Some(4) => {
                let heading = sections::atx_text(line);
                // Body runs to the next heading of level <= 4.
                let mut end = i + 1;
                while end < lines.len()
                    && sections::atx_level(lines[end]).is_none_or(|level| level > 4)
                {
                    end += 1;
                }
                let body = sections::slice_lines(content, &line_offsets, i, end)
                    .trim()
                    .to_string();

                if let Some(practice) = practice_from_heading(
                    &heading,
                    body,
                    current_pattern.as_deref(),
                    current_temperament,
                ) {
                    practices.push(practice);
                }
                i = end;
            }
            _ => i += 1,
        }
    }

    if !saw_pattern_heading {
        return Err(ProtocolError::InvalidStructure(
            "no pattern headings (## N. NAME PROTOCOLS) found".to_string(),
        ));
    }
    Ok(practices)
}

/// `8. COMPARISON CATASTROPHE PROTOCOLS` → `comparison_catastrophe`.
fn pattern_heading(text: &str) -> Option<String> {
    let digits = text.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = text[digits..].strip_prefix('.')?.trim();
    let name = rest.strip_suffix("PROTOCOLS").unwrap_or(rest).trim();
    if name.is_empty() {
        return None;
    }
    Some(infer::normalize_pattern_name(name))
}

/// `COMPARISON CATASTROPHE + WARRIOR TEMPERAMENT` → `Warrior`.
fn temperament_heading(text: &str) -> Option<Temperament> {
    let (_, right) = text.split_once('+')?;
    let word = right.trim().split_whitespace().next()?;
    match word.to_ascii_uppercase().as_str() {
        "WARRIOR" => Some(Temperament::Warrior),
        "SAGE" => Some(Temperament::Sage),
        "CONNECTOR" => Some(Temperament::Connector),
        "BUILDER" => Some(Temperament::Builder),
        _ => None,
    }
}

fn practice_from_heading(
    heading: &str,
    body: String,
    pattern: Option<&str>,
    temperament: Option<Temperament>,
) -> Option<MatrixPractice> {
    let (title, is_emergency) = if let Some(rest) = heading.strip_prefix("Emergency Protocol:") {
        (rest.trim().to_string(), true)
    } else if let Some(rest) = heading.strip_prefix("Practice") {
        let rest = rest.trim_start();
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        let rest = rest[digits..].strip_prefix(':')?;
        (rest.trim().to_string(), false)
    } else {
        return None;
    };

    let (time_min, time_max, frequency) = title_schedule(&title);

    Some(MatrixPractice {
        pattern: pattern.unwrap_or("unknown").to_string(),
        temperament,
        title,
        is_emergency,
        time_min,
        time_max,
        frequency,
        body,
    })
}

/// Extract `(10 minutes, daily)` style schedules from a practice title.
///
/// `varies` yields no time commitment. Missing parenthetical yields
/// `as_needed`.
fn title_schedule(title: &str) -> (Option<u32>, Option<u32>, String) {
    let Some(open) = title.rfind('(') else {
        return (None, None, "as_needed".to_string());
    };
    let Some(close) = title[open..].find(')') else {
        return (None, None, "as_needed".to_string());
    };
    let inner = &title[open + 1..open + close];

    let (time_part, freq_part) = inner
        .split_once(',')
        .map_or((inner, ""), |(a, b)| (a, b));

    let time_token = time_part.trim();
    let minutes = if time_token.to_lowercase().starts_with("varies") {
        None
    } else {
        let digits = time_token
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>();
        digits.parse::<u32>().ok()
    };

    let frequency = {
        let f = freq_part.trim();
        if f.is_empty() {
            "as_needed".to_string()
        } else {
            f.to_string()
        }
    };

    (minutes, minutes, frequency)
}

/// Pull a named field's text from the practice body.
fn extract_field(body: &str, marker: &str) -> Option<String> {
    let start = body.find(marker)? + marker.len();
    let rest = &body[start..];

    let mut end = rest.len();
    for other in FIELD_MARKERS {
        if let Some(idx) = rest.find(other) {
            end = end.min(idx);
        }
    }
    if let Some(idx) = rest.find("\n---") {
        end = end.min(idx);
    }

    let value = rest[..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn practice_to_chunk(
    practice: &MatrixPractice,
    source_file: &str,
    chunk_number: u32,
) -> KnowledgeChunk {
    let how = if practice.is_emergency {
        extract_field(&practice.body, "**What to Do**:")
    } else {
        extract_field(&practice.body, "**How to Do It**:")
    };
    let why = extract_field(&practice.body, "**Why This Rewires the Pattern**:");
    let outcome = extract_field(&practice.body, "**Expected Outcome**:");

    let temperaments = practice
        .temperament
        .map_or_else(|| vec![Temperament::All], |t| vec![t]);

    let difficulty = infer::difficulty_from_schedule(
        practice.time_min,
        &practice.frequency,
        practice.is_emergency,
    );

    // Clinical framing gets the mechanism, user framing the outcome.
    let clinical_framing = why;
    let user_framing = outcome;

    let tokens_approx = u32::try_from(practice.body.len() / 4).unwrap_or(u32::MAX);

    KnowledgeChunk {
        id: ids::chunk_id(source_file, chunk_number),
        source_file: source_file.to_string(),
        file_number: 7,
        chunk_number,
        text: how.map_or_else(|| practice.body.clone(), |h| format!("{}\n\n{h}", practice.title)),
        summary: practice.title.clone(),
        category: if practice.is_emergency {
            ChunkCategory::EmergencyProtocol
        } else {
            ChunkCategory::NeuralRewiring
        },
        patterns: vec![practice.pattern.clone()],
        temperaments,
        time_min: practice.time_min,
        time_max: practice.time_max,
        difficulty,
        is_emergency: practice.is_emergency,
        frequency: practice.frequency.clone(),
        clinical_framing,
        user_framing,
        states_created: Vec::new(),
        kb_category: Some("neural-rewiring".to_string()),
        tokens_approx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use solace_core::enums::Difficulty;

    const MATRIX: &str = "\
# Neural Rewiring Protocols

## 8. COMPARISON CATASTROPHE PROTOCOLS

### COMPARISON CATASTROPHE + WARRIOR TEMPERAMENT

#### Practice 1: Personal Best Tracking (10 minutes, daily)
**Why This Rewires the Pattern**: Shifts the reference point from others to
your own trajectory.
**How to Do It**: Each evening log one metric you beat from yesterday.
**Expected Outcome**: Comparison urges drop within two weeks.

#### Practice 2: Blinder Walk Practice (20 minutes, 3x/week)
**Why This Rewires the Pattern**: Removes the trigger feed entirely.
**How to Do It**: Walk without your phone. Notice three real things.
**Expected Outcome**: Less reflexive reaching for the feed.

### COMPARISON CATASTROPHE + SAGE TEMPERAMENT

#### Practice 1: Social Media Detox Protocol (varies, ongoing)
**Why This Rewires the Pattern**: Starves the comparison loop of input.
**How to Do It**: Remove one app for seven days; journal what surfaces.
**Expected Outcome**: Quieter baseline, clearer own goals.

#### Emergency Protocol: Scroll Spiral Interrupt
**When to Use**: Mid-scroll, when the chest tightens.
**What to Do**: Lock the phone, stand up, and name what you were avoiding.

---
";

    #[test]
    fn collects_all_matrix_cells() {
        let chunks = parse_rewiring_protocols(MATRIX, "neural-rewiring-normalized.txt").unwrap();
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| c.patterns == vec!["comparison_catastrophe".to_string()]));
        assert_eq!(chunks[0].temperaments, vec![Temperament::Warrior]);
        assert_eq!(chunks[2].temperaments, vec![Temperament::Sage]);
    }

    #[test]
    fn schedule_parsing_from_titles() {
        let chunks = parse_rewiring_protocols(MATRIX, "neural-rewiring-normalized.txt").unwrap();
        assert_eq!(chunks[0].time_min, Some(10));
        assert_eq!(chunks[0].frequency, "daily");
        assert_eq!(chunks[1].time_min, Some(20));
        assert_eq!(chunks[1].frequency, "3x/week");
        assert_eq!(chunks[2].time_min, None);
        assert_eq!(chunks[2].frequency, "ongoing");
    }

    #[test]
    fn difficulty_follows_schedule_rules() {
        let chunks = parse_rewiring_protocols(MATRIX, "neural-rewiring-normalized.txt").unwrap();
        // 10 min daily -> intermediate; varies -> intermediate; emergency -> beginner
        assert_eq!(chunks[0].difficulty, Difficulty::Intermediate);
        assert_eq!(chunks[2].difficulty, Difficulty::Intermediate);
        assert_eq!(chunks[3].difficulty, Difficulty::Beginner);
    }

    #[test]
    fn emergency_cell_uses_what_to_do() {
        let chunks = parse_rewiring_protocols(MATRIX, "neural-rewiring-normalized.txt").unwrap();
        let emergency = &chunks[3];
        assert!(emergency.is_emergency);
        assert_eq!(emergency.category, ChunkCategory::EmergencyProtocol);
        assert_eq!(emergency.summary, "Scroll Spiral Interrupt");
        assert!(emergency.text.contains("Lock the phone"));
        assert!(!emergency.text.contains("**When to Use**"));
    }

    #[test]
    fn framing_fields_come_from_why_and_outcome() {
        let chunks = parse_rewiring_protocols(MATRIX, "neural-rewiring-normalized.txt").unwrap();
        assert!(
            chunks[0]
                .clinical_framing
                .as_deref()
                .unwrap()
                .starts_with("Shifts the reference point")
        );
        assert!(
            chunks[0]
                .user_framing
                .as_deref()
                .unwrap()
                .starts_with("Comparison urges drop")
        );
    }

    #[test]
    fn no_pattern_headings_is_an_error() {
        let err = parse_rewiring_protocols("# Just a title\n\nBody.\n", "x.txt").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidStructure(_)));
    }

    #[test]
    fn ids_are_sequential_and_deterministic() {
        let chunks = parse_rewiring_protocols(MATRIX, "neural-rewiring-normalized.txt").unwrap();
        assert_eq!(chunks[0].id, "chk_neural-rewiring-normalized_001");
        assert_eq!(chunks[3].id, "chk_neural-rewiring-normalized_004");
    }
}
