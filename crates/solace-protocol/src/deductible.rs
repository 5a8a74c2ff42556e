//! Parser for the daily practice library.
//!
//! The library is organized into category sections (`### **Faith-Based
//! Practices**`) containing numbered practices (`#### **7\. Evening
//! Examen**`; the export often escapes the period). Each practice
//! carries labelled fields:
//!
//! ```text
//! **Time:** 10-20 minutes **The State It Creates:** calm, clarity
//! **Instructions:**
//! 1. Sit somewhere quiet.
//! **Why it works:** Reviews the day without judgment.
//! ```

use solace_core::entities::KnowledgeChunk;
use solace_core::enums::ChunkCategory;
use solace_core::ids;
use tracing::debug;

use crate::error::ProtocolError;
use crate::infer;
use crate::sections;

/// Section header name → category.
const CATEGORY_MAP: &[(&str, ChunkCategory)] = &[
    ("Traditional Foundation Practices", ChunkCategory::TraditionalFoundation),
    ("Faith-Based Practices", ChunkCategory::FaithBased),
    ("Hybrid Practices", ChunkCategory::HybridPractices),
    ("Monastic Practices", ChunkCategory::MonasticPractices),
    ("Philosophical Practices", ChunkCategory::PhilosophicalPractices),
    ("Neurological Practices", ChunkCategory::NeurologicalPractices),
    ("Integration Practices", ChunkCategory::IntegrationPractices),
];

/// Category → applicable patterns.
const PATTERN_RULES: &[(ChunkCategory, &[&str])] = &[
    (
        ChunkCategory::TraditionalFoundation,
        &["past_prison", "success_sabotage", "compass_crisis", "identity_collision"],
    ),
    (ChunkCategory::FaithBased, &["past_prison", "compass_crisis"]),
    (
        ChunkCategory::HybridPractices,
        &["past_prison", "compass_crisis", "success_sabotage"],
    ),
    (ChunkCategory::MonasticPractices, &["past_prison", "compass_crisis"]),
    (
        ChunkCategory::PhilosophicalPractices,
        &["compass_crisis", "identity_collision"],
    ),
    (
        ChunkCategory::NeurologicalPractices,
        &["success_sabotage", "identity_collision"],
    ),
    (
        ChunkCategory::IntegrationPractices,
        &["past_prison", "success_sabotage", "compass_crisis", "identity_collision"],
    ),
];

/// Parse the daily practice library into knowledge chunks.
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidStructure`] when no practice headers are
/// found.
pub fn parse_deductible_practices(
    content: &str,
    source_file: &str,
) -> Result<Vec<KnowledgeChunk>, ProtocolError> {
    let lines: Vec<&str> = content.lines().collect();
    let line_offsets = sections::build_line_offsets(content);

    let mut chunks = Vec::new();
    let mut current_category = ChunkCategory::TraditionalFoundation;
    let mut chunk_number = 0u32;

    let mut i = 0usize;
    while i < lines.len() {
        let line = lines[i];

        if let Some(name) = section_header(line) {
            if let Some(category) = category_for(&name) {
                current_category = category;
            } else {
                debug!(section = %name, "unmapped category section, keeping previous");
            }
            i += 1;
            continue;
        }

        if practice_header(line).is_some() {
            // Block runs to the next practice, section, or thematic break.
            let mut end = i + 1;
            while end < lines.len()
                && practice_header(lines[end]).is_none()
                && section_header(lines[end]).is_none()
                && lines[end].trim() != "---"
            {
                end += 1;
            }
            let block = sections::slice_lines(content, &line_offsets, i, end).trim();
            if let Some(chunk) = parse_practice(block, current_category, source_file, chunk_number + 1)
            {
                chunk_number += 1;
                chunks.push(chunk);
            }
            i = end;
            continue;
        }

        i += 1;
    }

    if chunks.is_empty() {
        return Err(ProtocolError::InvalidStructure(
            "no practice headers (#### **N. Title**) found".to_string(),
        ));
    }
    Ok(chunks)
}

/// `### **Faith-Based Practices**` → `Faith-Based Practices`.
/// Practice headers (leading digit) are excluded.
fn section_header(line: &str) -> Option<String> {
    if sections::atx_level(line) != Some(3) {
        return None;
    }
    let text = sections::atx_text(line);
    let rest = text.strip_prefix("**")?;
    let end = rest.find("**")?;
    let inner = rest[..end].trim();
    if inner.is_empty() || inner.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    // Drop trailing parenthetical descriptions inside the bold span.
    let inner = inner
        .rfind('(')
        .filter(|_| inner.ends_with(')'))
        .map_or(inner, |idx| inner[..idx].trim_end());
    Some(inner.replace('\\', ""))
}

fn category_for(name: &str) -> Option<ChunkCategory> {
    CATEGORY_MAP
        .iter()
        .find(|(header, _)| *header == name)
        .map(|(_, category)| *category)
}

/// `#### **7\. Evening Examen**` → `(7, "Evening Examen")`.
fn practice_header(line: &str) -> Option<(u32, String)> {
    if sections::atx_level(line) != Some(4) {
        return None;
    }
    let text = sections::atx_text(line);
    let inner = text.strip_prefix("**")?;
    let digits = inner.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let number: u32 = inner[..digits].parse().ok()?;
    let rest = inner[digits..].strip_prefix('\\').unwrap_or(&inner[digits..]);
    let rest = rest.strip_prefix('.')?.trim_start();
    let title = rest.strip_suffix("**").unwrap_or(rest).trim();
    if title.is_empty() {
        return None;
    }
    Some((number, title.to_string()))
}

fn parse_practice(
    block: &str,
    category: ChunkCategory,
    source_file: &str,
    chunk_number: u32,
) -> Option<KnowledgeChunk> {
    let first_line = block.lines().next()?;
    let (_, title) = practice_header(first_line)?;

    let time_str = field_inline(block, "**Time:**");
    let state_str = field_inline(block, "**The State It Creates:**");
    let instructions = field_block(block, "**Instructions:**");

    let (time_min, time_max) = time_str.as_deref().map_or((None, None), parse_time_field);
    let states = state_str.map_or_else(Vec::new, |s| {
        s.split(',')
            .map(|part| part.trim().to_lowercase())
            .filter(|part| !part.is_empty())
            .collect()
    });

    let temperaments = infer::infer_practice_temperaments(&title, instructions.as_deref().unwrap_or(""));
    let difficulty = infer::difficulty_from_time(time_min, time_max);
    let patterns = PATTERN_RULES
        .iter()
        .find(|(c, _)| *c == category)
        .map_or_else(Vec::new, |(_, patterns)| {
            patterns.iter().map(|p| (*p).to_string()).collect()
        });

    let tokens_approx = u32::try_from(block.len() / 4).unwrap_or(u32::MAX);

    Some(KnowledgeChunk {
        id: ids::chunk_id(source_file, chunk_number),
        source_file: source_file.to_string(),
        file_number: 1,
        chunk_number,
        text: block.to_string(),
        summary: title,
        category,
        patterns,
        temperaments,
        time_min,
        time_max,
        difficulty,
        is_emergency: false,
        frequency: "daily".to_string(),
        clinical_framing: None,
        user_framing: None,
        states_created: states,
        kb_category: None,
        tokens_approx,
    })
}

/// Inline field value: text after the marker, stopping at the next `**`
/// marker on the same line.
fn field_inline(block: &str, marker: &str) -> Option<String> {
    let start = block.find(marker)? + marker.len();
    let rest = &block[start..];
    let line = rest.lines().next().unwrap_or_default();
    let value = line.split("**").next().unwrap_or_default().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Block field value: everything after the marker until the next `**Label:**`
/// marker line or end of block.
fn field_block(block: &str, marker: &str) -> Option<String> {
    let start = block.find(marker)? + marker.len();
    let rest = &block[start..];
    let mut collected = Vec::new();
    for line in rest.lines() {
        let trimmed = line.trim();
        if !collected.is_empty() && trimmed.starts_with("**") && trimmed.contains(":**") {
            break;
        }
        collected.push(line.trim());
    }
    let value = collected.join("\n").trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}

/// Parse a time field: `5-30 minutes`, `10 minutes`, `1-4 hours`, `varies`,
/// `Throughout day`.
#[must_use]
pub fn parse_time_field(time_str: &str) -> (Option<u32>, Option<u32>) {
    let lower = time_str.to_lowercase();
    if lower.is_empty() || lower.contains("varies") || lower.contains("throughout") {
        return (None, None);
    }

    let numbers = leading_numbers(&lower);
    let scale = if lower.contains("hour") { 60 } else { 1 };
    match numbers.as_slice() {
        [] => (None, None),
        [single] => (Some(single * scale), Some(single * scale)),
        [lo, hi, ..] => (Some(lo * scale), Some(hi * scale)),
    }
}

/// First one or two numbers in the string, honoring `N-M` ranges.
fn leading_numbers(lower: &str) -> Vec<u32> {
    let mut numbers = Vec::new();
    let bytes = lower.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() && numbers.len() < 2 {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if let Ok(n) = lower[start..i].parse() {
                numbers.push(n);
            }
            // A range continues through `-` or ` - `.
            let mut j = i;
            while j < bytes.len() && bytes[j] == b' ' {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'-' {
                i = j + 1;
                while i < bytes.len() && bytes[i] == b' ' {
                    i += 1;
                }
                continue;
            }
            break;
        }
        i += 1;
    }
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use solace_core::enums::{Difficulty, Temperament};

    const LIBRARY: &str = "\
## Daily Practice Library

### **Traditional Foundation Practices**

#### **1\\. Prayer and Worship**
**Time:** 10-20 minutes **The State It Creates:** calm, connection
**Instructions:**
1. Find a quiet spot.
2. Speak or sit in silence.
**Why it works:** Regular worship anchors identity outside achievement.

#### **2\\. Morning Movement**
**Time:** 30 minutes **The State It Creates:** energy
**Instructions:**
A short workout before any screens.
**Why it works:** Exercise primes dopamine for discipline.

### **Faith-Based Practices** (adapted traditions)

#### **3\\. Evening Examen**
**Time:** varies
**The State It Creates:** clarity
**Instructions:**
Review the day without judgment, journal one line.
**Why it works:** Reflection consolidates learning.
";

    #[test]
    fn parses_practices_with_categories() {
        let chunks = parse_deductible_practices(LIBRARY, "daily-deductible-normalized.md").unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].category, ChunkCategory::TraditionalFoundation);
        assert_eq!(chunks[1].category, ChunkCategory::TraditionalFoundation);
        assert_eq!(chunks[2].category, ChunkCategory::FaithBased);
        assert_eq!(chunks[0].summary, "Prayer and Worship");
        assert_eq!(chunks[2].summary, "Evening Examen");
    }

    #[test]
    fn time_and_states_are_extracted() {
        let chunks = parse_deductible_practices(LIBRARY, "daily-deductible-normalized.md").unwrap();
        assert_eq!(chunks[0].time_min, Some(10));
        assert_eq!(chunks[0].time_max, Some(20));
        assert_eq!(chunks[0].states_created, vec!["calm".to_string(), "connection".to_string()]);
        assert_eq!(chunks[2].time_min, None);
        assert_eq!(chunks[2].states_created, vec!["clarity".to_string()]);
    }

    #[test]
    fn difficulty_follows_time_rule() {
        let chunks = parse_deductible_practices(LIBRARY, "daily-deductible-normalized.md").unwrap();
        assert_eq!(chunks[0].difficulty, Difficulty::Intermediate);
        assert_eq!(chunks[1].difficulty, Difficulty::Advanced);
        assert_eq!(chunks[2].difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn patterns_come_from_category_rules() {
        let chunks = parse_deductible_practices(LIBRARY, "daily-deductible-normalized.md").unwrap();
        assert_eq!(
            chunks[2].patterns,
            vec!["past_prison".to_string(), "compass_crisis".to_string()]
        );
    }

    #[test]
    fn temperaments_infer_from_title_and_instructions() {
        let chunks = parse_deductible_practices(LIBRARY, "daily-deductible-normalized.md").unwrap();
        // "Prayer and Worship" hits sage (prayer) and connector (worship)
        assert!(chunks[0].temperaments.contains(&Temperament::Sage));
        assert!(chunks[0].temperaments.contains(&Temperament::Connector));
        // "Morning Movement" + workout hits warrior
        assert_eq!(chunks[1].temperaments, vec![Temperament::Warrior]);
    }

    #[test]
    fn time_field_parsing() {
        assert_eq!(parse_time_field("5-30 minutes"), (Some(5), Some(30)));
        assert_eq!(parse_time_field("10 minutes"), (Some(10), Some(10)));
        assert_eq!(parse_time_field("1-4 hours"), (Some(60), Some(240)));
        assert_eq!(parse_time_field("2 hours"), (Some(120), Some(120)));
        assert_eq!(parse_time_field("varies"), (None, None));
        assert_eq!(parse_time_field("Throughout day"), (None, None));
    }

    #[test]
    fn escaped_and_plain_periods_both_parse() {
        assert_eq!(
            practice_header("#### **1\\. Prayer and Worship**"),
            Some((1, "Prayer and Worship".to_string()))
        );
        assert_eq!(
            practice_header("#### **12. Box Breathing**"),
            Some((12, "Box Breathing".to_string()))
        );
        assert_eq!(practice_header("#### Practice 1: Not this format"), None);
        assert_eq!(practice_header("### **Faith-Based Practices**"), None);
    }

    #[test]
    fn empty_library_is_an_error() {
        let err = parse_deductible_practices("# Nothing here\n", "x.md").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidStructure(_)));
    }
}
