//! Parser for combined research knowledge-base exports.
//!
//! The staging pipeline concatenates the eight KB files into one document,
//! separating them with 80+ `=` delimiter lines and prefixing each with
//! `# SOURCE FILE:` / `# ORIGINAL PATH:` header comments. Within a file,
//! practices are introduced by `PRACTICE N:` / `TOOL N:` / `AVATAR N:` /
//! `EMERGENCY TOOL N:` markers or by `=== BANNER ===` lines.

use solace_core::entities::KnowledgeChunk;
use solace_core::enums::ChunkCategory;
use solace_core::ids;
use tracing::debug;

use crate::error::ProtocolError;
use crate::infer;
use crate::sections;

/// Discard chunks shorter than this many characters.
const MIN_CHUNK_CHARS: usize = 50;

/// A banner only starts a new chunk once the current one has this many lines,
/// so decorative banners inside a practice don't split it.
const BANNER_MIN_CHUNK_LINES: usize = 10;

/// KB file number → category label.
const KB_CATEGORIES: &[(u32, &str)] = &[
    (1, "core-framework"),
    (2, "avatar-index"),
    (3, "protocol-library"),
    (4, "communication-frameworks"),
    (5, "emergency-tools"),
    (6, "data-coaching"),
    (7, "neural-rewiring"),
    (8, "forensic-integration"),
];

/// Parse a combined research-protocol export into knowledge chunks.
///
/// # Errors
///
/// Returns [`ProtocolError::MissingSourceHeader`] when no section of the
/// document carries a `# SOURCE FILE:` header.
pub fn parse_research_protocols(content: &str) -> Result<Vec<KnowledgeChunk>, ProtocolError> {
    let mut chunks = Vec::new();
    let mut saw_header = false;

    for segment in sections::split_on_file_delimiters(content) {
        let Some(source_file) = segment
            .lines()
            .find_map(|line| sections::header_value(line, "SOURCE FILE"))
        else {
            continue;
        };
        saw_header = true;

        let Some(file_number) = kb_file_number(source_file) else {
            debug!(source_file, "skipping section without kb file number");
            continue;
        };

        let mut chunk_number = 0u32;
        let mut current: Vec<&str> = Vec::new();
        for line in segment.lines() {
            // Header comments describe the section, not its first chunk.
            if sections::header_value(line, "SOURCE FILE").is_some()
                || sections::header_value(line, "ORIGINAL PATH").is_some()
            {
                continue;
            }
            if is_chunk_marker(line, current.len()) && !current.is_empty() {
                flush_chunk(&current, source_file, file_number, &mut chunk_number, &mut chunks);
                current = vec![line];
            } else {
                current.push(line);
            }
        }
        flush_chunk(&current, source_file, file_number, &mut chunk_number, &mut chunks);
    }

    if !saw_header {
        return Err(ProtocolError::MissingSourceHeader);
    }
    Ok(chunks)
}

fn flush_chunk(
    lines: &[&str],
    source_file: &str,
    file_number: u32,
    chunk_number: &mut u32,
    out: &mut Vec<KnowledgeChunk>,
) {
    let text = lines.join("\n");
    if text.trim().len() <= MIN_CHUNK_CHARS {
        return;
    }
    *chunk_number += 1;
    out.push(build_chunk(&text, source_file, file_number, *chunk_number));
}

/// `PRACTICE N:` / `TOOL N:` / `AVATAR N:` / `EMERGENCY TOOL N:` markers, or
/// an uppercase banner once the current chunk is long enough.
fn is_chunk_marker(line: &str, current_len: usize) -> bool {
    if numbered_marker(line, "PRACTICE")
        || numbered_marker(line, "TOOL")
        || numbered_marker(line, "AVATAR")
        || numbered_marker(line, "EMERGENCY TOOL")
    {
        return true;
    }
    current_len > BANNER_MIN_CHUNK_LINES
        && line.starts_with("=== ")
        && line[4..].starts_with(|c: char| c.is_ascii_uppercase())
}

/// Check for `{keyword} {digits}:` at the start of a line.
fn numbered_marker(line: &str, keyword: &str) -> bool {
    let Some(rest) = line.strip_prefix(keyword) else {
        return false;
    };
    let Some(rest) = rest.strip_prefix(' ') else {
        return false;
    };
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && rest[digits..].starts_with(':')
}

fn build_chunk(
    text: &str,
    source_file: &str,
    file_number: u32,
    chunk_number: u32,
) -> KnowledgeChunk {
    let (clinical_framing, user_framing) = infer::extract_dual_framing(text);

    let banner_patterns: Vec<String> = text
        .lines()
        .filter_map(sections::banner_title)
        .map(infer::normalize_pattern_name)
        .collect();

    let mut patterns = infer::infer_patterns(text);
    if patterns.is_empty() {
        patterns = banner_patterns.clone();
        patterns.truncate(infer::MAX_PATTERNS);
    }

    let temperaments = infer::infer_temperaments(text);
    let (time_min, time_max) = infer::extract_time_commitment(text);
    let difficulty = infer::infer_difficulty(text);
    let is_emergency = infer::is_emergency(text);
    let frequency = infer::practice_frequency(text);

    let kb_category = kb_category(file_number);
    let category = resolve_category(kb_category, text, is_emergency);
    let summary = summarize(text, if banner_patterns.is_empty() {
        &patterns
    } else {
        &banner_patterns
    });

    let text = text.trim().to_string();
    let tokens_approx = approx_tokens(&text);

    KnowledgeChunk {
        id: ids::chunk_id(source_file, chunk_number),
        source_file: source_file.to_string(),
        file_number,
        chunk_number,
        text,
        summary,
        category,
        patterns,
        temperaments,
        time_min: Some(time_min),
        time_max: Some(time_max),
        difficulty,
        is_emergency,
        frequency,
        clinical_framing,
        user_framing,
        states_created: Vec::new(),
        kb_category: kb_category.map(str::to_string),
        tokens_approx,
    }
}

/// Extract the KB file number from a `kb-NN-...` file name.
fn kb_file_number(source_file: &str) -> Option<u32> {
    let idx = source_file.find("kb-")?;
    let rest = &source_file[idx + 3..];
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    rest[..digits].parse().ok()
}

fn kb_category(file_number: u32) -> Option<&'static str> {
    KB_CATEGORIES
        .iter()
        .find(|(n, _)| *n == file_number)
        .map(|(_, name)| *name)
}

fn resolve_category(
    kb_category: Option<&str>,
    text: &str,
    is_emergency: bool,
) -> ChunkCategory {
    let kb = kb_category.unwrap_or_default();
    if kb.contains("emergency") || is_emergency {
        ChunkCategory::EmergencyProtocol
    } else if kb.contains("protocol-library") || text.to_lowercase().contains("practice") {
        ChunkCategory::ResearchProtocol
    } else if kb.contains("avatar") {
        ChunkCategory::AvatarDefinition
    } else if kb.contains("communication") {
        ChunkCategory::CommunicationFramework
    } else {
        ChunkCategory::ResearchProtocol
    }
}

/// Concise summary: the first two pattern names title-cased, or the first
/// line truncated to 100 characters.
fn summarize(text: &str, pattern_names: &[String]) -> String {
    if !pattern_names.is_empty() {
        return pattern_names
            .iter()
            .take(2)
            .map(|p| title_case(&p.replace('_', " ")))
            .collect::<Vec<_>>()
            .join(" - ");
    }
    let first_line = text.lines().next().unwrap_or_default();
    first_line.chars().take(100).collect()
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn approx_tokens(text: &str) -> u32 {
    u32::try_from(text.len() / 4).unwrap_or(u32::MAX)
}
