//! Line-based document sectioning shared by the knowledge-base parsers.
//!
//! The export dialect is marker-driven rather than strict markdown:
//! `=== BANNER ===` lines, `PRACTICE N:` style chunk markers, ATX headings
//! for the practice libraries, and runs of 80+ `=` characters separating
//! concatenated source files. Everything here works on pre-computed line
//! offsets so section bodies are sliced out of the original text without
//! copying line by line.

/// Minimum length of a `=` run that separates concatenated source files.
pub const FILE_DELIMITER_LEN: usize = 80;

/// Pre-compute a mapping from zero-based line index to byte offset.
///
/// `offsets[i]` is the byte offset of the start of line `i`. An extra entry
/// at the end equals `content.len()` for easy range slicing.
#[must_use]
pub fn build_line_offsets(content: &str) -> Vec<usize> {
    let mut offsets = vec![0usize];
    for (i, byte) in content.as_bytes().iter().enumerate() {
        if *byte == b'\n' {
            offsets.push(i + 1);
        }
    }
    if offsets.last().copied() != Some(content.len()) {
        offsets.push(content.len());
    }
    offsets
}

/// Slice `content` from `start_line` (inclusive) to `end_line` (exclusive)
/// using pre-computed line offsets.
#[must_use]
pub fn slice_lines<'a>(
    content: &'a str,
    line_offsets: &[usize],
    start_line: usize,
    end_line: usize,
) -> &'a str {
    let byte_start = line_offsets
        .get(start_line)
        .copied()
        .unwrap_or(content.len());
    let byte_end = line_offsets.get(end_line).copied().unwrap_or(content.len());
    if byte_start >= byte_end {
        return "";
    }
    &content[byte_start..byte_end]
}

/// Check whether a line is a file delimiter (a run of 80+ `=` characters).
#[must_use]
pub fn is_file_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= FILE_DELIMITER_LEN && trimmed.chars().all(|c| c == '=')
}

/// Split a combined export into per-file segments on delimiter lines.
#[must_use]
pub fn split_on_file_delimiters(content: &str) -> Vec<&str> {
    let line_offsets = build_line_offsets(content);
    let lines: Vec<&str> = content.lines().collect();

    let mut segments = Vec::new();
    let mut segment_start = 0usize;
    for (i, line) in lines.iter().enumerate() {
        if is_file_delimiter(line) {
            let segment = slice_lines(content, &line_offsets, segment_start, i);
            if !segment.trim().is_empty() {
                segments.push(segment);
            }
            segment_start = i + 1;
        }
    }
    let tail = slice_lines(content, &line_offsets, segment_start, lines.len());
    if !tail.trim().is_empty() {
        segments.push(tail);
    }
    segments
}

/// Extract the title from a `=== BANNER ===` line, if it is one.
///
/// Accepts an optional `PATTERN:` prefix inside the banner:
/// `=== PATTERN: COMPARISON COLLISION ===` yields `COMPARISON COLLISION`.
#[must_use]
pub fn banner_title(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix("===")?;
    let inner = inner.trim_end_matches('=').trim();
    if inner.is_empty() {
        return None;
    }
    let inner = inner
        .strip_prefix("PATTERN:")
        .map_or(inner, str::trim_start);
    Some(inner)
}

/// ATX heading level (number of leading `#`, 1–6), or `None`.
#[must_use]
pub fn atx_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) && trimmed.chars().nth(hashes).is_none_or(|c| c == ' ') {
        Some(hashes)
    } else {
        None
    }
}

/// Clean title text of an ATX heading line.
#[must_use]
pub fn atx_text(line: &str) -> String {
    line.trim()
        .trim_start_matches('#')
        .trim()
        .trim_end_matches('#')
        .trim()
        .to_string()
}

/// Value of a `# KEY: value` header comment line, if the key matches.
#[must_use]
pub fn header_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.trim().strip_prefix("# ")?;
    let rest = rest.strip_prefix(key)?;
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim())
}
