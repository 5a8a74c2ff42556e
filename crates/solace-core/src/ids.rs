//! Id prefix constants and formatting helpers.
//!
//! Chunk and term ids are deterministic: re-parsing the same source yields
//! the same ids, so re-runs upsert instead of duplicating.

/// Prefix for knowledge chunk ids.
pub const PREFIX_CHUNK: &str = "chk";

/// Prefix for glossary term ids.
pub const PREFIX_TERM: &str = "term";

/// Build a deterministic chunk id from its source file and position.
///
/// `chunk_id("kb-03-protocol-library.md", 12)` yields
/// `"chk_kb-03-protocol-library_012"`.
#[must_use]
pub fn chunk_id(source_file: &str, chunk_number: u32) -> String {
    format!("{PREFIX_CHUNK}_{}_{chunk_number:03}", slug(file_stem(source_file)))
}

/// Build a deterministic glossary term id.
#[must_use]
pub fn term_id(term: &str) -> String {
    format!("{PREFIX_TERM}_{}", slug(term))
}

/// Strip a trailing extension from a file name.
fn file_stem(name: &str) -> &str {
    let base = name.rsplit('/').next().unwrap_or(name);
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    }
}

/// Lowercase and reduce to `[a-z0-9-]`, collapsing runs of other characters
/// into single dashes.
fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_dash = true;
    for ch in text.chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
