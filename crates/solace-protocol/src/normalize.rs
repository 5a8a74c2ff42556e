//! Source file normalization.
//!
//! Knowledge-base exports arrive from word processors with BOMs, smart
//! quotes, and mixed line endings. Every parser in this crate assumes
//! normalized input, so normalization runs first:
//!
//! - Strip a leading BOM
//! - CRLF/CR → LF
//! - Smart quotes → ASCII quotes, en dash → `-`, em dash → `--`,
//!   ellipsis → `...`
//! - Tabs → spaces, runs of spaces collapsed to one
//! - Trailing whitespace stripped per line
//! - Exactly one trailing newline

use serde::Serialize;

/// Sizes before and after normalization, for the CLI report.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeReport {
    pub original_chars: usize,
    pub normalized_chars: usize,
}

/// Normalize export text. Idempotent: normalizing twice yields the same
/// output.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut replaced = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' => replaced.push('\''),
            '\u{201c}' | '\u{201d}' => replaced.push('"'),
            '\u{2013}' => replaced.push('-'),
            '\u{2014}' => replaced.push_str("--"),
            '\u{2026}' => replaced.push_str("..."),
            '\t' => replaced.push_str("    "),
            _ => replaced.push(ch),
        }
    }

    let mut out = String::with_capacity(replaced.len());
    for line in replaced.split('\n') {
        let mut collapsed = String::with_capacity(line.len());
        let mut last_space = false;
        for ch in line.chars() {
            if ch == ' ' {
                if !last_space {
                    collapsed.push(' ');
                }
                last_space = true;
            } else {
                collapsed.push(ch);
                last_space = false;
            }
        }
        out.push_str(collapsed.trim_end());
        out.push('\n');
    }

    let trimmed = out.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}

/// Normalize and report sizes.
#[must_use]
pub fn normalize_with_report(text: &str) -> (String, NormalizeReport) {
    let normalized = normalize_text(text);
    let report = NormalizeReport {
        original_chars: text.chars().count(),
        normalized_chars: normalized.chars().count(),
    };
    (normalized, report)
}
