//! Markdown marker diagnostics.
//!
//! Export round-trips occasionally leave unbalanced `**`/`*`/`_` markers in
//! protocol text, which the app then renders literally. This module counts
//! markers, reports imbalances, and applies the two safe automatic fixes:
//! escaping asterisks in math expressions and dropping a trailing unmatched
//! marker.

use serde::Serialize;

/// Marker counts and balance flags for one text.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerBalance {
    pub asterisks: usize,
    pub bold_markers: usize,
    pub italic_asterisks: usize,
    pub underscores: usize,
    pub bold_balanced: bool,
    pub italic_balanced: bool,
    pub underscores_balanced: bool,
}

impl MarkerBalance {
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.bold_balanced && self.italic_balanced && self.underscores_balanced
    }
}

/// Count markdown markers and identify imbalances.
#[must_use]
pub fn marker_balance(text: &str) -> MarkerBalance {
    let asterisks = text.matches('*').count();
    let bold_markers = count_bold_markers(text);
    let italic_asterisks = asterisks - bold_markers * 2;
    let underscores = text.matches('_').count();

    MarkerBalance {
        asterisks,
        bold_markers,
        italic_asterisks,
        underscores,
        bold_balanced: bold_markers % 2 == 0,
        italic_balanced: italic_asterisks % 2 == 0,
        underscores_balanced: underscores % 2 == 0,
    }
}

/// Count non-overlapping `**` markers.
fn count_bold_markers(text: &str) -> usize {
    let mut count = 0usize;
    let bytes = text.as_bytes();
    let mut i = 0usize;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'*' {
            count += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    count
}

/// Apply conservative marker fixes. Returns the fixed text and a list of the
/// fixes applied.
#[must_use]
pub fn fix_markers(text: &str) -> (String, Vec<String>) {
    let mut fixes = Vec::new();

    // Fix 1: escape asterisks used as multiplication between numbers.
    let escaped = escape_math_asterisks(text);
    if escaped != text {
        fixes.push("escaped_math_asterisks".to_string());
    }

    // Fix 2: drop a single trailing unmatched marker. An odd marker count
    // with the text ending in that marker means the final one is the stray.
    let mut fixed = escaped;
    let balance = marker_balance(&fixed);
    if balance.asterisks % 2 == 1 && fixed.trim_end().ends_with('*') {
        fixed = remove_last_char(&fixed, '*');
        fixes.push("dropped_trailing_asterisk".to_string());
    }
    if balance.underscores % 2 == 1 && fixed.trim_end().ends_with('_') {
        fixed = remove_last_char(&fixed, '_');
        fixes.push("dropped_trailing_underscore".to_string());
    }

    (fixed, fixes)
}

/// `3 * 5` → `3 \* 5` so the asterisk stops counting as an italic marker.
fn escape_math_asterisks(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        if ch == '*'
            && i >= 2
            && i + 2 < bytes.len()
            && bytes[i - 1] == b' '
            && bytes[i - 2].is_ascii_digit()
            && bytes[i + 1] == b' '
            && bytes[i + 2].is_ascii_digit()
        {
            out.push_str("\\*");
        } else {
            out.push(ch);
        }
    }
    out
}

fn remove_last_char(text: &str, target: char) -> String {
    match text.rfind(target) {
        Some(idx) => {
            let mut out = text.to_string();
            out.remove(idx);
            out
        }
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn balanced_text_reports_clean() {
        let balance = marker_balance("**bold** and *italic* and _emph_");
        assert_eq!(balance.bold_markers, 2);
        assert_eq!(balance.italic_asterisks, 2);
        assert_eq!(balance.underscores, 2);
        assert!(balance.is_balanced());
    }

    #[test]
    fn unbalanced_bold_is_flagged() {
        let balance = marker_balance("**bold** plus ** stray");
        assert_eq!(balance.bold_markers, 3);
        assert!(!balance.bold_balanced);
    }

    #[test]
    fn math_asterisks_get_escaped() {
        let (fixed, fixes) = fix_markers("Repeat 3 * 5 breaths");
        assert_eq!(fixed, "Repeat 3 \\* 5 breaths");
        assert_eq!(fixes, vec!["escaped_math_asterisks".to_string()]);
    }

    #[test]
    fn trailing_unmatched_asterisk_is_dropped() {
        let (fixed, fixes) = fix_markers("A *strong finish**");
        // "*strong finish*" is balanced italic; the extra trailing `*` goes.
        assert_eq!(fixed, "A *strong finish*");
        assert!(fixes.contains(&"dropped_trailing_asterisk".to_string()));
    }

    #[test]
    fn trailing_underscore_is_dropped() {
        let (fixed, fixes) = fix_markers("emphasis _here_ and_");
        assert_eq!(fixed, "emphasis _here_ and");
        assert!(fixes.contains(&"dropped_trailing_underscore".to_string()));
    }

    #[test]
    fn clean_text_needs_no_fixes() {
        let (fixed, fixes) = fix_markers("Nothing to change here.");
        assert_eq!(fixed, "Nothing to change here.");
        assert!(fixes.is_empty());
    }
}
