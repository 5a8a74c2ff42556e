//! Readability metrics for protocol text.
//!
//! Member-facing protocol text targets an 8th-grade reading level. The
//! metrics here drive the validation and repair pipelines:
//!
//! - Flesch-Kincaid grade: `0.39·(words/sentences) + 11.8·(syllables/words) − 15.59`
//! - Flesch reading ease: `206.835 − 1.015·(words/sentences) − 84.6·(syllables/words)`
//! - Jargon density: technical terms per 100 words (target < 5)
//!
//! Syllables are counted by vowel groups with a silent-`e` adjustment, the
//! same approximation the web app uses, so scores line up across surfaces.

use serde::Serialize;
use solace_core::entities::KnowledgeChunk;
use solace_core::enums::{ChunkCategory, Difficulty};

/// Grade level above which a text is flagged for simplification.
pub const TARGET_GRADE: f64 = 8.0;

/// Jargon density above which a text is flagged (terms per 100 words).
pub const TARGET_JARGON_DENSITY: f64 = 5.0;

/// Multi-word technical terms checked verbatim (lowercase).
const TECHNICAL_TERMS: &[&str] = &[
    "vagus nerve",
    "coherence",
    "neuroplasticity",
    "amygdala",
    "cortisol",
    "dopamine",
    "serotonin",
    "prefrontal cortex",
    "limbic system",
    "hippocampus",
    "neural pathways",
    "synaptic",
    "neurotransmitter",
    "homeostasis",
    "autonomic",
    "parasympathetic",
    "sympathetic",
    "neurological",
    "cognitive",
    "metacognition",
    "executive function",
];

const TECHNICAL_SUFFIXES: &[&str] = &[
    "ology", "ation", "osis", "ism", "itis", "ectomy", "plasia", "pathy", "trophy", "genesis",
    "lysis",
];

const TECHNICAL_PREFIXES: &[&str] = &["neuro", "psycho", "bio", "physio", "cardio", "hemo"];

const ABBREVIATIONS: &[&str] = &["dr.", "mr.", "mrs.", "ms.", "etc.", "i.e.", "e.g."];

/// Readability scores for a single text.
#[derive(Debug, Clone, Serialize)]
pub struct ReadabilityMetrics {
    pub chunk_id: String,
    pub source_file: String,
    pub summary: String,

    pub flesch_kincaid_grade: f64,
    pub flesch_reading_ease: f64,

    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    pub avg_words_per_sentence: f64,
    pub avg_syllables_per_word: f64,

    pub technical_term_count: usize,
    pub jargon_density: f64,

    /// `easy`, `moderate`, `difficult`, or `very_difficult`.
    pub reading_level_category: &'static str,
    pub needs_simplification: bool,
    /// 0–100; higher means more urgent to simplify.
    pub priority_score: u32,
}

/// Word, sentence, and syllable counts of markdown text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextComplexity {
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
}

/// Count syllables in a word by vowel groups.
///
/// A trailing silent `e` is discounted; every word has at least one syllable.
#[must_use]
pub fn count_syllables(word: &str) -> usize {
    let cleaned: String = word
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if cleaned.is_empty() {
        return 0;
    }

    let mut groups = 0usize;
    let mut in_group = false;
    for ch in cleaned.chars() {
        if "aeiouy".contains(ch) {
            if !in_group {
                groups += 1;
            }
            in_group = true;
        } else {
            in_group = false;
        }
    }

    if cleaned.ends_with('e') && groups > 1 {
        groups -= 1;
    }
    groups.max(1)
}

/// Count sentences, treating common abbreviations as non-terminal.
#[must_use]
pub fn count_sentences(text: &str) -> usize {
    let guarded = guard_abbreviations(text);
    let count = guarded
        .split(['.', '!', '?'])
        .filter(|part| !part.trim().is_empty())
        .count();
    count.max(1)
}

/// Replace the period of known abbreviations so sentence splitting skips it.
fn guard_abbreviations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // ASCII lowering keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();
    let mut i = 0usize;
    'outer: while i < text.len() {
        for abbrev in ABBREVIATIONS {
            if lower[i..].starts_with(abbrev) {
                // Keep the abbreviation minus its trailing period.
                out.push_str(&text[i..i + abbrev.len() - 1]);
                i += abbrev.len();
                continue 'outer;
            }
        }
        let ch = text[i..].chars().next().unwrap_or('\0');
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

/// Strip markdown formatting and count words, sentences, and syllables.
#[must_use]
pub fn analyze_text_complexity(text: &str) -> TextComplexity {
    let clean = strip_markdown(text);

    let words: Vec<&str> = alphabetic_words(&clean);
    let word_count = words.len();
    let sentence_count = count_sentences(&clean);
    let syllable_count = words.iter().map(|w| count_syllables(w)).sum();

    TextComplexity {
        word_count,
        sentence_count,
        syllable_count,
    }
}

/// Remove bold/italic markers, heading hashes, and link targets.
fn strip_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed = line.trim_start();
        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        let line = if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
            &trimmed[hashes + 1..]
        } else {
            line
        };
        out.push_str(&strip_links(line).replace('*', ""));
        out.push('\n');
    }
    out
}

/// `[label](url)` → `label`.
fn strip_links(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(open) = rest.find('[') {
        let Some(close_rel) = rest[open..].find(']') else {
            break;
        };
        let close = open + close_rel;
        if rest[close + 1..].starts_with('(') {
            if let Some(paren_rel) = rest[close + 1..].find(')') {
                out.push_str(&rest[..open]);
                out.push_str(&rest[open + 1..close]);
                rest = &rest[close + 1 + paren_rel + 1..];
                continue;
            }
        }
        out.push_str(&rest[..=close]);
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Split text into maximal alphabetic runs.
fn alphabetic_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Flesch-Kincaid grade level, rounded to two decimals.
#[must_use]
pub fn flesch_kincaid_grade(complexity: TextComplexity) -> f64 {
    if complexity.word_count == 0 || complexity.sentence_count == 0 {
        return 0.0;
    }
    let wps = ratio(complexity.word_count, complexity.sentence_count);
    let spw = ratio(complexity.syllable_count, complexity.word_count);
    round2(0.39 * wps + 11.8 * spw - 15.59)
}

/// Flesch reading ease, rounded to two decimals.
#[must_use]
pub fn flesch_reading_ease(complexity: TextComplexity) -> f64 {
    if complexity.word_count == 0 || complexity.sentence_count == 0 {
        return 0.0;
    }
    let wps = ratio(complexity.word_count, complexity.sentence_count);
    let spw = ratio(complexity.syllable_count, complexity.word_count);
    round2(206.835 - 1.015 * wps - 84.6 * spw)
}

/// Grade level of a free-standing text (convenience for tooltip definitions).
#[must_use]
pub fn grade_of(text: &str) -> f64 {
    flesch_kincaid_grade(analyze_text_complexity(text))
}

/// Identify technical terms: known multi-word terms plus words with
/// medical/scientific affixes.
#[must_use]
pub fn find_technical_terms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut terms: Vec<String> = Vec::new();

    for term in TECHNICAL_TERMS {
        if lower.contains(term) {
            push_unique(&mut terms, (*term).to_string());
        }
    }

    for word in alphabetic_words(text) {
        if word.len() < 5 {
            continue;
        }
        let word_lower = word.to_lowercase();
        let affixed = TECHNICAL_SUFFIXES.iter().any(|s| word_lower.ends_with(s))
            || TECHNICAL_PREFIXES.iter().any(|p| word_lower.starts_with(p));
        if affixed {
            push_unique(&mut terms, word_lower);
        }
    }

    terms
}

fn push_unique(terms: &mut Vec<String>, term: String) {
    if !terms.contains(&term) {
        terms.push(term);
    }
}

/// Technical terms per 100 words, rounded to two decimals.
#[must_use]
pub fn jargon_density(text: &str, term_count: usize) -> f64 {
    let words = alphabetic_words(text).len();
    if words == 0 {
        return 0.0;
    }
    round2(ratio(term_count, words) * 100.0)
}

/// Categorize reading difficulty from both Flesch metrics.
#[must_use]
pub fn reading_level_category(grade: f64, ease: f64) -> &'static str {
    if grade <= 6.0 && ease >= 80.0 {
        "easy"
    } else if grade <= 9.0 && ease >= 60.0 {
        "moderate"
    } else if grade <= 12.0 && ease >= 40.0 {
        "difficult"
    } else {
        "very_difficult"
    }
}

/// Simplification priority, 0–100.
///
/// Reading level contributes up to 40 points, jargon density up to 30,
/// difficulty up to 15, and category up to 15.
#[must_use]
pub fn priority_score(
    grade: f64,
    jargon: f64,
    difficulty: Difficulty,
    category: ChunkCategory,
) -> u32 {
    let mut score = 0u32;

    score += if grade > 12.0 {
        40
    } else if grade > 10.0 {
        30
    } else if grade > 8.0 {
        20
    } else if grade > 6.0 {
        10
    } else {
        0
    };

    score += if jargon > 10.0 {
        30
    } else if jargon > 5.0 {
        20
    } else if jargon > 2.0 {
        10
    } else {
        0
    };

    score += match difficulty {
        Difficulty::Advanced => 15,
        Difficulty::Intermediate => 10,
        Difficulty::Beginner => 5,
    };

    score += match category {
        ChunkCategory::NeuralRewiring => 15,
        ChunkCategory::ResearchProtocol | ChunkCategory::EmergencyProtocol => 10,
        ChunkCategory::TraditionalFoundation | ChunkCategory::IntegrationPractices => 5,
        _ => 0,
    };

    score.min(100)
}

/// Compute the full readability report for a parsed chunk.
#[must_use]
pub fn validate_chunk(chunk: &KnowledgeChunk) -> ReadabilityMetrics {
    let complexity = analyze_text_complexity(&chunk.text);
    let grade = flesch_kincaid_grade(complexity);
    let ease = flesch_reading_ease(complexity);

    let terms = find_technical_terms(&chunk.text);
    let jargon = jargon_density(&chunk.text, terms.len());

    ReadabilityMetrics {
        chunk_id: chunk.id.clone(),
        source_file: chunk.source_file.clone(),
        summary: chunk.summary.clone(),
        flesch_kincaid_grade: grade,
        flesch_reading_ease: ease,
        word_count: complexity.word_count,
        sentence_count: complexity.sentence_count,
        syllable_count: complexity.syllable_count,
        avg_words_per_sentence: round2(ratio(complexity.word_count, complexity.sentence_count)),
        avg_syllables_per_word: if complexity.word_count == 0 {
            0.0
        } else {
            round2(ratio(complexity.syllable_count, complexity.word_count))
        },
        technical_term_count: terms.len(),
        jargon_density: jargon,
        reading_level_category: reading_level_category(grade, ease),
        needs_simplification: grade > TARGET_GRADE || jargon > TARGET_JARGON_DENSITY,
        priority_score: priority_score(grade, jargon, chunk.difficulty, chunk.category),
    }
}

/// Summary report over a validated chunk set.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub chunk_count: usize,
    pub avg_grade: f64,
    pub avg_jargon_density: f64,
    pub needs_simplification_count: usize,
    /// Flagged chunks, most urgent first.
    pub flagged: Vec<ReadabilityMetrics>,
}

impl ValidationReport {
    /// Build a report from per-chunk metrics. Flagged chunks are sorted by
    /// priority score, descending.
    #[must_use]
    pub fn from_metrics(metrics: Vec<ReadabilityMetrics>) -> Self {
        let chunk_count = metrics.len();
        let avg_grade = mean(metrics.iter().map(|m| m.flesch_kincaid_grade));
        let avg_jargon_density = mean(metrics.iter().map(|m| m.jargon_density));
        let needs_simplification_count =
            metrics.iter().filter(|m| m.needs_simplification).count();

        let mut flagged: Vec<ReadabilityMetrics> = metrics
            .into_iter()
            .filter(|m| m.needs_simplification)
            .collect();
        flagged.sort_by_key(|m| std::cmp::Reverse(m.priority_score));

        Self {
            generated_at: chrono::Utc::now(),
            chunk_count,
            avg_grade,
            avg_jargon_density,
            needs_simplification_count,
            flagged,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let collected: Vec<f64> = values.collect();
    if collected.is_empty() {
        return 0.0;
    }
    round2(collected.iter().sum::<f64>() / collected.len() as f64)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(a: usize, b: usize) -> f64 {
    if b == 0 { 0.0 } else { a as f64 / b as f64 }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
