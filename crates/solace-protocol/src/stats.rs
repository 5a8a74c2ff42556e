//! Parse statistics for CLI reports.

use std::collections::BTreeMap;

use serde::Serialize;
use solace_core::entities::KnowledgeChunk;

/// Aggregate statistics over a parsed chunk set.
///
/// Maps are ordered so serialized reports are stable across runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseStats {
    pub total_chunks: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_difficulty: BTreeMap<String, usize>,
    pub by_temperament: BTreeMap<String, usize>,
    pub by_kb_category: BTreeMap<String, usize>,
    pub emergency_count: usize,
    pub dual_framing_count: usize,
    pub avg_time_min: f64,
    pub avg_time_max: f64,
}

impl ParseStats {
    #[must_use]
    pub fn compute(chunks: &[KnowledgeChunk]) -> Self {
        let mut stats = Self {
            total_chunks: chunks.len(),
            ..Self::default()
        };

        let mut time_min_sum = 0u64;
        let mut time_min_count = 0u64;
        let mut time_max_sum = 0u64;
        let mut time_max_count = 0u64;

        for chunk in chunks {
            *stats
                .by_category
                .entry(chunk.category.as_str().to_string())
                .or_default() += 1;
            *stats
                .by_difficulty
                .entry(chunk.difficulty.as_str().to_string())
                .or_default() += 1;
            for temperament in &chunk.temperaments {
                *stats
                    .by_temperament
                    .entry(temperament.as_str().to_string())
                    .or_default() += 1;
            }
            if let Some(kb) = &chunk.kb_category {
                *stats.by_kb_category.entry(kb.clone()).or_default() += 1;
            }
            if chunk.is_emergency {
                stats.emergency_count += 1;
            }
            if chunk.clinical_framing.is_some() || chunk.user_framing.is_some() {
                stats.dual_framing_count += 1;
            }
            if let Some(min) = chunk.time_min {
                time_min_sum += u64::from(min);
                time_min_count += 1;
            }
            if let Some(max) = chunk.time_max {
                time_max_sum += u64::from(max);
                time_max_count += 1;
            }
        }

        stats.avg_time_min = average(time_min_sum, time_min_count);
        stats.avg_time_max = average(time_max_sum, time_max_count);
        stats
    }
}

#[allow(clippy::cast_precision_loss)]
fn average(sum: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        let raw = sum as f64 / count as f64;
        (raw * 10.0).round() / 10.0
    }
}
