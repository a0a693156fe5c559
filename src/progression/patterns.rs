//! Frequency aggregation over a user's dream history: recurring tags,
//! recurring emotions and the lucid ratio. Single-pass, in-memory.

use ahash::AHashMap;
use serde::Serialize;

use crate::database::models::DreamRecord;

/// Count occurrences of each distinct value.
pub fn frequencies<'a, I>(values: I) -> AHashMap<String, u32>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = AHashMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// The `n` most frequent entries, count descending. Ties break alphabetically
/// so the output is stable across runs.
pub fn top_n(counts: AHashMap<String, u32>, n: usize) -> Vec<(String, u32)> {
    let mut entries: Vec<(String, u32)> = counts.into_iter().collect();
    entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

/// Recurring-pattern summary for a dream list.
#[derive(Debug, Clone, Serialize)]
pub struct DreamPatterns {
    pub top_tags: Vec<(String, u32)>,
    pub top_emotions: Vec<(String, u32)>,
    /// Share of dreams flagged lucid, in `[0, 1]`. Zero for an empty list.
    pub lucid_ratio: f64,
}

/// Aggregates tag/emotion frequencies and the lucid ratio over `dreams`,
/// keeping the top `n` of each frequency table.
pub fn dream_patterns(dreams: &[DreamRecord], n: usize) -> DreamPatterns {
    let tags = frequencies(dreams.iter().flat_map(|d| d.tags.iter().map(String::as_str)));
    let emotions = frequencies(
        dreams
            .iter()
            .flat_map(|d| d.emotions.iter().map(String::as_str)),
    );
    let lucid = dreams.iter().filter(|d| d.is_lucid).count();
    let lucid_ratio = if dreams.is_empty() {
        0.0
    } else {
        lucid as f64 / dreams.len() as f64
    };
    DreamPatterns {
        top_tags: top_n(tags, n),
        top_emotions: top_n(emotions, n),
        lucid_ratio,
    }
}
