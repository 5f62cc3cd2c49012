//! Typo-tolerant token matching based on Damerau-Levenshtein similarity.

use strsim::normalized_damerau_levenshtein;

use super::{SearchField, SearchIndex};
use crate::engine::FlatEvent;

/// Query tokens shorter than this are only matched by containment or full-token similarity.
const MIN_PREFIX_LEN: usize = 3;

#[derive(Debug, Clone)]
struct IndexedValue {
    normalized: String,
    tokens: Vec<String>,
}

impl IndexedValue {
    fn new(raw: &str) -> Self {
        IndexedValue {
            normalized: raw.to_lowercase(),
            tokens: tokenize(raw),
        }
    }
}

/// Fuzzy index over a fixed set of records.
///
/// `min_similarity` in `[0, 1]` is the strictness threshold: a record
/// matches when its best field scores at least this much. Higher is stricter.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    records: Vec<Vec<IndexedValue>>,
    min_similarity: f64,
}

impl FuzzyIndex {
    pub fn build(records: &[FlatEvent<'_>], fields: &[SearchField], min_similarity: f64) -> Self {
        let records = records
            .iter()
            .map(|record| {
                fields
                    .iter()
                    .flat_map(|field| field.values(record))
                    .map(IndexedValue::new)
                    .collect()
            })
            .collect();

        FuzzyIndex {
            records,
            min_similarity: min_similarity.clamp(0.0, 1.0),
        }
    }

    /// Best similarity of `query` against any indexed value of record `pos`.
    fn score(&self, pos: usize, query: &str, query_tokens: &[String]) -> f64 {
        self.records[pos]
            .iter()
            .map(|value| value_similarity(value, query, query_tokens))
            .fold(0.0, f64::max)
    }
}

impl SearchIndex for FuzzyIndex {
    fn search(&self, query: &str) -> Vec<usize> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return Vec::new();
        }
        let query_tokens = tokenize(&normalized);

        let mut hits: Vec<(usize, f64)> = (0..self.records.len())
            .map(|pos| (pos, self.score(pos, &normalized, &query_tokens)))
            .filter(|(_, score)| *score >= self.min_similarity)
            .collect();

        // Stable: equal scores keep record order.
        hits.sort_by(|a, b| b.1.total_cmp(&a.1));
        hits.into_iter().map(|(pos, _)| pos).collect()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn value_similarity(value: &IndexedValue, query: &str, query_tokens: &[String]) -> f64 {
    if value.normalized.contains(query) {
        return 1.0;
    }
    if query_tokens.is_empty() {
        return 0.0;
    }

    let total: f64 = query_tokens
        .iter()
        .map(|q| {
            value
                .tokens
                .iter()
                .map(|t| token_similarity(q, t))
                .fold(0.0, f64::max)
        })
        .sum();
    total / query_tokens.len() as f64
}

fn token_similarity(query: &str, token: &str) -> f64 {
    if token.contains(query) {
        return 1.0;
    }

    let whole = normalized_damerau_levenshtein(query, token);

    // Partially typed words: compare against the token's prefix of equal length.
    let query_len = query.chars().count();
    if query_len >= MIN_PREFIX_LEN && token.chars().count() > query_len {
        let prefix: String = token.chars().take(query_len).collect();
        return whole.max(normalized_damerau_levenshtein(query, &prefix));
    }

    whole
}
