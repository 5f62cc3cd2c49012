//! Active filter selections.

use serde::{Deserialize, Serialize};

use crate::catalogue::Category;

/// Every user-controlled narrowing of the list.
///
/// Dimensions combine with AND; `tags` and `locations` are each OR'ed
/// internally. Transient: never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub category: Option<Category>,
    pub tags: Vec<String>,
    pub locations: Vec<String>,
    pub search_query: String,
    pub favorites_only: bool,
}

impl FilterSelection {
    /// The trimmed search query, or `None` when blank.
    pub fn query(&self) -> Option<&str> {
        let q = self.search_query.trim();
        if q.is_empty() { None } else { Some(q) }
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        toggle(&mut self.tags, tag);
    }

    pub fn toggle_location(&mut self, location: &str) {
        toggle(&mut self.locations, location);
    }

    pub fn is_empty(&self) -> bool {
        *self == FilterSelection::default()
    }

    /// Copy with repeated tags and locations collapsed to their first occurrence.
    pub fn deduplicated(&self) -> FilterSelection {
        FilterSelection {
            tags: dedup(&self.tags),
            locations: dedup(&self.locations),
            ..self.clone()
        }
    }
}

fn dedup(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

/// Symmetric membership toggle that keeps insertion order.
pub(crate) fn toggle(values: &mut Vec<String>, value: &str) {
    if let Some(pos) = values.iter().position(|v| v == value) {
        values.remove(pos);
    } else {
        values.push(value.to_string());
    }
}
