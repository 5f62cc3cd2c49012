//! Approximate text search over flattened records.
//!
//! The engine only depends on [`SearchIndex`]; [`FuzzyIndex`] is the
//! edit-distance implementation used by default.

mod fuzzy;

pub use fuzzy::FuzzyIndex;

use crate::engine::FlatEvent;

/// A text-bearing field of a flattened record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Description,
    Tags,
    Place,
}

impl SearchField {
    /// Fields indexed by default: item title, description, tags and event place.
    pub const DEFAULT: [SearchField; 4] = [
        SearchField::Title,
        SearchField::Description,
        SearchField::Tags,
        SearchField::Place,
    ];

    /// Text values of this field on `record`. Tags yield one value per tag.
    pub fn values<'r>(&self, record: &FlatEvent<'r>) -> Vec<&'r str> {
        match self {
            SearchField::Title => vec![record.item.title.as_str()],
            SearchField::Description => vec![record.item.description.as_str()],
            SearchField::Tags => record.item.tags.iter().map(String::as_str).collect(),
            SearchField::Place => vec![record.event.place.as_str()],
        }
    }
}

/// Relevance-ranked lookup over records indexed by position.
pub trait SearchIndex {
    /// Positions of matching records, most relevant first.
    ///
    /// Callers handle blank queries themselves (by skipping the index).
    fn search(&self, query: &str) -> Vec<usize>;
}
