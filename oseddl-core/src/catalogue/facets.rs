//! Filter choices derived from a loaded catalogue.

use std::collections::{BTreeSet, HashSet};

use super::{DeadlineItem, EventData};

/// Distinct tags across all items, in first-seen order.
pub fn all_tags(items: &[DeadlineItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .flat_map(|item| item.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Distinct event places, sorted.
pub fn all_locations(items: &[DeadlineItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.events.iter().map(|event| event.place.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Look up an occurrence (and its series) by event id.
pub fn find_event<'a>(items: &'a [DeadlineItem], id: &str) -> Option<(&'a DeadlineItem, &'a EventData)> {
    items.iter().find_map(|item| {
        item.events
            .iter()
            .find(|event| event.id == id)
            .map(|event| (item, event))
    })
}
