//! Flattening and ranking.
//!
//! Expands the nested catalogue into one [`FlatEvent`] per (item, event)
//! pair, then filters and orders those records so the most urgent unexpired
//! deadline comes first and the most recently expired follows the last
//! upcoming one.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};

use crate::catalogue::{DeadlineItem, EventData};
use crate::filter::FilterSelection;
use crate::search::{FuzzyIndex, SearchField, SearchIndex};
use crate::store::Favorites;

/// One (item, event) pair annotated with its signed time to the next deadline.
///
/// Borrowed from the catalogue and rebuilt on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatEvent<'a> {
    pub item: &'a DeadlineItem,
    pub event: &'a EventData,
    pub time_remaining: Duration,
}

impl FlatEvent<'_> {
    pub fn is_ended(&self) -> bool {
        self.time_remaining < Duration::zero()
    }
}

/// One record per event of every item, in catalogue order.
pub fn flatten(items: &[DeadlineItem], now: DateTime<Utc>) -> Vec<FlatEvent<'_>> {
    items
        .iter()
        .flat_map(|item| {
            item.events.iter().map(move |event| FlatEvent {
                item,
                event,
                time_remaining: event.time_remaining(now),
            })
        })
        .collect()
}

/// Whether `record` passes every non-search filter dimension.
pub fn matches_filters(record: &FlatEvent<'_>, selection: &FilterSelection, favorites: &Favorites) -> bool {
    if selection.favorites_only && !favorites.contains(&record.event.id) {
        return false;
    }
    if let Some(category) = selection.category {
        if record.item.category != category {
            return false;
        }
    }
    if !selection.tags.is_empty() && !selection.tags.iter().any(|tag| record.item.tags.contains(tag)) {
        return false;
    }
    if !selection.locations.is_empty() && !selection.locations.contains(&record.event.place) {
        return false;
    }
    true
}

/// Upcoming records (soonest first) strictly before ended ones (most recently ended first).
pub fn compare_urgency(a: &FlatEvent<'_>, b: &FlatEvent<'_>) -> Ordering {
    match (a.is_ended(), b.is_ended()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => b.time_remaining.cmp(&a.time_remaining),
        (false, false) => a.time_remaining.cmp(&b.time_remaining),
    }
}

/// Stable sort by urgency; ties keep their incoming order.
pub fn rank(records: &mut [FlatEvent<'_>]) {
    records.sort_by(compare_urgency);
}

/// Flattened records plus a search index built over them.
///
/// The index is keyed by record position, so [`Engine::refresh`] can move the
/// clock forward without re-indexing.
pub struct Engine<'a> {
    records: Vec<FlatEvent<'a>>,
    index: FuzzyIndex,
}

impl<'a> Engine<'a> {
    pub fn new(items: &'a [DeadlineItem], now: DateTime<Utc>, min_similarity: f64) -> Self {
        let records = flatten(items, now);
        let index = FuzzyIndex::build(&records, &SearchField::DEFAULT, min_similarity);
        Engine { records, index }
    }

    /// Recompute every record's time remaining against a new instant.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        for record in &mut self.records {
            record.time_remaining = record.event.time_remaining(now);
        }
    }

    pub fn records(&self) -> &[FlatEvent<'a>] {
        &self.records
    }

    /// Filtered, ranked records for the given selection.
    ///
    /// A non-blank query replaces the candidate list with the index's hits
    /// (in relevance order) before the other filters apply.
    pub fn view(&self, selection: &FilterSelection, favorites: &Favorites) -> Vec<FlatEvent<'a>> {
        let candidates: Vec<FlatEvent<'a>> = match selection.query() {
            Some(query) => self
                .index
                .search(query)
                .into_iter()
                .map(|pos| self.records[pos])
                .collect(),
            None => self.records.clone(),
        };

        let mut results: Vec<_> = candidates
            .into_iter()
            .filter(|record| matches_filters(record, selection, favorites))
            .collect();
        rank(&mut results);
        results
    }

    /// Earliest instant at which the current ranking can change on its own:
    /// the soonest future deadline across all records.
    pub fn next_boundary(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.records
            .iter()
            .filter_map(|record| record.event.next_deadline(now).map(|(_, t)| t.deadline))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Category;
    use crate::catalogue::test_support::{event, item};
    use crate::constants::DEFAULT_MIN_SIMILARITY;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn catalogue() -> Vec<DeadlineItem> {
        let n = now();
        vec![
            item(
                "RustConf",
                Category::Conference,
                &["rust", "systems"],
                vec![
                    event("rustconf-2024", "Seattle", &[n - Duration::days(10)]),
                    event("rustconf-2025", "Seattle", &[n + Duration::days(5)]),
                ],
            ),
            item(
                "OS Contest",
                Category::Competition,
                &["kernel", "rust"],
                vec![event("oscomp-2025", "Wuhan", &[n + Duration::days(1)])],
            ),
            item(
                "Community Meetup",
                Category::Activity,
                &["community"],
                vec![event("meetup-2025", "Online", &[n - Duration::hours(1)])],
            ),
        ]
    }

    fn ids(records: &[FlatEvent<'_>]) -> Vec<String> {
        records.iter().map(|r| r.event.id.clone()).collect()
    }

    #[test]
    fn flatten_preserves_event_count() {
        let items = catalogue();
        let expected: usize = items.iter().map(|i| i.events.len()).sum();
        assert_eq!(flatten(&items, now()).len(), expected);
    }

    #[test]
    fn ranks_upcoming_before_ended() {
        let items = catalogue();
        let engine = Engine::new(&items, now(), DEFAULT_MIN_SIMILARITY);
        let view = engine.view(&FilterSelection::default(), &Favorites::new());

        // 1 day, 5 days, then ended 1 hour ago, ended 10 days ago
        assert_eq!(ids(&view), vec!["oscomp-2025", "rustconf-2025", "meetup-2025", "rustconf-2024"]);

        let first_ended = view.iter().position(|r| r.is_ended()).unwrap();
        assert!(view[first_ended..].iter().all(|r| r.is_ended()));
    }

    #[test]
    fn ranking_is_deterministic() {
        let items = catalogue();
        let engine = Engine::new(&items, now(), DEFAULT_MIN_SIMILARITY);
        let selection = FilterSelection::default();
        let favorites = Favorites::new();
        assert_eq!(engine.view(&selection, &favorites), engine.view(&selection, &favorites));
    }

    #[test]
    fn equal_time_remaining_keeps_catalogue_order() {
        let n = now();
        let deadline = n + Duration::days(2);
        let items = vec![
            item("A", Category::Activity, &[], vec![event("a", "X", &[deadline])]),
            item("B", Category::Activity, &[], vec![event("b", "X", &[deadline])]),
        ];
        let mut records = flatten(&items, n);
        rank(&mut records);
        assert_eq!(ids(&records), vec!["a", "b"]);
    }

    #[test]
    fn filters_by_category_tags_and_location() {
        let items = catalogue();
        let engine = Engine::new(&items, now(), DEFAULT_MIN_SIMILARITY);
        let favorites = Favorites::new();

        let selection = FilterSelection {
            category: Some(Category::Conference),
            ..Default::default()
        };
        assert_eq!(ids(&engine.view(&selection, &favorites)), vec!["rustconf-2025", "rustconf-2024"]);

        let selection = FilterSelection {
            tags: vec!["kernel".into(), "community".into()],
            ..Default::default()
        };
        assert_eq!(ids(&engine.view(&selection, &favorites)), vec!["oscomp-2025", "meetup-2025"]);

        let selection = FilterSelection {
            tags: vec!["rust".into()],
            locations: vec!["Wuhan".into(), "Online".into()],
            ..Default::default()
        };
        assert_eq!(ids(&engine.view(&selection, &favorites)), vec!["oscomp-2025"]);
    }

    #[test]
    fn favorites_only_uses_event_ids() {
        let items = catalogue();
        let engine = Engine::new(&items, now(), DEFAULT_MIN_SIMILARITY);
        let favorites: Favorites = ["rustconf-2024".to_string()].into_iter().collect();

        let selection = FilterSelection {
            favorites_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&engine.view(&selection, &favorites)), vec!["rustconf-2024"]);
    }

    #[test]
    fn filter_order_does_not_matter() {
        let items = catalogue();
        let records = flatten(&items, now());
        let favorites: Favorites = ["rustconf-2025".to_string(), "oscomp-2025".to_string()].into_iter().collect();

        let check = |i: usize, r: &FlatEvent<'_>| match i {
            0 => favorites.contains(&r.event.id),
            1 => r.item.tags.iter().any(|t| t == "rust"),
            _ => ["Seattle", "Wuhan"].contains(&r.event.place.as_str()),
        };

        let apply = |order: &[usize]| -> Vec<String> {
            let mut survivors = records.clone();
            for &i in order {
                survivors.retain(|r| check(i, r));
            }
            ids(&survivors)
        };

        let baseline = apply(&[0, 1, 2]);
        for order in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
            assert_eq!(apply(&order), baseline);
        }

        let combined = FilterSelection {
            favorites_only: true,
            tags: vec!["rust".into()],
            locations: vec!["Seattle".into(), "Wuhan".into()],
            ..Default::default()
        };
        let via_engine: Vec<String> = ids(
            &records
                .iter()
                .copied()
                .filter(|r| matches_filters(r, &combined, &favorites))
                .collect::<Vec<_>>(),
        );
        assert_eq!(via_engine, baseline);
    }

    #[test]
    fn search_replaces_candidates_then_filters_apply() {
        let items = catalogue();
        let engine = Engine::new(&items, now(), DEFAULT_MIN_SIMILARITY);
        let favorites = Favorites::new();

        let selection = FilterSelection {
            search_query: "rust".into(),
            ..Default::default()
        };
        assert_eq!(
            ids(&engine.view(&selection, &favorites)),
            vec!["oscomp-2025", "rustconf-2025", "rustconf-2024"]
        );

        let selection = FilterSelection {
            search_query: "rust".into(),
            category: Some(Category::Competition),
            ..Default::default()
        };
        assert_eq!(ids(&engine.view(&selection, &favorites)), vec!["oscomp-2025"]);
    }

    #[test]
    fn refresh_moves_records_across_the_ended_boundary() {
        let items = catalogue();
        let mut engine = Engine::new(&items, now(), DEFAULT_MIN_SIMILARITY);
        assert_eq!(engine.next_boundary(now()), Some(now() + Duration::days(1)));

        let later = now() + Duration::days(2);
        engine.refresh(later);
        let view = engine.view(&FilterSelection::default(), &Favorites::new());

        // OS Contest ended 1 day ago; it is now the freshest expiry.
        assert_eq!(ids(&view), vec!["rustconf-2025", "oscomp-2025", "meetup-2025", "rustconf-2024"]);
    }
}
