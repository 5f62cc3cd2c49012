//! Catalogue types.
//!
//! A catalogue is a list of [`DeadlineItem`]s (recurring series such as a
//! conference franchise), each holding one [`EventData`] per concrete
//! occurrence, each of which carries a [`Timeline`] of milestone deadlines.
//!
//! These types are pure data. The only behavior they carry is deriving
//! ended-ness and the next deadline relative to a given instant.

pub mod deadline;
mod facets;

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DeadlineError, DeadlineResult};

pub use deadline::parse_deadline;
pub use facets::{all_locations, all_tags, find_event};

/// One milestone within an occurrence (e.g. "abstract due").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(deserialize_with = "deadline::deserialize")]
    pub deadline: DateTime<Utc>,
    pub comment: String,
}

/// Non-empty, insertion-ordered sequence of milestones.
///
/// Order is the catalogue's order, not necessarily chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimelineEvent>", into = "Vec<TimelineEvent>")]
pub struct Timeline(Vec<TimelineEvent>);

impl Timeline {
    pub fn new(entries: Vec<TimelineEvent>) -> DeadlineResult<Self> {
        if entries.is_empty() {
            return Err(DeadlineError::Parse("timeline must not be empty".into()));
        }
        Ok(Timeline(entries))
    }

    /// The last entry in catalogue order.
    pub fn last(&self) -> &TimelineEvent {
        // Non-empty by construction.
        &self.0[self.0.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEvent> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl TryFrom<Vec<TimelineEvent>> for Timeline {
    type Error = DeadlineError;

    fn try_from(entries: Vec<TimelineEvent>) -> Result<Self, Self::Error> {
        Timeline::new(entries)
    }
}

impl From<Timeline> for Vec<TimelineEvent> {
    fn from(timeline: Timeline) -> Self {
        timeline.0
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineEvent;
    type IntoIter = std::slice::Iter<'a, TimelineEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One concrete occurrence of a series (e.g. "Conf 2025").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub id: String,
    pub year: i32,
    pub link: String,
    pub timeline: Timeline,
    /// Display label only; deadlines already carry their own offset.
    pub timezone: String,
    /// Display label for when the occurrence takes place.
    pub date: String,
    pub place: String,
}

impl EventData {
    /// True iff the *last* timeline entry is strictly before `now`.
    pub fn is_ended_at(&self, now: DateTime<Utc>) -> bool {
        self.timeline.last().deadline < now
    }

    pub fn is_ended(&self) -> bool {
        self.is_ended_at(Utc::now())
    }

    /// Earliest timeline entry strictly after `now`, with its index in the timeline.
    ///
    /// Ties keep the entry that appears first.
    pub fn next_deadline(&self, now: DateTime<Utc>) -> Option<(usize, &TimelineEvent)> {
        self.timeline
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline > now)
            .min_by_key(|(_, t)| t.deadline)
    }

    /// Indexes of all timeline entries strictly after `now`, soonest first.
    pub fn upcoming_indexes(&self, now: DateTime<Utc>) -> Vec<usize> {
        let mut upcoming: Vec<_> = self
            .timeline
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline > now)
            .collect();
        upcoming.sort_by_key(|(_, t)| t.deadline);
        upcoming.into_iter().map(|(i, _)| i).collect()
    }

    /// Signed time until the next relevant deadline.
    ///
    /// Positive: time until the earliest future entry. Otherwise: the last
    /// entry minus `now`, which is zero or negative.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.next_deadline(now) {
            Some((_, next)) => next.deadline - now,
            None => self.timeline.last().deadline - now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Conference,
    Competition,
    Activity,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Conference, Category::Competition, Category::Activity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Conference => "conference",
            Category::Competition => "competition",
            Category::Activity => "activity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = DeadlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conference" => Ok(Category::Conference),
            "competition" => Ok(Category::Competition),
            "activity" => Ok(Category::Activity),
            other => Err(DeadlineError::Parse(format!("Unknown category '{}'", other))),
        }
    }
}

/// A recurring series grouping its yearly occurrences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlineItem {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub tags: Vec<String>,
    #[serde(deserialize_with = "non_empty")]
    pub events: Vec<EventData>,
}

fn non_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let values = Vec::<T>::deserialize(deserializer)?;
    if values.is_empty() {
        return Err(serde::de::Error::custom("events must not be empty"));
    }
    Ok(values)
}

/// Parse a catalogue from the data source's JSON body.
///
/// Either the whole body is well-formed or nothing is returned.
pub fn parse_catalogue(body: &str) -> DeadlineResult<Vec<DeadlineItem>> {
    serde_json::from_str(body).map_err(|e| DeadlineError::Parse(e.to_string()))
}
