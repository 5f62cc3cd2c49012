//! Core library for browsing open-source event deadlines.
//!
//! - `catalogue`: items, occurrences and timeline entries as loaded from the data source
//! - `engine`: flattening into (item, event) records, filtering and urgency ranking
//! - `search`: typo-tolerant search over record text
//! - `store`: application state, favorites persistence and fetch orchestration
//! - `countdown`: per-deadline live countdowns

pub mod catalogue;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod search;
pub mod source;
pub mod store;

pub use catalogue::{Category, DeadlineItem, EventData, Timeline, TimelineEvent};
pub use engine::{Engine, FlatEvent};
pub use error::{DeadlineError, DeadlineResult};
pub use filter::FilterSelection;
pub use store::{AppState, FetchStatus, Store};
