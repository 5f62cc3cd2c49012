//! Application state store.
//!
//! Holds the fetched catalogue, the active filters, the favorites set and the
//! fetch status. State only changes through the mutators below; every change
//! is published to subscribers as an immutable [`AppState`] snapshot.
//!
//! Favorites are the only persisted field. They are read back when the store
//! is constructed and written through on every toggle.

mod favorites;
mod storage;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::catalogue::{Category, DeadlineItem};
use crate::engine::{Engine, FlatEvent};
use crate::filter::FilterSelection;
use crate::source::CatalogueSource;

pub use favorites::{Favorites, load_favorites, save_favorites};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Immutable snapshot of everything the store owns.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Empty until the first successful fetch.
    pub items: Arc<Vec<DeadlineItem>>,
    pub fetch_status: FetchStatus,
    pub filters: FilterSelection,
    pub favorites: Favorites,
    /// Set once persisted favorites have been restored.
    pub hydrated: bool,
}

impl AppState {
    pub fn loading(&self) -> bool {
        self.fetch_status == FetchStatus::Loading
    }

    pub fn is_favorite(&self, event_id: &str) -> bool {
        self.favorites.contains(event_id)
    }

    /// Flatten and index this snapshot's catalogue at `now`.
    pub fn engine(&self, now: DateTime<Utc>, min_similarity: f64) -> Engine<'_> {
        Engine::new(&self.items, now, min_similarity)
    }

    /// Filtered and ranked records for this snapshot's selections.
    pub fn view(&self, now: DateTime<Utc>, min_similarity: f64) -> Vec<FlatEvent<'_>> {
        self.engine(now, min_similarity).view(&self.filters, &self.favorites)
    }
}

pub struct Store<S> {
    state: watch::Sender<AppState>,
    source: S,
    storage: Box<dyn KeyValueStore>,
    /// Bumped at the start of every fetch; only the latest fetch may apply its result.
    fetch_generation: AtomicU64,
}

impl<S: CatalogueSource> Store<S> {
    /// Create a store and restore persisted favorites from `storage`.
    pub fn new(source: S, storage: Box<dyn KeyValueStore>) -> Self {
        let mut initial = AppState::default();

        match load_favorites(storage.as_ref()) {
            Ok(favorites) => {
                debug!(count = favorites.len(), "Restored favorites");
                initial.favorites = favorites;
                initial.hydrated = true;
            }
            Err(e) => warn!("Could not restore favorites: {e}"),
        }

        let (state, _) = watch::channel(initial);

        Store {
            state,
            source,
            storage,
            fetch_generation: AtomicU64::new(0),
        }
    }

    /// Current state. Cheap: the catalogue is shared, not copied.
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Fetch the catalogue and replace the stored one.
    ///
    /// Never fails: fetch and parse errors are logged, the previous catalogue
    /// is kept and the status becomes [`FetchStatus::Failed`]. No retries.
    /// If another fetch starts while this one is in flight, this one's
    /// result is discarded.
    pub async fn fetch_items(&self) {
        let generation = self.fetch_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| s.fetch_status = FetchStatus::Loading);
        info!("Fetching catalogue");

        let result = self.source.fetch().await;

        if self.fetch_generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding superseded fetch result");
            return;
        }

        match result {
            Ok(items) => {
                info!(items = items.len(), "Catalogue loaded");
                self.state.send_modify(|s| {
                    s.items = Arc::new(items);
                    s.fetch_status = FetchStatus::Loaded;
                });
            }
            Err(e) => {
                error!("Failed to load data: {e}");
                self.state
                    .send_modify(|s| s.fetch_status = FetchStatus::Failed(e.to_string()));
            }
        }
    }

    /// Replace every filter at once. Repeated tags or locations count once.
    pub fn set_filters(&self, selection: FilterSelection) {
        let selection = selection.deduplicated();
        self.state.send_modify(|s| s.filters = selection);
    }

    pub fn set_category(&self, category: Option<Category>) {
        self.state.send_modify(|s| s.filters.category = category);
    }

    pub fn toggle_tag(&self, tag: &str) {
        self.state.send_modify(|s| s.filters.toggle_tag(tag));
    }

    pub fn toggle_location(&self, location: &str) {
        self.state.send_modify(|s| s.filters.toggle_location(location));
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|s| s.filters.search_query = query);
    }

    pub fn set_show_only_favorites(&self, show: bool) {
        self.state.send_modify(|s| s.filters.favorites_only = show);
    }

    /// Flip membership of `event_id` and persist immediately.
    ///
    /// Returns whether the id is a favorite afterwards. A persistence failure
    /// is logged; the in-memory toggle still applies. An unhydrated store
    /// never writes, so an unreadable stored entry is left as it was.
    pub fn toggle_favorite(&self, event_id: &str) -> bool {
        let mut favorites = Favorites::new();
        let mut hydrated = false;
        self.state.send_modify(|s| {
            s.favorites.toggle(event_id);
            favorites = s.favorites.clone();
            hydrated = s.hydrated;
        });

        if !hydrated {
            warn!("Favorites were not restored; keeping this change in memory only");
        } else if let Err(e) = save_favorites(self.storage.as_ref(), &favorites) {
            error!("Failed to persist favorites: {e}");
        }

        favorites.contains(event_id)
    }
}
