/// Remote catalogue endpoint (JSON array of deadline items).
pub const DEFAULT_ENDPOINT: &str = "https://oseddl.openatom.club/api/data";

/// Key of the persisted favorites entry.
pub const FAVORITES_STORAGE_KEY: &str = "favorites-storage";

/// Minimum similarity a record needs to match a search query. Higher is stricter.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.7;

/// Default HTTP timeout for catalogue fetches, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
