pub mod config;
pub mod countdown;
pub mod facets;
pub mod fav;
pub mod list;
pub mod open;

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use oseddl_core::config::Config;
use oseddl_core::source::HttpSource;
use oseddl_core::store::JsonFileStore;
use oseddl_core::{AppState, FetchStatus, Store};
use owo_colors::OwoColorize;

pub fn open_store(config: &Config) -> Result<Store<HttpSource>> {
    let source = HttpSource::new(&config.endpoint, config.timeout())?;
    let storage = JsonFileStore::new(config.data_dir()?);
    Ok(Store::new(source, Box::new(storage)))
}

/// Fetch the catalogue behind a spinner and return the resulting state.
///
/// A failed fetch is reported but not fatal: the (possibly empty) previous
/// catalogue is still returned.
pub async fn load(store: &Store<HttpSource>) -> AppState {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/", "-"])
        .template("{msg} {spinner}")
    {
        spinner.set_style(style);
    }
    spinner.set_message("Loading events");
    spinner.enable_steady_tick(Duration::from_millis(80));

    store.fetch_items().await;
    spinner.finish_and_clear();

    let state = store.snapshot();
    if let FetchStatus::Failed(reason) = &state.fetch_status {
        eprintln!("{} {}", "Could not load events:".red(), reason.dimmed());
    }
    state
}
