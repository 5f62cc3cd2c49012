use anyhow::Result;
use chrono::Utc;
use oseddl_core::FilterSelection;
use oseddl_core::config::Config;
use owo_colors::OwoColorize;

use super::{load, open_store};
use crate::render::render_record;

pub async fn run(config: &Config, selection: FilterSelection) -> Result<()> {
    let store = open_store(config)?;
    load(&store).await;

    store.set_filters(selection);

    let state = store.snapshot();
    let now = Utc::now();
    let view = state.view(now, config.search_min_similarity);

    if view.is_empty() {
        println!("{}", "No events found".dimmed());
        if !state.filters.is_empty() {
            println!("{}", "Try loosening the filters or the search query.".dimmed());
        }
        return Ok(());
    }

    for (i, record) in view.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", render_record(record, state.is_favorite(&record.event.id), now));
    }

    Ok(())
}
