use anyhow::Result;
use oseddl_core::catalogue::find_event;
use oseddl_core::config::Config;
use owo_colors::OwoColorize;

use super::{load, open_store};

pub async fn run(config: &Config, event_id: &str) -> Result<()> {
    let store = open_store(config)?;
    let state = load(&store).await;

    // Without a catalogue (offline) any id may be toggled.
    if !state.items.is_empty()
        && find_event(&state.items, event_id).is_none()
        && !state.is_favorite(event_id)
    {
        anyhow::bail!("Event '{}' not found", event_id);
    }

    if store.toggle_favorite(event_id) {
        println!("{} {}", "★".yellow(), format!("Added {event_id} to favorites").green());
    } else {
        println!("{} {}", "☆".dimmed(), format!("Removed {event_id} from favorites").dimmed());
    }

    Ok(())
}
