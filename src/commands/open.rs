use anyhow::Result;
use oseddl_core::catalogue::find_event;
use oseddl_core::config::Config;

use super::{load, open_store};

pub async fn run(config: &Config, event_id: &str) -> Result<()> {
    let store = open_store(config)?;
    let state = load(&store).await;

    let Some((_, event)) = find_event(&state.items, event_id) else {
        anyhow::bail!("Event '{}' not found", event_id);
    };

    if open::that(&event.link).is_err() {
        println!("Open this link in your browser:\n  {}", event.link);
    }

    Ok(())
}
