use anyhow::Result;
use oseddl_core::Category;
use oseddl_core::catalogue::{all_locations, all_tags};
use oseddl_core::config::Config;
use owo_colors::OwoColorize;

use super::{load, open_store};
use crate::render::Render;

pub async fn run(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let state = load(&store).await;

    println!("{}", "Categories".bold());
    for category in Category::ALL {
        println!("  {} {}", category.render(), category.as_str().dimmed());
    }

    println!("\n{}", "Locations".bold());
    for location in all_locations(&state.items) {
        println!("  {}", location);
    }

    println!("\n{}", "Tags".bold());
    let tags = all_tags(&state.items);
    if !tags.is_empty() {
        println!("  {}", tags.join(", "));
    }

    Ok(())
}
