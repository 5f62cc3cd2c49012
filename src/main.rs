mod commands;
mod logging;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use oseddl_core::config::Config;
use oseddl_core::{Category, FilterSelection};

#[derive(Parser)]
#[command(name = "oseddl")]
#[command(about = "Deadlines of open-source conferences, competitions and activities, most urgent first")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events ranked by their next deadline
    List {
        /// Only this category (conference, competition, activity)
        #[arg(short, long)]
        category: Option<Category>,

        /// Keep events carrying any of these tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Keep events held in any of these places (repeatable)
        #[arg(short, long = "location")]
        locations: Vec<String>,

        /// Fuzzy search over titles, descriptions, tags and places
        #[arg(short, long)]
        search: Option<String>,

        /// Only show favorited events
        #[arg(short, long)]
        favorites: bool,
    },
    /// Show available categories, tags and locations
    Facets,
    /// Add or remove an event from favorites
    Fav {
        /// Event id (e.g. "rustconf-2025")
        event_id: String,
    },
    /// Live countdown to an event's next deadline
    Countdown {
        event_id: String,
    },
    /// Open an event's page in the browser
    Open {
        event_id: String,
    },
    /// Show configuration paths
    Config {
        /// Write a commented default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::List {
            category,
            tags,
            locations,
            search,
            favorites,
        } => {
            let selection = FilterSelection {
                category,
                tags,
                locations,
                search_query: search.unwrap_or_default(),
                favorites_only: favorites,
            };
            commands::list::run(&config, selection).await
        }
        Commands::Facets => commands::facets::run(&config).await,
        Commands::Fav { event_id } => commands::fav::run(&config, &event_id).await,
        Commands::Countdown { event_id } => commands::countdown::run(&config, &event_id).await,
        Commands::Open { event_id } => commands::open::run(&config, &event_id).await,
        Commands::Config { init } => commands::config::run(&config, init),
    }
}
