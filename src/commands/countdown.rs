use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use oseddl_core::catalogue::find_event;
use oseddl_core::config::Config;
use oseddl_core::countdown::CountdownTimer;
use oseddl_core::format::format_deadline;
use owo_colors::OwoColorize;

use super::{load, open_store};

pub async fn run(config: &Config, event_id: &str) -> Result<()> {
    let store = open_store(config)?;
    let state = load(&store).await;

    let Some((item, event)) = find_event(&state.items, event_id) else {
        anyhow::bail!("Event '{}' not found", event_id);
    };

    println!("{} {}", item.title.bold(), event.year.to_string().dimmed());

    let Some((_, next)) = event.next_deadline(Utc::now()) else {
        println!("{}", "Expired".red());
        return Ok(());
    };

    println!("  {} {}", next.comment, format_deadline(next.deadline).dimmed());

    let timer = CountdownTimer::start(next.deadline);
    let mut ticks = timer.subscribe();
    let mut stdout = std::io::stdout();

    loop {
        let countdown = *ticks.borrow_and_update();
        print!("\r  {}   ", countdown.to_string().cyan());
        stdout.flush()?;

        if countdown.is_expired() {
            break;
        }

        tokio::select! {
            changed = ticks.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    println!();
    timer.stop();
    Ok(())
}
