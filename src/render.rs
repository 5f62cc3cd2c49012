//! TUI rendering for deadline records.
//!
//! Extension traits and helpers that add colored terminal output to
//! oseddl-core types using owo_colors.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use oseddl_core::format::{category_label, format_deadline, format_timeline_date};
use oseddl_core::{Category, EventData, FlatEvent};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        let label = format!("[{}]", category_label(*self));
        match self {
            Category::Conference => label.blue().to_string(),
            Category::Competition => label.magenta().to_string(),
            Category::Activity => label.green().to_string(),
        }
    }
}

/// Multi-line card for one record.
pub fn render_record(record: &FlatEvent<'_>, is_favorite: bool, now: DateTime<Utc>) -> String {
    let item = record.item;
    let event = record.event;
    let mut lines = Vec::new();

    let star = if is_favorite {
        "★".yellow().to_string()
    } else {
        " ".to_string()
    };
    let mut header = format!(
        "{} {} {} {}",
        star,
        item.category.render(),
        item.title.bold(),
        event.year.to_string().dimmed()
    );
    if record.is_ended() {
        header.push_str(&format!(" {}", "(ended)".red()));
    }
    lines.push(header);

    lines.push(format!(
        "   {} · {} · {}",
        event.place,
        event.date,
        event.timezone.dimmed()
    ));

    match event.next_deadline(now) {
        Some((_, next)) => lines.push(format!(
            "   {} {} {}",
            next.comment,
            format_deadline(next.deadline).dimmed(),
            format!("in {}", humanize(record.time_remaining)).cyan()
        )),
        None => lines.push(format!(
            "   {}",
            format!("ended {} ago", humanize(-record.time_remaining)).dimmed()
        )),
    }

    lines.push(format!("   {}", render_timeline(event, now)));

    if !item.tags.is_empty() {
        lines.push(format!("   {}", item.tags.join(", ").dimmed()));
    }
    lines.push(format!("   {} {}", event.id.dimmed(), event.link.underline()));

    lines.join("\n")
}

/// `03-01 ● 04-15 ○ 05-20 ○`: past entries dimmed, the next one highlighted.
fn render_timeline(event: &EventData, now: DateTime<Utc>) -> String {
    let next = event.next_deadline(now).map(|(i, _)| i);

    event
        .timeline
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let date = format_timeline_date(entry.deadline);
            if Some(i) == next {
                format!("{} {}", date, "●").yellow().bold().to_string()
            } else if entry.deadline > now {
                format!("{} {}", date, "○").green().to_string()
            } else {
                format!("{} {}", date, "·").dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Minute-resolution human duration, e.g. `3days 4h 5m`.
fn humanize(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0) as u64;
    if secs < 60 {
        return "less than a minute".to_string();
    }
    humantime::format_duration(StdDuration::from_secs(secs - secs % 60)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_truncates_to_minutes() {
        let d = Duration::days(3) + Duration::hours(4) + Duration::minutes(5) + Duration::seconds(59);
        assert_eq!(humanize(d), "3days 4h 5m");
    }

    #[test]
    fn humanize_short_and_negative() {
        assert_eq!(humanize(Duration::seconds(30)), "less than a minute");
        assert_eq!(humanize(Duration::seconds(-30)), "less than a minute");
    }
}
