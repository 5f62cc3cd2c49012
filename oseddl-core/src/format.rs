//! Display helpers for deadlines and categories.

use chrono::{DateTime, Local, Offset, Utc};

use crate::catalogue::Category;

/// `YYYY-MM-DD HH:MM:SS (UTC±H)` in the local time zone.
pub fn format_deadline(deadline: DateTime<Utc>) -> String {
    format_deadline_in(deadline.with_timezone(&Local))
}

fn format_deadline_in<Tz: chrono::TimeZone>(local: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let offset_secs = local.offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { '+' } else { '-' };
    let hours = offset_secs.abs() / 3_600;

    format!("{} (UTC{}{})", local.format("%Y-%m-%d %H:%M:%S"), sign, hours)
}

/// `MM-DD` in the local time zone, for compact timelines.
pub fn format_timeline_date(deadline: DateTime<Utc>) -> String {
    format_timeline_date_in(deadline.with_timezone(&Local))
}

fn format_timeline_date_in<Tz: chrono::TimeZone>(local: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    local.format("%m-%d").to_string()
}

pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::Conference => "Conference",
        Category::Competition => "Competition",
        Category::Activity => "Activity",
    }
}
