use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use datebook_core::error::CoreError;
use datebook_core::models::Event;
use datebook_core::repository::EventRepository;

use super::Session;
use crate::views::table::{display_events, ViewEvent};

pub fn print_on(session: &Session, date: NaiveDate) -> Result<()> {
    let calendar = session.directory.active()?;
    show(calendar.events().events_on(date), calendar.timezone());
    Ok(())
}

pub fn print_range(session: &Session, from: NaiveDateTime, to: NaiveDateTime) -> Result<()> {
    if to < from {
        return Err(CoreError::InvalidRange {
            start: from,
            end: to,
        }
        .into());
    }
    let calendar = session.directory.active()?;
    show(calendar.events().events_in_range(from, to), calendar.timezone());
    Ok(())
}

pub fn show_status(session: &Session, at: NaiveDateTime) -> Result<()> {
    let busy = session.directory.active()?.events().is_busy(at);
    println!("{}", if busy { "busy" } else { "available" });
    Ok(())
}

fn show(events: Vec<&Event>, timezone: chrono_tz::Tz) {
    let view_events: Vec<ViewEvent> = events
        .into_iter()
        .map(|event| ViewEvent::new(event, timezone))
        .collect();
    display_events(&view_events);
}
