use anyhow::Result;
use owo_colors::OwoColorize;

use super::Session;
use crate::views::table::{display_calendars, ViewCalendar};

pub fn create_calendar(session: &mut Session, name: &str, timezone: &str) -> Result<()> {
    let calendar = session.directory.create(name, timezone)?;
    println!(
        "Created calendar '{}' ({})",
        calendar.name().cyan(),
        calendar.timezone().name()
    );
    Ok(())
}

pub fn edit_calendar(session: &mut Session, name: &str, property: &str, value: &str) -> Result<()> {
    session.directory.edit(name, property, value)?;
    println!("Updated calendar '{}': {} = {}", name, property.to_lowercase(), value);
    Ok(())
}

pub fn use_calendar(session: &mut Session, name: &str) -> Result<()> {
    session.directory.use_calendar(name)?;
    println!("Using calendar '{}'", name.cyan());
    Ok(())
}

pub fn delete_calendar(session: &mut Session, name: &str) -> Result<()> {
    let removed = session.directory.delete(name)?;
    println!(
        "Deleted calendar '{}' and its {} event(s)",
        removed.name(),
        removed.events().len()
    );
    Ok(())
}

pub fn list_calendars(session: &Session) {
    let active = session.directory.active_name();
    let calendars: Vec<ViewCalendar> = session
        .directory
        .list()
        .into_iter()
        .filter_map(|name| session.directory.calendar(name).ok())
        .map(|calendar| ViewCalendar {
            name: calendar.name().to_string(),
            timezone: calendar.timezone(),
            events: calendar.events().len(),
            active: active == Some(calendar.name()),
        })
        .collect();

    display_calendars(&calendars);
}
