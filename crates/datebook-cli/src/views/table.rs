use chrono::NaiveDateTime;
use chrono_tz::Tz;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use datebook_core::models::{Event, Visibility};
use datebook_core::timezone::get_timezone_abbreviation;

#[derive(Debug, Clone)]
pub struct ViewEvent {
    pub subject: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    pub description: String,
    pub visibility: Visibility,
    pub recurring: bool,
    pub zone_abbreviation: String,
}

impl ViewEvent {
    pub fn new(event: &Event, timezone: Tz) -> Self {
        Self {
            subject: event.subject().to_string(),
            start: event.start(),
            end: event.end(),
            location: event.location().to_string(),
            description: event.description().to_string(),
            visibility: event.visibility(),
            recurring: event.series_id().is_some(),
            zone_abbreviation: get_timezone_abbreviation(timezone, event.start()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewCalendar {
    pub name: String,
    pub timezone: Tz,
    pub events: usize,
    pub active: bool,
}

pub fn display_events(events: &[ViewEvent]) {
    if events.is_empty() {
        println!("No events found");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Start", "End", "Location", "Description", "Visibility"]);

    for event in events {
        let mut row = Row::new();

        let mut display_name = String::new();
        if event.recurring {
            display_name.push('↻');
            display_name.push(' ');
        }
        display_name.push_str(&event.subject);
        let mut name_cell = Cell::new(display_name);
        if event.visibility == Visibility::Private {
            name_cell = name_cell.fg(Color::DarkGrey);
        } else {
            name_cell = name_cell.add_attribute(Attribute::Bold);
        }
        row.add_cell(name_cell);

        row.add_cell(Cell::new(format!(
            "{} {}",
            event.start.format("%Y-%m-%d %H:%M"),
            event.zone_abbreviation
        )));
        // Same-day events only repeat the time
        let end = if event.end.date() == event.start.date() {
            event.end.format("%H:%M").to_string()
        } else {
            event.end.format("%Y-%m-%d %H:%M").to_string()
        };
        row.add_cell(Cell::new(end));
        row.add_cell(Cell::new(if event.location.is_empty() {
            "-"
        } else {
            event.location.as_str()
        }));
        row.add_cell(Cell::new(if event.description.is_empty() {
            "-"
        } else {
            event.description.as_str()
        }));
        row.add_cell(Cell::new(event.visibility.to_string()));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_calendars(calendars: &[ViewCalendar]) {
    if calendars.is_empty() {
        println!("No calendars found");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["", "Name", "Timezone", "Events"]);

    for calendar in calendars {
        let mut row = Row::new();
        row.add_cell(Cell::new(if calendar.active { "*" } else { "" }).fg(Color::Green));
        let mut name_cell = Cell::new(&calendar.name);
        if calendar.active {
            name_cell = name_cell.add_attribute(Attribute::Bold);
        }
        row.add_cell(name_cell);
        row.add_cell(Cell::new(calendar.timezone.name()));
        row.add_cell(Cell::new(calendar.events));
        table.add_row(row);
    }

    println!("{table}");
}
