use anyhow::Result;
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;
use datebook_core::models::{EditRequest, EditScope, NewEventData, NewSeriesData};

use super::Session;
use crate::parser::{Repeat, Span};

pub fn create_event(
    session: &mut Session,
    subject: String,
    span: Span,
    repeat: Option<Repeat>,
) -> Result<()> {
    let (start, end, kind) = match span {
        Span::Timed { start, end } => (start, end, "timed"),
        Span::AllDay(date) => (
            date.and_time(session.all_day.0),
            date.and_time(session.all_day.1),
            "all-day",
        ),
    };
    let calendar = session.directory.active_mut()?;

    match repeat {
        None => {
            let event = calendar.create_event(NewEventData {
                subject,
                start,
                end: Some(end),
                ..Default::default()
            })?;
            println!("Created {} event: {}", kind, event.subject());
        }
        Some(repeat) => {
            let data = NewSeriesData::new(subject, start, end, repeat.weekdays, repeat.termination);
            let count = calendar.create_series(&data)?;
            if count == 0 {
                println!(
                    "{}",
                    format!("No dates matched; series '{}' has no occurrences", data.subject).yellow()
                );
            } else {
                println!(
                    "Created recurring {} event series: {} ({} occurrences)",
                    kind, data.subject, count
                );
            }
        }
    }
    Ok(())
}

pub fn edit_event(
    session: &mut Session,
    scope: EditScope,
    property: &str,
    subject: String,
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    value: &str,
) -> Result<()> {
    let mut request = EditRequest::new(scope, subject, start, property, value)?;
    if let Some(end) = end {
        request = request.with_end(end);
    }

    let outcome = session.directory.active_mut()?.edit(&request)?;
    match scope {
        EditScope::ThisOccurrence => println!("Edited single event"),
        EditScope::ThisAndFuture => {
            println!("Modified {} future event(s) in series", outcome.modified)
        }
        EditScope::EntireSeries => {
            println!("Modified {} event(s) in entire series", outcome.modified)
        }
    }
    if outcome.skipped > 0 {
        println!(
            "{}",
            format!(
                "Skipped {} occurrence(s) that would duplicate an existing event",
                outcome.skipped
            )
            .yellow()
        );
    }
    Ok(())
}
