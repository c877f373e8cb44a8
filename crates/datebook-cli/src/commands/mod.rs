use anyhow::Result;
use chrono::NaiveTime;
use datebook_core::directory::CalendarDirectory;
use tracing::info;

use crate::config::Config;
use crate::parser::Command;

pub mod calendar;
pub mod copy;
pub mod event;
pub mod query;

/// State shared by every command of one run.
#[derive(Debug)]
pub struct Session {
    pub directory: CalendarDirectory,
    pub all_day: (NaiveTime, NaiveTime),
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        let mut directory = CalendarDirectory::new();
        if let Some(name) = &config.default_calendar {
            directory.create(name, &config.default_timezone)?;
            directory.use_calendar(name)?;
            info!(calendar = %name, timezone = %config.default_timezone, "Opened default calendar");
        }

        Ok(Self {
            directory,
            all_day: config.all_day_window()?,
        })
    }
}

/// Whether the runner should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn execute(session: &mut Session, command: Command) -> Result<Flow> {
    match command {
        Command::CreateCalendar { name, timezone } => {
            calendar::create_calendar(session, &name, &timezone)?
        }
        Command::EditCalendar {
            name,
            property,
            value,
        } => calendar::edit_calendar(session, &name, &property, &value)?,
        Command::UseCalendar { name } => calendar::use_calendar(session, &name)?,
        Command::DeleteCalendar { name } => calendar::delete_calendar(session, &name)?,
        Command::ListCalendars => calendar::list_calendars(session),
        Command::CreateEvent {
            subject,
            span,
            repeat,
        } => event::create_event(session, subject, span, repeat)?,
        Command::EditEvent {
            scope,
            property,
            subject,
            start,
            end,
            value,
        } => event::edit_event(session, scope, &property, subject, start, end, &value)?,
        Command::PrintOn { date } => query::print_on(session, date)?,
        Command::PrintRange { from, to } => query::print_range(session, from, to)?,
        Command::ShowStatus { at } => query::show_status(session, at)?,
        Command::CopyEvent {
            subject,
            start,
            target,
            dest_start,
        } => copy::copy_event(session, &subject, start, &target, dest_start)?,
        Command::CopyDay {
            date,
            target,
            dest_date,
        } => copy::copy_day(session, date, &target, dest_date)?,
        Command::CopyRange {
            from,
            to,
            target,
            dest_date,
        } => copy::copy_range(session, from, to, &target, dest_date)?,
        Command::Help => print_help(),
        Command::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

pub fn print_help() {
    println!(
        "\
Available Commands:
CALENDARS:
  create calendar --name <name> --timezone <area/location>
  edit calendar --name <name> --property <name|timezone> <value>
  use calendar --name <name>
  delete calendar --name <name>
  list calendars

CREATE EVENTS:
  create event <subject> from <start> to <end> [repeats <weekdays> for <N> times]
  create event <subject> from <start> to <end> [repeats <weekdays> until <date>]
  create event <subject> on <date> [repeats <weekdays> (for <N> times | until <date>)]

EDIT EVENTS:
  edit event <property> <subject> from <start> to <end> with <value>
  edit events <property> <subject> from <start> with <value>
  edit series <property> <subject> from <start> with <value>

QUERIES:
  print events on <date>
  print events from <start> to <end>
  show status on <dateTime>

COPY:
  copy event <subject> on <dateTime> --target <calendar> to <dateTime>
  copy events on <date> --target <calendar> to <date>
  copy events between <date> and <date> --target <calendar> to <date>

OTHER:
  help - Show this help message
  exit - Exit the application

Dates are YYYY-MM-DD, date-times YYYY-MM-DDTHH:MM. Weekdays use MTWRFSU
(R is Thursday, U is Sunday). Quote subjects that contain spaces."
    );
}
