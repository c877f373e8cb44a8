use chrono::{NaiveDate, NaiveDateTime};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use datebook_core::error::CoreError;
use datebook_core::models::{parse_date, parse_date_time, EditScope, Termination, WeekdaySet};

#[derive(Parser)]
#[grammar = "command.pest"]
pub struct CommandParser;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unrecognized command. Type 'help' for available commands.\n{0}")]
    Pest(#[from] Box<pest::error::Error<Rule>>),
    #[error("Malformed command: missing {0}")]
    Missing(&'static str),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Headless script ended without an 'exit' command")]
    MissingExit,
}

/// How long a created event lasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Timed {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Spans the configured all-day window of this date.
    AllDay(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repeat {
    pub weekdays: WeekdaySet,
    pub termination: Termination,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateCalendar {
        name: String,
        timezone: String,
    },
    EditCalendar {
        name: String,
        property: String,
        value: String,
    },
    UseCalendar {
        name: String,
    },
    DeleteCalendar {
        name: String,
    },
    ListCalendars,
    CreateEvent {
        subject: String,
        span: Span,
        repeat: Option<Repeat>,
    },
    EditEvent {
        scope: EditScope,
        property: String,
        subject: String,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        value: String,
    },
    PrintOn {
        date: NaiveDate,
    },
    PrintRange {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
    ShowStatus {
        at: NaiveDateTime,
    },
    CopyEvent {
        subject: String,
        start: NaiveDateTime,
        target: String,
        dest_start: NaiveDateTime,
    },
    CopyDay {
        date: NaiveDate,
        target: String,
        dest_date: NaiveDate,
    },
    CopyRange {
        from: NaiveDate,
        to: NaiveDate,
        target: String,
        dest_date: NaiveDate,
    },
    Help,
    Exit,
}

pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let mut pairs = CommandParser::parse(Rule::command, input.trim()).map_err(Box::new)?;
    let command = next(&mut pairs, "command")?;
    let mut inner = command.into_inner();
    let pair = next(&mut inner, "command body")?;
    let rule = pair.as_rule();
    let mut args = pair.into_inner();

    let command = match rule {
        Rule::create_calendar => Command::CreateCalendar {
            name: text(next(&mut args, "calendar name")?),
            timezone: next(&mut args, "timezone")?.as_str().to_string(),
        },
        Rule::edit_calendar => Command::EditCalendar {
            name: text(next(&mut args, "calendar name")?),
            property: next(&mut args, "property")?.as_str().to_string(),
            value: text(next(&mut args, "value")?),
        },
        Rule::use_calendar => Command::UseCalendar {
            name: text(next(&mut args, "calendar name")?),
        },
        Rule::delete_calendar => Command::DeleteCalendar {
            name: text(next(&mut args, "calendar name")?),
        },
        Rule::list_calendars => Command::ListCalendars,
        Rule::create_event => build_create_event(args)?,
        Rule::edit_event => build_edit_event(args)?,
        Rule::print_on => Command::PrintOn {
            date: date(next(&mut args, "date")?)?,
        },
        Rule::print_range => Command::PrintRange {
            from: date_time(next(&mut args, "start")?)?,
            to: date_time(next(&mut args, "end")?)?,
        },
        Rule::show_status => Command::ShowStatus {
            at: date_time(next(&mut args, "date/time")?)?,
        },
        Rule::copy_event => Command::CopyEvent {
            subject: text(next(&mut args, "subject")?),
            start: date_time(next(&mut args, "start")?)?,
            target: text(next(&mut args, "target calendar")?),
            dest_start: date_time(next(&mut args, "destination start")?)?,
        },
        Rule::copy_day => Command::CopyDay {
            date: date(next(&mut args, "date")?)?,
            target: text(next(&mut args, "target calendar")?),
            dest_date: date(next(&mut args, "destination date")?)?,
        },
        Rule::copy_range => Command::CopyRange {
            from: date(next(&mut args, "first date")?)?,
            to: date(next(&mut args, "last date")?)?,
            target: text(next(&mut args, "target calendar")?),
            dest_date: date(next(&mut args, "destination date")?)?,
        },
        Rule::help => Command::Help,
        Rule::exit => Command::Exit,
        _ => return Err(CommandError::Missing("command body")),
    };
    Ok(command)
}

fn build_create_event(mut args: Pairs<Rule>) -> Result<Command, CommandError> {
    let subject = text(next(&mut args, "subject")?);

    let span_pair = next(&mut args, "event time")?;
    let span = match span_pair.as_rule() {
        Rule::timed_span => {
            let mut times = span_pair.into_inner();
            Span::Timed {
                start: date_time(next(&mut times, "start")?)?,
                end: date_time(next(&mut times, "end")?)?,
            }
        }
        _ => {
            let mut day = span_pair.into_inner();
            Span::AllDay(date(next(&mut day, "date")?)?)
        }
    };

    let repeat = match args.next() {
        Some(repeat) => Some(build_repeat(repeat)?),
        None => None,
    };

    Ok(Command::CreateEvent {
        subject,
        span,
        repeat,
    })
}

fn build_repeat(pair: Pair<Rule>) -> Result<Repeat, CommandError> {
    let mut inner = pair.into_inner();
    let weekdays: WeekdaySet = next(&mut inner, "weekdays")?.as_str().parse()?;

    let limit = next(&mut inner, "repeat limit")?;
    let termination = match limit.as_rule() {
        Rule::repeat_count => {
            let raw = next(&mut limit.into_inner(), "count")?.as_str();
            let count = raw
                .parse::<u32>()
                .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
            Termination::Count(count)
        }
        _ => Termination::Until(date(next(&mut limit.into_inner(), "until date")?)?),
    };

    Ok(Repeat {
        weekdays,
        termination,
    })
}

fn build_edit_event(mut args: Pairs<Rule>) -> Result<Command, CommandError> {
    let scope = match next(&mut args, "edit scope")?.as_str().to_lowercase().as_str() {
        "event" => EditScope::ThisOccurrence,
        "events" => EditScope::ThisAndFuture,
        _ => EditScope::EntireSeries,
    };
    let property = next(&mut args, "property")?.as_str().to_string();
    let subject = text(next(&mut args, "subject")?);
    let start = date_time(next(&mut args, "start")?)?;

    // The optional end comes before the new value
    let mut remaining: Vec<Pair<Rule>> = args.collect();
    let value = text(remaining.pop().ok_or(CommandError::Missing("new value"))?);
    let end = match remaining.pop() {
        Some(end) => Some(date_time(end)?),
        None => None,
    };

    Ok(Command::EditEvent {
        scope,
        property,
        subject,
        start,
        end,
        value,
    })
}

fn next<'i>(pairs: &mut Pairs<'i, Rule>, what: &'static str) -> Result<Pair<'i, Rule>, CommandError> {
    pairs.next().ok_or(CommandError::Missing(what))
}

fn text(pair: Pair<Rule>) -> String {
    match pair.as_rule() {
        Rule::quoted => pair
            .into_inner()
            .next()
            .map(|inner| inner.as_str().to_string())
            .unwrap_or_default(),
        _ => pair.as_str().trim().to_string(),
    }
}

fn date(pair: Pair<Rule>) -> Result<NaiveDate, CommandError> {
    Ok(parse_date(pair.as_str())?)
}

fn date_time(pair: Pair<Rule>) -> Result<NaiveDateTime, CommandError> {
    Ok(parse_date_time(pair.as_str())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    mod calendar_command_tests {
        use super::*;

        #[test]
        fn test_create_calendar() {
            let command =
                parse_command("create calendar --name Work --timezone America/New_York").unwrap();
            assert_eq!(
                command,
                Command::CreateCalendar {
                    name: "Work".to_string(),
                    timezone: "America/New_York".to_string(),
                }
            );
        }

        #[test]
        fn test_quoted_calendar_name_and_multiword_value() {
            let command =
                parse_command(r#"edit calendar --name "My Work" --property name Side Projects"#)
                    .unwrap();
            assert_eq!(
                command,
                Command::EditCalendar {
                    name: "My Work".to_string(),
                    property: "name".to_string(),
                    value: "Side Projects".to_string(),
                }
            );
        }

        #[rstest]
        #[case("use calendar --name Home", Command::UseCalendar { name: "Home".to_string() })]
        #[case("delete calendar --name Home", Command::DeleteCalendar { name: "Home".to_string() })]
        #[case("list calendars", Command::ListCalendars)]
        #[case("HELP", Command::Help)]
        #[case("  exit  ", Command::Exit)]
        fn test_simple_commands(#[case] input: &str, #[case] expected: Command) {
            assert_eq!(parse_command(input).unwrap(), expected);
        }
    }

    mod event_command_tests {
        use super::*;

        #[test]
        fn test_create_timed_event() {
            let command =
                parse_command("create event Focus from 2025-06-10T09:00 to 2025-06-10T10:00")
                    .unwrap();
            assert_eq!(
                command,
                Command::CreateEvent {
                    subject: "Focus".to_string(),
                    span: Span::Timed {
                        start: at(2025, 6, 10, 9, 0),
                        end: at(2025, 6, 10, 10, 0),
                    },
                    repeat: None,
                }
            );
        }

        #[test]
        fn test_create_recurring_with_count() {
            let command = parse_command(
                r#"create event "Math Class" from 2025-06-02T09:00 to 2025-06-02T10:00 repeats MWF for 3 times"#,
            )
            .unwrap();
            match command {
                Command::CreateEvent {
                    subject,
                    repeat: Some(repeat),
                    ..
                } => {
                    assert_eq!(subject, "Math Class");
                    assert_eq!(repeat.weekdays.to_string(), "MWF");
                    assert_eq!(repeat.termination, Termination::Count(3));
                }
                other => panic!("unexpected command: {:?}", other),
            }
        }

        #[test]
        fn test_create_all_day_recurring_until() {
            let command =
                parse_command("create event Holiday on 2025-06-02 repeats SU until 2025-06-30")
                    .unwrap();
            assert_eq!(
                command,
                Command::CreateEvent {
                    subject: "Holiday".to_string(),
                    span: Span::AllDay(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()),
                    repeat: Some(Repeat {
                        weekdays: "SU".parse().unwrap(),
                        termination: Termination::Until(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()),
                    }),
                }
            );
        }

        #[test]
        fn test_bad_weekday_letter_is_core_error() {
            let result = parse_command("create event X on 2025-06-02 repeats MXZ for 2 times");
            assert!(matches!(
                result,
                Err(CommandError::Core(CoreError::InvalidInput(_)))
            ));
        }

        #[test]
        fn test_edit_single_with_end() {
            let command = parse_command(
                "edit event location Focus from 2025-06-10T09:00 to 2025-06-10T10:00 with Room 101",
            )
            .unwrap();
            assert_eq!(
                command,
                Command::EditEvent {
                    scope: EditScope::ThisOccurrence,
                    property: "location".to_string(),
                    subject: "Focus".to_string(),
                    start: at(2025, 6, 10, 9, 0),
                    end: Some(at(2025, 6, 10, 10, 0)),
                    value: "Room 101".to_string(),
                }
            );
        }

        #[rstest]
        #[case("events", EditScope::ThisAndFuture)]
        #[case("series", EditScope::EntireSeries)]
        fn test_edit_batch_scopes(#[case] keyword: &str, #[case] scope: EditScope) {
            let input = format!(
                r#"edit {} subject "Math Class" from 2025-06-04T09:00 with "Algebra I""#,
                keyword
            );
            match parse_command(&input).unwrap() {
                Command::EditEvent {
                    scope: parsed,
                    end,
                    value,
                    subject,
                    ..
                } => {
                    assert_eq!(parsed, scope);
                    assert_eq!(end, None);
                    assert_eq!(subject, "Math Class");
                    assert_eq!(value, "Algebra I");
                }
                other => panic!("unexpected command: {:?}", other),
            }
        }
    }

    mod query_and_copy_tests {
        use super::*;

        #[test]
        fn test_queries() {
            assert_eq!(
                parse_command("print events on 2025-06-10").unwrap(),
                Command::PrintOn {
                    date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
                }
            );
            assert_eq!(
                parse_command("print events from 2025-06-10T08:00 to 2025-06-11").unwrap(),
                Command::PrintRange {
                    from: at(2025, 6, 10, 8, 0),
                    to: at(2025, 6, 11, 0, 0),
                }
            );
            assert_eq!(
                parse_command("show status on 2025-06-10T09:30").unwrap(),
                Command::ShowStatus {
                    at: at(2025, 6, 10, 9, 30)
                }
            );
        }

        #[test]
        fn test_copy_forms() {
            assert_eq!(
                parse_command("copy event Focus on 2025-06-10T09:00 --target Home to 2025-06-11T09:00")
                    .unwrap(),
                Command::CopyEvent {
                    subject: "Focus".to_string(),
                    start: at(2025, 6, 10, 9, 0),
                    target: "Home".to_string(),
                    dest_start: at(2025, 6, 11, 9, 0),
                }
            );
            assert_eq!(
                parse_command("copy events on 2025-06-10 --target Home to 2025-06-17").unwrap(),
                Command::CopyDay {
                    date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
                    target: "Home".to_string(),
                    dest_date: NaiveDate::from_ymd_opt(2025, 6, 17).unwrap(),
                }
            );
            assert_eq!(
                parse_command("copy events between 2025-06-02 and 2025-06-06 --target Home to 2025-07-07")
                    .unwrap(),
                Command::CopyRange {
                    from: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                    to: NaiveDate::from_ymd_opt(2025, 6, 6).unwrap(),
                    target: "Home".to_string(),
                    dest_date: NaiveDate::from_ymd_opt(2025, 7, 7).unwrap(),
                }
            );
        }

        #[rstest]
        #[case("")]
        #[case("launch rockets")]
        #[case("create event Focus from tomorrow to later")]
        #[case("print events on 10/06/2025")]
        fn test_rejects_malformed(#[case] input: &str) {
            assert!(matches!(parse_command(input), Err(CommandError::Pest(_))));
        }

        #[test]
        fn test_impossible_date_is_core_error() {
            assert!(matches!(
                parse_command("print events on 2025-02-30"),
                Err(CommandError::Core(CoreError::InvalidInput(_)))
            ));
        }
    }
}
