use chrono::{NaiveDate, NaiveDateTime};
use datebook_core::directory::CalendarDirectory;
use datebook_core::error::CoreError;
use datebook_core::models::*;
use datebook_core::repository::EventRepository;
use rstest::{fixture, rstest};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Two calendars, "School" (New York, active) holding a Math Class series on
/// Mon/Wed/Fri from 2025-06-02 and "Home" (Los Angeles), empty.
#[fixture]
fn school() -> CalendarDirectory {
    let mut directory = CalendarDirectory::new();
    directory
        .create("School", "America/New_York")
        .expect("Failed to create School calendar");
    directory
        .create("Home", "America/Los_Angeles")
        .expect("Failed to create Home calendar");
    directory.use_calendar("School").unwrap();

    let series = NewSeriesData::new(
        "Math Class",
        at(2025, 6, 2, 9, 0),
        at(2025, 6, 2, 10, 0),
        "MWF".parse().unwrap(),
        Termination::Count(6),
    );
    directory
        .active_mut()
        .unwrap()
        .create_series(&series)
        .expect("Failed to create Math Class series");
    directory
}

#[rstest]
fn test_series_creation_and_queries(school: CalendarDirectory) {
    let events = school.active().unwrap().events();
    assert_eq!(events.len(), 6);

    let wednesday = events.events_on(date(2025, 6, 4));
    assert_eq!(wednesday.len(), 1);
    assert_eq!(wednesday[0].start(), at(2025, 6, 4, 9, 0));

    assert!(events.events_on(date(2025, 6, 3)).is_empty());

    let first_week = events.events_in_range(at(2025, 6, 2, 0, 0), at(2025, 6, 7, 0, 0));
    assert_eq!(first_week.len(), 3);

    assert!(events.is_busy(at(2025, 6, 6, 9, 30)));
    assert!(!events.is_busy(at(2025, 6, 6, 10, 0)));
}

#[rstest]
fn test_recreating_a_series_is_rejected(mut school: CalendarDirectory) {
    let again = NewSeriesData::new(
        "Math Class",
        at(2025, 6, 2, 9, 0),
        at(2025, 6, 2, 10, 0),
        "MWF".parse().unwrap(),
        Termination::Count(2),
    );
    let result = school.active_mut().unwrap().create_series(&again);
    assert!(matches!(result, Err(CoreError::DuplicateEvent(_))));
    assert_eq!(school.active().unwrap().events().len(), 6);
}

#[rstest]
fn test_edit_scopes_end_to_end(mut school: CalendarDirectory) {
    let calendar = school.active_mut().unwrap();

    let single = EditRequest::new(
        EditScope::ThisOccurrence,
        "Math Class",
        at(2025, 6, 4, 9, 0),
        "description",
        "Quiz",
    )
    .unwrap();
    assert_eq!(calendar.edit(&single).unwrap().modified, 1);

    let future = EditRequest::new(
        EditScope::ThisAndFuture,
        "Math Class",
        at(2025, 6, 9, 9, 0),
        "location",
        "Room 204",
    )
    .unwrap();
    assert_eq!(calendar.edit(&future).unwrap().modified, 3);

    let whole = EditRequest::new(
        EditScope::EntireSeries,
        "Math Class",
        at(2025, 6, 13, 9, 0),
        "subject",
        "Calculus",
    )
    .unwrap();
    assert_eq!(calendar.edit(&whole).unwrap().modified, 6);

    let events = calendar.events();
    let mut all: Vec<&Event> = events.iter().collect();
    all.sort_by_key(|e| e.start());
    assert!(all.iter().all(|e| e.subject() == "Calculus"));
    assert_eq!(all[1].description(), "Quiz");
    assert_eq!(
        all.iter().filter(|e| e.location() == "Room 204").count(),
        3
    );
    assert_eq!(all[0].location(), "");
}

#[rstest]
fn test_copy_day_between_zones(mut school: CalendarDirectory) {
    let copied = school
        .copy_day_from_active(date(2025, 6, 2), "Home", date(2025, 6, 16))
        .unwrap();
    assert_eq!(copied, 1);

    let home = school.calendar("Home").unwrap().events();
    let event = home.find("Math Class", at(2025, 6, 16, 6, 0)).unwrap();
    assert_eq!(event.end(), at(2025, 6, 16, 7, 0));
    assert_eq!(school.calendar("School").unwrap().events().len(), 6);
}

#[rstest]
fn test_copy_range_counts_only_new_events(mut school: CalendarDirectory) {
    let first = school
        .copy_range_from_active(
            at(2025, 6, 2, 0, 0),
            at(2025, 6, 7, 0, 0),
            "Home",
            at(2025, 7, 7, 0, 0),
        )
        .unwrap();
    assert_eq!(first, 3);

    let again = school
        .copy_range_from_active(
            at(2025, 6, 2, 0, 0),
            at(2025, 6, 7, 0, 0),
            "Home",
            at(2025, 7, 7, 0, 0),
        )
        .unwrap();
    assert_eq!(again, 0);
    assert_eq!(school.calendar("Home").unwrap().events().len(), 3);
}

#[rstest]
fn test_calendar_lifecycle(mut school: CalendarDirectory) {
    school.edit("School", "name", "University").unwrap();
    assert_eq!(school.active_name(), Some("University"));
    assert_eq!(school.list(), vec!["Home", "University"]);

    school.edit("University", "timezone", "Europe/Berlin").unwrap();
    // Stored wall-clock times are unaffected by a zone change
    assert!(school
        .active()
        .unwrap()
        .events()
        .find("Math Class", at(2025, 6, 2, 9, 0))
        .is_ok());

    school.delete("University").unwrap();
    assert!(matches!(school.active(), Err(CoreError::NoActiveCalendar)));
    assert!(matches!(
        school.copy_event_from_active("Math Class", at(2025, 6, 2, 9, 0), "Home", at(2025, 6, 3, 9, 0)),
        Err(CoreError::NoActiveCalendar)
    ));
}
