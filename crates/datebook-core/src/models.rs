use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::error::CoreError;

/// Length given to an event whose end is omitted or has to be repaired.
pub fn default_duration() -> Duration {
    Duration::hours(1)
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

impl Visibility {
    /// "public" in any case is public; every other value is private.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("public") {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }
}

impl FromStr for Visibility {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Visibility::from_label(s))
    }
}

/// The storage identity of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKey {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub subject: String,
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({} to {})",
            self.subject,
            self.start.format("%Y-%m-%dT%H:%M"),
            self.end.format("%Y-%m-%dT%H:%M")
        )
    }
}

/// A single calendar occurrence.
///
/// Times are wall-clock values local to the owning calendar. Two events are
/// equal when subject, start and end match; every other field, including the
/// series id, is ignored by `PartialEq` and `Hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    subject: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    series_id: Option<Uuid>,
}

impl Event {
    /// Creates an event, defaulting `end` to one hour after `start`.
    ///
    /// Fails with `InvalidInput` for an empty subject and `InvalidRange` when
    /// an explicit end precedes the start.
    pub fn new(
        subject: impl Into<String>,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
    ) -> Result<Self, CoreError> {
        let subject = validate_subject(subject.into())?;
        let end = match end {
            Some(end) if end < start => return Err(CoreError::InvalidRange { start, end }),
            Some(end) => end,
            None => start + default_duration(),
        };

        Ok(Self {
            subject,
            start,
            end,
            location: String::new(),
            description: String::new(),
            visibility: Visibility::Public,
            series_id: None,
        })
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_series_id(mut self, series_id: Uuid) -> Self {
        self.series_id = Some(series_id);
        self
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn series_id(&self) -> Option<Uuid> {
        self.series_id
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn key(&self) -> EventKey {
        EventKey {
            start: self.start,
            end: self.end,
            subject: self.subject.clone(),
        }
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> Result<(), CoreError> {
        self.subject = validate_subject(subject.into())?;
        Ok(())
    }

    /// Moves the start. An end left behind the new start is reset to
    /// `start + 1h`.
    pub fn set_start(&mut self, start: NaiveDateTime) {
        self.start = start;
        if self.end < self.start {
            self.end = self.start + default_duration();
        }
    }

    /// Sets the end. A value earlier than the start is not rejected: the end
    /// snaps to `start + 1h` instead.
    pub fn set_end(&mut self, end: NaiveDateTime) {
        self.end = if end < self.start {
            self.start + default_duration()
        } else {
            end
        };
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn set_series_id(&mut self, series_id: Option<Uuid>) {
        self.series_id = series_id;
    }

    /// Copy of this event starting at `new_start` with the same duration.
    pub fn shifted_to(&self, new_start: NaiveDateTime) -> Self {
        let duration = self.duration();
        Self {
            start: new_start,
            end: new_start + duration,
            ..self.clone()
        }
    }

    /// Copy of this event with one property changed. The series id is kept.
    pub fn with_change(&self, change: &PropertyChange) -> Result<Self, CoreError> {
        let mut modified = self.clone();
        match change {
            PropertyChange::Subject(subject) => modified.set_subject(subject.clone())?,
            PropertyChange::Start(start) => modified.set_start(*start),
            PropertyChange::End(end) => modified.set_end(*end),
            PropertyChange::Location(location) => modified.set_location(location.clone()),
            PropertyChange::Description(description) => {
                modified.set_description(description.clone())
            }
            PropertyChange::Visibility(visibility) => modified.set_visibility(*visibility),
        }
        Ok(modified)
    }

    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.start.date() == date
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.subject == other.subject && self.start == other.start && self.end == other.end
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.subject.hash(state);
        self.start.hash(state);
        self.end.hash(state);
    }
}

fn validate_subject(subject: String) -> Result<String, CoreError> {
    if subject.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "Subject cannot be empty".to_string(),
        ));
    }
    Ok(subject)
}

/// Parses `YYYY-MM-DDTHH:MM[:SS]`, or a bare `YYYY-MM-DD` meaning midnight.
pub fn parse_date_time(input: &str) -> Result<NaiveDateTime, CoreError> {
    let input = input.trim();
    if input.contains('T') {
        NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S"))
            .map_err(|_| CoreError::InvalidInput(format!("Invalid date/time: {}", input)))
    } else {
        Ok(parse_date(input)?.and_time(NaiveTime::MIN))
    }
}

/// Parses `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidInput(format!("Invalid date: {}", input.trim())))
}

// ============================================================================
// Edit Models
// ============================================================================

/// Scope for editing events that belong to a recurring series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// Affect only the selected occurrence
    ThisOccurrence,
    /// Affect the selected occurrence and every later one in its series
    ThisAndFuture,
    /// Affect every occurrence of the series, past ones included
    EntireSeries,
}

impl fmt::Display for EditScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditScope::ThisOccurrence => write!(f, "occurrence"),
            EditScope::ThisAndFuture => write!(f, "future"),
            EditScope::EntireSeries => write!(f, "series"),
        }
    }
}

impl FromStr for EditScope {
    type Err = ParseEditScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "occurrence" | "this" | "single" | "event" => Ok(EditScope::ThisOccurrence),
            "future" | "this_and_future" | "events" => Ok(EditScope::ThisAndFuture),
            "series" | "entire" | "all" => Ok(EditScope::EntireSeries),
            _ => Err(ParseEditScopeError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid edit scope: {0}")]
pub struct ParseEditScopeError(String);

/// An editable event field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventProperty {
    Subject,
    Start,
    End,
    Location,
    Description,
    Visibility,
}

impl fmt::Display for EventProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventProperty::Subject => "subject",
            EventProperty::Start => "start",
            EventProperty::End => "end",
            EventProperty::Location => "location",
            EventProperty::Description => "description",
            EventProperty::Visibility => "visibility",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for EventProperty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "subject" => Ok(EventProperty::Subject),
            "start" => Ok(EventProperty::Start),
            "end" => Ok(EventProperty::End),
            "location" => Ok(EventProperty::Location),
            "description" => Ok(EventProperty::Description),
            "visibility" | "status" => Ok(EventProperty::Visibility),
            _ => Err(CoreError::InvalidProperty(s.to_string())),
        }
    }
}

/// A parsed, typed property edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyChange {
    Subject(String),
    Start(NaiveDateTime),
    End(NaiveDateTime),
    Location(String),
    Description(String),
    Visibility(Visibility),
}

impl PropertyChange {
    /// Parses a property name and its raw value.
    pub fn parse(property: &str, value: &str) -> Result<Self, CoreError> {
        let change = match property.parse::<EventProperty>()? {
            EventProperty::Subject => {
                PropertyChange::Subject(validate_subject(value.to_string())?)
            }
            EventProperty::Start => PropertyChange::Start(parse_date_time(value)?),
            EventProperty::End => PropertyChange::End(parse_date_time(value)?),
            EventProperty::Location => PropertyChange::Location(value.to_string()),
            EventProperty::Description => PropertyChange::Description(value.to_string()),
            EventProperty::Visibility => PropertyChange::Visibility(Visibility::from_label(value)),
        };
        Ok(change)
    }

    pub fn property(&self) -> EventProperty {
        match self {
            PropertyChange::Subject(_) => EventProperty::Subject,
            PropertyChange::Start(_) => EventProperty::Start,
            PropertyChange::End(_) => EventProperty::End,
            PropertyChange::Location(_) => EventProperty::Location,
            PropertyChange::Description(_) => EventProperty::Description,
            PropertyChange::Visibility(_) => EventProperty::Visibility,
        }
    }
}

/// Locates a target event and describes the change to apply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub scope: EditScope,
    pub subject: String,
    pub start: NaiveDateTime,
    /// When present the target is looked up by its full identity, which
    /// disambiguates events sharing subject and start.
    pub end: Option<NaiveDateTime>,
    pub change: PropertyChange,
}

impl EditRequest {
    pub fn new(
        scope: EditScope,
        subject: impl Into<String>,
        start: NaiveDateTime,
        property: &str,
        value: &str,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            scope,
            subject: subject.into(),
            start,
            end: None,
            change: PropertyChange::parse(property, value)?,
        })
    }

    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }
}

/// Result of an edit: how many occurrences changed and how many were
/// skipped because their edited form collided with an existing event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditOutcome {
    pub modified: usize,
    pub skipped: usize,
}

// ============================================================================
// Creation Models
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct NewEventData {
    pub subject: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
}

impl NewEventData {
    pub fn into_event(self) -> Result<Event, CoreError> {
        let mut event = Event::new(self.subject, self.start, self.end)?;
        if let Some(location) = self.location {
            event.set_location(location);
        }
        if let Some(description) = self.description {
            event.set_description(description);
        }
        if let Some(visibility) = self.visibility {
            event.set_visibility(visibility);
        }
        Ok(event)
    }
}

/// A set of weekdays, stored as a bitmask indexed from Monday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Self(0b111_1111)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Member days, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.iter().copied().filter(move |day| self.contains(*day))
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.weekday())
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn weekday_letter(day: Weekday) -> char {
    match day {
        Weekday::Mon => 'M',
        Weekday::Tue => 'T',
        Weekday::Wed => 'W',
        Weekday::Thu => 'R',
        Weekday::Fri => 'F',
        Weekday::Sat => 'S',
        Weekday::Sun => 'U',
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.iter() {
            write!(f, "{}", weekday_letter(day))?;
        }
        Ok(())
    }
}

impl FromStr for WeekdaySet {
    type Err = CoreError;

    /// Parses the letter code `MTWRFSU` (R is Thursday, U is Sunday).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = WeekdaySet::empty();
        for c in s.trim().chars() {
            let day = match c.to_ascii_uppercase() {
                'M' => Weekday::Mon,
                'T' => Weekday::Tue,
                'W' => Weekday::Wed,
                'R' => Weekday::Thu,
                'F' => Weekday::Fri,
                'S' => Weekday::Sat,
                'U' => Weekday::Sun,
                _ => {
                    return Err(CoreError::InvalidInput(format!(
                        "Invalid weekday character: {}",
                        c
                    )))
                }
            };
            set.insert(day);
        }
        Ok(set)
    }
}

/// When a recurring series stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Stop after this many occurrences.
    Count(u32),
    /// Stop after this date (inclusive).
    Until(NaiveDate),
}

/// Data required to create a recurring series
#[derive(Debug, Clone)]
pub struct NewSeriesData {
    pub subject: String,
    /// Date of the first candidate day and start time-of-day of every occurrence
    pub start: NaiveDateTime,
    /// End time-of-day of every occurrence
    pub end: NaiveDateTime,
    pub weekdays: WeekdaySet,
    pub termination: Termination,
    pub location: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
}

impl NewSeriesData {
    pub fn new(
        subject: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        weekdays: WeekdaySet,
        termination: Termination,
    ) -> Self {
        Self {
            subject: subject.into(),
            start,
            end,
            weekdays,
            termination,
            location: None,
            description: None,
            visibility: None,
        }
    }
}
