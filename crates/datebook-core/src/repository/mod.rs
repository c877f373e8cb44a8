use crate::error::CoreError;
use crate::models::{Event, EventKey};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use uuid::Uuid;

pub mod events;
pub mod series;

pub use series::EditPropagator;

/// Operations over the events of a single calendar.
///
/// Query results come back ordered by start, then end, then subject.
pub trait EventRepository {
    fn add(&mut self, event: Event) -> Result<(), CoreError>;
    /// Inserts every event or none of them.
    fn add_all(&mut self, events: Vec<Event>) -> Result<usize, CoreError>;
    fn remove(&mut self, event: &Event) -> Result<Event, CoreError>;
    /// Lookup by subject and start. More than one match is reported as not found.
    fn find(&self, subject: &str, start: NaiveDateTime) -> Result<&Event, CoreError>;
    fn find_exact(
        &self,
        subject: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<&Event, CoreError>;
    fn events_on(&self, date: NaiveDate) -> Vec<&Event>;
    /// Events overlapping the open interval `(from, to)`.
    fn events_in_range(&self, from: NaiveDateTime, to: NaiveDateTime) -> Vec<&Event>;
    fn events_from(&self, date: NaiveDate) -> Vec<&Event>;
    fn events_in_series(&self, series_id: Uuid) -> Vec<&Event>;
    fn is_busy(&self, instant: NaiveDateTime) -> bool;
    fn has_conflict(&self, event: &Event) -> bool;
}

/// In-memory event set for one calendar, keyed by event identity.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: HashMap<EventKey, Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Unordered iteration over every event.
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.values()
    }

    pub(crate) fn contains_key(&self, key: &EventKey) -> bool {
        self.events.contains_key(key)
    }

    /// Swaps `old` for `new` in one step. Callers check for collisions first.
    pub(crate) fn replace(&mut self, old: &EventKey, new: Event) {
        self.events.remove(old);
        self.events.insert(new.key(), new);
    }

    fn sorted<'a>(&'a self, filter: impl Fn(&Event) -> bool) -> Vec<&'a Event> {
        let mut matches: Vec<&Event> = self.events.values().filter(|e| filter(e)).collect();
        matches.sort_by(|a, b| a.key().cmp(&b.key()));
        matches
    }
}

impl FromIterator<Event> for EventStore {
    /// Later duplicates replace earlier ones.
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().map(|e| (e.key(), e)).collect(),
        }
    }
}
