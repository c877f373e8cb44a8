use crate::error::CoreError;
use crate::models::{Event, EventKey};
use crate::repository::{EventRepository, EventStore};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

impl EventRepository for EventStore {
    fn add(&mut self, event: Event) -> Result<(), CoreError> {
        if self.has_conflict(&event) {
            return Err(CoreError::DuplicateEvent(event.key().to_string()));
        }
        debug!(event = %event.key(), "Adding event");
        self.events.insert(event.key(), event);
        Ok(())
    }

    fn add_all(&mut self, events: Vec<Event>) -> Result<usize, CoreError> {
        let mut seen: HashSet<EventKey> = HashSet::with_capacity(events.len());
        for event in &events {
            let key = event.key();
            if self.events.contains_key(&key) || !seen.insert(key.clone()) {
                return Err(CoreError::DuplicateEvent(key.to_string()));
            }
        }

        let count = events.len();
        for event in events {
            self.events.insert(event.key(), event);
        }
        debug!(count, "Added event batch");
        Ok(count)
    }

    fn remove(&mut self, event: &Event) -> Result<Event, CoreError> {
        let key = event.key();
        let removed = self
            .events
            .remove(&key)
            .ok_or_else(|| CoreError::NotFound(format!("Event {}", key)))?;
        debug!(event = %key, "Removed event");
        Ok(removed)
    }

    fn find(&self, subject: &str, start: NaiveDateTime) -> Result<&Event, CoreError> {
        let mut matches = self
            .events
            .values()
            .filter(|e| e.subject() == subject && e.start() == start);

        match (matches.next(), matches.next()) {
            (Some(event), None) => Ok(event),
            (Some(_), Some(_)) => Err(CoreError::NotFound(format!(
                "Event '{}' at {} is ambiguous; several events share that subject and start",
                subject,
                start.format("%Y-%m-%dT%H:%M")
            ))),
            (None, _) => Err(CoreError::NotFound(format!(
                "Event '{}' at {}",
                subject,
                start.format("%Y-%m-%dT%H:%M")
            ))),
        }
    }

    fn find_exact(
        &self,
        subject: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<&Event, CoreError> {
        let key = EventKey {
            start,
            end,
            subject: subject.to_string(),
        };
        self.events
            .get(&key)
            .ok_or_else(|| CoreError::NotFound(format!("Event {}", key)))
    }

    fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        self.sorted(|e| e.starts_on(date))
    }

    fn events_in_range(&self, from: NaiveDateTime, to: NaiveDateTime) -> Vec<&Event> {
        self.sorted(|e| e.end() > from && e.start() < to)
    }

    fn events_from(&self, date: NaiveDate) -> Vec<&Event> {
        self.sorted(|e| e.start().date() >= date)
    }

    fn events_in_series(&self, series_id: Uuid) -> Vec<&Event> {
        self.sorted(|e| e.series_id() == Some(series_id))
    }

    fn is_busy(&self, instant: NaiveDateTime) -> bool {
        self.events
            .values()
            .any(|e| e.start() < instant && instant < e.end())
    }

    fn has_conflict(&self, event: &Event) -> bool {
        self.events.contains_key(&event.key())
    }
}
