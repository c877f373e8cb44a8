use crate::error::CoreError;
use crate::models::{EditOutcome, EditRequest, Event, NewEventData, NewSeriesData};
use crate::recurrence::RecurrenceGenerator;
use crate::repository::{EditPropagator, EventRepository, EventStore};
use crate::timezone::parse_timezone;
use chrono_tz::Tz;
use std::collections::BTreeMap;
use tracing::{debug, info};

pub mod copy;

/// A named, time-zoned collection of events.
///
/// Event times inside a calendar are wall-clock values in its zone.
#[derive(Debug, Clone)]
pub struct Calendar {
    name: String,
    timezone: Tz,
    events: EventStore,
}

impl Calendar {
    pub fn new(name: impl Into<String>, timezone: &str) -> Result<Self, CoreError> {
        Ok(Self {
            name: validate_name(name.into())?,
            timezone: parse_timezone(timezone)?,
            events: EventStore::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventStore {
        &mut self.events
    }

    /// Creates a single event, rejecting an identity already present.
    pub fn create_event(&mut self, data: NewEventData) -> Result<Event, CoreError> {
        let event = data.into_event()?;
        self.events.add(event.clone())?;
        Ok(event)
    }

    /// Expands and stores a recurring series. Nothing is stored when any
    /// occurrence clashes with an existing event.
    pub fn create_series(&mut self, data: &NewSeriesData) -> Result<usize, CoreError> {
        let occurrences = RecurrenceGenerator::new().expand(data)?;
        let count = self.events.add_all(occurrences)?;
        debug!(calendar = %self.name, subject = %data.subject, count, "Created series");
        Ok(count)
    }

    pub fn edit(&mut self, request: &EditRequest) -> Result<EditOutcome, CoreError> {
        EditPropagator::new(&mut self.events).apply(request)
    }
}

fn validate_name(name: String) -> Result<String, CoreError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(CoreError::InvalidInput(
            "Calendar name cannot be empty".to_string(),
        ));
    }
    Ok(name)
}

/// Owns every calendar of a session and remembers which one is in use.
///
/// Engine operations take calendar names explicitly; the active selection
/// is only a convenience for the command layer.
#[derive(Debug, Default)]
pub struct CalendarDirectory {
    calendars: BTreeMap<String, Calendar>,
    active: Option<String>,
}

impl CalendarDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, name: &str, timezone: &str) -> Result<&Calendar, CoreError> {
        let calendar = Calendar::new(name, timezone)?;
        if self.calendars.contains_key(calendar.name()) {
            return Err(CoreError::DuplicateName(calendar.name().to_string()));
        }

        info!(calendar = %calendar.name(), timezone = %calendar.timezone().name(), "Created calendar");
        let key = calendar.name().to_string();
        Ok(self.calendars.entry(key).or_insert(calendar))
    }

    pub fn use_calendar(&mut self, name: &str) -> Result<(), CoreError> {
        let calendar = self.calendar(name)?;
        let name = calendar.name().to_string();
        info!(calendar = %name, "Using calendar");
        self.active = Some(name);
        Ok(())
    }

    /// Renames a calendar; an active selection follows it.
    pub fn rename(&mut self, name: &str, new_name: &str) -> Result<(), CoreError> {
        let new_name = validate_name(new_name.to_string())?;
        if !self.calendars.contains_key(name) {
            return Err(CoreError::NotFound(format!("Calendar '{}'", name)));
        }
        if new_name == name {
            return Ok(());
        }
        if self.calendars.contains_key(&new_name) {
            return Err(CoreError::DuplicateName(new_name));
        }

        let mut calendar = self
            .calendars
            .remove(name)
            .ok_or_else(|| CoreError::NotFound(format!("Calendar '{}'", name)))?;
        calendar.name = new_name.clone();
        self.calendars.insert(new_name.clone(), calendar);

        if self.active.as_deref() == Some(name) {
            self.active = Some(new_name.clone());
        }
        info!(from = %name, to = %new_name, "Renamed calendar");
        Ok(())
    }

    /// Changes a calendar's zone. Stored wall-clock times are left as they are.
    pub fn set_timezone(&mut self, name: &str, timezone: &str) -> Result<(), CoreError> {
        let tz = parse_timezone(timezone)?;
        let calendar = self.calendar_mut(name)?;
        calendar.timezone = tz;
        info!(calendar = %name, timezone = %tz.name(), "Changed calendar timezone");
        Ok(())
    }

    /// Edits a calendar property by name: `name` or `timezone`.
    pub fn edit(&mut self, name: &str, property: &str, value: &str) -> Result<(), CoreError> {
        match property.trim().to_lowercase().as_str() {
            "name" => self.rename(name, value),
            "timezone" => self.set_timezone(name, value),
            _ => Err(CoreError::InvalidProperty(property.to_string())),
        }
    }

    pub fn delete(&mut self, name: &str) -> Result<Calendar, CoreError> {
        let removed = self
            .calendars
            .remove(name)
            .ok_or_else(|| CoreError::NotFound(format!("Calendar '{}'", name)))?;
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        info!(calendar = %name, "Deleted calendar");
        Ok(removed)
    }

    /// Calendar names in ascending order.
    pub fn list(&self) -> Vec<&str> {
        self.calendars.keys().map(String::as_str).collect()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn calendar(&self, name: &str) -> Result<&Calendar, CoreError> {
        self.calendars
            .get(name)
            .ok_or_else(|| CoreError::NotFound(format!("Calendar '{}'", name)))
    }

    pub fn calendar_mut(&mut self, name: &str) -> Result<&mut Calendar, CoreError> {
        self.calendars
            .get_mut(name)
            .ok_or_else(|| CoreError::NotFound(format!("Calendar '{}'", name)))
    }

    pub fn active(&self) -> Result<&Calendar, CoreError> {
        let name = self.active.as_deref().ok_or(CoreError::NoActiveCalendar)?;
        self.calendar(name)
    }

    pub fn active_mut(&mut self) -> Result<&mut Calendar, CoreError> {
        let name = self.active.clone().ok_or(CoreError::NoActiveCalendar)?;
        self.calendar_mut(&name)
    }

    pub(crate) fn active_name_or_err(&self) -> Result<String, CoreError> {
        self.active.clone().ok_or(CoreError::NoActiveCalendar)
    }
}
