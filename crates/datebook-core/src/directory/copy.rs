//! Copying events between calendars.
//!
//! A destination time is read as a wall-clock time in the source calendar's
//! zone and stored as the wall-clock time of the same instant in the target
//! calendar's zone. Durations and every other event field carry over.

use crate::directory::CalendarDirectory;
use crate::error::CoreError;
use crate::models::Event;
use crate::repository::EventRepository;
use crate::timezone::convert_local;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

impl CalendarDirectory {
    /// Copies one event so that it starts at `dest_start` (source-zone wall
    /// clock) in `target`. A clash in the target is an error.
    pub fn copy_event(
        &mut self,
        source: &str,
        subject: &str,
        start: NaiveDateTime,
        target: &str,
        dest_start: NaiveDateTime,
    ) -> Result<(), CoreError> {
        let source_calendar = self.calendar(source)?;
        let event = source_calendar.events().find(subject, start)?.clone();
        let from_tz = source_calendar.timezone();

        let target_calendar = self.calendar_mut(target)?;
        let shifted_start = convert_local(dest_start, from_tz, target_calendar.timezone());
        let copy = event.shifted_to(shifted_start);

        debug!(event = %event.key(), destination = %target, start = %shifted_start, "Copying event");
        target_calendar.events_mut().add(copy)
    }

    /// Copies every event starting on `date` to `dest_date`, keeping each
    /// event's time of day. Returns how many were copied.
    pub fn copy_day(
        &mut self,
        source: &str,
        date: NaiveDate,
        target: &str,
        dest_date: NaiveDate,
    ) -> Result<usize, CoreError> {
        let candidates: Vec<Event> = self
            .calendar(source)?
            .events()
            .events_on(date)
            .into_iter()
            .cloned()
            .collect();

        self.copy_rebased(
            source,
            candidates,
            date.and_time(NaiveTime::MIN),
            target,
            dest_date.and_time(NaiveTime::MIN),
        )
    }

    /// Copies every event overlapping `(from, to)`, keeping each event's
    /// offset from `from` relative to `dest_start`. Returns how many were
    /// copied.
    pub fn copy_range(
        &mut self,
        source: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
        target: &str,
        dest_start: NaiveDateTime,
    ) -> Result<usize, CoreError> {
        if to < from {
            return Err(CoreError::InvalidRange { start: from, end: to });
        }
        let candidates: Vec<Event> = self
            .calendar(source)?
            .events()
            .events_in_range(from, to)
            .into_iter()
            .cloned()
            .collect();

        self.copy_rebased(source, candidates, from, target, dest_start)
    }

    pub fn copy_event_from_active(
        &mut self,
        subject: &str,
        start: NaiveDateTime,
        target: &str,
        dest_start: NaiveDateTime,
    ) -> Result<(), CoreError> {
        let source = self.active_name_or_err()?;
        self.copy_event(&source, subject, start, target, dest_start)
    }

    pub fn copy_day_from_active(
        &mut self,
        date: NaiveDate,
        target: &str,
        dest_date: NaiveDate,
    ) -> Result<usize, CoreError> {
        let source = self.active_name_or_err()?;
        self.copy_day(&source, date, target, dest_date)
    }

    pub fn copy_range_from_active(
        &mut self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        target: &str,
        dest_start: NaiveDateTime,
    ) -> Result<usize, CoreError> {
        let source = self.active_name_or_err()?;
        self.copy_range(&source, from, to, target, dest_start)
    }

    // Conflicting copies are skipped and not counted.
    fn copy_rebased(
        &mut self,
        source: &str,
        candidates: Vec<Event>,
        origin: NaiveDateTime,
        target: &str,
        dest_origin: NaiveDateTime,
    ) -> Result<usize, CoreError> {
        let from_tz = self.calendar(source)?.timezone();
        let target_calendar = self.calendar_mut(target)?;
        let to_tz = target_calendar.timezone();

        let mut copied = 0;
        for event in candidates {
            let local = dest_origin + (event.start() - origin);
            let copy = event.shifted_to(convert_local(local, from_tz, to_tz));

            if target_calendar.events().has_conflict(&copy) {
                warn!(event = %copy.key(), destination = %target, "Skipping copy that collides with an existing event");
                continue;
            }
            target_calendar.events_mut().add(copy)?;
            copied += 1;
        }

        debug!(source, destination = %target, copied, "Copied events");
        Ok(copied)
    }
}
