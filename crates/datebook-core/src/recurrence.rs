use chrono::{Days, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::{Event, NewSeriesData, Termination};

/// RecurrenceGenerator: expands a weekday-based recurrence request into
/// concrete occurrences.
///
/// Responsibilities:
/// 1. Validate the request with the same rules as single-event construction
/// 2. Walk forward one day at a time from the start date, materializing an
///    occurrence on every qualifying weekday
/// 3. Stop on the occurrence count or once the walk passes the until date
/// 4. Stamp every occurrence with one freshly generated series id
///
/// Generation is pure: the caller decides how the occurrences are stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecurrenceGenerator;

impl RecurrenceGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Expands `data` into occurrences in ascending date order.
    ///
    /// # Behavior
    /// - An empty weekday set yields an empty series, whatever the termination
    /// - `Count(0)` yields an empty series
    /// - `Until(d)` is inclusive; a `d` before the first qualifying date
    ///   yields an empty series
    /// - Each occurrence takes its start and end time-of-day from the
    ///   request; an end on a later day than the start keeps that day offset
    pub fn expand(&self, data: &NewSeriesData) -> Result<Vec<Event>, CoreError> {
        // Reject what single-event construction would reject
        Event::new(data.subject.clone(), data.start, Some(data.end))?;

        if data.weekdays.is_empty() {
            debug!(subject = %data.subject, "Empty weekday set, nothing to expand");
            return Ok(Vec::new());
        }

        let series_id = Uuid::now_v7();
        let day_span = (data.end.date() - data.start.date()).num_days();
        let day_span = u64::try_from(day_span).unwrap_or(0);

        let mut occurrences = Vec::new();
        let mut date = data.start.date();

        loop {
            match data.termination {
                Termination::Count(count) if occurrences.len() >= count as usize => break,
                Termination::Until(until) if date > until => break,
                _ => {}
            }

            if data.weekdays.contains_date(date) {
                occurrences.push(self.materialize(data, date, day_span, series_id)?);
            }

            date = match date.checked_add_days(Days::new(1)) {
                Some(next) => next,
                None => break,
            };
        }

        debug!(
            subject = %data.subject,
            %series_id,
            occurrences = occurrences.len(),
            "Expanded recurring series"
        );

        Ok(occurrences)
    }

    fn materialize(
        &self,
        data: &NewSeriesData,
        date: NaiveDate,
        day_span: u64,
        series_id: Uuid,
    ) -> Result<Event, CoreError> {
        let start = date.and_time(data.start.time());
        let end_date = date.checked_add_days(Days::new(day_span)).ok_or_else(|| {
            CoreError::InvalidInput(format!("Occurrence on {} ends out of range", date))
        })?;
        let end = end_date.and_time(data.end.time());

        let mut event = Event::new(data.subject.clone(), start, Some(end))?.with_series_id(series_id);
        if let Some(location) = &data.location {
            event.set_location(location.clone());
        }
        if let Some(description) = &data.description {
            event.set_description(description.clone());
        }
        if let Some(visibility) = data.visibility {
            event.set_visibility(visibility);
        }
        Ok(event)
    }
}
