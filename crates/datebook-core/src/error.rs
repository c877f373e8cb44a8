use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Invalid property: {0}")]
    InvalidProperty(String),

    #[error("Duplicate event: {0}")]
    DuplicateEvent(String),

    #[error("Calendar name already exists: {0}")]
    DuplicateName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("No calendar in use. Create one and select it with 'use calendar'.")]
    NoActiveCalendar,
}
