//! # Datebook Core Library
//!
//! The scheduling engine behind Datebook: single and recurring events held in
//! named calendars, each pinned to an IANA timezone.
//!
//! ## Features
//!
//! - **Weekday Recurrence**: Series expanded from a weekday set with a count
//!   or an inclusive end date; every occurrence shares one series id
//! - **Scoped Edits**: Change one occurrence, an occurrence and the ones after
//!   it, or a whole series, with per-occurrence conflict skipping
//! - **Conflict Detection**: No two events in a calendar share subject, start
//!   and end
//! - **Timezone-Aware Copy**: Copy single events, days or ranges into another
//!   calendar, converting wall-clock times through the real instant
//!
//! ## Core Modules
//!
//! - [`models`]: Events, edit requests and creation transfer objects
//! - [`recurrence`]: Series expansion
//! - [`repository`]: Per-calendar event store and edit propagation
//! - [`directory`]: Calendar management and cross-calendar copy
//! - [`timezone`]: Timezone parsing and wall-clock conversion
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use datebook_core::directory::CalendarDirectory;
//! use datebook_core::models::{NewSeriesData, Termination};
//! use datebook_core::repository::EventRepository;
//!
//! # fn main() -> Result<(), datebook_core::error::CoreError> {
//! let mut directory = CalendarDirectory::new();
//! directory.create("School", "America/New_York")?;
//! directory.use_calendar("School")?;
//!
//! let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
//! let series = NewSeriesData::new(
//!     "Math Class",
//!     day.and_hms_opt(9, 0, 0).unwrap(),
//!     day.and_hms_opt(10, 0, 0).unwrap(),
//!     "MWF".parse()?,
//!     Termination::Count(3),
//! );
//! let created = directory.active_mut()?.create_series(&series)?;
//! assert_eq!(created, 3);
//!
//! let busy = directory
//!     .active()?
//!     .events()
//!     .is_busy(day.and_hms_opt(9, 30, 0).unwrap());
//! assert!(busy);
//! # Ok(())
//! # }
//! ```

pub mod directory;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod timezone;
