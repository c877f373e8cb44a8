use anyhow::Result;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use datebook_core::error::CoreError;

use super::Session;

pub fn copy_event(
    session: &mut Session,
    subject: &str,
    start: NaiveDateTime,
    target: &str,
    dest_start: NaiveDateTime,
) -> Result<()> {
    session
        .directory
        .copy_event_from_active(subject, start, target, dest_start)?;
    println!("Copied event '{}' to calendar '{}'", subject, target);
    Ok(())
}

pub fn copy_day(
    session: &mut Session,
    date: NaiveDate,
    target: &str,
    dest_date: NaiveDate,
) -> Result<()> {
    let copied = session
        .directory
        .copy_day_from_active(date, target, dest_date)?;
    println!("Copied {} event(s) to calendar '{}'", copied, target);
    Ok(())
}

/// Copies events overlapping the whole days `from..=to`.
pub fn copy_range(
    session: &mut Session,
    from: NaiveDate,
    to: NaiveDate,
    target: &str,
    dest_date: NaiveDate,
) -> Result<()> {
    let range_start = from.and_time(NaiveTime::MIN);
    let range_end = to
        .checked_add_days(Days::new(1))
        .ok_or_else(|| CoreError::InvalidInput(format!("Date out of range: {}", to)))?
        .and_time(NaiveTime::MIN);
    if to < from {
        return Err(CoreError::InvalidRange {
            start: range_start,
            end: to.and_time(NaiveTime::MIN),
        }
        .into());
    }

    let copied = session.directory.copy_range_from_active(
        range_start,
        range_end,
        target,
        dest_date.and_time(NaiveTime::MIN),
    )?;
    println!("Copied {} event(s) to calendar '{}'", copied, target);
    Ok(())
}
