use crate::error::CoreError;
use chrono::{Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use std::str::FromStr;

/// Resolve an IANA timezone name
pub fn parse_timezone(timezone: &str) -> Result<Tz, CoreError> {
    Tz::from_str(timezone.trim()).map_err(|_| CoreError::InvalidTimezone(timezone.to_string()))
}

/// Validate IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<(), CoreError> {
    parse_timezone(timezone).map(|_| ())
}

/// Pin a wall-clock time to an instant in `tz`.
///
/// Ambiguous times (clocks falling back) resolve to the earlier instant.
/// Times inside a spring-forward gap are moved one hour later, which lands
/// on the first valid wall-clock time after the gap.
pub fn localize(tz: Tz, local: NaiveDateTime) -> chrono::DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let shifted = local + Duration::hours(1);
            match tz.from_local_datetime(&shifted).earliest() {
                Some(dt) => dt,
                // Gaps longer than an hour (skipped calendar days): read the time as UTC
                None => tz.from_utc_datetime(&local),
            }
        }
    }
}

/// Convert a wall-clock time in `from` to the wall-clock time of the same
/// instant in `to`.
pub fn convert_local(local: NaiveDateTime, from: Tz, to: Tz) -> NaiveDateTime {
    localize(from, local).with_timezone(&to).naive_local()
}

/// Get timezone abbreviation (e.g., "EST", "EDT") at a wall-clock time
pub fn get_timezone_abbreviation(tz: Tz, local: NaiveDateTime) -> String {
    localize(tz, local).format("%Z").to_string()
}

/// Get timezone offset string for display (e.g., "-05:00")
pub fn get_timezone_offset(tz: Tz, local: NaiveDateTime) -> String {
    localize(tz, local).format("%:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("America/New_York").is_ok());
        assert!(validate_timezone("Invalid/Timezone").is_err());
        assert!(matches!(
            validate_timezone("Mars/Phobos"),
            Err(CoreError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_convert_new_york_to_los_angeles() {
        let ny = parse_timezone("America/New_York").unwrap();
        let la = parse_timezone("America/Los_Angeles").unwrap();
        assert_eq!(convert_local(at(2025, 7, 1, 9, 0), ny, la), at(2025, 7, 1, 6, 0));
    }

    #[test]
    fn test_convert_across_date_line() {
        let utc = parse_timezone("UTC").unwrap();
        let tokyo = parse_timezone("Asia/Tokyo").unwrap();
        assert_eq!(convert_local(at(2025, 1, 31, 20, 0), utc, tokyo), at(2025, 2, 1, 5, 0));
    }

    #[test]
    fn test_convert_uses_offset_in_effect_on_that_date() {
        let ny = parse_timezone("America/New_York").unwrap();
        let london = parse_timezone("Europe/London").unwrap();
        // Winter: 5 hours apart
        assert_eq!(convert_local(at(2025, 1, 15, 9, 0), ny, london), at(2025, 1, 15, 14, 0));
        // Between the US and EU DST switches: 4 hours apart
        assert_eq!(convert_local(at(2025, 3, 20, 9, 0), ny, london), at(2025, 3, 20, 13, 0));
    }

    #[test]
    fn test_localize_spring_forward_gap() {
        let ny = parse_timezone("America/New_York").unwrap();
        let resolved = localize(ny, at(2025, 3, 9, 2, 30));
        assert_eq!(resolved.naive_local(), at(2025, 3, 9, 3, 30));
    }

    #[test]
    fn test_localize_fall_back_picks_earliest() {
        let ny = parse_timezone("America/New_York").unwrap();
        let resolved = localize(ny, at(2025, 11, 2, 1, 30));
        assert_eq!(get_timezone_abbreviation(ny, resolved.naive_local()), "EDT");
        assert_eq!(resolved.format("%:z").to_string(), "-04:00");
    }

    #[test]
    fn test_timezone_abbreviation() {
        let utc = parse_timezone("UTC").unwrap();
        assert_eq!(get_timezone_abbreviation(utc, at(2025, 6, 1, 12, 0)), "UTC");
        let paris = parse_timezone("Europe/Paris").unwrap();
        assert_eq!(get_timezone_offset(paris, at(2025, 6, 1, 12, 0)), "+02:00");
    }
}
