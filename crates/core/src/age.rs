//! Calendar age arithmetic.

use chrono::{DateTime, Datelike, NaiveDate};

/// Parses a stored birth date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (date taken in UTC), and any
/// string whose first ten characters are `YYYY-MM-DD`.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.naive_utc().date());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Whole years elapsed between `date_of_birth` and `today`.
///
/// Returns `None` when the birth date lies after `today`.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if date_of_birth > today {
        return None;
    }
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Age from an optional stored birth date; `None` if absent or unparseable.
pub fn age_from_stored(date_of_birth: Option<&str>, today: NaiveDate) -> Option<u32> {
    date_of_birth
        .and_then(parse_birth_date)
        .and_then(|dob| age_on(dob, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_on_birthday() {
        let dob = date(2000, 6, 15);
        assert_eq!(age_on(dob, date(2024, 6, 14)), Some(23));
        assert_eq!(age_on(dob, date(2024, 6, 15)), Some(24));
        assert_eq!(age_on(dob, date(2024, 12, 31)), Some(24));
    }

    #[test]
    fn test_earlier_month_later_day_has_not_reached_birthday() {
        assert_eq!(age_on(date(1990, 8, 1), date(2024, 7, 31)), Some(33));
    }

    #[test]
    fn test_leap_day_birthday() {
        let dob = date(2004, 2, 29);
        assert_eq!(age_on(dob, date(2023, 2, 28)), Some(18));
        assert_eq!(age_on(dob, date(2023, 3, 1)), Some(19));
    }

    #[test]
    fn test_future_birth_date_has_no_age() {
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), None);
    }

    #[test]
    fn test_parse_accepted_formats() {
        assert_eq!(parse_birth_date("2000-06-15"), Some(date(2000, 6, 15)));
        assert_eq!(
            parse_birth_date("2000-06-15T00:00:00.000Z"),
            Some(date(2000, 6, 15))
        );
        assert_eq!(
            parse_birth_date("2000-06-15T00:00:00Z"),
            Some(date(2000, 6, 15))
        );
        assert_eq!(parse_birth_date("15/06/2000"), None);
        assert_eq!(parse_birth_date(""), None);
    }

    #[test]
    fn test_age_from_stored_handles_absent_values() {
        let today = date(2024, 6, 15);
        assert_eq!(age_from_stored(None, today), None);
        assert_eq!(age_from_stored(Some("not a date"), today), None);
        assert_eq!(age_from_stored(Some("2000-06-15"), today), Some(24));
    }
}
