//! Local calendar-day keys and display labels.
//!
//! The "YYYY-MM-DD" day key is the canonical bucketing and comparison key
//! for everything in this crate. It is always derived from a date's LOCAL
//! calendar fields — never by ISO-serializing a timestamp, which converts
//! through UTC and can roll the day forward or backward near midnight in
//! non-UTC offsets.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// Canonical day key for a zoned timestamp, from its local calendar fields.
///
/// Two timestamps on the same local calendar day yield identical keys
/// regardless of time-of-day.
pub fn local_day_key<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    format!("{:04}-{:02}-{:02}", dt.year(), dt.month(), dt.day())
}

/// Canonical day key for an already-local calendar date.
pub fn day_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Human-readable label for gap reports, e.g. "Monday, July 14".
pub fn gap_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn key_uses_local_fields_not_utc() {
        // 23:30 on July 15 at UTC+13 is 10:30 on July 15 UTC... but 23:30
        // on July 15 at UTC-10 is 09:30 on July 16 UTC. The key must follow
        // the local date in both cases.
        let minus_ten = FixedOffset::west_opt(10 * 3600).unwrap();
        let late = minus_ten
            .with_ymd_and_hms(2025, 7, 15, 23, 30, 0)
            .unwrap();
        assert_eq!(late.with_timezone(&Utc).day(), 16);
        assert_eq!(local_day_key(&late), "2025-07-15");

        let plus_thirteen = FixedOffset::east_opt(13 * 3600).unwrap();
        let early = plus_thirteen
            .with_ymd_and_hms(2025, 7, 15, 0, 30, 0)
            .unwrap();
        assert_eq!(early.with_timezone(&Utc).day(), 14);
        assert_eq!(local_day_key(&early), "2025-07-15");
    }

    #[test]
    fn same_local_day_same_key_regardless_of_time() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let morning = tz.with_ymd_and_hms(2025, 7, 15, 0, 0, 1).unwrap();
        let night = tz.with_ymd_and_hms(2025, 7, 15, 23, 59, 59).unwrap();
        assert_eq!(local_day_key(&morning), local_day_key(&night));
    }

    #[test]
    fn key_is_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(day_key(d), "2025-03-05");
    }

    #[test]
    fn gap_label_is_weekday_month_day() {
        let d = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap(); // a Monday
        assert_eq!(gap_label(d), "Monday, July 14");
        let single_digit = NaiveDate::from_ymd_opt(2025, 7, 6).unwrap();
        assert_eq!(gap_label(single_digit), "Sunday, July 6");
    }
}
