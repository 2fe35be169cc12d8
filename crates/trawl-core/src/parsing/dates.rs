use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parse a date cell, day-first for ambiguous numeric forms.
///
/// Accepts ISO dates (with or without a time part, as written by the
/// cleaning step) and the day-first formats found in raw exports such as
/// "31/01/2024" and "31-Jan-2024". Anything else yields None.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_date("2024-01-31"), Some(ymd(2024, 1, 31)));
    }

    #[test]
    fn test_iso_datetime() {
        assert_eq!(parse_date("2024-01-31 00:00:00"), Some(ymd(2024, 1, 31)));
    }

    #[test]
    fn test_day_first_slash() {
        assert_eq!(parse_date("03/04/2024"), Some(ymd(2024, 4, 3)));
    }

    #[test]
    fn test_day_first_month_name() {
        assert_eq!(parse_date("3-Apr-2024"), Some(ymd(2024, 4, 3)));
    }

    #[test]
    fn test_day_first_with_time() {
        assert_eq!(parse_date("31/12/2025 14:30"), Some(ymd(2025, 12, 31)));
    }

    #[test]
    fn test_impossible_date_returns_none() {
        assert_eq!(parse_date("31/02/2024"), None);
    }

    #[test]
    fn test_garbage_returns_none() {
        assert_eq!(parse_date("ongoing"), None);
        assert_eq!(parse_date(""), None);
    }
}
