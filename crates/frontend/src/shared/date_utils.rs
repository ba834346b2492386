/// Utilities for date formatting and the "today" used by the forms
///
/// Dates are calendar dates in the browser's local time zone.
use super::gateway::AvailabilityWindow;
use chrono::{Days, Local, NaiveDate};
use contracts::shared::dates::parse_calendar_date;

/// Today's local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today → tomorrow, the window the room dropdown asks availability for
pub fn availability_window(today: NaiveDate) -> AvailabilityWindow {
    AvailabilityWindow {
        check_in: today,
        check_out: today.checked_add_days(Days::new(1)).unwrap_or(today),
    }
}

/// Format ISO date string to "Mar 15"
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "Mar 15"
pub fn format_date_short(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match parse_calendar_date(date_part) {
        Some(d) => d.format("%b %-d").to_string(),
        None => date_str.to_string(),
    }
}

/// Format ISO datetime string to "YYYY-MM-DD HH:MM"
/// Example: "2024-03-15T14:02:26.123Z" -> "2024-03-15 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        let time: String = time_part.chars().take(5).collect();
        if time.len() == 5 {
            return format!("{} {}", date_part, time);
        }
    }
    datetime_str.to_string()
}

/// FullCalendar passes window bounds as ISO timestamps; keep the date part
pub fn calendar_bound(raw: &str) -> Option<NaiveDate> {
    parse_calendar_date(raw.get(..10).unwrap_or(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_calendar_date(s).unwrap()
    }

    #[test]
    fn test_format_date_short() {
        assert_eq!(format_date_short("2024-03-15"), "Mar 15");
        assert_eq!(format_date_short("2024-12-01T10:00:00Z"), "Dec 1");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "2024-03-15 14:02"
        );
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date_short("invalid"), "invalid");
        assert_eq!(format_datetime("invalid"), "invalid");
    }

    #[test]
    fn test_availability_window() {
        let w = availability_window(d("2024-12-31"));
        assert_eq!(w.check_in, d("2024-12-31"));
        assert_eq!(w.check_out, d("2025-01-01"));
    }

    #[test]
    fn test_calendar_bound() {
        assert_eq!(calendar_bound("2024-06-01T00:00:00+05:30"), Some(d("2024-06-01")));
        assert_eq!(calendar_bound("2024-06-01"), Some(d("2024-06-01")));
        assert_eq!(calendar_bound("soon"), None);
    }
}
