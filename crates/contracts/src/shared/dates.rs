//! Calendar date helpers shared by the pricing and availability code.
//!
//! All dates cross the API boundary as `YYYY-MM-DD` strings without a time
//! component, so everything here works on `chrono::NaiveDate`.

use chrono::NaiveDate;

/// Wire format for calendar dates
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` string.
///
/// Returns `None` for empty or malformed input, including strings that carry
/// a time suffix ("2024-03-15T10:00") or name an impossible day
/// ("2024-02-30"). Callers treat `None` as "cannot compute".
pub fn parse_calendar_date(iso: &str) -> Option<NaiveDate> {
    let s = iso.trim();
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).ok()
}

/// Format a date for the wire
pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Whole nights between check-in and check-out.
///
/// Never negative: a missing date or a check-out on/before check-in gives 0.
pub fn nights_between(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> u32 {
    match (check_in, check_out) {
        (Some(start), Some(end)) => {
            let days = end.signed_duration_since(start).num_days();
            u32::try_from(days).unwrap_or(0)
        }
        _ => 0,
    }
}

/// Same as [`nights_between`] but straight from form strings
pub fn nights_between_iso(check_in: &str, check_out: &str) -> u32 {
    nights_between(parse_calendar_date(check_in), parse_calendar_date(check_out))
}

/// Serde adapter for optional `YYYY-MM-DD` fields that may arrive as
/// `null`, `""` or garbage from the server.
pub mod lenient_date {
    use super::{parse_calendar_date, to_iso};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_str(&to_iso(*d)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        // the server sometimes sends full timestamps for date columns
        Ok(raw.and_then(|s| {
            let date_part = s.split('T').next().unwrap_or_default().to_string();
            parse_calendar_date(&date_part)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_calendar_date() {
        assert_eq!(parse_calendar_date("2024-06-01"), Some(d(2024, 6, 1)));
        assert_eq!(parse_calendar_date(" 2024-12-31 "), Some(d(2024, 12, 31)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("2024-6-1"), None);
        assert_eq!(parse_calendar_date("2024-02-30"), None);
        assert_eq!(parse_calendar_date("2024-03-15T10:00"), None);
        assert_eq!(parse_calendar_date("abcd-ef-gh"), None);
        assert_eq!(parse_calendar_date("+024-01-01"), None);
    }

    #[test]
    fn test_nights_between() {
        assert_eq!(nights_between(Some(d(2024, 6, 1)), Some(d(2024, 6, 3))), 2);
        assert_eq!(nights_between(Some(d(2024, 2, 28)), Some(d(2024, 3, 1))), 2);
        // DST change in most zones, still a whole number of nights
        assert_eq!(nights_between(Some(d(2024, 3, 9)), Some(d(2024, 3, 11))), 2);
    }

    #[test]
    fn test_nights_never_negative() {
        assert_eq!(nights_between(Some(d(2024, 7, 10)), Some(d(2024, 7, 9))), 0);
        assert_eq!(nights_between(Some(d(2024, 7, 10)), Some(d(2024, 7, 10))), 0);
        assert_eq!(nights_between(None, Some(d(2024, 7, 10))), 0);
        assert_eq!(nights_between_iso("2024-07-01", "bad"), 0);
        assert_eq!(nights_between_iso("2024-07-01", "2024-07-04"), 3);
    }
}
