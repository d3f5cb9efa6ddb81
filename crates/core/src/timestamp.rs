//! Local date-time helpers for stored records
//!
//! Records store ISO-8601 local date-times without an offset. Writes use
//! [`TIMESTAMP_FORMAT`], which only emits a fraction when there is one, so a
//! written value always parses back to the same instant.

use chrono::{Local, NaiveDateTime};

/// Format used when writing timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Minute-precision form accepted on read
const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Current local date-time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Render a timestamp for storage
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp; `None` if it matches neither accepted form.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, MINUTE_FORMAT))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn whole_seconds_have_no_fraction() {
        let ts = NaiveDate::from_ymd_opt(2025, 4, 11)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();
        assert_eq!(format_timestamp(&ts), "2025-04-11T11:00:00");
    }

    #[test]
    fn fraction_survives_round_trip() {
        let ts = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_nano_opt(23, 59, 58, 123_456_789)
            .unwrap();
        let text = format_timestamp(&ts);
        assert_eq!(text, "2024-12-31T23:59:58.123456789");
        assert_eq!(parse_timestamp(&text), Some(ts));
    }

    #[test]
    fn accepts_minute_precision() {
        let ts = parse_timestamp("2025-04-11T11:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-04-11T11:00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2025-13-01T00:00:00"), None);
    }
}
