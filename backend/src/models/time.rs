//! Wall-clock handling for the dashboard.
//!
//! Flight timestamps are kept as naive local wall times: the hour a flight is
//! scheduled at is the hour printed on the departure board, whatever offset the
//! upstream API attached to it.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};
use parking_lot::Mutex;

/// Display format used for table rows and the `last_updated` stamp.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Width of a price-trend bucket, in hours.
pub const BUCKET_HOURS: u32 = 6;

/// Source of the current time.
///
/// Injected wherever "now" matters (synthetic timestamps, cache age,
/// `last_updated`) so tests can pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and replay.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM`.
pub fn format_minutes(ts: &NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

/// Floor a timestamp to the start of its fixed-width bucket.
///
/// Buckets are anchored at midnight, so with 6-hour buckets the boundaries
/// are 00:00, 06:00, 12:00 and 18:00.
pub fn floor_to_bucket(ts: &NaiveDateTime, bucket_hours: u32) -> NaiveDateTime {
    let width = bucket_hours.clamp(1, 24);
    let hour = (ts.hour() / width) * width;
    ts.date().and_hms_opt(hour, 0, 0).unwrap_or(*ts)
}

/// Parse an upstream timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T08:15:00+00:00`, keeping the stated wall
/// time) and naive ISO 8601 with or without seconds. Anything else, including
/// the empty string, yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(&at(7, 5)), "2024-05-01 07:05");
    }

    #[test]
    fn test_floor_to_bucket_boundaries() {
        assert_eq!(floor_to_bucket(&at(0, 0), BUCKET_HOURS), at(0, 0));
        assert_eq!(floor_to_bucket(&at(5, 59), BUCKET_HOURS), at(0, 0));
        assert_eq!(floor_to_bucket(&at(6, 0), BUCKET_HOURS), at(6, 0));
        assert_eq!(floor_to_bucket(&at(13, 30), BUCKET_HOURS), at(12, 0));
        assert_eq!(floor_to_bucket(&at(23, 59), BUCKET_HOURS), at(18, 0));
    }

    #[test]
    fn test_parse_rfc3339_keeps_wall_time() {
        let ts = parse_timestamp("2024-05-01T08:15:00+10:00").unwrap();
        assert_eq!(ts, at(8, 15));
    }

    #[test]
    fn test_parse_naive_variants() {
        assert_eq!(parse_timestamp("2024-05-01T08:15:00"), Some(at(8, 15)));
        assert_eq!(parse_timestamp("2024-05-01 08:15"), Some(at(8, 15)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(at(10, 0));
        clock.advance(chrono::Duration::minutes(90));
        assert_eq!(clock.now(), at(11, 30));
        clock.set(at(1, 0));
        assert_eq!(clock.today(), at(1, 0).date());
    }
}
