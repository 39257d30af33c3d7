use time::{Date, OffsetDateTime};
use time_tz::{ToTimezone, timezones};

/// Current calendar date in the IANA timezone `tz`.
///
/// Unknown zone names fall back to UTC.
pub fn today(tz: &str) -> Date {
    date_in(OffsetDateTime::now_utc(), tz)
}

pub fn date_in(instant: OffsetDateTime, tz: &str) -> Date {
    match timezones::get_by_name(tz) {
        Some(zone) => instant.to_timezone(zone).date(),
        None => {
            tracing::debug!(tz, "unknown timezone, using UTC");
            instant.date()
        }
    }
}

pub fn is_known_timezone(tz: &str) -> bool {
    tz == "UTC" || timezones::get_by_name(tz).is_some()
}
