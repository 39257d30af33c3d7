use thiserror::Error;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::anchor::{WeekAnchor, monday_of};

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Formats `date` as `YYYY-MM-DD` straight from its calendar fields.
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDateError {
    #[error("`{0}` is not a YYYY-MM-DD date")]
    Format(String),

    #[error("`{0}` is not a calendar date")]
    Calendar(String),
}

/// Strict `YYYY-MM-DD` parser: four-digit year, two-digit month and day.
pub fn parse_iso_date(raw: &str) -> Result<Date, ParseDateError> {
    Date::parse(raw, ISO_DATE).map_err(|err| match err {
        time::error::Parse::TryFromParsed(_) => ParseDateError::Calendar(raw.to_owned()),
        _ => ParseDateError::Format(raw.to_owned()),
    })
}

/// Outcome of reading the week parameter from a page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlDate {
    /// Parameter absent or blank; use today.
    Missing,
    /// Parameter present but unusable; use today.
    Invalid(ParseDateError),
    /// A Monday, used as is.
    Monday(WeekAnchor),
    /// A valid date that was moved to its anchor. The user should be told.
    Snapped { requested: Date, anchor: WeekAnchor },
}

impl UrlDate {
    /// The anchor to load, or `None` when the caller must fall back to today.
    pub fn anchor(&self) -> Option<WeekAnchor> {
        match self {
            UrlDate::Monday(anchor) | UrlDate::Snapped { anchor, .. } => Some(*anchor),
            UrlDate::Missing | UrlDate::Invalid(_) => None,
        }
    }

    pub fn anchor_or_today(&self, today: Date) -> WeekAnchor {
        self.anchor().unwrap_or_else(|| monday_of(today))
    }
}

pub fn parse_url_date_parameter(raw: Option<&str>) -> UrlDate {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return UrlDate::Missing,
    };

    let requested = match parse_iso_date(raw) {
        Ok(date) => date,
        Err(err) => return UrlDate::Invalid(err),
    };

    let anchor = monday_of(requested);
    if anchor.date() == requested {
        UrlDate::Monday(anchor)
    } else {
        UrlDate::Snapped { requested, anchor }
    }
}

/// Serde adapter writing dates as `YYYY-MM-DD`.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_iso_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;

        super::parse_iso_date(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Month, macros::date};

    #[test]
    fn test_format_pads_fields() {
        assert_eq!(format_iso_date(date!(2024 - 06 - 09)), "2024-06-09");
        let early = Date::from_calendar_date(987, Month::January, 2).unwrap();
        assert_eq!(format_iso_date(early), "0987-01-02");
    }

    #[test]
    fn test_parse_rejects_loose_formats() {
        assert!(parse_iso_date("2024-6-10").is_err());
        assert!(parse_iso_date("2024/06/10").is_err());
        assert!(parse_iso_date("2024-06-10T00:00:00").is_err());
        assert!(parse_iso_date("20240610").is_err());
        assert!(parse_iso_date("+024-06-10").is_err());
        assert_eq!(
            parse_iso_date("06/10/2024").unwrap_err().to_string(),
            "`06/10/2024` is not a YYYY-MM-DD date"
        );
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(matches!(
            parse_iso_date("2023-02-29"),
            Err(ParseDateError::Calendar(_))
        ));
        assert!(matches!(
            parse_iso_date("2024-04-31"),
            Err(ParseDateError::Calendar(_))
        ));
        assert!(parse_iso_date("2024-13-01").is_err());
        assert_eq!(parse_iso_date("2024-02-29"), Ok(date!(2024 - 02 - 29)));
    }

    #[test]
    fn test_url_parameter_outcomes() {
        assert_eq!(parse_url_date_parameter(None), UrlDate::Missing);
        assert_eq!(parse_url_date_parameter(Some("  ")), UrlDate::Missing);
        assert!(matches!(
            parse_url_date_parameter(Some("next week")),
            UrlDate::Invalid(_)
        ));

        let monday = parse_url_date_parameter(Some("2024-06-10"));
        assert!(matches!(monday, UrlDate::Monday(_)));

        match parse_url_date_parameter(Some("2024-06-15")) {
            UrlDate::Snapped { requested, anchor } => {
                assert_eq!(requested, date!(2024 - 06 - 15));
                assert_eq!(anchor.date(), date!(2024 - 06 - 10));
            }
            other => panic!("expected snapped date, got {other:?}"),
        }
    }

    #[test]
    fn test_fallback_to_today() {
        let today = date!(2024 - 06 - 13);

        assert_eq!(
            parse_url_date_parameter(Some("garbage"))
                .anchor_or_today(today)
                .date(),
            date!(2024 - 06 - 10)
        );
    }
}
