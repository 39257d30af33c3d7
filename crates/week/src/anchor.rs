use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Date, Duration, Weekday};

use crate::format::{ParseDateError, format_iso_date, parse_iso_date};

/// The Monday that identifies a reporting week.
///
/// A `WeekAnchor` can only be built through [`monday_of`] /
/// [`WeekAnchor::containing`] or [`WeekAnchor::from_monday`], so the wrapped
/// date is always a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekAnchor(Date);

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(with = "crate::format::iso_date")]
    pub start: Date,
    #[serde(with = "crate::format::iso_date")]
    pub end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), |day| day.next_day())
            .take_while(move |day| *day <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_iso_date(self.start), format_iso_date(self.end))
    }
}

/// Maps any calendar date to the Monday anchoring its reporting week.
///
/// Monday through Saturday map to the Monday of the same calendar week. A
/// Sunday maps to the Monday right after it: the operations team treats
/// Sunday as the first day of the coming production week.
pub fn monday_of(date: Date) -> WeekAnchor {
    let date = if date.weekday() == Weekday::Sunday {
        date.next_day().unwrap_or(date)
    } else {
        date
    };

    let offset = i64::from(date.weekday().number_days_from_monday());
    let monday = date.checked_sub(Duration::days(offset)).unwrap_or(date);

    WeekAnchor(monday)
}

/// Moves an anchor by whole weeks; negative values go back in time.
pub fn shift_weeks(anchor: WeekAnchor, delta_weeks: i64) -> WeekAnchor {
    anchor.shift_weeks(delta_weeks)
}

impl WeekAnchor {
    pub fn containing(date: Date) -> Self {
        monday_of(date)
    }

    /// Accepts `date` only when it already is a Monday.
    pub fn from_monday(date: Date) -> Option<Self> {
        (date.weekday() == Weekday::Monday).then_some(Self(date))
    }

    pub fn date(&self) -> Date {
        self.0
    }

    pub fn checked_shift_weeks(self, delta_weeks: i64) -> Option<Self> {
        let days = delta_weeks.checked_mul(7)?;

        self.0.checked_add(Duration::days(days)).map(Self)
    }

    /// Same as [`WeekAnchor::checked_shift_weeks`], except that stepping past
    /// the supported calendar keeps the current anchor.
    pub fn shift_weeks(self, delta_weeks: i64) -> Self {
        match self.checked_shift_weeks(delta_weeks) {
            Some(anchor) => anchor,
            None => {
                tracing::warn!(week = %self, delta_weeks, "week shift out of calendar range");
                self
            }
        }
    }

    pub fn previous(self) -> Self {
        self.shift_weeks(-1)
    }

    pub fn next(self) -> Self {
        self.shift_weeks(1)
    }

    /// Sunday through Saturday, the span shown in the page header.
    pub fn display_range(&self) -> DateRange {
        let start = self.0.previous_day().unwrap_or(self.0);
        let end = start.checked_add(Duration::days(6)).unwrap_or(start);

        DateRange::new(start, end)
    }

    /// Monday through Sunday, the span the backend aggregates over.
    pub fn reporting_range(&self) -> DateRange {
        let end = self.0.checked_add(Duration::days(6)).unwrap_or(self.0);

        DateRange::new(self.0, end)
    }

    pub fn to_iso(&self) -> String {
        format_iso_date(self.0)
    }
}

impl fmt::Display for WeekAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl From<WeekAnchor> for Date {
    fn from(anchor: WeekAnchor) -> Self {
        anchor.0
    }
}

impl From<WeekAnchor> for String {
    fn from(anchor: WeekAnchor) -> Self {
        anchor.to_iso()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
    #[error(transparent)]
    Parse(#[from] ParseDateError),

    #[error("{0} is not a Monday")]
    NotMonday(Date),
}

impl TryFrom<Date> for WeekAnchor {
    type Error = AnchorError;

    fn try_from(date: Date) -> Result<Self, Self::Error> {
        Self::from_monday(date).ok_or(AnchorError::NotMonday(date))
    }
}

impl TryFrom<String> for WeekAnchor {
    type Error = AnchorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for WeekAnchor {
    type Err = AnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = parse_iso_date(s)?;

        Self::try_from(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_monday_stays_put() {
        assert_eq!(monday_of(date!(2024 - 06 - 10)).date(), date!(2024 - 06 - 10));
    }

    #[test]
    fn test_saturday_goes_back_to_its_monday() {
        assert_eq!(monday_of(date!(2024 - 06 - 15)).date(), date!(2024 - 06 - 10));
    }

    #[test]
    fn test_sunday_moves_to_following_monday() {
        assert_eq!(monday_of(date!(2024 - 06 - 09)).date(), date!(2024 - 06 - 10));
        assert_eq!(monday_of(date!(2024 - 01 - 07)).date(), date!(2024 - 01 - 08));
    }

    #[test]
    fn test_sunday_crossing_year_boundary() {
        // 2023-12-31 is a Sunday
        assert_eq!(monday_of(date!(2023 - 12 - 31)).date(), date!(2024 - 01 - 01));
    }

    #[test]
    fn test_shift_weeks() {
        let anchor = monday_of(date!(2024 - 06 - 10));

        assert_eq!(shift_weeks(anchor, -1).date(), date!(2024 - 06 - 03));
        assert_eq!(shift_weeks(anchor, 1).date(), date!(2024 - 06 - 17));
        assert_eq!(anchor.next().previous(), anchor);
    }

    #[test]
    fn test_shift_past_calendar_end_keeps_anchor() {
        let anchor = monday_of(Date::MAX);

        assert_eq!(anchor.checked_shift_weeks(1), None);
        assert_eq!(anchor.shift_weeks(1), anchor);
    }

    #[test]
    fn test_ranges() {
        let anchor = monday_of(date!(2024 - 06 - 12));

        assert_eq!(
            anchor.display_range(),
            DateRange::new(date!(2024 - 06 - 09), date!(2024 - 06 - 15))
        );
        assert_eq!(
            anchor.reporting_range(),
            DateRange::new(date!(2024 - 06 - 10), date!(2024 - 06 - 16))
        );
        assert_eq!(anchor.display_range().days().count(), 7);
    }

    #[test]
    fn test_from_monday_rejects_other_days() {
        assert!(WeekAnchor::from_monday(date!(2024 - 06 - 11)).is_none());
        assert_eq!(
            WeekAnchor::try_from(date!(2024 - 06 - 11)),
            Err(AnchorError::NotMonday(date!(2024 - 06 - 11)))
        );
        assert!("2024-06-10".parse::<WeekAnchor>().is_ok());
        assert_eq!(
            "2024-06-11".parse::<WeekAnchor>().unwrap_err().to_string(),
            "2024-06-11 is not a Monday"
        );
        assert_eq!(
            "2024-6-11".parse::<WeekAnchor>(),
            Err(AnchorError::Parse(ParseDateError::Format("2024-6-11".to_owned())))
        );
    }
}
