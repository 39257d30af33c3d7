use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};
use time::{Date, Weekday};

use crate::anchor::WeekAnchor;
use crate::format::format_iso_date;

/// Header columns in display order, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, Serialize)]
pub enum DayColumn {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl From<Weekday> for DayColumn {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sunday => DayColumn::Sun,
            Weekday::Monday => DayColumn::Mon,
            Weekday::Tuesday => DayColumn::Tue,
            Weekday::Wednesday => DayColumn::Wed,
            Weekday::Thursday => DayColumn::Thu,
            Weekday::Friday => DayColumn::Fri,
            Weekday::Saturday => DayColumn::Sat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    pub column: DayColumn,
    #[serde(with = "crate::format::iso_date")]
    pub date: Date,
    /// Two-digit day of month.
    pub day: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekHeader {
    pub cells: Vec<HeaderCell>,
    pub label: String,
}

impl WeekHeader {
    pub fn new(anchor: WeekAnchor) -> Self {
        let cells = DayColumn::iter()
            .zip(anchor.display_range().days())
            .map(|(column, date)| HeaderCell {
                column,
                date,
                day: format!("{:02}", date.day()),
            })
            .collect();

        Self {
            cells,
            label: week_label(anchor),
        }
    }

    pub fn cell(&self, column: DayColumn) -> Option<&HeaderCell> {
        self.cells.iter().find(|cell| cell.column == column)
    }
}

/// `"{anchor} - {anchor + 6}"`, the Monday-to-Sunday label shown next to the picker.
pub fn week_label(anchor: WeekAnchor) -> String {
    let range = anchor.reporting_range();

    format!("{} - {}", format_iso_date(range.start), format_iso_date(range.end))
}
