use serde::Serialize;

use crate::anchor::{DateRange, WeekAnchor};
use crate::header::{HeaderCell, WeekHeader};
use crate::navigator::Notice;

/// Everything a page or API client needs to show one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekView {
    pub anchor: WeekAnchor,
    pub display_range: DateRange,
    pub reporting_range: DateRange,
    pub header: Vec<HeaderCell>,
    pub label: String,
    pub previous: WeekAnchor,
    pub next: WeekAnchor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl WeekView {
    pub fn new(anchor: WeekAnchor) -> Self {
        let WeekHeader { cells, label } = WeekHeader::new(anchor);

        Self {
            anchor,
            display_range: anchor.display_range(),
            reporting_range: anchor.reporting_range(),
            header: cells,
            label,
            previous: anchor.previous(),
            next: anchor.next(),
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: Option<Notice>) -> Self {
        self.notice = notice;
        self
    }
}
