use serde::Serialize;
use time::Date;

use crate::anchor::{WeekAnchor, monday_of};
use crate::format::{UrlDate, format_iso_date, parse_url_date_parameter};
use crate::header::WeekHeader;

/// Informational message for the user after a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The requested date was not a Monday and was moved to its anchor.
    Snapped {
        #[serde(with = "crate::format::iso_date")]
        requested: Date,
        anchor: WeekAnchor,
    },
    /// The picker was cleared; the current week is shown again.
    Reset { anchor: WeekAnchor },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Snapped { requested, anchor } => format!(
                "The provided date ({}) is not a Monday. Displaying schedule starting {}.",
                format_iso_date(*requested),
                anchor
            ),
            Notice::Reset { .. } => "No date selected. Resetting to current week.".to_owned(),
        }
    }
}

/// Identifies one data fetch issued by a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub anchor: WeekAnchor,
    pub sequence: u64,
}

/// Page-level week state.
///
/// Every change of week goes through [`WeekNavigator::set`], which hands out
/// the [`FetchTicket`] for the data load of the new week. Responses carrying
/// an older ticket must be dropped.
#[derive(Debug, Clone)]
pub struct WeekNavigator {
    anchor: WeekAnchor,
    sequence: u64,
    notice: Option<Notice>,
}

impl WeekNavigator {
    pub fn new(anchor: WeekAnchor) -> Self {
        Self {
            anchor,
            sequence: 0,
            notice: None,
        }
    }

    /// Seeds the week from the `reporting_week_start_date` URL parameter,
    /// falling back to the week of `today`.
    pub fn from_url(raw: Option<&str>, today: Date) -> Self {
        let parsed = parse_url_date_parameter(raw);
        let mut navigator = Self::new(parsed.anchor_or_today(today));

        match parsed {
            UrlDate::Invalid(err) => {
                tracing::warn!(err = %err, "invalid week date in URL, defaulting to current week");
            }
            UrlDate::Snapped { requested, anchor } => {
                navigator.notice = Some(Notice::Snapped { requested, anchor });
            }
            UrlDate::Missing | UrlDate::Monday(_) => {}
        }

        navigator
    }

    /// Seeds the week from a submitted date picker. An emptied picker goes
    /// back to the current week with a [`Notice::Reset`].
    pub fn from_picker(raw: Option<&str>, today: Date) -> Self {
        let mut navigator = Self::new(monday_of(today));

        match parse_url_date_parameter(raw) {
            UrlDate::Missing => {
                navigator.select(None, today);
            }
            UrlDate::Monday(anchor) => {
                navigator.select(Some(anchor.date()), today);
            }
            UrlDate::Snapped { requested, .. } => {
                navigator.select(Some(requested), today);
            }
            UrlDate::Invalid(err) => {
                tracing::warn!(err = %err, "invalid picker date, defaulting to current week");
            }
        }

        navigator
    }

    pub fn anchor(&self) -> WeekAnchor {
        self.anchor
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn set(&mut self, anchor: WeekAnchor) -> FetchTicket {
        self.anchor = anchor;
        self.sequence += 1;

        tracing::debug!(week = %anchor, sequence = self.sequence, "week selected");

        self.ticket()
    }

    /// Ticket for the week currently held, without navigating.
    pub fn ticket(&self) -> FetchTicket {
        FetchTicket {
            anchor: self.anchor,
            sequence: self.sequence,
        }
    }

    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        ticket.sequence == self.sequence && ticket.anchor == self.anchor
    }

    /// Applies a picker edit. `None` is an emptied picker.
    pub fn select(&mut self, picked: Option<Date>, today: Date) -> FetchTicket {
        match picked {
            Some(date) => {
                let anchor = monday_of(date);
                self.notice = (anchor.date() != date).then_some(Notice::Snapped {
                    requested: date,
                    anchor,
                });
                self.set(anchor)
            }
            None => {
                let anchor = monday_of(today);
                self.notice = Some(Notice::Reset { anchor });
                self.set(anchor)
            }
        }
    }

    pub fn previous(&mut self) -> FetchTicket {
        self.notice = None;
        self.set(self.anchor.previous())
    }

    pub fn next(&mut self) -> FetchTicket {
        self.notice = None;
        self.set(self.anchor.next())
    }

    /// Canonical value for the date picker.
    pub fn picker_value(&self) -> String {
        self.anchor.to_iso()
    }

    /// Value sent as `reporting_week_start_date`.
    pub fn query_value(&self) -> String {
        self.anchor.to_iso()
    }

    pub fn header(&self) -> WeekHeader {
        WeekHeader::new(self.anchor)
    }
}
