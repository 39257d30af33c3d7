use std::collections::HashMap;

use shiftboard_week::{format_iso_date, parse_iso_date};
use time::Date;

use crate::error::HoursError;

const AREA_PREFIX: &str = "area";
const ACTUAL_PREFIX: &str = "actual";
const FORECAST_PREFIX: &str = "forecast";

pub fn area_field(employee_id: i64) -> String {
    format!("{AREA_PREFIX}.{employee_id}")
}

pub fn actual_field(employee_id: i64, work_date: Date) -> String {
    format!("{ACTUAL_PREFIX}.{employee_id}.{}", format_iso_date(work_date))
}

pub fn forecast_field(employee_id: i64, work_date: Date) -> String {
    format!("{FORECAST_PREFIX}.{employee_id}.{}", format_iso_date(work_date))
}

/// Values typed into the hours grid, keyed by employee and day.
///
/// Only user input lives here; ids and week membership come from the
/// fetched [`crate::WeekHours`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekEdits {
    areas: HashMap<i64, i64>,
    actuals: HashMap<(i64, Date), Option<f64>>,
    forecasts: HashMap<(i64, Date), Option<f64>>,
}

impl WeekEdits {
    /// Reads `area.{employee}`, `actual.{employee}.{date}` and
    /// `forecast.{employee}.{date}` fields; anything else is ignored.
    pub fn from_form<I, K, V>(fields: I) -> Result<Self, HoursError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut edits = Self::default();

        for (key, value) in fields {
            let (key, value) = (key.as_ref(), value.as_ref());
            let mut parts = key.splitn(3, '.');

            match (parts.next(), parts.next(), parts.next()) {
                (Some(AREA_PREFIX), Some(employee), None) => {
                    let employee_id = parse_id(key, employee)?;
                    let value = value.trim();
                    if value.is_empty() {
                        continue;
                    }
                    let area_id = value.parse::<i64>().map_err(|_| {
                        HoursError::Validation(format!("invalid work area `{value}` for {key}"))
                    })?;
                    edits.areas.insert(employee_id, area_id);
                }
                (Some(prefix @ (ACTUAL_PREFIX | FORECAST_PREFIX)), Some(employee), Some(day)) => {
                    let employee_id = parse_id(key, employee)?;
                    let work_date = parse_iso_date(day)
                        .map_err(|err| HoursError::Validation(format!("{key}: {err}")))?;
                    let hours = parse_hours(key, value)?;

                    let target = if prefix == ACTUAL_PREFIX {
                        &mut edits.actuals
                    } else {
                        &mut edits.forecasts
                    };
                    target.insert((employee_id, work_date), hours);
                }
                _ => {}
            }
        }

        Ok(edits)
    }

    pub fn set_work_area(&mut self, employee_id: i64, work_area_id: i64) {
        self.areas.insert(employee_id, work_area_id);
    }

    pub fn set_actual(&mut self, employee_id: i64, work_date: Date, hours: Option<f64>) {
        self.actuals.insert((employee_id, work_date), hours);
    }

    pub fn set_forecast(&mut self, employee_id: i64, work_date: Date, hours: Option<f64>) {
        self.forecasts.insert((employee_id, work_date), hours);
    }

    pub fn work_area(&self, employee_id: i64) -> Option<i64> {
        self.areas.get(&employee_id).copied()
    }

    /// `None` when the cell was not submitted, `Some(None)` when it was left blank.
    pub fn actual(&self, employee_id: i64, work_date: Date) -> Option<Option<f64>> {
        self.actuals.get(&(employee_id, work_date)).copied()
    }

    pub fn forecast(&self, employee_id: i64, work_date: Date) -> Option<Option<f64>> {
        self.forecasts.get(&(employee_id, work_date)).copied()
    }

    pub fn has_forecasts(&self) -> bool {
        !self.forecasts.is_empty()
    }
}

fn parse_id(key: &str, raw: &str) -> Result<i64, HoursError> {
    raw.parse()
        .map_err(|_| HoursError::Validation(format!("invalid employee id in field {key}")))
}

/// Blank means "no value"; otherwise a finite, non-negative number.
pub fn parse_hours(key: &str, raw: &str) -> Result<Option<f64>, HoursError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    match raw.parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours >= 0.0 => Ok(Some(hours)),
        Ok(_) => Err(HoursError::Validation(format!(
            "hours must be zero or more, got `{raw}` for {key}"
        ))),
        Err(_) => Err(HoursError::Validation(format!(
            "`{raw}` is not a number for {key}"
        ))),
    }
}
