use serde::Serialize;
use shiftboard_week::{WeekAnchor, iso_date};
use time::Date;

use crate::edits::WeekEdits;
use crate::error::HoursError;
use crate::model::{EmployeeWeek, WeekHours, hours};

/// One cell of `POST /api/daily-hours-entry/batch-update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActualHoursUpdate {
    pub daily_hour_id: Option<i64>,
    pub employee_id: i64,
    #[serde(with = "iso_date")]
    pub work_date: Date,
    pub work_area_id: i64,
    #[serde(with = "hours")]
    pub forecasted_hours: Option<f64>,
    #[serde(with = "hours")]
    pub actual_hours: Option<f64>,
    pub overall_production_week_id: Option<i64>,
}

/// One cell of `PUT /api/daily-hours/update-forecasts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastUpdate {
    pub daily_hour_id: Option<i64>,
    pub employee_id: i64,
    #[serde(with = "iso_date")]
    pub work_date: Date,
    pub work_area_id: Option<i64>,
    #[serde(with = "hours")]
    pub new_forecasted_hours: Option<f64>,
    pub overall_production_week_id: Option<i64>,
}

impl WeekHours {
    fn ensure_production_week(&self, anchor: WeekAnchor) -> Result<(), HoursError> {
        if self.has_production_week() {
            Ok(())
        } else {
            Err(HoursError::NoProductionWeek(anchor))
        }
    }

    /// Submitted area, then the employee's own, then the first listed area,
    /// which is what an unselected area dropdown shows.
    fn work_area_for(&self, employee: &EmployeeWeek, edits: &WeekEdits) -> Option<i64> {
        edits
            .work_area(employee.employee_id)
            .or_else(|| employee.selected_work_area_id())
            .or_else(|| self.all_work_areas.first().map(|area| area.work_area_id))
    }

    /// Request body for saving actual hours: every cell of the fetched week,
    /// with submitted values replacing fetched ones.
    pub fn actual_updates(
        &self,
        anchor: WeekAnchor,
        edits: &WeekEdits,
    ) -> Result<Vec<ActualHoursUpdate>, HoursError> {
        self.ensure_production_week(anchor)?;

        let mut updates = Vec::new();
        for employee in &self.employees_data {
            let work_area_id = self.work_area_for(employee, edits).ok_or_else(|| {
                HoursError::Validation(format!(
                    "no work area selected for {}",
                    employee.display_name()
                ))
            })?;

            for entry in &employee.daily_entries {
                let actual_hours = edits
                    .actual(employee.employee_id, entry.work_date)
                    .unwrap_or(entry.actual_hours);

                updates.push(ActualHoursUpdate {
                    daily_hour_id: entry.daily_hour_id,
                    employee_id: employee.employee_id,
                    work_date: entry.work_date,
                    work_area_id,
                    forecasted_hours: entry.forecasted_hours,
                    actual_hours,
                    overall_production_week_id: entry.overall_production_week_id,
                });
            }
        }

        Ok(updates)
    }

    /// Request body for saving forecasts: only cells with a submitted forecast.
    pub fn forecast_updates(
        &self,
        anchor: WeekAnchor,
        edits: &WeekEdits,
    ) -> Result<Vec<ForecastUpdate>, HoursError> {
        self.ensure_production_week(anchor)?;

        let mut updates = Vec::new();
        for employee in &self.employees_data {
            let work_area_id = self.work_area_for(employee, edits);

            for entry in &employee.daily_entries {
                let Some(new_forecasted_hours) =
                    edits.forecast(employee.employee_id, entry.work_date)
                else {
                    continue;
                };

                updates.push(ForecastUpdate {
                    daily_hour_id: entry.daily_hour_id,
                    employee_id: employee.employee_id,
                    work_date: entry.work_date,
                    work_area_id,
                    new_forecasted_hours,
                    overall_production_week_id: entry.overall_production_week_id,
                });
            }
        }

        Ok(updates)
    }
}
