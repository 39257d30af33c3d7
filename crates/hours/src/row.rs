use time::Date;

use crate::edits::{actual_field, area_field, forecast_field};
use crate::model::{EmployeeWeek, WeekHours};

/// One grid row as rendered by the hours page.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub name: String,
    pub position_title: Option<String>,
    pub selected_work_area_id: Option<i64>,
    pub area_field: String,
    pub cells: Vec<HoursCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoursCell {
    pub work_date: Date,
    pub forecast_label: String,
    pub forecast_value: String,
    pub forecast_field: String,
    pub actual_value: String,
    pub actual_field: String,
    pub saved: bool,
}

pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}

impl From<&EmployeeWeek> for EmployeeRow {
    fn from(employee: &EmployeeWeek) -> Self {
        let cells = employee
            .daily_entries
            .iter()
            .map(|entry| {
                let forecast = format_hours(entry.forecasted_hours.unwrap_or_default());

                HoursCell {
                    work_date: entry.work_date,
                    forecast_label: format!("F: {forecast}"),
                    forecast_value: forecast,
                    forecast_field: forecast_field(employee.employee_id, entry.work_date),
                    actual_value: entry.actual_hours.map(format_hours).unwrap_or_default(),
                    actual_field: actual_field(employee.employee_id, entry.work_date),
                    saved: entry.daily_hour_id.is_some(),
                }
            })
            .collect();

        Self {
            employee_id: employee.employee_id,
            name: employee.display_name(),
            position_title: employee.position_title.clone(),
            selected_work_area_id: employee.selected_work_area_id(),
            area_field: area_field(employee.employee_id),
            cells,
        }
    }
}

impl EmployeeRow {
    pub fn is_selected_area(&self, work_area_id: &i64) -> bool {
        self.selected_work_area_id == Some(*work_area_id)
    }
}

impl WeekHours {
    pub fn rows(&self) -> Vec<EmployeeRow> {
        self.employees_data.iter().map(EmployeeRow::from).collect()
    }
}
