use serde::{Deserialize, Serialize};
use shiftboard_week::{WeekAnchor, iso_date};
use time::Date;

/// Payload of `GET /api/daily-hours-entry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekHours {
    #[serde(default)]
    pub employees_data: Vec<EmployeeWeek>,
    #[serde(default)]
    pub all_work_areas: Vec<WorkArea>,
    pub current_overall_production_week_id: Option<i64>,
    #[serde(default)]
    pub message_if_no_week: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeWeek {
    pub employee_id: i64,
    pub first_name: String,
    pub last_initial: String,
    #[serde(default)]
    pub position_title: Option<String>,
    #[serde(default)]
    pub position_id: Option<i64>,
    #[serde(default)]
    pub primary_work_area_id: Option<i64>,
    #[serde(default)]
    pub primary_work_area_name: Option<String>,
    #[serde(default)]
    pub daily_entries: Vec<DailyEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    #[serde(with = "iso_date")]
    pub work_date: Date,
    #[serde(default)]
    pub day_of_week: Option<String>,
    pub daily_hour_id: Option<i64>,
    #[serde(default, with = "hours")]
    pub forecasted_hours: Option<f64>,
    #[serde(default, with = "hours")]
    pub actual_hours: Option<f64>,
    #[serde(default)]
    pub work_area_id: Option<i64>,
    #[serde(default)]
    pub overall_production_week_id: Option<i64>,
    #[serde(default)]
    pub status: EntryStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Existing,
    #[default]
    NewPotential,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkArea {
    pub work_area_id: i64,
    pub work_area_name: String,
}

impl WeekHours {
    /// Whether a production schedule exists for the week; entries can only
    /// be saved when it does.
    pub fn has_production_week(&self) -> bool {
        self.current_overall_production_week_id.is_some()
    }

    /// Message to show instead of the grid when no schedule exists.
    pub fn missing_week_message(&self, anchor: WeekAnchor) -> String {
        self.message_if_no_week.clone().unwrap_or_else(|| {
            format!("No Overall Production Schedule found for the week of {anchor}.")
        })
    }

    pub fn work_area_name(&self, work_area_id: i64) -> Option<&str> {
        self.all_work_areas
            .iter()
            .find(|area| area.work_area_id == work_area_id)
            .map(|area| area.work_area_name.as_str())
    }
}

impl EmployeeWeek {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_initial)
    }

    /// Work area preselected for the row: the last day that has one,
    /// otherwise the employee's primary area.
    pub fn selected_work_area_id(&self) -> Option<i64> {
        self.daily_entries
            .iter()
            .rev()
            .find_map(|entry| entry.work_area_id)
            .or(self.primary_work_area_id)
    }
}

/// Serde adapter for hour figures, which the backend sends as decimal
/// strings (`"7.5"`), numbers, or `null`.
pub mod hours {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(hours) => serializer.serialize_f64(*hours),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(hours)) => Ok(Some(hours)),
            Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(Raw::Text(text)) => text
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid hours value `{text}`"))),
        }
    }
}
