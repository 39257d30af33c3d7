use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shiftboard_hours::{EmployeeRow, WEEK_PARAM, WeekEdits, WeekHours, WorkArea};
use shiftboard_week::{WeekAnchor, WeekNavigator, WeekView};

use crate::{error::AppError, routes::AppState, template::Template};

pub const PAGE_PATH: &str = "/daily-hours-entry";

pub const SAVED_ACTUALS: &str = "actuals";
pub const SAVED_FORECASTS: &str = "forecasts";

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub reporting_week_start_date: Option<String>,
    pub source: Option<String>,
    pub edit_forecasts: Option<String>,
    pub saved: Option<String>,
}

impl PageQuery {
    fn from_picker(&self) -> bool {
        self.source.as_deref() == Some("picker")
    }

    fn edit_forecasts(&self) -> bool {
        matches!(
            self.edit_forecasts.as_deref(),
            Some("1" | "true" | "on" | "yes")
        )
    }

    fn saved_banner(&self) -> Option<&'static str> {
        match self.saved.as_deref() {
            Some(SAVED_ACTUALS) => Some("Daily hours saved successfully!"),
            Some(SAVED_FORECASTS) => Some("Forecasted hours updated successfully!"),
            _ => None,
        }
    }
}

/// Page URL for a week, keeping the forecast mode and an optional saved flag.
pub fn page_href(anchor: WeekAnchor, edit_forecasts: bool, saved: Option<&str>) -> String {
    let mut href = format!(
        "{PAGE_PATH}?{WEEK_PARAM}={}",
        urlencoding::encode(&anchor.to_iso())
    );
    if edit_forecasts {
        href.push_str("&edit_forecasts=1");
    }
    if let Some(saved) = saved {
        href.push_str("&saved=");
        href.push_str(&urlencoding::encode(saved));
    }
    href
}

/// Work area option of one row's select.
pub struct AreaChoice {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

pub struct RowView {
    pub row: EmployeeRow,
    pub areas: Vec<AreaChoice>,
}

impl RowView {
    fn new(row: EmployeeRow, work_areas: &[WorkArea]) -> Self {
        let areas = work_areas
            .iter()
            .map(|area| AreaChoice {
                id: area.work_area_id,
                name: area.work_area_name.to_owned(),
                selected: row.is_selected_area(&area.work_area_id),
            })
            .collect();

        Self { row, areas }
    }
}

#[derive(askama::Template)]
#[template(path = "daily-hours-entry.html")]
pub struct DailyHoursTemplate {
    pub current_path: String,
    pub week: WeekView,
    pub picker_value: String,
    pub previous_href: String,
    pub next_href: String,
    pub toggle_href: String,
    pub edit_forecasts: bool,
    pub notice: Option<String>,
    pub saved: Option<&'static str>,
    pub rows: Vec<RowView>,
    pub no_week_message: Option<String>,
}

impl DailyHoursTemplate {
    fn new(navigator: &mut WeekNavigator, week: &WeekHours, query: &PageQuery) -> Self {
        let anchor = navigator.anchor();
        let edit_forecasts = query.edit_forecasts();
        let notice = navigator.take_notice().map(|n| n.message());

        let (rows, no_week_message) = if week.has_production_week() {
            let rows = week
                .rows()
                .into_iter()
                .map(|row| RowView::new(row, &week.all_work_areas))
                .collect();
            (rows, None)
        } else {
            (Vec::new(), Some(week.missing_week_message(anchor)))
        };

        Self {
            current_path: PAGE_PATH.to_owned(),
            week: WeekView::new(anchor),
            picker_value: navigator.picker_value(),
            previous_href: page_href(anchor.previous(), edit_forecasts, None),
            next_href: page_href(anchor.next(), edit_forecasts, None),
            toggle_href: page_href(anchor, !edit_forecasts, None),
            edit_forecasts,
            notice,
            saved: query.saved_banner(),
            rows,
            no_week_message,
        }
    }
}

/// Loads the navigator's week. Each request owns its navigator, so the
/// response always belongs to the week being rendered.
async fn load_week(
    app: &AppState,
    navigator: &WeekNavigator,
    context: &'static str,
) -> Result<WeekHours, AppError> {
    app.backend
        .fetch_week(navigator.anchor())
        .await
        .map_err(AppError::hours(context))
}

#[tracing::instrument(skip_all, fields(week = query.reporting_week_start_date.as_deref()))]
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let today = template.today();
    let raw = query.reporting_week_start_date.as_deref();
    let mut navigator = if query.from_picker() {
        WeekNavigator::from_picker(raw, today)
    } else {
        WeekNavigator::from_url(raw, today)
    };

    let week = load_week(&app, &navigator, "Failed to load daily hours").await?;

    template.render(DailyHoursTemplate::new(&mut navigator, &week, &query))
}

fn form_week(fields: &[(String, String)]) -> Option<&str> {
    fields
        .iter()
        .find(|(key, _)| key == WEEK_PARAM)
        .map(|(_, value)| value.as_str())
}

#[tracing::instrument(skip_all, fields(week = form_week(&fields)))]
pub async fn save_actuals(
    template: Template,
    State(app): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let navigator = WeekNavigator::from_url(form_week(&fields), template.today());
    let anchor = navigator.anchor();
    let edits = WeekEdits::from_form(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

    let week = load_week(&app, &navigator, "Failed to save daily hours").await?;

    let updates = week.actual_updates(anchor, &edits)?;
    if updates.is_empty() {
        tracing::info!(week = %anchor, "no daily hours to save");
        return Ok(Redirect::to(&page_href(anchor, false, None)).into_response());
    }

    app.backend
        .save_actuals(&updates)
        .await
        .map_err(AppError::hours("Failed to save daily hours"))?;

    tracing::info!(week = %anchor, count = updates.len(), "daily hours saved");

    Ok(Redirect::to(&page_href(anchor, false, Some(SAVED_ACTUALS))).into_response())
}

#[tracing::instrument(skip_all, fields(week = form_week(&fields)))]
pub async fn save_forecasts(
    template: Template,
    State(app): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let navigator = WeekNavigator::from_url(form_week(&fields), template.today());
    let anchor = navigator.anchor();
    let edits = WeekEdits::from_form(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

    let week = load_week(&app, &navigator, "Error saving forecasted hours").await?;

    let updates = week.forecast_updates(anchor, &edits)?;
    if updates.is_empty() {
        tracing::info!(week = %anchor, "no forecasted hours to save");
        return Ok(Redirect::to(&page_href(anchor, true, None)).into_response());
    }

    app.backend
        .save_forecasts(&updates)
        .await
        .map_err(AppError::hours("Error saving forecasted hours"))?;

    tracing::info!(week = %anchor, count = updates.len(), "forecasted hours saved");

    Ok(Redirect::to(&page_href(anchor, false, Some(SAVED_FORECASTS))).into_response())
}
