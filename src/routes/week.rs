use axum::{Json, extract::Query, response::IntoResponse};
use serde::Deserialize;
use shiftboard_week::{WeekNavigator, WeekView};

use crate::template::Template;

#[derive(Debug, Default, Deserialize)]
pub struct WeekQuery {
    pub date: Option<String>,
}

/// GET /api/week - the week containing `date` (same rules as the page URL)
#[tracing::instrument(skip_all, fields(date = query.date.as_deref()))]
pub async fn show(template: Template, Query(query): Query<WeekQuery>) -> impl IntoResponse {
    let mut navigator = WeekNavigator::from_url(query.date.as_deref(), template.today());
    let notice = navigator.take_notice();

    Json(WeekView::new(navigator.anchor()).with_notice(notice))
}
