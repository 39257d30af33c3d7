use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use shiftboard_hours::HoursBackend;

use crate::{
    error::AppError,
    template::{NotFoundTemplate, Template},
};

mod assets;
mod health;
pub mod hours;
mod week;

pub use assets::AssetsService;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub backend: Arc<dyn HoursBackend>,
}

pub async fn fallback(template: Template) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::NOT_FOUND, template.render(NotFoundTemplate)?))
}

async fn index() -> Redirect {
    Redirect::to(hours::PAGE_PATH)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index))
        .route(hours::PAGE_PATH, get(hours::page))
        .route("/daily-hours-entry/actuals", post(hours::save_actuals))
        .route("/daily-hours-entry/forecasts", post(hours::save_forecasts))
        .route("/api/week", get(week::show))
        .nest_service("/static", AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
