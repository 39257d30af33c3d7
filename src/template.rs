use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;
use time::Date;

use crate::error::AppError;

pub const TIMEZONE_HEADER: &str = "TS-Timezone";

/// Request-scoped renderer. Knows the caller's timezone so handlers agree on
/// what "today" is.
pub struct Template {
    pub timezone: String,
}

impl Template {
    pub fn today(&self) -> Date {
        shiftboard_week::today(&self.timezone)
    }

    /// Renders a page template. Render failures surface as an internal
    /// error page.
    pub fn render<T: askama::Template>(&self, template: T) -> Result<Response, AppError> {
        let html = template.render()?;

        Ok(Html(html).into_response())
    }
}

impl FromRequestParts<crate::routes::AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &crate::routes::AppState,
    ) -> Result<Self, Self::Rejection> {
        let timezone = parts
            .headers
            .get(TIMEZONE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .unwrap_or_else(|| state.config.calendar.timezone.to_owned());

        Ok(Template { timezone })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;
