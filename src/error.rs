use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use shiftboard_hours::HoursError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{context}: {source}")]
    HoursError {
        context: &'static str,
        #[source]
        source: HoursError,
    },

    #[error("Internal server error")]
    InternalError(String),
}

impl AppError {
    /// Wraps a backend failure with what the page was doing at the time,
    /// e.g. `.map_err(AppError::hours("Failed to load daily hours"))`.
    pub fn hours(context: &'static str) -> impl FnOnce(HoursError) -> AppError {
        move |source| AppError::HoursError { context, source }
    }
}

impl From<HoursError> for AppError {
    fn from(source: HoursError) -> Self {
        AppError::HoursError {
            context: "Request failed",
            source,
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPageTemplate {
    status_code: u16,
    error_title: String,
    error_message: String,
}

impl AppError {
    fn parts(self) -> (StatusCode, String, String) {
        match self {
            AppError::HoursError {
                source: HoursError::Validation(msg),
                ..
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error".to_string(),
                msg,
            ),
            AppError::HoursError {
                source: source @ HoursError::NoProductionWeek(_),
                ..
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "No Production Schedule".to_string(),
                format!("{source}. No entries possible until Production Schedule is created."),
            ),
            AppError::HoursError {
                context,
                source: HoursError::Backend { status, message },
            } => {
                tracing::error!(status, reason = %message, "{context}");
                (
                    StatusCode::BAD_GATEWAY,
                    "Scheduling Backend Error".to_string(),
                    format!("{context}: {message}"),
                )
            }
            AppError::HoursError { context, source } => {
                tracing::error!(err = %source, "{context}");
                (
                    StatusCode::BAD_GATEWAY,
                    "Scheduling Backend Unavailable".to_string(),
                    format!("{context}. The scheduling service could not be reached, please retry later."),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_display = self.to_string();
        let (status_code, error_title, error_message) = self.parts();

        let template = ErrorPageTemplate {
            status_code: status_code.as_u16(),
            error_title,
            error_message,
        };

        match template.render() {
            Ok(html) => (status_code, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {:?}", e);
                (status_code, format!("An error occurred: {}", error_display)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftboard_week::WeekAnchor;
    use time::macros::date;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        let anchor = WeekAnchor::containing(date!(2024 - 06 - 12));

        assert_eq!(
            status_of(HoursError::Validation("negative".to_owned()).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(HoursError::NoProductionWeek(anchor).into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(
                HoursError::Backend {
                    status: 500,
                    message: "boom".to_owned()
                }
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(AppError::InternalError("oops".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_render_failure_is_internal_error() {
        let err = AppError::from(askama::Error::Fmt);

        assert!(matches!(err, AppError::InternalError(_)));

        let (status, title, message) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(title, "Internal Server Error");
        assert!(!message.contains("fmt"));
    }

    #[test]
    fn test_backend_message_is_shown_with_context() {
        let err = AppError::hours("Failed to save daily hours")(HoursError::Backend {
            status: 400,
            message: "Invalid work area".to_owned(),
        });

        let (_, _, message) = err.parts();

        assert_eq!(message, "Failed to save daily hours: Invalid work area");
    }
}
