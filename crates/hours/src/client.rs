use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use shiftboard_week::WeekAnchor;

use crate::error::HoursError;
use crate::model::WeekHours;
use crate::update::{ActualHoursUpdate, ForecastUpdate};

pub const WEEK_PARAM: &str = "reporting_week_start_date";

/// REST endpoints of the scheduling backend used by the hours page.
#[async_trait]
pub trait HoursBackend: Send + Sync {
    async fn fetch_week(&self, anchor: WeekAnchor) -> Result<WeekHours, HoursError>;

    async fn save_actuals(&self, updates: &[ActualHoursUpdate]) -> Result<(), HoursError>;

    async fn save_forecasts(&self, updates: &[ForecastUpdate]) -> Result<(), HoursError>;
}

#[derive(Clone)]
pub struct HttpHoursBackend {
    client: Client,
    base_url: String,
}

impl HttpHoursBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, HoursError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl HoursBackend for HttpHoursBackend {
    #[tracing::instrument(skip_all, fields(week = %anchor))]
    async fn fetch_week(&self, anchor: WeekAnchor) -> Result<WeekHours, HoursError> {
        let response = self
            .client
            .get(self.url("/api/daily-hours-entry"))
            .query(&[(WEEK_PARAM, anchor.to_iso())])
            .send()
            .await?;

        decode(response).await
    }

    #[tracing::instrument(skip_all, fields(count = updates.len()))]
    async fn save_actuals(&self, updates: &[ActualHoursUpdate]) -> Result<(), HoursError> {
        let response = self
            .client
            .post(self.url("/api/daily-hours-entry/batch-update"))
            .json(updates)
            .send()
            .await?;

        check(response).await.map(|_| ())
    }

    #[tracing::instrument(skip_all, fields(count = updates.len()))]
    async fn save_forecasts(&self, updates: &[ForecastUpdate]) -> Result<(), HoursError> {
        let response = self
            .client
            .put(self.url("/api/daily-hours/update-forecasts"))
            .json(updates)
            .send()
            .await?;

        check(response).await.map(|_| ())
    }
}

#[derive(Deserialize)]
struct BackendMessage {
    message: Option<String>,
}

/// Pulls the `message` out of a backend error body, falling back to the
/// raw body or the status text.
pub fn backend_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(BackendMessage { message: Some(message) }) = serde_json::from_str(body) {
        return message;
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_owned()
    } else {
        body.to_owned()
    }
}

async fn check(response: Response) -> Result<Response, HoursError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = backend_message(status, &body);
    tracing::warn!(status = status.as_u16(), reason = %message, "backend rejected request");

    Err(HoursError::Backend {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, HoursError> {
    let bytes = check(response).await?.bytes().await?;

    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_backend_message_from_json() {
        let message = backend_message(
            StatusCode::BAD_REQUEST,
            r#"{"message": "reporting_week_start_date must be a Monday."}"#,
        );

        assert_eq!(message, "reporting_week_start_date must be a Monday.");
    }

    #[test]
    fn test_backend_message_fallbacks() {
        assert_eq!(
            backend_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            backend_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
        assert_eq!(
            backend_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"details": "x"}"#),
            r#"{"details": "x"}"#
        );
    }

    #[test]
    fn test_base_url_is_normalised() {
        let backend =
            HttpHoursBackend::new("http://backend:5000/", Duration::from_secs(5)).unwrap();

        assert_eq!(
            backend.url("/api/daily-hours-entry"),
            "http://backend:5000/api/daily-hours-entry"
        );
    }
}
