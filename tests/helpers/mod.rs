//! Shared setup for router tests: a canned scheduling backend that records
//! what the web layer asked of it.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use serde_json::json;
use shiftboard::{
    AppState,
    config::{BackendConfig, CalendarConfig, Config, ObservabilityConfig, ServerConfig},
};
use shiftboard_hours::{ActualHoursUpdate, ForecastUpdate, HoursBackend, HoursError, WeekHours};
use shiftboard_week::WeekAnchor;
use tower::ServiceExt;

#[derive(Default)]
pub struct Recorded {
    pub fetched: Vec<WeekAnchor>,
    pub actuals: Vec<ActualHoursUpdate>,
    pub forecasts: Vec<ForecastUpdate>,
}

pub struct FakeBackend {
    pub week: WeekHours,
    pub failure: Option<(u16, String)>,
    pub recorded: Mutex<Recorded>,
}

impl FakeBackend {
    pub fn new(week: WeekHours) -> Arc<Self> {
        Arc::new(Self {
            week,
            failure: None,
            recorded: Mutex::new(Recorded::default()),
        })
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            week: week_fixture(Some(31)),
            failure: Some((status, message.to_owned())),
            recorded: Mutex::new(Recorded::default()),
        })
    }

    pub fn fetched(&self) -> Vec<WeekAnchor> {
        self.recorded.lock().unwrap().fetched.clone()
    }

    fn fail(&self) -> Result<(), HoursError> {
        match &self.failure {
            Some((status, message)) => Err(HoursError::Backend {
                status: *status,
                message: message.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl HoursBackend for FakeBackend {
    async fn fetch_week(&self, anchor: WeekAnchor) -> Result<WeekHours, HoursError> {
        self.recorded.lock().unwrap().fetched.push(anchor);
        self.fail()?;
        Ok(self.week.clone())
    }

    async fn save_actuals(&self, updates: &[ActualHoursUpdate]) -> Result<(), HoursError> {
        self.fail()?;
        self.recorded
            .lock()
            .unwrap()
            .actuals
            .extend_from_slice(updates);
        Ok(())
    }

    async fn save_forecasts(&self, updates: &[ForecastUpdate]) -> Result<(), HoursError> {
        self.fail()?;
        self.recorded
            .lock()
            .unwrap()
            .forecasts
            .extend_from_slice(updates);
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        backend: BackendConfig {
            base_url: "http://backend.test".to_string(),
            timeout_secs: 5,
        },
        calendar: CalendarConfig {
            timezone: "UTC".to_string(),
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn app(backend: Arc<FakeBackend>) -> Router {
    shiftboard::router(AppState {
        config: test_config(),
        backend,
    })
}

/// Week of 2024-06-10 with one employee; the production week id is optional
/// so tests can exercise the "no schedule" path.
pub fn week_fixture(production_week: Option<i64>) -> WeekHours {
    let entries: Vec<_> = (9..=15)
        .map(|day| {
            let saved = day == 10;
            let work_date = format!("2024-06-{day:02}");
            let daily_hour_id = saved.then_some(700);
            let forecast = (10..=14).contains(&day).then_some("8.00");
            let actual = saved.then_some("7.5");
            let status = if saved { "existing" } else { "new_potential" };

            json!({
                "work_date": work_date,
                "daily_hour_id": daily_hour_id,
                "forecasted_hours": forecast,
                "actual_hours": actual,
                "work_area_id": 2,
                "overall_production_week_id": production_week,
                "status": status
            })
        })
        .collect();
    let message_if_no_week = production_week
        .is_none()
        .then_some("No Overall Production Schedule found for this period.");

    serde_json::from_value(json!({
        "employees_data": [{
            "employee_id": 12,
            "first_name": "Ava",
            "last_initial": "M",
            "position_title": "Finisher",
            "primary_work_area_id": 2,
            "primary_work_area_name": "Sanding",
            "daily_entries": entries
        }],
        "all_work_areas": [
            {"work_area_id": 2, "work_area_name": "Sanding"},
            {"work_area_id": 4, "work_area_name": "Spray"}
        ],
        "current_overall_production_week_id": production_week,
        "message_if_no_week": message_if_no_week
    }))
    .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (Response<Body>, String) {
    let response = app.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    (Response::from_parts(parts, Body::empty()), text)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .unwrap()
}
