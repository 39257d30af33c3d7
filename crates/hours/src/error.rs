use shiftboard_week::WeekAnchor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HoursError {
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Unexpected backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No production schedule exists for the week of {0}")]
    NoProductionWeek(WeekAnchor),
}
