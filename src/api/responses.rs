//! API response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{
    error::TimerError,
    state::{FastingMode, IgnoredReason, TimerSnapshot},
};

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl CommandResponse {
    /// Create a new command response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response for a command that took effect
    pub fn applied(message: String, timer: TimerSnapshot) -> Self {
        Self::new("applied".to_string(), message, timer)
    }

    /// Create a response for a command that left the timer untouched
    pub fn ignored(reason: IgnoredReason, timer: TimerSnapshot) -> Self {
        Self::new("ignored".to_string(), reason.to_string(), timer)
    }
}

/// Status response with derived timer values
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub formatted_remaining: String,
    pub phase_duration_seconds: u64,
    pub elapsed_seconds: u64,
    pub progress: f64,
    /// Expected end of the current phase, only while running
    pub phase_ends_at: Option<DateTime<Utc>>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

impl StatusResponse {
    pub fn phase_end(timer: &TimerSnapshot) -> Option<DateTime<Utc>> {
        if !timer.is_running() {
            return None;
        }
        i64::try_from(timer.remaining_seconds)
            .ok()
            .map(|seconds| Utc::now() + Duration::seconds(seconds))
    }
}

/// Catalog listing
#[derive(Debug, Clone, Serialize)]
pub struct ModesResponse {
    pub modes: Vec<FastingMode>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body returned when a request fails
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for TimerError {
    fn into_response(self) -> Response {
        let code = match self {
            TimerError::UnknownMode(_) => StatusCode::NOT_FOUND,
            TimerError::StateLock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };

        (code, Json(body)).into_response()
    }
}
