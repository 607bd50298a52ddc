//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info};

use crate::{
    error::TimerError,
    state::{AppState, CommandOutcome, FastingMode},
};
use super::responses::{CommandResponse, HealthResponse, ModesResponse, StatusResponse};

type CommandResult = Result<(StatusCode, Json<CommandResponse>), TimerError>;

/// Build the reply for a command outcome. Ignored commands answer 409.
fn command_reply(state: &AppState, outcome: CommandOutcome, message: &str) -> CommandResult {
    let timer = state.snapshot()?;

    Ok(match outcome {
        CommandOutcome::Applied => (
            StatusCode::OK,
            Json(CommandResponse::applied(message.to_string(), timer)),
        ),
        CommandOutcome::Ignored(reason) => (
            StatusCode::CONFLICT,
            Json(CommandResponse::ignored(reason, timer)),
        ),
    })
}

fn log_failure(command: &str, e: TimerError) -> TimerError {
    error!("Failed to {} timer: {}", command, e);
    e
}

/// Handle GET /modes - List the fasting mode catalog
pub async fn modes_handler() -> Json<ModesResponse> {
    Json(ModesResponse {
        modes: FastingMode::ALL.to_vec(),
    })
}

/// Handle POST /mode/:name - Select a fasting mode
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> CommandResult {
    let mode = FastingMode::find(&name)?;
    let outcome = state.set_mode(mode).map_err(|e| log_failure("set mode on", e))?;
    info!("Mode endpoint called - {} selected", mode);
    command_reply(&state, outcome, &format!("Fasting mode {} selected", mode))
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    let outcome = state.start().map_err(|e| log_failure("start", e))?;
    command_reply(&state, outcome, "Timer started")
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    let outcome = state.pause().map_err(|e| log_failure("pause", e))?;
    command_reply(&state, outcome, "Timer paused")
}

/// Handle POST /reset - Return to the start of the eating window
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    let outcome = state.reset().map_err(|e| log_failure("reset", e))?;
    command_reply(&state, outcome, "Timer reset")
}

/// Handle POST /stop - Clear the mode and stop the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> CommandResult {
    let outcome = state.stop().map_err(|e| log_failure("stop", e))?;
    command_reply(&state, outcome, "Timer stopped")
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, TimerError> {
    let timer = state.snapshot().map_err(|e| log_failure("read", e))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        formatted_remaining: timer.formatted_remaining(),
        phase_duration_seconds: timer.phase_duration_seconds(),
        elapsed_seconds: timer.elapsed_seconds(),
        progress: timer.progress(),
        phase_ends_at: StatusResponse::phase_end(&timer),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream a `snapshot` event, tagged with its cause, for
/// the current state and every change after it
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let updates = state.timer.subscribe();

    let snapshots = stream::unfold((updates, true), |(mut updates, first)| async move {
        if !first && updates.changed().await.is_err() {
            return None;
        }
        let update = updates.borrow_and_update().clone();
        let event = Event::default().event("snapshot").json_data(&update);
        Some((event, (updates, false)))
    });

    Sse::new(snapshots).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
