//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/modes", get(modes_handler))
        .route("/mode/:name", post(mode_handler))
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/reset", post(reset_handler))
        .route("/stop", post(stop_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::state::FastingTimer;

    fn router() -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), FastingTimer::new()));
        (Arc::clone(&state), create_router(state))
    }

    async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn lists_the_catalog() {
        let (_, router) = router();
        let (status, body) = call(&router, Method::GET, "/modes").await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = body["modes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["display_name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["20:4", "16:8", "18:6"]);
    }

    #[tokio::test]
    async fn select_mode_by_url_friendly_name() {
        let (_, router) = router();
        let (status, body) = call(&router, Method::POST, "/mode/16-8").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "applied");
        assert_eq!(body["timer"]["remaining_seconds"], 28_800);
        assert_eq!(body["timer"]["phase"], "eating");
        assert_eq!(body["timer"]["timer_state"], "idle");
    }

    #[tokio::test]
    async fn unknown_mode_is_not_found() {
        let (_, router) = router();
        let (status, body) = call(&router, Method::POST, "/mode/12-12").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn start_without_mode_conflicts() {
        let (_, router) = router();
        let (status, body) = call(&router, Method::POST, "/start").await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], "ignored");
        assert_eq!(body["message"], "no fasting mode selected");
        assert_eq!(body["timer"]["timer_state"], "idle");
    }

    #[tokio::test]
    async fn start_pause_and_status() {
        let (state, router) = router();
        call(&router, Method::POST, "/mode/18-6").await;

        let (status, body) = call(&router, Method::POST, "/start").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["timer_state"], "running");

        let (_, body) = call(&router, Method::GET, "/status").await;
        assert_eq!(body["formatted_remaining"], "06:00:00");
        assert!(body["phase_ends_at"].is_string());
        assert_eq!(body["last_action"], "start");

        let (status, body) = call(&router, Method::POST, "/pause").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["timer_state"], "paused");
        assert_eq!(state.snapshot().unwrap().timer_state, crate::state::TimerState::Paused);

        let (status, _) = call(&router, Method::POST, "/pause").await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn stop_clears_mode() {
        let (_, router) = router();
        call(&router, Method::POST, "/mode/20-4").await;
        call(&router, Method::POST, "/start").await;

        let (status, body) = call(&router, Method::POST, "/stop").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["timer"]["mode"].is_null());
        assert_eq!(body["timer"]["remaining_seconds"], 0);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (_, router) = router();
        let (status, body) = call(&router, Method::GET, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
