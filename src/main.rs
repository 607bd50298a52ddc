//! Fasting Timer - A state-managed HTTP server driving an intermittent fasting countdown
//!
//! This is the main entry point for the fasting-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use fasting_timer::{
    config::Config,
    state::{AppState, FastingTimer},
    api::create_router,
    tasks::notification_mirror_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("fasting_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting fasting-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, mode={:?}, autostart={}, notify={}",
          config.host, config.port, config.mode, config.autostart, config.notify);

    let initial_mode = config.initial_mode()?;

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), FastingTimer::new()));

    // Mirror timer changes into logs and notifications
    tokio::spawn(notification_mirror_task(state.timer.subscribe(), config.notify));

    if let Some(mode) = initial_mode {
        state.set_mode(mode)?;
        if config.autostart {
            state.start()?;
        }
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /modes       - List fasting modes");
    info!("  POST /mode/:name  - Select a fasting mode (e.g. 16-8)");
    info!("  POST /start       - Start or resume the countdown");
    info!("  POST /pause       - Pause the countdown");
    info!("  POST /reset       - Back to the start of the eating window");
    info!("  POST /stop        - Clear the mode and stop");
    info!("  GET  /status      - Current timer status");
    info!("  GET  /events      - Server-sent snapshot stream");
    info!("  GET  /health      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.stop()?;
    info!("Server shutdown complete");
    Ok(())
}
