//! Fasting Timer - A state-managed HTTP server driving an intermittent fasting countdown
//!
//! This library provides the fasting timer state machine, its fixed mode
//! catalog, and the HTTP surface and background tasks built around it.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use state::{AppState, FastingMode, FastingTimer, TimerSnapshot};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
