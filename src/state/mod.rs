//! State management module
//!
//! This module contains the fasting timer, its mode catalog and the
//! application state that owns it.

pub mod app_state;
pub mod fasting_mode;
pub mod fasting_timer;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use fasting_mode::FastingMode;
pub use fasting_timer::{CommandOutcome, FastingTimer, IgnoredReason, TICK_PERIOD};
pub use timer_state::{FastingPhase, TimerSnapshot, TimerState, TimerUpdate, UpdateCause};
