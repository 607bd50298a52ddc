//! Main application state management

use std::{
    sync::Mutex,
    time::Instant,
};
use chrono::{DateTime, Utc};

use super::{CommandOutcome, FastingMode, FastingTimer, TimerSnapshot};
use crate::error::TimerError;

/// Main application state: the fasting timer plus server metadata
#[derive(Debug)]
pub struct AppState {
    /// The fasting timer driven by the HTTP commands
    pub timer: FastingTimer,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last applied command
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    /// Create a new AppState around `timer`
    pub fn new(port: u16, host: String, timer: FastingTimer) -> Self {
        Self {
            timer,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Run a timer command and record it when it took effect
    pub fn command<F>(&self, action: &str, command: F) -> Result<CommandOutcome, TimerError>
    where
        F: FnOnce(&FastingTimer) -> Result<CommandOutcome, TimerError>,
    {
        let outcome = command(&self.timer)?;

        if outcome == CommandOutcome::Applied {
            let mut last_action = self.last_action.lock()?;
            *last_action = Some((action.to_string(), Utc::now()));
        }

        Ok(outcome)
    }

    pub fn set_mode(&self, mode: FastingMode) -> Result<CommandOutcome, TimerError> {
        self.command(&format!("mode {}", mode), |timer| timer.set_mode(mode))
    }

    pub fn start(&self) -> Result<CommandOutcome, TimerError> {
        self.command("start", FastingTimer::start)
    }

    pub fn pause(&self) -> Result<CommandOutcome, TimerError> {
        self.command("pause", FastingTimer::pause)
    }

    pub fn reset(&self) -> Result<CommandOutcome, TimerError> {
        self.command("reset", FastingTimer::reset)
    }

    pub fn stop(&self) -> Result<CommandOutcome, TimerError> {
        self.command("stop", FastingTimer::stop)
    }

    /// Get current timer snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        self.timer.snapshot()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        self.last_action
            .lock()
            .ok()
            .and_then(|last| last.clone())
            .map(|(action, at)| (Some(action), Some(at)))
            .unwrap_or((None, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::IgnoredReason;

    fn app_state() -> AppState {
        AppState::new(20554, "127.0.0.1".to_string(), FastingTimer::new())
    }

    #[tokio::test]
    async fn applied_commands_are_recorded() {
        let state = app_state();
        assert_eq!(state.get_last_action(), (None, None));

        state.set_mode(FastingMode::SIXTEEN_EIGHT).unwrap();
        let (action, at) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("mode 16:8"));
        assert!(at.is_some());
    }

    #[tokio::test]
    async fn ignored_commands_are_not_recorded() {
        let state = app_state();
        assert_eq!(
            state.start().unwrap(),
            CommandOutcome::Ignored(IgnoredReason::NoModeSelected)
        );
        assert_eq!(state.get_last_action(), (None, None));
    }

    #[test]
    fn fresh_uptime_is_in_seconds() {
        assert!(app_state().get_uptime().ends_with('s'));
    }
}
