//! Timer state structures and snapshot arithmetic

use serde::Serialize;

use super::FastingMode;

/// Whether the countdown loop is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Which window of the day is being counted down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FastingPhase {
    Eating,
    Fasting,
}

impl FastingPhase {
    /// The phase that follows this one on expiry
    pub fn toggled(self) -> Self {
        match self {
            FastingPhase::Eating => FastingPhase::Fasting,
            FastingPhase::Fasting => FastingPhase::Eating,
        }
    }

    /// Duration of this phase under `mode`, in seconds
    pub fn duration_seconds(self, mode: &FastingMode) -> u64 {
        match self {
            FastingPhase::Eating => mode.eat_seconds(),
            FastingPhase::Fasting => mode.fast_seconds(),
        }
    }
}

impl std::fmt::Display for FastingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FastingPhase::Eating => f.write_str("eating"),
            FastingPhase::Fasting => f.write_str("fasting"),
        }
    }
}

/// Complete mutable state of the fasting timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub remaining_seconds: u64,
    pub timer_state: TimerState,
    pub phase: FastingPhase,
    pub mode: Option<FastingMode>,
}

impl TimerSnapshot {
    /// The cleared snapshot: no mode, nothing to count down
    pub fn empty() -> Self {
        Self {
            remaining_seconds: 0,
            timer_state: TimerState::Idle,
            phase: FastingPhase::Eating,
            mode: None,
        }
    }

    /// Start of the eating window for `mode`, not yet running
    pub fn ready(mode: FastingMode) -> Self {
        Self {
            remaining_seconds: mode.eat_seconds(),
            timer_state: TimerState::Idle,
            phase: FastingPhase::Eating,
            mode: Some(mode),
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer_state == TimerState::Running
    }

    /// Apply one tick. Returns true when the tick crossed a phase boundary.
    ///
    /// Reaching zero toggles the phase and reloads the counter with the new
    /// phase's duration in the same step, so zero is never observable while
    /// running.
    pub fn tick(&mut self) -> bool {
        let Some(mode) = self.mode else {
            return false;
        };

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return false;
        }

        self.phase = self.phase.toggled();
        self.remaining_seconds = self.phase.duration_seconds(&mode);
        true
    }

    /// Full duration of the current phase, zero without a mode
    pub fn phase_duration_seconds(&self) -> u64 {
        self.mode
            .map(|mode| self.phase.duration_seconds(&mode))
            .unwrap_or(0)
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.phase_duration_seconds()
            .saturating_sub(self.remaining_seconds)
    }

    /// Fraction of the current phase already elapsed, in `[0.0, 1.0]`
    pub fn progress(&self) -> f64 {
        let total = self.phase_duration_seconds();
        if total == 0 {
            return 0.0;
        }
        self.elapsed_seconds() as f64 / total as f64
    }

    /// Remaining time as `HH:MM:SS`
    pub fn formatted_remaining(&self) -> String {
        let hours = self.remaining_seconds / 3600;
        let minutes = (self.remaining_seconds % 3600) / 60;
        let seconds = self.remaining_seconds % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// What produced a published snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateCause {
    Initial,
    ModeSelected,
    Started,
    Paused,
    Reset,
    Stopped,
    Tick,
    PhaseChanged,
}

/// A snapshot as seen by subscribers, tagged with its cause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerUpdate {
    pub cause: UpdateCause,
    #[serde(flatten)]
    pub snapshot: TimerSnapshot,
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
