//! Fasting timer state machine
//!
//! ```text
//!            start()               pause()
//!   Idle ─────────────► Running ─────────────► Paused
//!    ▲                   │  ▲                    │
//!    │  reset()/stop()   │  └──── start() ───────┘
//!    └───────────────────┘
//! ```
//!
//! While Running, a single countdown task removes one second per tick. When
//! the counter reaches zero the phase flips between eating and fasting and
//! the counter is reloaded with the new phase's duration, without leaving
//! Running. `set_mode`, `reset` and `stop` are accepted from every state.
//!
//! Lock order is state, then countdown handle. The countdown task itself only
//! takes the state lock.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use serde::Serialize;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use super::{FastingMode, TimerSnapshot, TimerState, TimerUpdate, UpdateCause};
use crate::{error::TimerError, tasks::countdown_task};

/// Length of one tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Result of a timer command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied,
    Ignored(IgnoredReason),
}

/// Why a command left the timer untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoredReason {
    NoModeSelected,
    AlreadyRunning,
    NotRunning,
}

impl std::fmt::Display for IgnoredReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoredReason::NoModeSelected => f.write_str("no fasting mode selected"),
            IgnoredReason::AlreadyRunning => f.write_str("timer is already running"),
            IgnoredReason::NotRunning => f.write_str("timer is not running"),
        }
    }
}

/// Snapshot plus the countdown generation it belongs to
#[derive(Debug)]
pub(crate) struct Guarded {
    pub snapshot: TimerSnapshot,
    /// Bumped whenever a countdown starts or is cancelled. A countdown task
    /// only applies ticks while this still matches the value it was spawned with.
    pub generation: u64,
}

/// State shared between the timer and its countdown task
#[derive(Debug)]
pub(crate) struct Shared {
    pub guarded: Mutex<Guarded>,
    pub updates_tx: watch::Sender<TimerUpdate>,
}

impl Shared {
    /// Mirror the snapshot to watchers. Called with the state lock held so
    /// watchers observe updates in the order they were applied.
    pub fn publish(&self, guarded: &Guarded, cause: UpdateCause) {
        self.updates_tx.send_replace(TimerUpdate {
            cause,
            snapshot: guarded.snapshot.clone(),
        });
    }
}

/// Owned fasting timer. Each instance is independent.
#[derive(Debug)]
pub struct FastingTimer {
    shared: Arc<Shared>,
    countdown: Mutex<Option<JoinHandle<()>>>,
    tick_period: Duration,
}

impl FastingTimer {
    /// Create an idle timer with no mode selected
    pub fn new() -> Self {
        Self::with_tick_period(TICK_PERIOD)
    }

    /// Create a timer whose ticks are `tick_period` apart. A zero period
    /// falls back to [`TICK_PERIOD`].
    pub(crate) fn with_tick_period(tick_period: Duration) -> Self {
        let tick_period = if tick_period.is_zero() {
            warn!("Zero tick period requested, using {:?}", TICK_PERIOD);
            TICK_PERIOD
        } else {
            tick_period
        };

        let (updates_tx, _) = watch::channel(TimerUpdate {
            cause: UpdateCause::Initial,
            snapshot: TimerSnapshot::empty(),
        });

        Self {
            shared: Arc::new(Shared {
                guarded: Mutex::new(Guarded {
                    snapshot: TimerSnapshot::empty(),
                    generation: 0,
                }),
                updates_tx,
            }),
            countdown: Mutex::new(None),
            tick_period,
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        let guarded = self.shared.guarded.lock()?;
        Ok(guarded.snapshot.clone())
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<TimerUpdate> {
        self.shared.updates_tx.subscribe()
    }

    /// Select a mode and rewind to the start of its eating window
    pub fn set_mode(&self, mode: FastingMode) -> Result<CommandOutcome, TimerError> {
        self.replace_snapshot(UpdateCause::ModeSelected, |_| TimerSnapshot::ready(mode))?;
        info!("Fasting mode set to {}, eating window of {}h", mode, mode.eat_hours);
        Ok(CommandOutcome::Applied)
    }

    /// Begin or resume the countdown
    pub fn start(&self) -> Result<CommandOutcome, TimerError> {
        let mut guarded = self.shared.guarded.lock()?;

        if guarded.snapshot.mode.is_none() {
            return Ok(ignored("start", IgnoredReason::NoModeSelected));
        }
        if guarded.snapshot.is_running() {
            return Ok(ignored("start", IgnoredReason::AlreadyRunning));
        }

        guarded.snapshot.timer_state = TimerState::Running;
        guarded.generation += 1;

        // The new handle is stored before the state lock is released, so no
        // concurrent command can slip between the transition and the spawn.
        let mut ticks = interval_at(Instant::now() + self.tick_period, self.tick_period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Burst);
        let handle = tokio::spawn(countdown_task(
            Arc::clone(&self.shared),
            guarded.generation,
            ticks,
        ));
        self.replace_countdown(Some(handle))?;
        self.shared.publish(&guarded, UpdateCause::Started);

        info!(
            "Timer started in {} phase with {}s remaining",
            guarded.snapshot.phase, guarded.snapshot.remaining_seconds
        );
        Ok(CommandOutcome::Applied)
    }

    /// Suspend the countdown, keeping the remaining time
    pub fn pause(&self) -> Result<CommandOutcome, TimerError> {
        let mut guarded = self.shared.guarded.lock()?;

        if !guarded.snapshot.is_running() {
            return Ok(ignored("pause", IgnoredReason::NotRunning));
        }

        guarded.snapshot.timer_state = TimerState::Paused;
        guarded.generation += 1;
        self.replace_countdown(None)?;
        self.shared.publish(&guarded, UpdateCause::Paused);

        info!("Timer paused with {}s remaining", guarded.snapshot.remaining_seconds);
        Ok(CommandOutcome::Applied)
    }

    /// Return to the start of the eating window and stop counting
    pub fn reset(&self) -> Result<CommandOutcome, TimerError> {
        self.replace_snapshot(UpdateCause::Reset, |current| {
            current.mode.map(TimerSnapshot::ready).unwrap_or_default()
        })?;
        info!("Timer reset");
        Ok(CommandOutcome::Applied)
    }

    /// Tear everything down, clearing the selected mode
    pub fn stop(&self) -> Result<CommandOutcome, TimerError> {
        self.replace_snapshot(UpdateCause::Stopped, |_| TimerSnapshot::empty())?;
        info!("Timer stopped");
        Ok(CommandOutcome::Applied)
    }

    /// Swap in an idle snapshot derived from the current one, cancelling any countdown
    fn replace_snapshot<F>(&self, cause: UpdateCause, next: F) -> Result<(), TimerError>
    where
        F: FnOnce(&TimerSnapshot) -> TimerSnapshot,
    {
        let mut guarded = self.shared.guarded.lock()?;
        guarded.snapshot = next(&guarded.snapshot);
        guarded.generation += 1;
        self.replace_countdown(None)?;
        self.shared.publish(&guarded, cause);
        Ok(())
    }

    /// Abort the current countdown task, if any, and keep `next` in its place.
    /// Callers hold the state lock.
    fn replace_countdown(&self, next: Option<JoinHandle<()>>) -> Result<(), TimerError> {
        let mut countdown = self.countdown.lock()?;
        if let Some(previous) = countdown.take() {
            previous.abort();
        }
        *countdown = next;
        Ok(())
    }

    /// Whether a countdown task is currently alive
    #[cfg(test)]
    fn has_live_countdown(&self) -> bool {
        self.countdown
            .lock()
            .map(|countdown| countdown.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }
}

impl Default for FastingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FastingTimer {
    fn drop(&mut self) {
        match self.countdown.get_mut() {
            Ok(countdown) => {
                if let Some(handle) = countdown.take() {
                    handle.abort();
                }
            }
            Err(e) => warn!("Countdown handle lock poisoned on drop: {}", e),
        }
    }
}

fn ignored(command: &str, reason: IgnoredReason) -> CommandOutcome {
    debug!("Ignoring {}: {}", command, reason);
    CommandOutcome::Ignored(reason)
}
