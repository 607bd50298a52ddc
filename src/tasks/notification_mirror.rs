//! Mirrors timer snapshots into log lines and desktop notifications

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    services::show_desktop_notification,
    state::{FastingPhase, TimerUpdate, UpdateCause},
};

/// Something worth telling the user about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    ModeSelected(&'static str),
    Started { phase: FastingPhase },
    Paused { remaining: String },
    PhaseChanged { phase: FastingPhase, duration: String },
    Reset,
    Cleared,
}

impl TimerEvent {
    /// Notification title and body
    pub fn notification(&self) -> (String, String) {
        match self {
            TimerEvent::ModeSelected(name) => (
                "Fasting mode selected".to_string(),
                format!("{} schedule ready", name),
            ),
            TimerEvent::Started { phase } => (
                "Fasting timer started".to_string(),
                format!("Counting down the {} window", phase),
            ),
            TimerEvent::Paused { remaining } => (
                "Fasting timer paused".to_string(),
                format!("{} left in this window", remaining),
            ),
            TimerEvent::PhaseChanged { phase: FastingPhase::Fasting, duration } => (
                "Time to fast".to_string(),
                format!("Eating window closed, fasting for {}", duration),
            ),
            TimerEvent::PhaseChanged { phase: FastingPhase::Eating, duration } => (
                "Time to eat".to_string(),
                format!("Fast complete, eating window open for {}", duration),
            ),
            TimerEvent::Reset => (
                "Fasting timer reset".to_string(),
                "Back to the start of the eating window".to_string(),
            ),
            TimerEvent::Cleared => (
                "Fasting timer stopped".to_string(),
                "No countdown active".to_string(),
            ),
        }
    }
}

/// Map a published update to a user-facing event. Plain ticks produce none.
pub fn detect_event(update: &TimerUpdate) -> Option<TimerEvent> {
    let snapshot = &update.snapshot;

    match update.cause {
        UpdateCause::Initial | UpdateCause::Tick => None,
        UpdateCause::ModeSelected => snapshot
            .mode
            .map(|mode| TimerEvent::ModeSelected(mode.display_name)),
        UpdateCause::Started => Some(TimerEvent::Started { phase: snapshot.phase }),
        UpdateCause::Paused => Some(TimerEvent::Paused {
            remaining: snapshot.formatted_remaining(),
        }),
        UpdateCause::PhaseChanged => Some(TimerEvent::PhaseChanged {
            phase: snapshot.phase,
            duration: snapshot.formatted_remaining(),
        }),
        UpdateCause::Reset => Some(TimerEvent::Reset),
        UpdateCause::Stopped => Some(TimerEvent::Cleared),
    }
}

/// Background task that watches the timer and reports notable changes.
/// Desktop notifications are only shown for phase changes, and only when enabled.
pub async fn notification_mirror_task(
    mut updates: watch::Receiver<TimerUpdate>,
    desktop_notifications: bool,
) {
    info!("Starting notification mirror task");

    while updates.changed().await.is_ok() {
        let update = updates.borrow_and_update().clone();

        if let Some(event) = detect_event(&update) {
            let (summary, body) = event.notification();
            info!("{}: {}", summary, body);

            if desktop_notifications && matches!(event, TimerEvent::PhaseChanged { .. }) {
                if let Err(e) = show_desktop_notification(summary, body).await {
                    warn!("{}", e);
                }
            }
        }
    }

    debug!("Timer dropped, notification mirror exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FastingMode, TimerSnapshot, TimerState};

    fn update(cause: UpdateCause, snapshot: TimerSnapshot) -> TimerUpdate {
        TimerUpdate { cause, snapshot }
    }

    fn running(mode: FastingMode) -> TimerSnapshot {
        let mut snapshot = TimerSnapshot::ready(mode);
        snapshot.timer_state = TimerState::Running;
        snapshot
    }

    #[test]
    fn ticks_are_silent() {
        let mut snapshot = running(FastingMode::SIXTEEN_EIGHT);
        snapshot.tick();

        assert_eq!(detect_event(&update(UpdateCause::Tick, snapshot)), None);
    }

    #[test]
    fn phase_boundary_is_reported() {
        let mut snapshot = running(FastingMode::SIXTEEN_EIGHT);
        snapshot.remaining_seconds = 1;
        assert!(snapshot.tick());

        assert_eq!(
            detect_event(&update(UpdateCause::PhaseChanged, snapshot)),
            Some(TimerEvent::PhaseChanged {
                phase: FastingPhase::Fasting,
                duration: "16:00:00".to_string(),
            })
        );
    }

    #[test]
    fn start_and_pause_are_reported() {
        let started = running(FastingMode::EIGHTEEN_SIX);
        let mut paused = started.clone();
        paused.timer_state = TimerState::Paused;

        assert_eq!(
            detect_event(&update(UpdateCause::Started, started)),
            Some(TimerEvent::Started { phase: FastingPhase::Eating })
        );
        assert_eq!(
            detect_event(&update(UpdateCause::Paused, paused)),
            Some(TimerEvent::Paused { remaining: "06:00:00".to_string() })
        );
    }

    #[test]
    fn reset_is_reported_as_reset() {
        let snapshot = TimerSnapshot::ready(FastingMode::SIXTEEN_EIGHT);
        assert_eq!(detect_event(&update(UpdateCause::Reset, snapshot)), Some(TimerEvent::Reset));
    }

    #[test]
    fn reselecting_the_same_mode_is_a_mode_selection() {
        let snapshot = TimerSnapshot::ready(FastingMode::SIXTEEN_EIGHT);
        assert_eq!(
            detect_event(&update(UpdateCause::ModeSelected, snapshot)),
            Some(TimerEvent::ModeSelected("16:8"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn same_mode_while_running_is_reported_as_selection() {
        let timer = crate::state::FastingTimer::new();
        let mut updates = timer.subscribe();
        timer.set_mode(FastingMode::TWENTY_FOUR).unwrap();
        timer.start().unwrap();
        timer.set_mode(FastingMode::TWENTY_FOUR).unwrap();

        updates.changed().await.unwrap();
        let latest = updates.borrow_and_update().clone();
        assert_eq!(detect_event(&latest), Some(TimerEvent::ModeSelected("20:4")));
    }

    #[test]
    fn clearing_is_reported() {
        assert_eq!(
            detect_event(&update(UpdateCause::Stopped, TimerSnapshot::empty())),
            Some(TimerEvent::Cleared)
        );
        assert_eq!(detect_event(&update(UpdateCause::Initial, TimerSnapshot::empty())), None);
    }

    #[test]
    fn fasting_notification_text() {
        let event = TimerEvent::PhaseChanged {
            phase: FastingPhase::Fasting,
            duration: "16:00:00".to_string(),
        };
        let (summary, body) = event.notification();
        assert_eq!(summary, "Time to fast");
        assert!(body.contains("16:00:00"));
    }
}
