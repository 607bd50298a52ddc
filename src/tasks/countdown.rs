//! Countdown background task

use std::sync::Arc;
use tokio::time::Interval;
use tracing::{debug, error, info, trace};

use crate::state::{fasting_timer::Shared, UpdateCause};

/// Drive the fasting timer while it stays in the Running state of `generation`.
///
/// Runs as one loop across phase boundaries. Exits as soon as the timer has
/// moved on to another generation (paused, reset, stopped or restarted).
pub(crate) async fn countdown_task(shared: Arc<Shared>, generation: u64, mut ticks: Interval) {
    debug!("Countdown {} started", generation);

    loop {
        ticks.tick().await;

        let transition = {
            let mut guarded = match shared.guarded.lock() {
                Ok(guarded) => guarded,
                Err(e) => {
                    error!("Countdown {} stopping, state lock poisoned: {}", generation, e);
                    break;
                }
            };

            if guarded.generation != generation || !guarded.snapshot.is_running() {
                None
            } else {
                let phase_changed = guarded.snapshot.tick();
                let cause = if phase_changed { UpdateCause::PhaseChanged } else { UpdateCause::Tick };
                shared.publish(&guarded, cause);
                Some((phase_changed, guarded.snapshot.clone()))
            }
        };

        match transition {
            None => {
                debug!("Countdown {} superseded, exiting", generation);
                break;
            }
            Some((true, snapshot)) => {
                info!(
                    "Phase window expired, now {} for {}",
                    snapshot.phase,
                    snapshot.formatted_remaining()
                );
            }
            Some((false, snapshot)) => {
                trace!("Tick: {}s remaining", snapshot.remaining_seconds);
            }
        }
    }
}
