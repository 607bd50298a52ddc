//! Desktop notifications for timer events

use notify_rust::{Notification, Urgency};
use tracing::debug;

/// Show a desktop notification. Blocks on the notification daemon, so it runs
/// on the blocking pool.
pub async fn show_desktop_notification(summary: String, body: String) -> Result<(), String> {
    debug!("Showing desktop notification: {}", summary);

    tokio::task::spawn_blocking(move || {
        Notification::new()
            .summary(&summary)
            .body(&body)
            .appname("fasting-timer")
            .icon("alarm-clock")
            .urgency(Urgency::Normal)
            .show()
            .map(|_| ())
            .map_err(|e| format!("Failed to show notification: {}", e))
    })
    .await
    .map_err(|e| format!("Notification task failed: {}", e))?
}
