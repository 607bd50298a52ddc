//! Background tasks module
//!
//! This module contains the countdown loop that drives the timer and the
//! observer that mirrors its state into notifications.

pub mod countdown;
pub mod notification_mirror;

// Re-export main functions
pub(crate) use countdown::countdown_task;
pub use notification_mirror::notification_mirror_task;
