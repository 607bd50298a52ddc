//! Error types shared by the timer and the HTTP layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("unknown fasting mode: {0}")]
    UnknownMode(String),

    #[error("failed to lock timer state: {0}")]
    StateLock(String),
}

impl<T> From<std::sync::PoisonError<T>> for TimerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        TimerError::StateLock(e.to_string())
    }
}
