//! External service integration module
//!
//! This module contains functions that talk to the desktop environment.

pub mod notifications;

// Re-export main functions
pub use notifications::*;
