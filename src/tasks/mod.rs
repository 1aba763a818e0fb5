//! Background tasks module
//!
//! This module contains the repeating blink timer that runs alongside the
//! HTTP server.

pub mod blink_timer;

// Re-export main types
pub use blink_timer::{spawn_blink_timer, CueTrigger, TimerHandle};
