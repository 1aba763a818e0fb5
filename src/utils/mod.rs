//! Utility functions module
//!
//! This module contains process signal handling used by the binary.

pub mod signals;

// Re-export main functions
pub use signals::{listen_for_control_signals, shutdown_signal, ControlSignal, ControlSignals};
