//! Error types for the blink reminder

use thiserror::Error;

/// Errors raised by the reminder and its audio backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlinkError {
    /// The cue asset could not be resolved or the audio engine refused to play it
    #[error("playback unavailable: {reason}")]
    PlaybackUnavailable { reason: String },

    #[error("unsupported blink rate {0}, expected 15 or 20")]
    InvalidRate(u32),

    #[error("volume {0} is outside 0.0..=1.0")]
    InvalidVolume(f32),
}

impl BlinkError {
    pub fn playback(reason: impl Into<String>) -> Self {
        Self::PlaybackUnavailable {
            reason: reason.into(),
        }
    }
}
