//! Audio services module
//!
//! This module contains the cue player seam used by the reminder and the
//! rodio backend that drives the real audio device.

pub mod cue_player;
pub mod cue_sound;
pub mod rodio_player;

// Re-export main types
pub use cue_player::{CuePlayer, PlaybackStarted};
pub use cue_sound::CueSound;
pub use rodio_player::RodioCuePlayer;
