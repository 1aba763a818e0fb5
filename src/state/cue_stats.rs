//! Counters describing cue playback since startup

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cue playback counters, reported through status only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueStats {
    /// Every cue the timer or a preview tried to play
    pub attempted: u64,
    pub played: u64,
    /// Cues skipped because playback was unavailable
    pub failed: u64,
    pub last_played_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl CueStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cue that reached the audio device
    pub fn record_played(&mut self) {
        self.attempted += 1;
        self.played += 1;
        self.last_played_at = Some(Utc::now());
    }

    /// Record a skipped cue and remember why
    pub fn record_failed(&mut self, reason: String) {
        self.attempted += 1;
        self.failed += 1;
        self.last_error = Some(reason);
    }
}
