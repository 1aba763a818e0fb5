//! Blink reminder controller
//!
//! Owns the selected blink rate, the playback volume, the cue player and at
//! most one live timer handle. Every start/stop path (HTTP routes, Unix
//! signals, shutdown) goes through this type.

use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Duration,
};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{BlinkRate, BlinkingState, CueStats, PlaybackVolume};
use crate::{
    services::CuePlayer,
    tasks::{spawn_blink_timer, CueTrigger, TimerHandle},
};

/// Snapshot of the controller for status reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlinkStatus {
    pub state: BlinkingState,
    pub rate: BlinkRate,
    /// Seconds between cues at the selected rate
    pub interval_secs: f64,
    /// Period of the live timer, if one is installed
    pub active_period_secs: Option<f64>,
    pub volume: PlaybackVolume,
    pub cues: CueStats,
}

pub struct BlinkController {
    selected_rate: BlinkRate,
    player: Arc<dyn CuePlayer>,
    volume_tx: watch::Sender<PlaybackVolume>,
    stats: Arc<Mutex<CueStats>>,
    trigger: CueTrigger,
    timer: Option<TimerHandle>,
}

impl BlinkController {
    /// Create a stopped controller
    pub fn new(player: Arc<dyn CuePlayer>, rate: BlinkRate, volume: PlaybackVolume) -> Self {
        let (volume_tx, volume_rx) = watch::channel(volume);
        let stats = Arc::new(Mutex::new(CueStats::new()));
        let trigger = CueTrigger::new(Arc::clone(&player), volume_rx, Arc::clone(&stats));

        Self {
            selected_rate: rate,
            player,
            volume_tx,
            stats,
            trigger,
            timer: None,
        }
    }

    /// Start cueing at `rate`, replacing any running schedule
    pub fn start(&mut self, rate: BlinkRate) {
        self.cancel_timer();

        self.selected_rate = rate;
        let timer = spawn_blink_timer(rate.interval(), self.trigger.clone());
        self.timer = Some(timer);
        info!("Blink reminder started at {} (every {:.1}s)", rate, rate.interval_secs());
    }

    /// Stop cueing; does nothing when already stopped
    pub fn stop(&mut self) {
        if self.cancel_timer() {
            info!("Blink reminder stopped");
        } else {
            debug!("Stop requested while already stopped");
        }
    }

    /// Start/stop button: flip the state and return the new one
    pub fn toggle(&mut self) -> BlinkingState {
        match self.state() {
            BlinkingState::Running => self.stop(),
            BlinkingState::Stopped => self.start(self.selected_rate),
        }
        self.state()
    }

    /// Pick the rate used by the next start without touching a running timer
    pub fn select_rate(&mut self, rate: BlinkRate) {
        self.selected_rate = rate;
        if self.state().is_running() {
            debug!("Rate {} selected, applies on next start", rate);
        }
    }

    /// Sound one cue now at the current volume
    pub async fn play_cue(&self) -> bool {
        self.trigger.fire().await
    }

    /// Handle for firing cues without holding on to the controller
    pub fn trigger(&self) -> CueTrigger {
        self.trigger.clone()
    }

    /// Change the volume for the clip currently sounding and every later cue
    pub fn set_volume(&self, volume: PlaybackVolume) {
        self.volume_tx.send_replace(volume);
        self.player.set_volume(volume);
        debug!("Cue volume set to {}", volume);
    }

    pub fn state(&self) -> BlinkingState {
        match &self.timer {
            Some(timer) if timer.is_live() => BlinkingState::Running,
            _ => BlinkingState::Stopped,
        }
    }

    pub fn selected_rate(&self) -> BlinkRate {
        self.selected_rate
    }

    pub fn volume(&self) -> PlaybackVolume {
        *self.volume_tx.borrow()
    }

    /// Period of the live timer, if any
    pub fn timer_period(&self) -> Option<Duration> {
        self.timer.as_ref().filter(|t| t.is_live()).map(TimerHandle::period)
    }

    pub fn status(&self) -> BlinkStatus {
        let cues = match self.stats.lock() {
            Ok(stats) => stats.clone(),
            Err(e) => {
                warn!("Failed to lock cue stats: {}", e);
                CueStats::new()
            }
        };

        BlinkStatus {
            state: self.state(),
            rate: self.selected_rate,
            interval_secs: self.selected_rate.interval_secs(),
            active_period_secs: self.timer_period().map(|p| p.as_secs_f64()),
            volume: self.volume(),
            cues,
        }
    }

    /// Drop the live timer, returning whether one was installed
    fn cancel_timer(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                timer.cancel();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for BlinkController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlinkController")
            .field("selected_rate", &self.selected_rate)
            .field("volume", &self.volume())
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
