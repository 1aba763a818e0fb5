//! Repeating blink timer background task

use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    error::BlinkError,
    services::CuePlayer,
    state::{CueStats, PlaybackVolume},
};

/// Everything needed to sound one cue at the current volume
#[derive(Clone)]
pub struct CueTrigger {
    player: Arc<dyn CuePlayer>,
    volume: watch::Receiver<PlaybackVolume>,
    stats: Arc<Mutex<CueStats>>,
}

impl CueTrigger {
    pub fn new(
        player: Arc<dyn CuePlayer>,
        volume: watch::Receiver<PlaybackVolume>,
        stats: Arc<Mutex<CueStats>>,
    ) -> Self {
        Self { player, volume, stats }
    }

    /// Play one cue, returning whether it reached the audio device
    ///
    /// Playback failures are logged and counted, never propagated. The
    /// player only queues the cue, so awaiting here leaves the runtime free.
    pub async fn fire(&self) -> bool {
        match self.try_fire().await {
            Ok(()) => {
                self.record(|stats| stats.record_played());
                true
            }
            Err(e) => {
                warn!("Failed to play blink cue: {}", e);
                self.record(|stats| stats.record_failed(e.to_string()));
                false
            }
        }
    }

    async fn try_fire(&self) -> Result<(), BlinkError> {
        let volume = *self.volume.borrow();
        debug!("Playing blink cue at volume {}", volume);
        self.player.play(volume).await
            .map_err(|_| BlinkError::playback("audio backend dropped the cue"))?
    }

    fn record<F>(&self, update: F)
    where
        F: FnOnce(&mut CueStats),
    {
        match self.stats.lock() {
            Ok(mut stats) => update(&mut stats),
            Err(e) => warn!("Failed to lock cue stats: {}", e),
        }
    }
}

impl fmt::Debug for CueTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CueTrigger")
            .field("volume", &*self.volume.borrow())
            .finish_non_exhaustive()
    }
}

/// Live handle to a repeating cue schedule
///
/// Dropping the handle cancels the schedule.
#[derive(Debug)]
pub struct TimerHandle {
    period: Duration,
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Period between two cues
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Check if the schedule is still installed
    pub fn is_live(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel the schedule
    pub fn cancel(self) {
        debug!("Cancelling blink timer ({:?} period)", self.period);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Schedule `trigger` every `period`, first firing one period from now
///
/// Must be called from within a tokio runtime.
pub fn spawn_blink_timer(period: Duration, trigger: CueTrigger) -> TimerHandle {
    let task = tokio::spawn(blink_timer_task(period, trigger));
    TimerHandle { period, task }
}

/// Background task that sounds a cue on every timer tick
async fn blink_timer_task(period: Duration, trigger: CueTrigger) {
    info!("Starting blink timer with {:.1}s period", period.as_secs_f64());

    let mut interval = interval_at(Instant::now() + period, period);
    // A stalled runtime skips cues instead of bursting to catch up
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        trigger.fire().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cue_player::testing::SpyCuePlayer;

    fn trigger_for(
        player: Arc<SpyCuePlayer>,
    ) -> (CueTrigger, watch::Sender<PlaybackVolume>, Arc<Mutex<CueStats>>) {
        let (volume_tx, volume_rx) = watch::channel(PlaybackVolume::default());
        let stats = Arc::new(Mutex::new(CueStats::new()));
        let trigger = CueTrigger::new(player, volume_rx, Arc::clone(&stats));
        (trigger, volume_tx, stats)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_per_period() {
        let player = Arc::new(SpyCuePlayer::new());
        let (trigger, _volume_tx, _stats) = trigger_for(Arc::clone(&player));

        let handle = spawn_blink_timer(Duration::from_secs(3), trigger);
        assert_eq!(handle.period(), Duration::from_secs(3));

        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert_eq!(player.attempts(), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(player.attempts(), 1);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(player.attempts(), 3);
        assert!(handle.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_schedule() {
        let player = Arc::new(SpyCuePlayer::new());
        let (trigger, _volume_tx, _stats) = trigger_for(Arc::clone(&player));

        let handle = spawn_blink_timer(Duration::from_secs(4), trigger);
        tokio::time::sleep(Duration::from_millis(4100)).await;
        handle.cancel();

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(player.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cue_keeps_timer_running() {
        let player = Arc::new(SpyCuePlayer::missing_asset());
        let (trigger, _volume_tx, stats) = trigger_for(Arc::clone(&player));

        let handle = spawn_blink_timer(Duration::from_secs(4), trigger);
        tokio::time::sleep(Duration::from_millis(12100)).await;

        assert_eq!(player.attempts(), 3);
        assert!(handle.is_live());
        let stats = stats.lock().unwrap().clone();
        assert_eq!(stats.failed, 3);
        assert_eq!(stats.played, 0);
    }

    #[tokio::test]
    async fn test_fire_uses_current_volume() {
        let player = Arc::new(SpyCuePlayer::new());
        let (trigger, volume_tx, _stats) = trigger_for(Arc::clone(&player));

        assert!(trigger.fire().await);
        volume_tx.send_replace(PlaybackVolume::new(0.4).unwrap());
        assert!(trigger.fire().await);

        assert_eq!(
            player.volumes(),
            vec![PlaybackVolume::MAX, PlaybackVolume::new(0.4).unwrap()]
        );
    }

    #[tokio::test]
    async fn test_dropped_reply_counts_as_failure() {
        struct SilentPlayer;

        impl CuePlayer for SilentPlayer {
            fn play(&self, _volume: PlaybackVolume) -> crate::services::PlaybackStarted {
                // Reply sender dropped without an answer
                tokio::sync::oneshot::channel().1
            }

            fn set_volume(&self, _volume: PlaybackVolume) {}
        }

        let (_volume_tx, volume_rx) = watch::channel(PlaybackVolume::default());
        let stats = Arc::new(Mutex::new(CueStats::new()));
        let trigger = CueTrigger::new(Arc::new(SilentPlayer), volume_rx, Arc::clone(&stats));

        assert!(!trigger.fire().await);
        assert_eq!(stats.lock().unwrap().failed, 1);
    }
}
