//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{BlinkController, BlinkRate, BlinkStatus, BlinkingState, PlaybackVolume};
use crate::services::CuePlayer;

/// Main application state shared by the HTTP routes and signal listeners
#[derive(Debug)]
pub struct AppState {
    /// The reminder itself; every start/stop path goes through this lock
    pub controller: Mutex<BlinkController>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a new AppState with a stopped reminder
    pub fn new(
        port: u16,
        host: String,
        player: Arc<dyn CuePlayer>,
        rate: BlinkRate,
        volume: PlaybackVolume,
    ) -> Self {
        Self {
            controller: Mutex::new(BlinkController::new(player, rate, volume)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Apply an update to the controller, record it as the last action and
    /// return the resulting status
    pub fn update_controller<F>(&self, action: &str, updater: F) -> Result<BlinkStatus, String>
    where
        F: FnOnce(&mut BlinkController),
    {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock blink controller: {}", e))?;

        updater(&mut controller);
        let status = controller.status();
        drop(controller); // Release the lock early

        self.record_action(action);
        Ok(status)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Start the reminder at `rate`, or at the selected rate when `None`
    pub fn start(&self, rate: Option<BlinkRate>) -> Result<BlinkStatus, String> {
        self.update_controller("start", |controller| {
            let rate = rate.unwrap_or_else(|| controller.selected_rate());
            controller.start(rate);
        })
    }

    /// Stop the reminder
    pub fn stop(&self) -> Result<BlinkStatus, String> {
        self.update_controller("stop", |controller| controller.stop())
    }

    /// Flip between running and stopped
    pub fn toggle(&self) -> Result<BlinkStatus, String> {
        self.update_controller("toggle", |controller| {
            let state = controller.toggle();
            info!("Reminder toggled, now {:?}", state);
        })
    }

    /// Select the rate for the next start
    pub fn select_rate(&self, rate: BlinkRate) -> Result<BlinkStatus, String> {
        self.update_controller("rate", |controller| controller.select_rate(rate))
    }

    /// Set the cue volume
    pub fn set_volume(&self, volume: PlaybackVolume) -> Result<BlinkStatus, String> {
        self.update_controller("volume", |controller| controller.set_volume(volume))
    }

    /// Play one cue now, returning whether it sounded
    ///
    /// The controller lock is released before waiting on the audio backend.
    pub async fn play_cue(&self) -> Result<(bool, BlinkStatus), String> {
        let trigger = {
            let controller = self.controller.lock()
                .map_err(|e| format!("Failed to lock blink controller: {}", e))?;
            controller.trigger()
        };

        let played = trigger.fire().await;
        self.record_action("cue");
        Ok((played, self.get_status()?))
    }

    /// Get current controller status
    pub fn get_status(&self) -> Result<BlinkStatus, String> {
        self.controller.lock()
            .map(|controller| controller.status())
            .map_err(|e| format!("Failed to lock blink controller: {}", e))
    }

    /// Get current blinking state
    pub fn get_blinking_state(&self) -> Result<BlinkingState, String> {
        self.get_status().map(|status| status.state)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::BlinkError,
        services::{cue_player::testing::SpyCuePlayer, PlaybackStarted},
    };
    use tokio::sync::oneshot;

    /// Holds every cue until the test releases it
    #[derive(Default)]
    struct PendingPlayer {
        replies: Mutex<Vec<oneshot::Sender<Result<(), BlinkError>>>>,
    }

    impl PendingPlayer {
        fn release(&self) {
            for reply in self.replies.lock().unwrap().drain(..) {
                let _ = reply.send(Ok(()));
            }
        }
    }

    impl CuePlayer for PendingPlayer {
        fn play(&self, _volume: PlaybackVolume) -> PlaybackStarted {
            let (tx, rx) = oneshot::channel();
            self.replies.lock().unwrap().push(tx);
            rx
        }

        fn set_volume(&self, _volume: PlaybackVolume) {}
    }

    fn test_state() -> AppState {
        AppState::new(
            0,
            "127.0.0.1".to_string(),
            Arc::new(SpyCuePlayer::new()),
            BlinkRate::Fifteen,
            PlaybackVolume::MAX,
        )
    }

    #[tokio::test]
    async fn test_actions_are_tracked() {
        let state = test_state();
        assert_eq!(state.get_last_action(), (None, None));

        let status = state.start(Some(BlinkRate::Twenty)).unwrap();
        assert_eq!(status.state, BlinkingState::Running);
        assert_eq!(status.rate, BlinkRate::Twenty);

        let status = state.stop().unwrap();
        assert_eq!(status.state, BlinkingState::Stopped);

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("stop"));
        assert!(time.is_some());
    }

    #[tokio::test]
    async fn test_start_without_rate_uses_selection() {
        let state = test_state();
        state.select_rate(BlinkRate::Twenty).unwrap();

        let status = state.start(None).unwrap();
        assert_eq!(status.active_period_secs, Some(3.0));
        assert_eq!(state.get_blinking_state().unwrap(), BlinkingState::Running);
    }

    #[tokio::test]
    async fn test_preview_cue() {
        let state = test_state();
        let (played, status) = state.play_cue().await.unwrap();
        assert!(played);
        assert_eq!(status.cues.played, 1);
        assert_eq!(state.get_uptime(), "0s");
    }

    #[tokio::test]
    async fn test_pending_cue_leaves_controller_unlocked() {
        let player = Arc::new(PendingPlayer::default());
        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            player.clone(),
            BlinkRate::Fifteen,
            PlaybackVolume::MAX,
        ));

        let cue = tokio::spawn({
            let state = Arc::clone(&state);
            async move { state.play_cue().await }
        });
        while player.replies.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }

        // Audio backend has not answered yet, controls still respond
        assert!(state.controller.try_lock().is_ok());
        let status = state.start(None).unwrap();
        assert_eq!(status.state, BlinkingState::Running);

        player.release();
        let (played, status) = cue.await.unwrap().unwrap();
        assert!(played);
        assert_eq!(status.cues.played, 1);
        state.stop().unwrap();
    }
}
