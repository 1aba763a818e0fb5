//! Signal handling for graceful shutdown and external start/stop

use std::{io, sync::Arc};
use futures::stream::StreamExt;
use signal_hook::consts::{SIGINT, SIGTERM, SIGUSR1, SIGUSR2};
use signal_hook_tokio::{Handle, Signals};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::state::AppState;

/// Start/stop requests arriving from outside the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Start,
    Stop,
}

impl ControlSignal {
    /// SIGUSR1 starts the reminder, SIGUSR2 stops it
    pub fn from_raw(signal: i32) -> Option<Self> {
        match signal {
            SIGUSR1 => Some(ControlSignal::Start),
            SIGUSR2 => Some(ControlSignal::Stop),
            _ => None,
        }
    }

    /// Forward the request to the reminder
    pub fn apply(self, state: &AppState) -> Result<(), String> {
        let blink = match self {
            ControlSignal::Start => state.start(None)?,
            ControlSignal::Stop => state.stop()?,
        };
        info!("{:?} signal handled, reminder is {:?}", self, blink.state);
        Ok(())
    }
}

/// Registration of the start/stop signal listener
///
/// Signals are only delivered to the reminder until [`ControlSignals::close`].
pub struct ControlSignals {
    handle: Handle,
    task: JoinHandle<()>,
}

impl ControlSignals {
    /// Unregister the listener and wait for it to finish
    pub async fn close(self) {
        self.handle.close();
        if let Err(e) = self.task.await {
            warn!("Control signal listener ended abnormally: {}", e);
        }
        info!("Control signal listener closed");
    }
}

/// Listen for SIGUSR1/SIGUSR2 and drive the reminder with them
pub fn listen_for_control_signals(state: Arc<AppState>) -> io::Result<ControlSignals> {
    let mut signals = Signals::new([SIGUSR1, SIGUSR2])?;
    let handle = signals.handle();

    let task = tokio::spawn(async move {
        while let Some(signal) = signals.next().await {
            let Some(control) = ControlSignal::from_raw(signal) else {
                continue;
            };
            if let Err(e) = control.apply(&state) {
                warn!("Failed to handle {:?} signal: {}", control, e);
            }
        }
    });

    info!("Listening for SIGUSR1 (start) and SIGUSR2 (stop)");
    Ok(ControlSignals { handle, task })
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
pub async fn shutdown_signal() -> io::Result<()> {
    let mut signals = Signals::new([SIGTERM, SIGINT])?;

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::cue_player::testing::SpyCuePlayer,
        state::{BlinkRate, BlinkingState, PlaybackVolume},
    };

    #[test]
    fn test_signal_mapping() {
        assert_eq!(ControlSignal::from_raw(SIGUSR1), Some(ControlSignal::Start));
        assert_eq!(ControlSignal::from_raw(SIGUSR2), Some(ControlSignal::Stop));
        assert_eq!(ControlSignal::from_raw(SIGTERM), None);
    }

    #[tokio::test]
    async fn test_signals_drive_reminder() {
        let state = AppState::new(
            0,
            "127.0.0.1".to_string(),
            Arc::new(SpyCuePlayer::new()),
            BlinkRate::Twenty,
            PlaybackVolume::MAX,
        );

        ControlSignal::Start.apply(&state).unwrap();
        let status = state.get_status().unwrap();
        assert_eq!(status.state, BlinkingState::Running);
        assert_eq!(status.active_period_secs, Some(3.0));

        ControlSignal::Stop.apply(&state).unwrap();
        assert_eq!(state.get_blinking_state().unwrap(), BlinkingState::Stopped);

        // Stop while stopped is harmless
        ControlSignal::Stop.apply(&state).unwrap();
    }
}
