//! Cue player abstraction

use tokio::sync::oneshot;

use crate::{error::BlinkError, state::PlaybackVolume};

/// Resolves once the cue has started sounding or failed to
pub type PlaybackStarted = oneshot::Receiver<Result<(), BlinkError>>;

/// An already settled playback outcome
pub fn settled(result: Result<(), BlinkError>) -> PlaybackStarted {
    let (tx, rx) = oneshot::channel();
    let _ = tx.send(result);
    rx
}

/// Something that can sound the blink cue
///
/// Implementations keep at most one clip alive: a new cue replaces whatever
/// is still sounding instead of queueing behind it.
pub trait CuePlayer: Send + Sync + 'static {
    /// Queue the cue once at `volume` without blocking the caller
    fn play(&self, volume: PlaybackVolume) -> PlaybackStarted;

    /// Change the volume of the clip currently sounding, if any
    fn set_volume(&self, volume: PlaybackVolume);
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every call instead of producing sound
    #[derive(Debug, Default)]
    pub struct SpyCuePlayer {
        missing_asset: bool,
        plays: Mutex<Vec<PlaybackVolume>>,
        in_flight: Mutex<Option<PlaybackVolume>>,
    }

    impl SpyCuePlayer {
        pub fn new() -> Self {
            Self::default()
        }

        /// A player whose asset never resolves
        pub fn missing_asset() -> Self {
            Self {
                missing_asset: true,
                ..Self::default()
            }
        }

        /// Number of play attempts, successful or not
        pub fn attempts(&self) -> usize {
            self.plays.lock().unwrap().len()
        }

        pub fn volumes(&self) -> Vec<PlaybackVolume> {
            self.plays.lock().unwrap().clone()
        }

        /// Volume of the clip that would still be sounding
        pub fn in_flight_volume(&self) -> Option<PlaybackVolume> {
            *self.in_flight.lock().unwrap()
        }
    }

    impl CuePlayer for SpyCuePlayer {
        fn play(&self, volume: PlaybackVolume) -> PlaybackStarted {
            self.plays.lock().unwrap().push(volume);
            if self.missing_asset {
                return settled(Err(BlinkError::playback("blink_sound.wav not found")));
            }
            *self.in_flight.lock().unwrap() = Some(volume);
            settled(Ok(()))
        }

        fn set_volume(&self, volume: PlaybackVolume) {
            if let Some(current) = self.in_flight.lock().unwrap().as_mut() {
                *current = volume;
            }
        }
    }
}
