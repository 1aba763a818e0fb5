//! Blink rate and playback volume settings

use std::{fmt, time::Duration};
use serde::{Deserialize, Serialize};

use crate::error::BlinkError;

/// Target blink frequency in blinks per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BlinkRate {
    #[default]
    Fifteen,
    Twenty,
}

impl BlinkRate {
    pub const ALL: [BlinkRate; 2] = [BlinkRate::Fifteen, BlinkRate::Twenty];

    /// Blinks per minute
    pub fn per_minute(self) -> u32 {
        match self {
            BlinkRate::Fifteen => 15,
            BlinkRate::Twenty => 20,
        }
    }

    /// Seconds between two cues, `60 / rate`
    pub fn interval_secs(self) -> f64 {
        60.0 / f64::from(self.per_minute())
    }

    /// Period of the repeating cue timer
    pub fn interval(self) -> Duration {
        Duration::from_secs_f64(self.interval_secs())
    }
}

impl TryFrom<u32> for BlinkRate {
    type Error = BlinkError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            15 => Ok(BlinkRate::Fifteen),
            20 => Ok(BlinkRate::Twenty),
            other => Err(BlinkError::InvalidRate(other)),
        }
    }
}

impl From<BlinkRate> for u32 {
    fn from(rate: BlinkRate) -> Self {
        rate.per_minute()
    }
}

impl fmt::Display for BlinkRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/min", self.per_minute())
    }
}

/// Cue loudness in `0.0..=1.0`, moved in steps of 0.1 like the volume slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct PlaybackVolume(f32);

impl PlaybackVolume {
    pub const MAX: PlaybackVolume = PlaybackVolume(1.0);
    pub const MUTED: PlaybackVolume = PlaybackVolume(0.0);
    /// Slider positions between silent and full volume
    const STEPS: f32 = 10.0;

    /// Validate a raw level and snap it to the nearest slider step
    pub fn new(level: f32) -> Result<Self, BlinkError> {
        if !(0.0..=1.0).contains(&level) {
            return Err(BlinkError::InvalidVolume(level));
        }
        let snapped = (level * Self::STEPS).round() / Self::STEPS;
        Ok(Self(snapped.clamp(0.0, 1.0)))
    }

    pub fn level(self) -> f32 {
        self.0
    }

    pub fn is_muted(self) -> bool {
        self.0 == 0.0
    }
}

impl Default for PlaybackVolume {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<f32> for PlaybackVolume {
    type Error = BlinkError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlaybackVolume> for f32 {
    fn from(volume: PlaybackVolume) -> Self {
        volume.0
    }
}

impl fmt::Display for PlaybackVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_intervals() {
        assert_eq!(BlinkRate::Fifteen.interval(), Duration::from_secs(4));
        assert_eq!(BlinkRate::Twenty.interval(), Duration::from_secs(3));
        assert_eq!(BlinkRate::default(), BlinkRate::Fifteen);
    }

    #[test]
    fn test_rate_rejects_other_values() {
        assert_eq!(BlinkRate::try_from(20), Ok(BlinkRate::Twenty));
        assert_eq!(BlinkRate::try_from(30), Err(BlinkError::InvalidRate(30)));
        assert!(serde_json::from_str::<BlinkRate>("17").is_err());
        assert_eq!(serde_json::to_string(&BlinkRate::Fifteen).unwrap(), "15");
    }

    #[test]
    fn test_volume_snaps_to_slider_step() {
        assert_eq!(PlaybackVolume::new(0.34).unwrap().level(), 0.3);
        assert_eq!(PlaybackVolume::new(0.96).unwrap().level(), 1.0);
        assert!(PlaybackVolume::new(0.0).unwrap().is_muted());
        assert_eq!(PlaybackVolume::default(), PlaybackVolume::MAX);
    }

    #[test]
    fn test_volume_rejects_out_of_range() {
        assert!(PlaybackVolume::new(1.2).is_err());
        assert!(PlaybackVolume::new(-0.1).is_err());
        assert!(PlaybackVolume::new(f32::NAN).is_err());
        assert!(serde_json::from_str::<PlaybackVolume>("2.0").is_err());
    }
}
