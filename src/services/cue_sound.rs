//! Cue sound resolution

use std::{
    fmt,
    fs::File,
    io::{BufReader, Cursor},
    path::PathBuf,
};
use rodio::{Decoder, Source};

use crate::error::BlinkError;

/// Short chime compiled into the binary
pub const BUNDLED_CUE: &[u8] = include_bytes!("../../assets/blink_sound.wav");

/// A decoded cue ready to hand to a sink
pub type CueSource = Box<dyn Source<Item = i16> + Send>;

/// Where the cue is loaded from on every tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CueSound {
    /// The chime shipped with the binary
    #[default]
    Bundled,
    /// A user supplied file, resolved at playback time
    File(PathBuf),
}

impl CueSound {
    /// The bundled chime unless a file overrides it
    pub fn from_override(path: Option<PathBuf>) -> Self {
        path.map_or(CueSound::Bundled, CueSound::File)
    }

    /// Check if the sound can currently be found
    pub fn is_present(&self) -> bool {
        match self {
            CueSound::Bundled => true,
            CueSound::File(path) => path.is_file(),
        }
    }

    /// Load and decode the sound
    pub fn decode(&self) -> Result<CueSource, BlinkError> {
        match self {
            CueSound::Bundled => {
                let decoder = Decoder::new(Cursor::new(BUNDLED_CUE))
                    .map_err(|e| BlinkError::playback(format!("cannot decode bundled cue: {}", e)))?;
                Ok(Box::new(decoder))
            }
            CueSound::File(path) => {
                let file = File::open(path).map_err(|e| {
                    BlinkError::playback(format!("cannot open {}: {}", path.display(), e))
                })?;
                let decoder = Decoder::new(BufReader::new(file)).map_err(|e| {
                    BlinkError::playback(format!("cannot decode {}: {}", path.display(), e))
                })?;
                Ok(Box::new(decoder))
            }
        }
    }
}

impl fmt::Display for CueSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueSound::Bundled => write!(f, "bundled chime"),
            CueSound::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_cue_is_playable() {
        let source = CueSound::default().decode().unwrap();
        assert_eq!(source.channels(), 1);
        assert_eq!(source.sample_rate(), 22050);
        assert!(source.count() > 0);
    }

    #[test]
    fn test_file_override() {
        assert_eq!(CueSound::from_override(None), CueSound::Bundled);

        let sound = CueSound::from_override(Some(PathBuf::from("no/such/cue.wav")));
        assert!(!sound.is_present());
        assert!(matches!(sound.decode(), Err(BlinkError::PlaybackUnavailable { .. })));
    }
}
