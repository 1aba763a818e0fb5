//! Rodio backed cue player

use std::{
    io,
    sync::{mpsc, Mutex},
    thread,
};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::{
    cue_player::{settled, PlaybackStarted},
    CuePlayer, CueSound,
};
use crate::{error::BlinkError, state::PlaybackVolume};

/// Requests handled by the audio thread
enum AudioCommand {
    Play {
        volume: f32,
        reply: oneshot::Sender<Result<(), BlinkError>>,
    },
    SetVolume(f32),
}

/// Plays the cue through the default output device
///
/// rodio's output stream is not `Send`, so a dedicated thread owns the
/// stream and the sink of the clip currently sounding. Callers only queue
/// commands and never wait on the device.
pub struct RodioCuePlayer {
    sound: CueSound,
    commands: Mutex<mpsc::Sender<AudioCommand>>,
}

impl RodioCuePlayer {
    /// Spawn the audio thread for `sound`
    ///
    /// A file sound is not touched here; it is resolved on every cue.
    pub fn new(sound: CueSound) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let thread_sound = sound.clone();

        thread::Builder::new()
            .name("blink-audio".to_string())
            .spawn(move || audio_thread(thread_sound, rx))?;

        info!("Audio thread started for cue sound {}", sound);
        Ok(Self {
            sound,
            commands: Mutex::new(tx),
        })
    }

    pub fn sound(&self) -> &CueSound {
        &self.sound
    }

    fn send(&self, command: AudioCommand) -> Result<(), BlinkError> {
        let commands = self.commands.lock()
            .map_err(|e| BlinkError::playback(format!("audio channel poisoned: {}", e)))?;
        commands.send(command)
            .map_err(|_| BlinkError::playback("audio thread has stopped"))
    }
}

impl CuePlayer for RodioCuePlayer {
    fn play(&self, volume: PlaybackVolume) -> PlaybackStarted {
        let (reply, started) = oneshot::channel();
        let command = AudioCommand::Play {
            volume: volume.level(),
            reply,
        };

        match self.send(command) {
            Ok(()) => started,
            Err(e) => settled(Err(e)),
        }
    }

    fn set_volume(&self, volume: PlaybackVolume) {
        if let Err(e) = self.send(AudioCommand::SetVolume(volume.level())) {
            warn!("Failed to update cue volume: {}", e);
        }
    }
}

/// Audio thread loop, ends when the player is dropped
fn audio_thread(sound: CueSound, rx: mpsc::Receiver<AudioCommand>) {
    let mut output: Option<(OutputStream, OutputStreamHandle)> = None;
    let mut current: Option<Sink> = None;

    for command in rx {
        match command {
            AudioCommand::Play { volume, reply } => {
                let result = play_once(&mut output, &mut current, &sound, volume);
                let _ = reply.send(result);
            }
            AudioCommand::SetVolume(volume) => {
                if let Some(sink) = current.as_ref().filter(|sink| !sink.empty()) {
                    debug!("Updating in-flight cue volume to {:.1}", volume);
                    sink.set_volume(volume);
                }
            }
        }
    }

    debug!("Audio thread exiting");
}

fn play_once(
    output: &mut Option<(OutputStream, OutputStreamHandle)>,
    current: &mut Option<Sink>,
    sound: &CueSound,
    volume: f32,
) -> Result<(), BlinkError> {
    let source = sound.decode()?;

    if output.is_none() {
        let stream = OutputStream::try_default()
            .map_err(|e| BlinkError::playback(format!("no audio output device: {}", e)))?;
        *output = Some(stream);
    }

    let sink = match output.as_ref().map(|(_, handle)| Sink::try_new(handle)) {
        Some(Ok(sink)) => sink,
        Some(Err(e)) => {
            // Reopen the device on the next cue
            *output = None;
            return Err(BlinkError::playback(format!("cannot open audio sink: {}", e)));
        }
        None => return Err(BlinkError::playback("audio output stream unavailable")),
    };

    sink.set_volume(volume);
    sink.append(source);

    // Dropping the previous sink cuts off a clip that is still sounding
    *current = Some(sink);
    Ok(())
}
