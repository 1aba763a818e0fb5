//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    error::BlinkError,
    services::CueSound,
    state::{BlinkRate, PlaybackVolume},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "blink-time")]
#[command(about = "A blink reminder that plays an audible cue at a steady blink rate")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Blinks per minute (15 or 20)
    #[arg(short, long, default_value = "15", value_parser = parse_rate)]
    pub rate: BlinkRate,

    /// Cue volume between 0.0 and 1.0
    #[arg(long, default_value = "1.0", value_parser = parse_volume)]
    pub volume: PlaybackVolume,

    /// Sound file to play instead of the bundled chime
    #[arg(short, long)]
    pub sound: Option<PathBuf>,

    /// Start blinking as soon as the server is up
    #[arg(long)]
    pub autostart: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Cue sound to play, the bundled chime unless overridden
    pub fn cue_sound(&self) -> CueSound {
        CueSound::from_override(self.sound.clone())
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

fn parse_rate(value: &str) -> Result<BlinkRate, String> {
    let per_minute: u32 = value.parse().map_err(|e| format!("{}", e))?;
    BlinkRate::try_from(per_minute).map_err(|e: BlinkError| e.to_string())
}

fn parse_volume(value: &str) -> Result<PlaybackVolume, String> {
    let level: f32 = value.parse().map_err(|e| format!("{}", e))?;
    PlaybackVolume::new(level).map_err(|e| e.to_string())
}
