//! Audio error types.

use std::path::PathBuf;

/// Errors that can occur while opening or playing a custom alert sound.
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// The sound file could not be read.
    #[error("Failed to read sound file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The sound file is not in a supported audio format.
    #[error("Failed to decode sound file {path}: {source}")]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },

    /// No audio output device is available.
    #[error("No audio output device available")]
    NoOutputDevice,

    /// Restarting playback failed.
    #[error("Playback failed: {0}")]
    Playback(String),
}
