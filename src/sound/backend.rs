//! Audio backend seam for custom alert sounds.

use std::path::Path;

use super::AudioError;

/// Clamp a playback volume to `[0, 1]`. NaN plays silent.
#[must_use]
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// A decoded sound file bound to an output, ready to be replayed.
///
/// Dropping a clip stops its playback and releases the file data and the
/// output sink it holds.
pub trait AudioClip {
    /// Path the clip was opened from.
    fn path(&self) -> &Path;

    /// Stop any in-flight playback, rewind to the start and play.
    ///
    /// # Errors
    ///
    /// Returns an error if the clip can no longer be decoded or queued.
    fn restart(&mut self) -> Result<(), AudioError>;
}

/// Opens sound files into playable clips.
pub trait AudioBackend {
    /// Open and decode the file at `path`, playing at `volume` (0.0 to 1.0).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or if no
    /// output is available.
    fn open(&self, path: &Path, volume: f32) -> Result<Box<dyn AudioClip>, AudioError>;
}

/// Backend for hosts without audio output. Every open fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn open(&self, _path: &Path, _volume: f32) -> Result<Box<dyn AudioClip>, AudioError> {
        Err(AudioError::NoOutputDevice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_volume() {
        assert!((clamp_volume(0.25) - 0.25).abs() < f32::EPSILON);
        assert!((clamp_volume(7.5) - 1.0).abs() < f32::EPSILON);
        assert!(clamp_volume(-2.0).abs() < f32::EPSILON);
        assert!(clamp_volume(f32::NAN).abs() < f32::EPSILON);
        assert!((clamp_volume(f32::INFINITY) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_null_backend_never_opens() {
        let result = NullBackend.open(Path::new("/tmp/ping.wav"), 0.5);
        assert!(matches!(result, Err(AudioError::NoOutputDevice)));
    }
}
