//! `rodio` implementation of the audio backend.
//!
//! Files are read into memory once and decoded afresh on every restart, so
//! rewinding is just building a new decoder over the same bytes. Without the
//! `playback` feature the backend only decodes, which keeps readiness
//! checks meaningful on headless machines.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rodio::Decoder;

use super::{clamp_volume, AudioBackend, AudioClip, AudioError};

type ClipSource = Decoder<Cursor<Arc<[u8]>>>;

/// Audio backend built on `rodio`.
pub struct RodioBackend {
    #[cfg(feature = "playback")]
    stream: rodio::OutputStream,
}

impl RodioBackend {
    /// Open the default output device.
    ///
    /// # Errors
    ///
    /// Returns `AudioError::NoOutputDevice` if no device can be opened.
    #[cfg(feature = "playback")]
    pub fn open_default() -> Result<Self, AudioError> {
        let mut stream = rodio::OutputStreamBuilder::open_default_stream().map_err(|e| {
            tracing::warn!(error = %e, "Failed to open default audio output");
            AudioError::NoOutputDevice
        })?;
        stream.log_on_drop(false);
        Ok(Self { stream })
    }

    /// Create a decode-only backend.
    ///
    /// # Errors
    ///
    /// Never fails without the `playback` feature.
    #[cfg(not(feature = "playback"))]
    pub fn open_default() -> Result<Self, AudioError> {
        tracing::debug!("Built without playback, custom sounds are decoded but not played");
        Ok(Self {})
    }
}

impl std::fmt::Debug for RodioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioBackend")
            .field("playback", &cfg!(feature = "playback"))
            .finish()
    }
}

impl AudioBackend for RodioBackend {
    fn open(&self, path: &Path, volume: f32) -> Result<Box<dyn AudioClip>, AudioError> {
        let data: Arc<[u8]> = std::fs::read(path)
            .map_err(|source| AudioError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .into();

        // Decode once up front so unsupported files are rejected at open time.
        decode(path, &data)?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Opened sound file");
        Ok(Box::new(RodioClip {
            path: path.to_path_buf(),
            data,
            volume: clamp_volume(volume),
            #[cfg(feature = "playback")]
            mixer: self.stream.mixer().clone(),
            #[cfg(feature = "playback")]
            sink: None,
        }))
    }
}

fn decode(path: &Path, data: &Arc<[u8]>) -> Result<ClipSource, AudioError> {
    Decoder::new(Cursor::new(Arc::clone(data))).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// An in-memory sound file.
struct RodioClip {
    path: PathBuf,
    data: Arc<[u8]>,
    volume: f32,
    #[cfg(feature = "playback")]
    mixer: rodio::mixer::Mixer,
    #[cfg(feature = "playback")]
    sink: Option<rodio::Sink>,
}

impl AudioClip for RodioClip {
    fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(feature = "playback")]
    fn restart(&mut self) -> Result<(), AudioError> {
        let source = decode(&self.path, &self.data)?;
        // A stopped sink blocks on append until drained, so replace it instead.
        if let Some(previous) = self.sink.take() {
            previous.stop();
        }
        let sink = rodio::Sink::connect_new(&self.mixer);
        sink.set_volume(self.volume);
        sink.append(source);
        sink.play();
        self.sink = Some(sink);
        Ok(())
    }

    #[cfg(not(feature = "playback"))]
    fn restart(&mut self) -> Result<(), AudioError> {
        let _source = decode(&self.path, &self.data)?;
        tracing::debug!(
            path = %self.path.display(),
            volume = self.volume,
            "Sound restarted without an output device"
        );
        Ok(())
    }
}
