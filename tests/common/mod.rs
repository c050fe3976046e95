//! Recording collaborators shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chat_alerts::alert::Rule;
use chat_alerts::chat::Channel;
use chat_alerts::config::AlertsConfig;
use chat_alerts::sound::{AudioBackend, AudioClip, AudioError, BuiltinSound, SoundPlayer};
use chat_alerts::watcher::ChatWatcher;

/// Everything the mocks observed.
#[derive(Debug, Default)]
pub struct Recording {
    pub builtin: Vec<BuiltinSound>,
    pub opened: Vec<PathBuf>,
    pub restarted: Vec<PathBuf>,
}

pub type SharedRecording = Rc<RefCell<Recording>>;

#[derive(Clone)]
pub struct RecordingPlayer(pub SharedRecording);

impl SoundPlayer for RecordingPlayer {
    fn play_builtin(&self, sound: BuiltinSound) {
        self.0.borrow_mut().builtin.push(sound);
    }
}

/// Backend that opens any file that exists on disk.
#[derive(Clone)]
pub struct FileBackend(pub SharedRecording);

struct RecordingClip {
    path: PathBuf,
    recording: SharedRecording,
}

impl AudioClip for RecordingClip {
    fn path(&self) -> &Path {
        &self.path
    }

    fn restart(&mut self) -> Result<(), AudioError> {
        self.recording.borrow_mut().restarted.push(self.path.clone());
        Ok(())
    }
}

impl AudioBackend for FileBackend {
    fn open(&self, path: &Path, _volume: f32) -> Result<Box<dyn AudioClip>, AudioError> {
        let data = std::fs::read(path).map_err(|source| AudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if data.is_empty() {
            return Err(AudioError::Playback("empty file".to_string()));
        }
        self.0.borrow_mut().opened.push(path.to_path_buf());
        Ok(Box::new(RecordingClip {
            path: path.to_path_buf(),
            recording: Rc::clone(&self.0),
        }))
    }
}

/// Watcher wired to recording collaborators.
pub fn recording_watcher(rules: Vec<Rule>) -> (ChatWatcher, SharedRecording) {
    let recording = SharedRecording::default();
    let watcher = ChatWatcher::new(
        AlertsConfig::with_alerts(rules),
        Box::new(FileBackend(Rc::clone(&recording))),
        Box::new(RecordingPlayer(Rc::clone(&recording))),
    );
    (watcher, recording)
}

/// A literal rule on the given channels.
pub fn literal_rule(name: &str, pattern: &str, channels: &[Channel]) -> Rule {
    let mut rule = Rule::new(name);
    rule.pattern = pattern.to_string();
    rule.channels = channels.iter().copied().collect();
    rule
}

/// Write a short silent 8 kHz mono PCM wav file.
pub fn write_silent_wav(path: &Path) {
    const SAMPLES: u32 = 800;
    let data_len = SAMPLES * 2;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&16000u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);
    std::fs::write(path, bytes).unwrap();
}
