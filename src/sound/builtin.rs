//! Built-in host sound effects.

use std::io::Write;

use serde::{Deserialize, Serialize};

/// One of the host's numbered alert sound effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinSound {
    Sound01,
    #[default]
    Sound02,
    Sound03,
    Sound04,
    Sound05,
    Sound06,
    Sound07,
    Sound08,
    Sound09,
    Sound10,
    Sound11,
    Sound12,
    Sound13,
    Sound14,
    Sound15,
    Sound16,
}

/// Host sound id and display name for every built-in sound.
pub static BUILTIN_SOUND_NAMES: [(BuiltinSound, u16, &str); 16] = [
    (BuiltinSound::Sound01, 0x25, "Sound Effect 1"),
    (BuiltinSound::Sound02, 0x26, "Sound Effect 2"),
    (BuiltinSound::Sound03, 0x27, "Sound Effect 3"),
    (BuiltinSound::Sound04, 0x28, "Sound Effect 4"),
    (BuiltinSound::Sound05, 0x29, "Sound Effect 5"),
    (BuiltinSound::Sound06, 0x2A, "Sound Effect 6"),
    (BuiltinSound::Sound07, 0x2B, "Sound Effect 7"),
    (BuiltinSound::Sound08, 0x2C, "Sound Effect 8"),
    (BuiltinSound::Sound09, 0x2D, "Sound Effect 9"),
    (BuiltinSound::Sound10, 0x2E, "Sound Effect 10"),
    (BuiltinSound::Sound11, 0x2F, "Sound Effect 11"),
    (BuiltinSound::Sound12, 0x30, "Sound Effect 12"),
    (BuiltinSound::Sound13, 0x31, "Sound Effect 13"),
    (BuiltinSound::Sound14, 0x32, "Sound Effect 14"),
    (BuiltinSound::Sound15, 0x33, "Sound Effect 15"),
    (BuiltinSound::Sound16, 0x34, "Sound Effect 16"),
];

impl BuiltinSound {
    /// All built-in sounds in host order.
    pub fn all() -> impl Iterator<Item = BuiltinSound> {
        BUILTIN_SOUND_NAMES.iter().map(|(sound, _, _)| *sound)
    }

    /// Host-side sound id.
    #[must_use]
    pub fn id(self) -> u16 {
        BUILTIN_SOUND_NAMES
            .iter()
            .find(|(sound, _, _)| *sound == self)
            .map_or(0, |(_, id, _)| *id)
    }

    /// Look up a sound by its host id.
    #[must_use]
    pub fn from_id(id: u16) -> Option<Self> {
        BUILTIN_SOUND_NAMES
            .iter()
            .find(|(_, sound_id, _)| *sound_id == id)
            .map(|(sound, _, _)| *sound)
    }

    /// Display name shown in editors.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        BUILTIN_SOUND_NAMES
            .iter()
            .find(|(sound, _, _)| *sound == self)
            .map_or("Unknown", |(_, _, name)| *name)
    }
}

/// Host collaborator that plays built-in sound effects.
///
/// Playback is fire-and-forget and has no readiness concept.
pub trait SoundPlayer {
    fn play_builtin(&self, sound: BuiltinSound);
}

/// Terminal stand-in for the host sound layer: logs the sound and rings the bell.
#[derive(Debug, Clone, Default)]
pub struct BellSoundPlayer {
    /// Suppress the terminal bell, keeping only the log event.
    pub quiet: bool,
}

impl SoundPlayer for BellSoundPlayer {
    fn play_builtin(&self, sound: BuiltinSound) {
        tracing::info!(
            sound = sound.display_name(),
            id = sound.id(),
            "Playing built-in sound"
        );
        if !self.quiet {
            let mut stderr = std::io::stderr();
            let _ = stderr.write_all(b"\x07");
            let _ = stderr.flush();
        }
    }
}
