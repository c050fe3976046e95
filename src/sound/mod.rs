//! Alert sounds: built-in host effects and custom sound files.

mod backend;
mod builtin;
mod error;
mod rodio_backend;

pub use backend::{clamp_volume, AudioBackend, AudioClip, NullBackend};
pub use builtin::{BellSoundPlayer, BuiltinSound, SoundPlayer, BUILTIN_SOUND_NAMES};
pub use error::AudioError;
pub use rodio_backend::RodioBackend;

#[cfg(test)]
pub(crate) use rodio_backend::tests::write_silent_wav;
