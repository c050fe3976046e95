//! Alert rule definition.

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::cache::{AudioSource, PatternCache, PatternSource};
use crate::chat::{Channel, PUBLIC_CHANNELS};
use crate::sound::{clamp_volume, AudioBackend, BuiltinSound, SoundPlayer};

/// Which part of a rule an edit touched.
///
/// Tells [`Rule::on_edited`] (and the watcher) the narrowest recompute
/// that restores consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleChange {
    /// `pattern`, `is_regex` or `ignore_case`.
    Pattern,
    /// `play_sound`, `use_custom_sound`, `custom_sound_path` or `volume`.
    Audio,
    /// The channel set.
    Channels,
    /// The `enabled` flag.
    Enabled,
    /// Name, highlight colors, builtin sound or matching flags that need no rebuild.
    Appearance,
    /// Unknown or multiple fields.
    All,
}

/// One user-configured chat alert.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub name: String,
    /// Channels to watch. Containing [`Channel::Any`] means every channel.
    pub channels: BTreeSet<Channel>,
    pub pattern: String,
    pub is_regex: bool,
    pub ignore_case: bool,
    pub enabled: bool,
    /// Match against the sender's name instead of the message body.
    pub match_sender_only: bool,
    /// Run in the host's pre-display filter pass instead of the display pass.
    pub include_filtered_messages: bool,

    pub highlight_enabled: bool,
    /// Foreground color id, 0 for none.
    pub foreground_color: u16,
    /// Glow color id, 0 for none.
    pub glow_color: u16,

    pub play_sound: bool,
    pub use_custom_sound: bool,
    pub builtin_sound: BuiltinSound,
    pub custom_sound_path: PathBuf,
    pub volume: f32,

    #[serde(skip)]
    cache: PatternCache,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            name: "New Alert".to_string(),
            channels: BTreeSet::new(),
            pattern: String::new(),
            is_regex: false,
            ignore_case: true,
            enabled: true,
            match_sender_only: false,
            include_filtered_messages: false,
            highlight_enabled: true,
            foreground_color: 500,
            glow_color: 0,
            play_sound: false,
            use_custom_sound: false,
            builtin_sound: BuiltinSound::default(),
            custom_sound_path: PathBuf::new(),
            volume: 0.5,
            cache: PatternCache::default(),
        }
    }
}

impl Rule {
    /// Create a rule the way the editor does: watching the public channels.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channels: PUBLIC_CHANNELS.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Whether the pattern is non-empty and the cache is ready to scan.
    #[must_use]
    pub fn can_match(&self) -> bool {
        !self.pattern.is_empty() && self.cache.is_ready(&self.pattern_source())
    }

    /// Whether the selected sound can be played.
    #[must_use]
    pub fn sound_ready(&self) -> bool {
        self.cache.audio_ready(self.use_custom_sound)
    }

    /// Whether this rule applies to messages on `channel`.
    #[must_use]
    pub fn watches(&self, channel: Channel) -> bool {
        self.channels.contains(&Channel::Any) || self.channels.contains(&channel)
    }

    /// Find the first match in `text` at or after byte offset `start`.
    #[must_use]
    pub fn find_match(&self, text: &str, start: usize) -> Option<Range<usize>> {
        if !self.can_match() {
            return None;
        }
        self.cache.find_match(&self.pattern_source(), text, start)
    }

    /// Play this rule's sound. Returns whether a sound was started.
    pub fn trigger_sound(&mut self, player: &dyn SoundPlayer) -> bool {
        if !self.play_sound {
            return false;
        }
        if self.use_custom_sound {
            return self.cache.play_cached_audio(&self.name);
        }
        player.play_builtin(self.builtin_sound);
        true
    }

    /// Recompile the pattern from the current fields.
    pub fn rebuild_pattern(&mut self) {
        let source = PatternSource {
            rule: &self.name,
            pattern: &self.pattern,
            is_regex: self.is_regex,
            ignore_case: self.ignore_case,
        };
        self.cache.rebuild_pattern(&source);
    }

    /// Reopen the custom sound from the current fields.
    pub fn rebuild_audio(&mut self, backend: &dyn AudioBackend) {
        let source = AudioSource {
            rule: &self.name,
            wanted: self.play_sound && self.use_custom_sound,
            path: &self.custom_sound_path,
            volume: self.volume,
        };
        self.cache.rebuild_audio(&source, backend);
    }

    /// Rebuild the whole cache.
    pub fn rebuild(&mut self, backend: &dyn AudioBackend) {
        self.rebuild_pattern();
        self.rebuild_audio(backend);
    }

    /// Bring the cache up to date after an edit.
    pub fn on_edited(&mut self, change: RuleChange, backend: &dyn AudioBackend) {
        match change {
            RuleChange::Pattern => self.rebuild_pattern(),
            RuleChange::Audio => self.rebuild_audio(backend),
            RuleChange::All => self.rebuild(backend),
            RuleChange::Channels | RuleChange::Enabled | RuleChange::Appearance => {}
        }
    }

    /// Set the playback volume, clamped to `[0, 1]`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
    }

    /// Add or remove a channel. Party and cross-world party travel together.
    pub fn toggle_channel(&mut self, channel: Channel) {
        let linked = (channel == Channel::Party).then_some(Channel::CrossParty);
        if self.channels.remove(&channel) {
            if let Some(linked) = linked {
                self.channels.remove(&linked);
            }
        } else {
            self.channels.insert(channel);
            if let Some(linked) = linked {
                self.channels.insert(linked);
            }
        }
    }

    /// Read-only access to the derived state.
    #[must_use]
    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Release the compiled pattern and sound clip.
    pub fn release(&mut self) {
        self.cache.release();
    }

    fn pattern_source(&self) -> PatternSource<'_> {
        PatternSource {
            rule: &self.name,
            pattern: &self.pattern,
            is_regex: self.is_regex,
            ignore_case: self.ignore_case,
        }
    }
}
