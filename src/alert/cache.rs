//! Per-rule derived state: compiled pattern and opened sound clip.
//!
//! The cache never rebuilds itself. Whoever edits a rule calls the narrowest
//! applicable `rebuild_*` afterwards; until then the cache keeps serving
//! what it last built. Failures are logged and surface only as readiness.

use std::fmt;
use std::ops::Range;
use std::path::Path;

use regex::{Regex, RegexBuilder};

use super::literal::{compile_folded_literal, find_literal};
use super::PatternError;
use crate::sound::{clamp_volume, AudioBackend, AudioClip};

/// Pattern-related fields of a rule, borrowed for a cache operation.
#[derive(Debug, Clone, Copy)]
pub struct PatternSource<'a> {
    /// Rule name, for log context.
    pub rule: &'a str,
    pub pattern: &'a str,
    pub is_regex: bool,
    pub ignore_case: bool,
}

/// Sound-related fields of a rule, borrowed for a cache operation.
#[derive(Debug, Clone, Copy)]
pub struct AudioSource<'a> {
    /// Rule name, for log context.
    pub rule: &'a str,
    /// `play_sound && use_custom_sound`.
    pub wanted: bool,
    pub path: &'a Path,
    pub volume: f32,
}

/// Compile a regex alert pattern.
///
/// # Errors
///
/// Returns `PatternError::Compile` for malformed patterns and
/// `PatternError::MatchesEmpty` for patterns that match the empty string.
pub fn compile_pattern(pattern: &str, ignore_case: bool) -> Result<Regex, PatternError> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()?;
    if regex.is_match("") {
        return Err(PatternError::MatchesEmpty);
    }
    Ok(regex)
}

/// A compiled pattern, tagged with the mode it was built for.
enum Compiled {
    /// A regex rule's own pattern.
    Pattern(Regex),
    /// An escaped literal for case-insensitive search.
    FoldedLiteral(Regex),
}

impl Compiled {
    fn regex(&self) -> &Regex {
        match self {
            Self::Pattern(regex) | Self::FoldedLiteral(regex) => regex,
        }
    }
}

/// Compiled pattern and sound clip owned by exactly one rule.
#[derive(Default)]
pub struct PatternCache {
    compiled: Option<Compiled>,
    audio: Option<Box<dyn AudioClip>>,
}

impl fmt::Debug for PatternCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternCache")
            .field("compiled", &self.compiled.as_ref().map(|c| c.regex().as_str()))
            .field("audio", &self.audio.as_ref().map(|clip| clip.path()))
            .finish()
    }
}

impl PatternCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompile the pattern. Case-sensitive literals keep no compiled state.
    pub fn rebuild_pattern(&mut self, source: &PatternSource<'_>) {
        self.compiled = None;
        let compiled = if source.is_regex {
            compile_pattern(source.pattern, source.ignore_case).map(Compiled::Pattern)
        } else if source.ignore_case && !source.pattern.is_empty() {
            compile_folded_literal(source.pattern).map(Compiled::FoldedLiteral)
        } else {
            return;
        };

        match compiled {
            Ok(compiled) => self.compiled = Some(compiled),
            Err(e) => {
                tracing::warn!(
                    rule = %source.rule,
                    pattern = %source.pattern,
                    error = %e,
                    "Alert pattern rejected"
                );
            }
        }
    }

    /// Reopen the custom sound clip, or release it if no longer wanted.
    pub fn rebuild_audio(&mut self, source: &AudioSource<'_>, backend: &dyn AudioBackend) {
        if !source.wanted {
            self.release_audio();
            return;
        }

        if self
            .audio
            .as_ref()
            .is_some_and(|clip| clip.path() != source.path)
        {
            self.release_audio();
        }

        match backend.open(source.path, clamp_volume(source.volume)) {
            Ok(clip) => self.audio = Some(clip),
            Err(e) => {
                tracing::error!(
                    rule = %source.rule,
                    path = %source.path.display(),
                    error = %e,
                    "Failed to set up alert sound"
                );
                self.release_audio();
            }
        }
    }

    /// Whether a rule with these settings can be scanned with this cache.
    ///
    /// A rule switched between regex and literal mode, or to
    /// case-insensitive literal search, is not ready until rebuilt.
    #[must_use]
    pub fn is_ready(&self, source: &PatternSource<'_>) -> bool {
        match (&self.compiled, source.is_regex) {
            (Some(Compiled::Pattern(_)), true) | (Some(Compiled::FoldedLiteral(_)), false) => true,
            (None, false) => !source.ignore_case,
            _ => false,
        }
    }

    /// Whether a rule's selected sound can be played.
    #[must_use]
    pub fn audio_ready(&self, use_custom_sound: bool) -> bool {
        !use_custom_sound || self.audio.is_some()
    }

    /// The compiled regex, if the rule is in regex mode and valid.
    #[must_use]
    pub fn compiled_pattern(&self) -> Option<&Regex> {
        match &self.compiled {
            Some(Compiled::Pattern(regex)) => Some(regex),
            _ => None,
        }
    }

    /// Path of the currently opened sound clip.
    #[must_use]
    pub fn audio_path(&self) -> Option<&Path> {
        self.audio.as_ref().map(|clip| clip.path())
    }

    /// Find the first match at or after byte offset `start`.
    ///
    /// Zero-length regex matches (such as `\b`) are stepped over so that
    /// callers looping from the end of each match always make progress.
    /// Matching is leftmost-first, so an alternation whose earlier branch
    /// can match empty hides later branches at the same offset: `\b|x`
    /// never reports `x`, while `x|\b` does.
    #[must_use]
    pub fn find_match(
        &self,
        source: &PatternSource<'_>,
        text: &str,
        start: usize,
    ) -> Option<Range<usize>> {
        if !source.is_regex && !source.ignore_case {
            return find_literal(text, source.pattern, start);
        }

        if !self.is_ready(source) {
            tracing::debug!(rule = %source.rule, "Pattern cache not rebuilt, skipping scan");
            return None;
        }
        let regex = self.compiled.as_ref()?.regex();
        if start > text.len() || !text.is_char_boundary(start) {
            return None;
        }

        let mut at = start;
        loop {
            let found = regex.find_at(text, at)?;
            if !found.is_empty() {
                return Some(found.range());
            }
            let skipped = text[found.start()..].chars().next()?;
            at = found.start() + skipped.len_utf8();
        }
    }

    /// Restart the cached clip from the beginning.
    ///
    /// Returns `false` if no clip is open or playback could not start.
    pub fn play_cached_audio(&mut self, rule: &str) -> bool {
        let Some(clip) = self.audio.as_mut() else {
            return false;
        };
        match clip.restart() {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(rule = %rule, error = %e, "Failed to play alert sound");
                false
            }
        }
    }

    /// Drop the compiled pattern and the sound clip.
    pub fn release(&mut self) {
        self.compiled = None;
        self.release_audio();
    }

    fn release_audio(&mut self) {
        if let Some(clip) = self.audio.take() {
            tracing::debug!(path = %clip.path().display(), "Released alert sound");
        }
    }
}
