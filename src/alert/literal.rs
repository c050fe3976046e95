//! Literal (non-regex) alert patterns.
//!
//! All offsets are byte offsets into the haystack and fall on char
//! boundaries. Case-insensitive literals go through an escaped regex, so
//! the matched span is measured in the haystack and its byte length can
//! differ from the needle's.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

use super::PatternError;

/// Find the leftmost exact occurrence of `needle` in `haystack` at or after
/// `start`.
///
/// Returns `None` for an empty needle, a `start` past the end or inside a
/// character, or when there is no occurrence.
#[must_use]
pub fn find_literal(haystack: &str, needle: &str, start: usize) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .get(start..)?
        .find(needle)
        .map(|offset| start + offset..start + offset + needle.len())
}

/// Compile a literal pattern for Unicode case-insensitive search.
///
/// # Errors
///
/// Returns `PatternError::MatchesEmpty` for an empty literal and
/// `PatternError::Compile` if the escaped pattern exceeds the regex size
/// limit.
pub fn compile_folded_literal(needle: &str) -> Result<Regex, PatternError> {
    if needle.is_empty() {
        return Err(PatternError::MatchesEmpty);
    }
    Ok(RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()?)
}
