//! Rich text payloads.
//!
//! A chat message is an ordered sequence of payloads: text runs
//! interleaved with formatting directives. Directives the alert engine does
//! not understand travel through as [`Payload::Opaque`].

use serde::{Deserialize, Serialize};

/// One element of a rich text sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Plain text run.
    Text(String),
    /// Start of a foreground color span.
    ForegroundOn(u16),
    /// End of the innermost foreground color span.
    ForegroundOff,
    /// Start of a glow (edge) color span.
    GlowOn(u16),
    /// End of the innermost glow color span.
    GlowOff,
    /// Directive passed through untouched.
    Opaque(serde_json::Value),
}

impl Payload {
    /// Create a text payload.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Text content, if this is a text run.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// An ordered sequence of payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText {
    payloads: Vec<Payload>,
}

impl RichText {
    /// Create an empty rich text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rich text consisting of a single text run.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            payloads: vec![Payload::text(text)],
        }
    }

    /// Borrow the payload sequence.
    #[must_use]
    pub fn payloads(&self) -> &[Payload] {
        &self.payloads
    }

    /// Replace the payload sequence wholesale.
    pub fn replace(&mut self, payloads: Vec<Payload>) {
        self.payloads = payloads;
    }

    /// Append a payload.
    pub fn push(&mut self, payload: Payload) {
        self.payloads.push(payload);
    }

    /// Number of payloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Check if there are no payloads.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Concatenation of all text runs, ignoring directives.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.payloads.iter().filter_map(Payload::as_text).collect()
    }
}

impl From<Vec<Payload>> for RichText {
    fn from(payloads: Vec<Payload>) -> Self {
        Self { payloads }
    }
}

impl FromIterator<Payload> for RichText {
    fn from_iter<I: IntoIterator<Item = Payload>>(iter: I) -> Self {
        Self {
            payloads: iter.into_iter().collect(),
        }
    }
}
