//! Inbound chat messages.

use serde::{Deserialize, Serialize};

use super::{Channel, RichText};

/// Which host dispatch pass a message is being scanned in.
///
/// Hosts run a pre-display filter pass before the normal display pass.
/// Each rule opts into exactly one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPass {
    #[default]
    Display,
    PreFilter,
}

impl ScanPass {
    /// Map the host's "is pre-filter" flag to a pass.
    #[must_use]
    pub fn from_pre_filter(pre_filter: bool) -> Self {
        if pre_filter {
            Self::PreFilter
        } else {
            Self::Display
        }
    }

    #[must_use]
    pub fn is_pre_filter(self) -> bool {
        self == Self::PreFilter
    }
}

/// A chat message as seen by the watcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Channel the message arrived on.
    pub channel: Channel,
    /// Sender name as rich text.
    #[serde(default)]
    pub sender: RichText,
    /// Message body as rich text.
    #[serde(default)]
    pub body: RichText,
}

impl ChatMessage {
    /// Create a message from plain sender and body strings.
    #[must_use]
    pub fn plain(channel: Channel, sender: &str, body: &str) -> Self {
        Self {
            channel,
            sender: RichText::plain(sender),
            body: RichText::plain(body),
        }
    }
}
