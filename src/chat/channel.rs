//! Chat channel catalogue.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of a chat message.
///
/// `Any` is a sentinel used only inside rule channel sets, where it means
/// "every channel". Messages never carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Any,
    Say,
    Shout,
    Yell,
    Party,
    CrossParty,
    Alliance,
    FreeCompany,
    TellIncoming,
    TellOutgoing,
    Linkshell,
    CrossLinkshell,
    NoviceNetwork,
    Emote,
    Echo,
    System,
}

/// Channels watched by a freshly created rule.
pub const PUBLIC_CHANNELS: [Channel; 7] = [
    Channel::Say,
    Channel::Shout,
    Channel::Yell,
    Channel::Party,
    Channel::CrossParty,
    Channel::Alliance,
    Channel::FreeCompany,
];

static CHANNEL_NAMES: [(Channel, &str, &str); 16] = [
    (Channel::Any, "any", "All Channels"),
    (Channel::Say, "say", "Say"),
    (Channel::Shout, "shout", "Shout"),
    (Channel::Yell, "yell", "Yell"),
    (Channel::Party, "party", "Party"),
    (Channel::CrossParty, "cross_party", "Cross-world Party"),
    (Channel::Alliance, "alliance", "Alliance"),
    (Channel::FreeCompany, "free_company", "Free Company"),
    (Channel::TellIncoming, "tell_incoming", "Tell (Incoming)"),
    (Channel::TellOutgoing, "tell_outgoing", "Tell (Outgoing)"),
    (Channel::Linkshell, "linkshell", "Linkshell"),
    (Channel::CrossLinkshell, "cross_linkshell", "Cross-world Linkshell"),
    (Channel::NoviceNetwork, "novice_network", "Novice Network"),
    (Channel::Emote, "emote", "Emote"),
    (Channel::Echo, "echo", "Echo"),
    (Channel::System, "system", "System"),
];

impl Channel {
    /// Every concrete channel, excluding the `Any` sentinel.
    pub fn concrete() -> impl Iterator<Item = Channel> {
        CHANNEL_NAMES
            .iter()
            .map(|(channel, _, _)| *channel)
            .filter(|channel| *channel != Channel::Any)
    }

    /// Machine name, identical to the serialized form.
    #[must_use]
    pub fn key(self) -> &'static str {
        CHANNEL_NAMES
            .iter()
            .find(|(channel, _, _)| *channel == self)
            .map_or("unknown", |(_, key, _)| *key)
    }

    /// Human readable name for editor and terminal display.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        CHANNEL_NAMES
            .iter()
            .find(|(channel, _, _)| *channel == self)
            .map_or("Unknown", |(_, _, name)| *name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when parsing an unknown channel name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown chat channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        CHANNEL_NAMES
            .iter()
            .find(|(_, key, _)| *key == wanted)
            .map(|(channel, _, _)| *channel)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}
