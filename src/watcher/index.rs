//! Index of channels watched by at least one rule.

use std::collections::BTreeSet;

use crate::alert::Rule;
use crate::chat::Channel;
use crate::config::IndexPolicy;

/// Union of rule channel sets, used to drop unwatched messages early.
///
/// The index only grows by folding. Removing a rule's contribution means
/// rebuilding from the remaining rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchedChannels {
    all: bool,
    channels: BTreeSet<Channel>,
}

impl WatchedChannels {
    /// Create an empty index that watches nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from scratch.
    #[must_use]
    pub fn from_rules<'a>(rules: impl IntoIterator<Item = &'a Rule>, policy: IndexPolicy) -> Self {
        let mut index = Self::new();
        for rule in rules {
            index.fold_rule(rule, policy);
        }
        index
    }

    /// Fold one rule's channels in, if the policy lets it contribute.
    pub fn fold_rule(&mut self, rule: &Rule, policy: IndexPolicy) {
        if policy == IndexPolicy::EnabledOnly && !rule.enabled {
            return;
        }
        self.fold(&rule.channels);
    }

    /// Fold a channel set in.
    pub fn fold(&mut self, channels: &BTreeSet<Channel>) {
        for &channel in channels {
            if channel == Channel::Any {
                self.all = true;
            } else {
                self.channels.insert(channel);
            }
        }
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.all = false;
        self.channels.clear();
    }

    /// Whether messages on `channel` need scanning.
    #[must_use]
    pub fn contains(&self, channel: Channel) -> bool {
        self.all || self.channels.contains(&channel)
    }

    /// Whether some rule watches every channel.
    #[must_use]
    pub fn watches_all(&self) -> bool {
        self.all
    }

    /// Explicitly watched channels, excluding the `Any` sentinel.
    #[must_use]
    pub fn channels(&self) -> &BTreeSet<Channel> {
        &self.channels
    }

    /// Check if nothing is watched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.all && self.channels.is_empty()
    }
}

impl std::fmt::Display for WatchedChannels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.all {
            return f.write_str("All");
        }
        if self.channels.is_empty() {
            return f.write_str("None");
        }
        let names: Vec<&str> = self.channels.iter().map(|c| c.display_name()).collect();
        f.write_str(&names.join(", "))
    }
}
