//! Per-message alert pipeline.

use crate::alert::{Rule, RuleChange};
use crate::chat::{ChatMessage, ScanPass};
use crate::config::{AlertsConfig, IndexPolicy};
use crate::sound::{AudioBackend, SoundPlayer};

use super::{scan_and_splice, ScanOutcome, WatchedChannels};

/// What happened to one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOutcome {
    /// Whether the channel gate let the message through.
    pub watched: bool,
    /// Indices of the rules that matched, in priority order.
    pub matched_rules: Vec<usize>,
    /// Whether any payload sequence was replaced.
    pub rewritten: bool,
    /// Index of the rule whose sound played.
    pub sound_rule: Option<usize>,
}

impl MessageOutcome {
    #[must_use]
    pub fn is_match(&self) -> bool {
        !self.matched_rules.is_empty()
    }
}

/// Runs the configured rules over incoming chat messages.
///
/// Owns the rule list, keeps every rule's cache and the watched-channel
/// index consistent with it, and arbitrates sounds.
pub struct ChatWatcher {
    config: AlertsConfig,
    index: WatchedChannels,
    audio: Box<dyn AudioBackend>,
    sounds: Box<dyn SoundPlayer>,
}

impl std::fmt::Debug for ChatWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWatcher")
            .field("rules", &self.config.alerts.len())
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl ChatWatcher {
    /// Take ownership of `config` and build every rule's cache.
    #[must_use]
    pub fn new(
        config: AlertsConfig,
        audio: Box<dyn AudioBackend>,
        sounds: Box<dyn SoundPlayer>,
    ) -> Self {
        let mut watcher = Self {
            config,
            index: WatchedChannels::new(),
            audio,
            sounds,
        };
        watcher.update_all_rules();
        watcher
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.config.alerts
    }

    #[must_use]
    pub fn config(&self) -> &AlertsConfig {
        &self.config
    }

    #[must_use]
    pub fn index(&self) -> &WatchedChannels {
        &self.index
    }

    /// Change which rules feed the index and rebuild it.
    pub fn set_index_policy(&mut self, policy: IndexPolicy) {
        self.config.index_policy = policy;
        self.reindex();
    }

    /// Rebuild one rule's cache and fold its channels into the index.
    ///
    /// Out-of-range indices are ignored.
    pub fn update_rule(&mut self, index: usize) {
        let policy = self.config.index_policy;
        let Some(rule) = self.config.alerts.get_mut(index) else {
            return;
        };
        rule.rebuild(self.audio.as_ref());
        self.index.fold_rule(rule, policy);
    }

    /// Rebuild every rule's cache and the index from scratch.
    pub fn update_all_rules(&mut self) {
        self.index.clear();
        for index in 0..self.config.alerts.len() {
            self.update_rule(index);
        }
        tracing::debug!(
            rules = self.config.alerts.len(),
            watched = %self.index,
            "Rebuilt alert rules"
        );
    }

    /// Rebuild the index from the current rules without touching caches.
    pub fn reindex(&mut self) {
        self.index = WatchedChannels::from_rules(&self.config.alerts, self.config.index_policy);
        tracing::debug!(watched = %self.index, "Rebuilt channel index");
    }

    /// Append a rule and return its index.
    pub fn add_rule(&mut self, rule: Rule) -> usize {
        self.config.alerts.push(rule);
        let index = self.config.alerts.len() - 1;
        self.update_rule(index);
        index
    }

    /// Remove and return a rule, releasing its resources.
    pub fn remove_rule(&mut self, index: usize) -> Option<Rule> {
        if index >= self.config.alerts.len() {
            return None;
        }
        let mut rule = self.config.alerts.remove(index);
        rule.release();
        self.reindex();
        Some(rule)
    }

    /// Swap a rule with the one above it. Returns whether anything moved.
    pub fn move_rule_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.config.alerts.len() {
            return false;
        }
        self.config.alerts.swap(index - 1, index);
        true
    }

    /// Swap a rule with the one below it. Returns whether anything moved.
    pub fn move_rule_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.config.alerts.len() {
            return false;
        }
        self.config.alerts.swap(index, index + 1);
        true
    }

    /// Apply `edit` to a rule, then restore cache and index consistency
    /// for the part named by `change`.
    ///
    /// Returns `false` if `index` is out of range.
    pub fn edit_rule(
        &mut self,
        index: usize,
        change: RuleChange,
        edit: impl FnOnce(&mut Rule),
    ) -> bool {
        let Some(rule) = self.config.alerts.get_mut(index) else {
            return false;
        };
        edit(rule);
        rule.on_edited(change, self.audio.as_ref());

        let reindex = match change {
            RuleChange::Channels | RuleChange::All => true,
            RuleChange::Enabled => self.config.index_policy == IndexPolicy::EnabledOnly,
            RuleChange::Pattern | RuleChange::Audio | RuleChange::Appearance => false,
        };
        if reindex {
            self.reindex();
        }
        true
    }

    /// Run the rules over `message`, rewriting it in place.
    ///
    /// The message is never dropped; the outcome only reports what changed.
    pub fn handle_message(
        &mut self,
        message: &mut ChatMessage,
        pass: ScanPass,
    ) -> MessageOutcome {
        let mut outcome = MessageOutcome::default();
        if !self.index.contains(message.channel) {
            return outcome;
        }
        outcome.watched = true;

        let pre_filter = pass.is_pre_filter();
        for (index, rule) in self.config.alerts.iter().enumerate() {
            if !rule.enabled
                || !rule.can_match()
                || rule.include_filtered_messages != pre_filter
                || !rule.watches(message.channel)
            {
                continue;
            }

            let target = if rule.match_sender_only {
                &mut message.sender
            } else {
                &mut message.body
            };
            match scan_and_splice(rule, target.payloads()) {
                ScanOutcome::NoMatch => continue,
                ScanOutcome::Matched => {}
                ScanOutcome::Rewritten(payloads) => {
                    target.replace(payloads);
                    outcome.rewritten = true;
                }
            }
            tracing::debug!(rule = %rule.name, channel = %message.channel, "Alert matched");
            outcome.matched_rules.push(index);
        }

        for &index in &outcome.matched_rules {
            if self.config.alerts[index].trigger_sound(self.sounds.as_ref()) {
                outcome.sound_rule = Some(index);
                break;
            }
        }
        outcome
    }

    /// Release every rule's compiled pattern and sound clip.
    pub fn release_all(&mut self) {
        for rule in &mut self.config.alerts {
            rule.release();
        }
    }

    /// Release resources and hand the configuration back for saving.
    #[must_use]
    pub fn into_config(mut self) -> AlertsConfig {
        self.release_all();
        self.config
    }
}
