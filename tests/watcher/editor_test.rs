//! Editor operations keep caches and the channel index consistent.

use chat_alerts::alert::RuleChange;
use chat_alerts::chat::{Channel, ChatMessage, ScanPass};
use chat_alerts::config::IndexPolicy;

use crate::common::{literal_rule, recording_watcher};

#[test]
fn channel_edit_extends_index() {
    let (mut watcher, _) = recording_watcher(vec![literal_rule("a", "x", &[Channel::Say])]);
    assert!(!watcher.index().contains(Channel::FreeCompany));

    watcher.edit_rule(0, RuleChange::Channels, |r| {
        r.toggle_channel(Channel::FreeCompany);
    });
    assert!(watcher.index().contains(Channel::FreeCompany));
    assert!(watcher.index().contains(Channel::Say));

    watcher.edit_rule(0, RuleChange::Channels, |r| r.toggle_channel(Channel::Say));
    assert!(!watcher.index().contains(Channel::Say));
}

#[test]
fn pattern_edit_takes_effect_immediately() {
    let (mut watcher, _) = recording_watcher(vec![literal_rule("a", "raid", &[Channel::Say])]);

    watcher.edit_rule(0, RuleChange::Pattern, |r| {
        r.pattern = r"\bwipe\b".to_string();
        r.is_regex = true;
    });
    let mut message = ChatMessage::plain(Channel::Say, "", "raid wipe");
    let outcome = watcher.handle_message(&mut message, ScanPass::Display);
    assert!(outcome.is_match());
    assert_eq!(message.body.payloads()[2].as_text(), Some("wipe"));

    watcher.edit_rule(0, RuleChange::Pattern, |r| r.pattern = "(".to_string());
    assert!(!watcher.rules()[0].can_match());
}

#[test]
fn reordering_changes_sound_priority() {
    let mut first = literal_rule("first", "go", &[Channel::Say]);
    first.play_sound = true;
    let mut second = literal_rule("second", "go", &[Channel::Say]);
    second.play_sound = true;
    let (mut watcher, _) = recording_watcher(vec![first, second]);

    assert!(watcher.move_rule_down(0));
    let mut message = ChatMessage::plain(Channel::Say, "", "go");
    let outcome = watcher.handle_message(&mut message, ScanPass::Display);
    assert_eq!(outcome.sound_rule, Some(0));
    assert_eq!(watcher.rules()[0].name, "second");
}

#[test]
fn disabled_rules_follow_index_policy() {
    let mut quiet = literal_rule("quiet", "x", &[Channel::Linkshell]);
    quiet.enabled = false;
    let (mut watcher, _) = recording_watcher(vec![quiet]);
    assert!(watcher.index().contains(Channel::Linkshell));

    watcher.set_index_policy(IndexPolicy::EnabledOnly);
    assert!(watcher.index().is_empty());

    watcher.edit_rule(0, RuleChange::Enabled, |r| r.enabled = true);
    assert!(watcher.index().contains(Channel::Linkshell));
}

#[test]
fn added_rule_is_ready_and_indexed() {
    let (mut watcher, _) = recording_watcher(Vec::new());
    assert!(watcher.index().is_empty());

    let index = watcher.add_rule(literal_rule("new", "hello", &[Channel::Emote]));
    assert_eq!(index, 0);
    assert!(watcher.rules()[0].can_match());
    assert_eq!(watcher.index().to_string(), "Emote");
}
