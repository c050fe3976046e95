//! Custom sound handling against real files.

use chat_alerts::alert::RuleChange;
use chat_alerts::chat::{Channel, ChatMessage, ScanPass};
use chat_alerts::config::AlertsConfig;
use chat_alerts::sound::{BellSoundPlayer, RodioBackend};
use chat_alerts::watcher::ChatWatcher;

use crate::common::{literal_rule, recording_watcher, write_silent_wav};

fn custom_rule(path: &std::path::Path) -> chat_alerts::alert::Rule {
    let mut rule = literal_rule("ping", "ping", &[Channel::Say]);
    rule.play_sound = true;
    rule.use_custom_sound = true;
    rule.custom_sound_path = path.to_path_buf();
    rule
}

#[test]
fn rodio_backend_decodes_wav() {
    let Ok(backend) = RodioBackend::open_default() else {
        // No output device on this machine.
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("ping.wav");
    write_silent_wav(&good);
    let bad = dir.path().join("noise.wav");
    std::fs::write(&bad, b"definitely not audio").unwrap();

    let mut watcher = ChatWatcher::new(
        AlertsConfig::with_alerts(vec![custom_rule(&good), custom_rule(&bad)]),
        Box::new(backend),
        Box::new(BellSoundPlayer { quiet: true }),
    );
    assert!(watcher.rules()[0].sound_ready());
    assert!(!watcher.rules()[1].sound_ready());

    let mut message = ChatMessage::plain(Channel::Say, "", "ping");
    let outcome = watcher.handle_message(&mut message, ScanPass::Display);
    assert_eq!(outcome.sound_rule, Some(0));
}

#[test]
fn changed_path_reopens_clip() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.wav");
    let second = dir.path().join("second.wav");
    write_silent_wav(&first);
    write_silent_wav(&second);

    let (mut watcher, recording) = recording_watcher(vec![custom_rule(&first)]);
    assert_eq!(watcher.rules()[0].cache().audio_path(), Some(first.as_path()));

    watcher.edit_rule(0, RuleChange::Audio, |r| r.custom_sound_path = second.clone());
    assert_eq!(watcher.rules()[0].cache().audio_path(), Some(second.as_path()));
    assert_eq!(recording.borrow().opened, vec![first, second]);
}

#[test]
fn disabling_sound_releases_clip() {
    let dir = tempfile::tempdir().unwrap();
    let ping = dir.path().join("ping.wav");
    write_silent_wav(&ping);

    let (mut watcher, recording) = recording_watcher(vec![custom_rule(&ping)]);
    watcher.edit_rule(0, RuleChange::Audio, |r| r.play_sound = false);
    assert!(watcher.rules()[0].cache().audio_path().is_none());

    let mut message = ChatMessage::plain(Channel::Say, "", "ping");
    let outcome = watcher.handle_message(&mut message, ScanPass::Display);
    assert!(outcome.is_match());
    assert_eq!(outcome.sound_rule, None);
    assert!(recording.borrow().restarted.is_empty());
}

#[test]
fn removed_rule_releases_clip() {
    let dir = tempfile::tempdir().unwrap();
    let ping = dir.path().join("ping.wav");
    write_silent_wav(&ping);

    let (mut watcher, _) = recording_watcher(vec![custom_rule(&ping)]);
    let rule = watcher.remove_rule(0).unwrap();
    assert!(rule.cache().audio_path().is_none());
    assert!(watcher.rules().is_empty());
}
