//! Watcher module tests.

mod editor_test;
mod sound_test;

/// Verify all public watcher types are exported from the library.
#[test]
fn test_all_watcher_types_exported() {
    use chat_alerts::alert::{compile_pattern, find_literal, PatternCache, PatternError, Rule};
    use chat_alerts::config::{AlertsConfig, IndexPolicy};
    use chat_alerts::sound::{BellSoundPlayer, NullBackend};
    use chat_alerts::watcher::{
        scan_and_splice, ChatWatcher, MessageOutcome, ScanOutcome, WatchedChannels,
    };

    let watcher = ChatWatcher::new(
        AlertsConfig::default(),
        Box::new(NullBackend),
        Box::new(BellSoundPlayer { quiet: true }),
    );
    assert!(watcher.index().is_empty());
    assert_eq!(*watcher.index(), WatchedChannels::new());

    let _ = PatternCache::new();
    let _ = MessageOutcome::default();
    assert_eq!(scan_and_splice(&Rule::default(), &[]), ScanOutcome::NoMatch);
    assert!(matches!(compile_pattern("", true), Err(PatternError::MatchesEmpty)));
    assert_eq!(find_literal("abc", "b", 0), Some(1..2));
    assert_eq!(IndexPolicy::default(), IndexPolicy::AllRules);
}
