//! Chat watcher: channel index, scan-and-splice and the message pipeline.

mod chat_watcher;
mod index;
mod splice;

pub use chat_watcher::{ChatWatcher, MessageOutcome};
pub use index::WatchedChannels;
pub use splice::{scan_and_splice, ScanOutcome};
