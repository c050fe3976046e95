//! Input stream for the command-line watcher.

mod stream;

pub use stream::*;
