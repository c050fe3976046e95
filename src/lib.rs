//! Chat alerts - highlight and sound alerts for game chat messages.

pub mod alert;
pub mod chat;
pub mod cli;
pub mod config;
pub mod display;
pub mod sound;
pub mod watcher;
