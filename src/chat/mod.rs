//! Chat message model: channels, rich text payloads and messages.

mod channel;
mod message;
mod payload;

pub use channel::{Channel, UnknownChannel, PUBLIC_CHANNELS};
pub use message::{ChatMessage, ScanPass};
pub use payload::{Payload, RichText};
