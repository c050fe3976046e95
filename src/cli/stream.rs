//! JSON-lines reader for inbound chat messages.

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::chat::{ChatMessage, ScanPass};

/// Error type for stream operations.
#[derive(thiserror::Error, Debug)]
pub enum StreamError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One line of input: a chat message plus the pass it arrived in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    #[serde(flatten)]
    pub message: ChatMessage,
    /// Delivered by the host's pre-display filter pass.
    #[serde(default)]
    pub pre_filter: bool,
}

impl InboundMessage {
    #[must_use]
    pub fn pass(&self) -> ScanPass {
        ScanPass::from_pre_filter(self.pre_filter)
    }
}

/// Parse a single line of JSON input.
///
/// # Errors
///
/// Returns `StreamError::Parse` if the JSON is invalid.
pub fn parse_message(line: &str) -> Result<InboundMessage, StreamError> {
    let message: InboundMessage = serde_json::from_str(line)?;
    Ok(message)
}

/// Read messages line by line, skipping blank lines.
///
/// A malformed line yields an error item and reading continues.
pub fn read_messages<R>(
    reader: R,
) -> impl futures_core::Stream<Item = Result<InboundMessage, StreamError>>
where
    R: AsyncBufRead + Unpin,
{
    let lines = reader.lines();

    futures_util::stream::unfold(lines, |mut lines| async {
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => {
                    let message = parse_message(&line);
                    return Some((message, lines));
                }
                Ok(None) => return None,
                Err(e) => return Some((Err(StreamError::Io(e)), lines)),
            }
        }
    })
}
