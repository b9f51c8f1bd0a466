//! Preview host abstraction.
//!
//! A `PreviewHost` is anything that can take a composed document and show
//! it. Presenting is fire-and-forget: it never fails, never blocks, and a
//! host with nowhere to show the document (no connected shell, closed
//! channel) simply skips the call. The next present heals everything,
//! because every document is complete on its own.

mod message;
pub mod server;

pub use message::PreviewMessage;

use crate::actor::WsMsg;

/// A sink for composed documents.
pub trait PreviewHost {
    /// Present a complete document.
    ///
    /// Must not fail and must not block the caller. Implementations
    /// replace whatever was previously shown; there is no incremental
    /// update path.
    fn present(&mut self, document: &str);
}

/// The production host: forwards documents to the WebSocket actor,
/// which broadcasts them to every connected shell.
pub struct ChannelHost {
    ws_tx: tokio::sync::mpsc::Sender<WsMsg>,
}

impl ChannelHost {
    pub fn new(ws_tx: tokio::sync::mpsc::Sender<WsMsg>) -> Self {
        Self { ws_tx }
    }
}

impl PreviewHost for ChannelHost {
    fn present(&mut self, document: &str) {
        use tokio::sync::mpsc::error::TrySendError;

        let msg = WsMsg::Present {
            document: document.to_string(),
        };
        match self.ws_tx.try_send(msg) {
            Ok(()) => {}
            // Channel pressure means a fresher document is on its way
            // anyway; dropping a frame is harmless
            Err(TrySendError::Full(_)) => {
                crate::debug!("preview"; "channel full, dropping frame");
            }
            // Host gone: skip silently, a later present recovers
            Err(TrySendError::Closed(_)) => {
                crate::debug!("preview"; "host offline, skipping present");
            }
        }
    }
}

/// Test host that records every presented document.
#[cfg(test)]
pub struct RecordingHost {
    pub presented: Vec<String>,
}

#[cfg(test)]
impl RecordingHost {
    pub fn new() -> Self {
        Self {
            presented: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.presented.last().map(String::as_str)
    }
}

#[cfg(test)]
impl PreviewHost for RecordingHost {
    fn present(&mut self, document: &str) {
        self.presented.push(document.to_string());
    }
}
