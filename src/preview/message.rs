//! JSON wire format between the server and the browser shell.
//!
//! Server → shell:
//! - `connected`: Handshake complete, carries the server version
//! - `state`: Current run state (drives the Run/Stop button)
//! - `document`: A fully composed document to mount in a fresh iframe
//!
//! Shell → server:
//! - `hello`: Shell announces itself after connecting
//! - `run`: Request a run state change
//! - `reset`: Request a pad reset to the default template

use serde::{Deserialize, Serialize};

/// Message sent over the preview WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PreviewMessage {
    /// First message after the handshake
    Connected {
        /// Lets the shell warn about a stale cached page
        version: String,
    },

    /// Current run state
    State {
        /// `true` while buffer changes are being pushed
        running: bool,
    },

    /// A composed document to present
    Document {
        /// The complete HTML document, embedded verbatim
        html: String,
    },

    /// Shell greeting after connect
    Hello,

    /// Run state change request from the shell
    Run {
        /// Desired state
        running: bool,
    },

    /// Reset request from the shell
    Reset,
}

impl PreviewMessage {
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn state(running: bool) -> Self {
        Self::State { running }
    }

    pub fn document(html: impl Into<String>) -> Self {
        Self::Document { html: html.into() }
    }

    pub fn to_json(&self) -> String {
        // The fallback is a message the shell ignores
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"hello"}"#.to_string())
    }

    /// `None` for malformed or unknown messages; the caller drops them.
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serialization() {
        let msg = PreviewMessage::document("<h1>hi</h1>\n<style></style>\n<script></script>\n");
        let json = msg.to_json();
        assert!(json.contains(r#""type":"document""#));
        assert!(json.contains(r#""html":"#));

        match PreviewMessage::from_json(&json) {
            Some(PreviewMessage::Document { html }) => {
                assert!(html.starts_with("<h1>hi</h1>"));
            }
            other => panic!("Expected Document message, got {other:?}"),
        }
    }

    #[test]
    fn test_state_serialization() {
        let json = PreviewMessage::state(false).to_json();
        assert_eq!(json, r#"{"type":"state","running":false}"#);
    }

    #[test]
    fn test_connected_carries_version() {
        let json = PreviewMessage::connected().to_json();
        assert!(json.contains(r#""type":"connected""#));
        assert!(json.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_parse_shell_messages() {
        assert!(matches!(
            PreviewMessage::from_json(r#"{"type":"hello"}"#),
            Some(PreviewMessage::Hello)
        ));
        assert!(matches!(
            PreviewMessage::from_json(r#"{"type":"run","running":true}"#),
            Some(PreviewMessage::Run { running: true })
        ));
        assert!(matches!(
            PreviewMessage::from_json(r#"{"type":"reset"}"#),
            Some(PreviewMessage::Reset)
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_and_malformed() {
        assert!(PreviewMessage::from_json(r#"{"type":"teleport"}"#).is_none());
        assert!(PreviewMessage::from_json(r#"{"type":"run"}"#).is_none());
        assert!(PreviewMessage::from_json("not json").is_none());
    }
}
