//! The message types that flow between the actors.
//!
//! ```text
//! FsActor --FileChanged--> PadActor --Present--> WsActor --> shells
//!                             ^                     |
//!                             +----[Run/Reset]------+
//! ```

use crate::buffer::BufferKind;

// =============================================================================
// pad actor inbox
// =============================================================================

/// Everything the PadActor reacts to.
#[derive(Debug)]
pub enum PadMsg {
    /// Pad files changed on disk (already classified by kind)
    FileChanged(Vec<BufferKind>),
    /// sandpad.toml changed
    ConfigChanged,
    /// Run state change request (shell toggle button)
    SetRunning(bool),
    /// Reset the pad to the starter template
    Reset,
    /// Replace all three buffers in one operation (share token import)
    ReplaceAll {
        markup: String,
        style: String,
        script: String,
    },
    /// Stop the actor
    Shutdown,
}

// =============================================================================
// websocket actor inbox
// =============================================================================

/// Everything the WsActor reacts to.
pub enum WsMsg {
    /// Broadcast a composed document to all connected shells
    Present { document: String },
    /// Broadcast the current run state to all connected shells
    RunState { running: bool },
    /// A freshly accepted shell socket, pre-handshake
    AddClient(std::net::TcpStream),
    /// Close every shell and stop the actor
    Shutdown,
}
