//! Actor system for the live preview.
//!
//! Serve mode runs three actors connected by channels:
//!
//! ```text
//! FsActor --> PadActor --> WsActor
//! (watch)     (compose)   (broadcast)
//! ```
//!
//! `FsActor` turns debounced file events into buffer reloads, `PadActor`
//! owns the buffers and decides when a new document gets composed, and
//! `WsActor` pushes composed documents to every connected shell. The
//! coordinator wires them up and owns shutdown.

pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod pad;
pub mod ws;

pub use coordinator::Coordinator;
pub use messages::{PadMsg, WsMsg};
