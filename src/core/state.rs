//! Process-wide state for serve mode.
//!
//! Three globals cross the HTTP/actor boundary:
//! - `SERVING`: the pad is loaded and the shell may be rendered
//! - `SHUTDOWN`: Ctrl+C was received
//! - `PAD_TX`: the pad actor inbox, for request handlers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use tiny_http::Server;

use crate::actor::PadMsg;

/// False until the actor system has read the pad files; requests get a
/// self-refreshing holding page meanwhile.
static SERVING: AtomicBool = AtomicBool::new(false);

/// Set once Ctrl+C arrives, checked by the request loop
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// HTTP server reference, so the Ctrl+C handler can unblock its accept loop
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Side channel that tells the actor runtime to drain and exit
static SHUTDOWN_TX: OnceLock<crossbeam::channel::Sender<()>> = OnceLock::new();

/// Pad actor inbox, for request handlers that need to inject buffer
/// operations (e.g. a `?code=` share token arriving over HTTP)
static PAD_TX: OnceLock<tokio::sync::mpsc::Sender<PadMsg>> = OnceLock::new();

// =============================================================================
// serving
// =============================================================================

/// True once the pad is loaded and the shell may be rendered.
pub fn is_serving() -> bool {
    SERVING.load(Ordering::SeqCst)
}

/// Flip the holding page off. The coordinator calls this once the
/// buffers are read and the actors are wired.
pub fn set_serving() {
    SERVING.store(true, Ordering::SeqCst);
}

// =============================================================================
// shutdown
// =============================================================================

/// Install the global Ctrl+C handler. Call once at program start.
///
/// Before `register_server()` the handler just exits; afterwards it
/// unblocks the accept loop and signals the actors so both sides wind
/// down cleanly.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if let Some(tx) = SHUTDOWN_TX.get() {
            let _ = tx.send(());
        }

        match SERVER.get() {
            Some(server) => {
                crate::log!("serve"; "shutting down...");
                server.unblock();
            }
            // Nothing is serving yet (e.g. a config prompt is waiting on
            // stdin), so there is nothing to wind down
            None => std::process::exit(0),
        }
    })
    .context("failed to set Ctrl+C handler")
}

/// Hand the bound server and the actor shutdown sender to the Ctrl+C
/// handler. Must happen before the request loop starts blocking.
pub fn register_server(server: Arc<Server>, shutdown_tx: crossbeam::channel::Sender<()>) {
    let _ = SERVER.set(server);
    let _ = SHUTDOWN_TX.set(shutdown_tx);
}

/// Whether Ctrl+C has been received.
///
/// Relaxed suffices: a request or two slipping through after Ctrl+C
/// does no harm
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

// =============================================================================
// pad actor inbox
// =============================================================================

/// Register the pad actor inbox for HTTP request handlers
pub fn register_pad_channel(tx: tokio::sync::mpsc::Sender<PadMsg>) {
    let _ = PAD_TX.set(tx);
}

/// Get the pad actor inbox, if the actor system is running
pub fn pad_channel() -> Option<&'static tokio::sync::mpsc::Sender<PadMsg>> {
    PAD_TX.get()
}

// =============================================================================
// tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serving_flag_flips_once() {
        SERVING.store(false, Ordering::SeqCst);
        assert!(!is_serving());

        set_serving();
        assert!(is_serving());
    }

    #[test]
    fn test_pad_channel_registration() {
        let (tx, _rx) = tokio::sync::mpsc::channel(1);
        register_pad_channel(tx);
        assert!(pad_channel().is_some());
    }
}
