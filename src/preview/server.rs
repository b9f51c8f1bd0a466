//! WebSocket Server for the Preview Shell
//!
//! Binds the preview socket and hands accepted connections to the
//! WebSocket actor over a channel. The actor owns the handshake and all
//! client IO; this module only listens and accepts.

use std::io::ErrorKind;
use std::net::{Ipv4Addr, TcpListener};
use std::time::Duration;

use anyhow::{Result, bail};

use crate::actor::WsMsg;

/// Maximum port retry attempts
const MAX_PORT_RETRIES: u16 = 10;

/// Accept poll interval while the listener is nonblocking.
const ACCEPT_POLL: Duration = Duration::from_millis(100);

/// Start the WebSocket listener and forward clients to the actor.
///
/// Returns the actually bound port (the base port may be taken).
pub fn start(base_port: u16, ws_tx: tokio::sync::mpsc::Sender<WsMsg>) -> Result<u16> {
    let (listener, actual_port) = try_bind_port(base_port, MAX_PORT_RETRIES)?;
    listener.set_nonblocking(true)?;

    std::thread::spawn(move || accept_loop(&listener, &ws_tx));

    Ok(actual_port)
}

/// Hand every accepted connection to the actor, until the actor goes away.
fn accept_loop(listener: &TcpListener, ws_tx: &tokio::sync::mpsc::Sender<WsMsg>) {
    loop {
        match listener.accept() {
            Ok((stream, addr)) => {
                crate::debug!("ws"; "shell connected: {}", addr);

                // The actor does the handshake on a blocking stream
                let _ = stream.set_nonblocking(false);

                if ws_tx.blocking_send(WsMsg::AddClient(stream)).is_err() {
                    crate::log!("ws"; "websocket actor gone, acceptor stopping");
                    return;
                }
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => {
                std::thread::sleep(ACCEPT_POLL);
            }
            Err(e) => {
                crate::log!("ws"; "accept error: {}", e);
                std::thread::sleep(ACCEPT_POLL);
            }
        }
    }
}

/// Bind the first free port at or above `base_port`.
fn try_bind_port(base_port: u16, max_retries: u16) -> Result<(TcpListener, u16)> {
    let mut last_error = None;

    for port in base_port..base_port.saturating_add(max_retries) {
        match TcpListener::bind((Ipv4Addr::LOCALHOST, port)) {
            Ok(listener) => {
                let actual_port = listener.local_addr()?.port();
                return Ok((listener, actual_port));
            }
            Err(e) => last_error = Some(e),
        }
    }

    bail!(
        "Failed to bind WebSocket port after {} attempts: {}",
        max_retries,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    )
}
