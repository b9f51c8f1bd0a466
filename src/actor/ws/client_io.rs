use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::protocol::Message;

use super::{ShellClient, WsActor};
use crate::actor::messages::PadMsg;
use crate::preview::PreviewMessage;

impl WsActor {
    /// Complete the handshake and enroll the shell.
    pub(super) fn add_client(&self, stream: TcpStream) {
        match tungstenite::accept(stream) {
            Ok(mut ws) => {
                // Handshake done; from here the reader thread polls, so
                // reads must not block
                let _ = ws.get_ref().set_nonblocking(true);

                let connected = PreviewMessage::connected();
                if let Err(e) = ws.send(Message::Text(connected.to_json().into())) {
                    crate::log!("ws"; "failed to send connected message: {}", e);
                    return;
                }

                // Snapshot recovery: run state first so the toggle renders
                // correctly, then the last presented document if there is one
                {
                    let snapshot = self.snapshot.lock();
                    let state = PreviewMessage::state(snapshot.running);
                    if let Err(e) = ws.send(Message::Text(state.to_json().into())) {
                        crate::log!("ws"; "failed to send run state: {}", e);
                        return;
                    }
                    if let Some(ref document) = snapshot.document {
                        let msg = PreviewMessage::document(document.clone());
                        if let Err(e) = ws.send(Message::Text(msg.to_json().into())) {
                            crate::log!("ws"; "failed to send document snapshot: {}", e);
                            return;
                        }
                        crate::debug!("ws"; "sent document snapshot to new shell");
                    }
                }

                let mut clients = self.clients.lock();
                crate::debug!("ws"; "shell connected (total: {})", clients.len() + 1);
                clients.push(ShellClient { ws });
            }
            Err(e) => {
                crate::log!("ws"; "handshake failed: {}", e);
            }
        }
    }

    /// Poll every shell for inbound commands, pruning closed
    /// connections as they turn up.
    pub(super) fn client_reader_loop(
        clients: Arc<Mutex<Vec<ShellClient>>>,
        pad_tx: mpsc::Sender<PadMsg>,
    ) {
        loop {
            std::thread::sleep(std::time::Duration::from_millis(100));

            // Collect commands while holding the lock, forward after
            // releasing it so a full pad inbox cannot stall broadcasts
            let mut commands: Vec<PadMsg> = Vec::new();
            {
                let mut clients_guard = clients.lock();
                let mut disconnected = Vec::new();

                for (i, client) in clients_guard.iter_mut().enumerate() {
                    match client.ws.read() {
                        Ok(Message::Text(text)) => {
                            if let Some(cmd) = Self::parse_shell_message(&text) {
                                commands.push(cmd);
                            }
                        }
                        Ok(Message::Close(_)) => {
                            disconnected.push(i);
                        }
                        Err(tungstenite::Error::Io(ref e))
                            if e.kind() == std::io::ErrorKind::WouldBlock =>
                        {
                            // Nothing queued on this shell
                        }
                        Err(_) => {
                            disconnected.push(i);
                        }
                        _ => {}
                    }
                }

                for i in disconnected.into_iter().rev() {
                    clients_guard.remove(i);
                }
            }

            for cmd in commands {
                if pad_tx.blocking_send(cmd).is_err() {
                    // Pad actor gone, nothing left to forward to
                    return;
                }
            }
        }
    }

    /// Parse a shell message into a pad command, if it is one
    pub(super) fn parse_shell_message(text: &str) -> Option<PadMsg> {
        match PreviewMessage::from_json(text)? {
            PreviewMessage::Run { running } => {
                crate::debug!("ws"; "shell requests running={}", running);
                Some(PadMsg::SetRunning(running))
            }
            PreviewMessage::Reset => {
                crate::debug!("ws"; "shell requests reset");
                Some(PadMsg::Reset)
            }
            PreviewMessage::Hello => {
                crate::debug!("ws"; "shell hello");
                None
            }
            _ => None,
        }
    }
}
