//! WebSocket side of the preview.
//!
//! Owns the shell connections. Documents and run-state changes coming
//! from the PadActor are broadcast to every connected shell; commands
//! the shells send back (run toggle, reset) are forwarded to the
//! PadActor. Traffic flows both ways through this one actor:
//!
//! ```text
//! PadActor --[Present/RunState]--> WsActor --[broadcast]--> Shells
//!     ^                                                        |
//!     +-------------------[Run/Reset]-------------------------+
//! ```

mod client_io;
mod delivery;

use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::messages::{PadMsg, WsMsg};
use crate::preview::PreviewMessage;

/// A connected preview shell
struct ShellClient {
    ws: WebSocket<TcpStream>,
}

/// Last known good state, replayed to late-joining shells.
#[derive(Default)]
struct Snapshot {
    /// Most recently presented document
    document: Option<String>,
    /// Current run state
    running: bool,
}

/// Holds the shell connections and the replay snapshot.
pub struct WsActor {
    /// Inbox
    rx: mpsc::Receiver<WsMsg>,
    /// Where shell commands are forwarded
    pad_tx: mpsc::Sender<PadMsg>,
    /// Connected shells, shared with the reader thread
    clients: Arc<Mutex<Vec<ShellClient>>>,
    /// Replayed to shells that connect late
    snapshot: Arc<Mutex<Snapshot>>,
}

impl WsActor {
    pub fn new(rx: mpsc::Receiver<WsMsg>, pad_tx: mpsc::Sender<PadMsg>) -> Self {
        Self {
            rx,
            pad_tx,
            clients: Arc::new(Mutex::new(Vec::new())),
            snapshot: Arc::new(Mutex::new(Snapshot::default())),
        }
    }

    /// Set the initial run state replayed to new shells.
    pub fn with_initial_running(self, running: bool) -> Self {
        self.snapshot.lock().running = running;
        self
    }

    /// Dispatch messages until shutdown, closing every shell on the way
    /// out.
    pub async fn run(mut self) {
        // tungstenite sockets are not async, so a plain thread polls
        // the shells for inbound commands off the runtime
        let clients_for_reader = Arc::clone(&self.clients);
        let pad_tx_for_reader = self.pad_tx.clone();
        std::thread::spawn(move || {
            Self::client_reader_loop(clients_for_reader, pad_tx_for_reader);
        });

        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::Present { document } => {
                    let text = PreviewMessage::document(document.clone()).to_json();
                    self.snapshot.lock().document = Some(document);
                    self.broadcast(Message::Text(text.into()));
                }

                WsMsg::RunState { running } => {
                    self.snapshot.lock().running = running;
                    let text = PreviewMessage::state(running).to_json();
                    self.broadcast(Message::Text(text.into()));
                }

                WsMsg::AddClient(stream) => {
                    self.add_client(stream);
                }

                WsMsg::Shutdown => {
                    crate::debug!("ws"; "shutting down");
                    let mut clients = self.clients.lock();
                    for mut client in clients.drain(..) {
                        let _ = client.ws.close(None);
                    }
                    break;
                }
            }
        }
    }
}
