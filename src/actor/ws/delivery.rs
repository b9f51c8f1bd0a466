//! Message broadcast to connected shells

use tungstenite::protocol::Message;

use super::WsActor;

impl WsActor {
    /// Broadcast a message to all connected shells.
    ///
    /// Zero connected shells is not an error: the message is dropped and
    /// the snapshot keeps the latest state for whoever connects next.
    pub(super) fn broadcast(&self, msg: Message) {
        let mut clients = self.clients.lock();
        if clients.is_empty() {
            crate::debug!("ws"; "no shells connected, message dropped");
            return;
        }

        // Drop shells whose send fails, they are gone
        clients.retain_mut(|client| {
            if let Err(e) = client.ws.send(msg.clone()) {
                crate::debug!("ws"; "shell dropped during send: {}", e);
                return false;
            }
            true
        });

        crate::debug!("ws"; "broadcast to {} shell(s)", clients.len());
    }
}
