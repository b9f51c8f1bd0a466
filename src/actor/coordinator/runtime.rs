use std::time::Duration;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use crate::actor::fs::FsActor;
use crate::actor::messages::{PadMsg, WsMsg};
use crate::actor::pad::PadActor;
use crate::actor::ws::WsActor;
use crate::preview::ChannelHost;

/// Spawn the actors, then block until something asks them to stop.
pub(super) async fn run_actors(
    fs: Option<FsActor>,
    pad: PadActor<ChannelHost>,
    ws: WsActor,
    pad_tx: mpsc::Sender<PadMsg>,
    ws_tx: mpsc::Sender<WsMsg>,
    shutdown_rx: Option<Receiver<()>>,
) -> Result<()> {
    let pad_handle = tokio::spawn(async move { pad.run().await });
    let ws_handle = tokio::spawn(async move { ws.run().await });
    let fs_handle = fs.map(|fs| tokio::spawn(async move { fs.run().await }));

    wait_for_exit(shutdown_rx, fs_handle).await;

    // Drain in dependency order: pad stops producing, then ws closes shells
    crate::debug!("actor"; "sending shutdown to pad");
    let _ = pad_tx.send(PadMsg::Shutdown).await;
    let _ = tokio::time::timeout(Duration::from_millis(500), pad_handle).await;

    crate::debug!("actor"; "sending shutdown to ws");
    let _ = ws_tx.send(WsMsg::Shutdown).await;
    let _ = tokio::time::timeout(Duration::from_millis(500), ws_handle).await;

    Ok(())
}

async fn wait_for_exit(
    shutdown_rx: Option<Receiver<()>>,
    fs_handle: Option<tokio::task::JoinHandle<()>>,
) {
    match (shutdown_rx, fs_handle) {
        (Some(rx), _) => loop {
            if rx.try_recv().is_ok() {
                crate::debug!("actor"; "shutdown signal received");
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        },
        (None, Some(fs_handle)) => {
            let _ = fs_handle.await;
        }
        (None, None) => {
            // Nothing can ever signal us, run until the process dies
            std::future::pending::<()>().await;
        }
    }
}
