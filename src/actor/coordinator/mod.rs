//! Wiring for the live preview actor system.
//!
//! The coordinator owns no preview logic of its own. It loads the pad
//! into a [`BufferSet`], hands each actor its channel ends, then waits
//! for the actors to finish.

mod runtime;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::fs::FsActor;
use super::messages::{PadMsg, WsMsg};
use super::pad::PadActor;
use super::ws::WsActor;
use crate::buffer::BufferSet;
use crate::config::PadConfig;
use crate::preview::ChannelHost;
use crate::schedule::RunState;

const CHANNEL_BUFFER: usize = 32;

/// Builds the channel graph and drives the actors to completion.
pub struct Coordinator {
    config: Arc<PadConfig>,
    ws_port: Option<u16>,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    /// Start a builder for the given pad.
    pub fn with_config(config: Arc<PadConfig>) -> Self {
        Self {
            config,
            ws_port: None,
            shutdown_rx: None,
        }
    }

    /// Port the browser connects to for live updates.
    pub fn with_ws_port(mut self, port: u16) -> Self {
        self.ws_port = Some(port);
        self
    }

    /// Channel the Ctrl+C handler fires to stop the actors.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Spawn the preview socket, wire the actors together and run them
    /// until shutdown.
    pub async fn run(mut self) -> Result<()> {
        let (pad_tx, pad_rx) = mpsc::channel::<PadMsg>(CHANNEL_BUFFER);
        let (ws_tx, ws_rx) = mpsc::channel::<WsMsg>(CHANNEL_BUFFER);

        // The HTTP layer injects imported pads through this handle
        crate::core::register_pad_channel(pad_tx.clone());

        if let Some(port) = self.ws_port {
            match crate::preview::server::start(port, ws_tx.clone()) {
                Ok(actual) => crate::cli::serve::set_actual_ws_port(actual),
                // The pad still serves over plain HTTP; only live push is lost
                Err(e) => crate::log!("actor"; "websocket server failed: {}", e),
            }
        }

        let paths = self.config.pad_paths();
        let buffers = BufferSet::load(&paths).context("failed to read pad files")?;

        let fs_actor = if self.config.serve.watch {
            let actor = FsActor::new(self.config.root.as_path(), pad_tx.clone())
                .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?;
            Some(actor)
        } else {
            crate::debug!("actor"; "file watching disabled");
            None
        };

        let autorun = self.config.preview.autorun;
        let pad_actor = PadActor::new(
            pad_rx,
            ws_tx.clone(),
            ChannelHost::new(ws_tx.clone()),
            buffers,
            paths,
            RunState::from_running(autorun),
            Duration::from_millis(self.config.preview.debounce_ms),
        );
        let ws_actor = WsActor::new(ws_rx, pad_tx.clone()).with_initial_running(autorun);

        // Pad loaded and actors wired: the HTTP side can stop serving
        // the holding page now
        crate::core::set_serving();

        crate::debug!("actor"; "start");
        let shutdown_rx = self.shutdown_rx.take();
        let _ = runtime::run_actors(fs_actor, pad_actor, ws_actor, pad_tx, ws_tx, shutdown_rx).await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
