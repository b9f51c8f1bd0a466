//! Server lifecycle management.

use crate::{actor::Coordinator, config::PadConfig, log};
use anyhow::{Result, bail};
use crossbeam::channel::Receiver;
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the given interface, walking up from `base_port` when a port
/// is already taken. Another sandpad session on the same machine is the
/// usual reason.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let last_port = base_port.saturating_add(MAX_PORT_RETRIES - 1);
    let mut last_err = None;

    for port in base_port..=last_port {
        let addr = SocketAddr::new(interface, port);
        match Server::http(addr) {
            Ok(server) => {
                if port != base_port {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_err = Some(e),
        }
    }

    match last_err {
        Some(e) => bail!("Failed to bind ports {}-{}: {}", base_port, last_port, e),
        None => bail!("Failed to bind ports {}-{}", base_port, last_port),
    }
}

/// Spawn the actor system for file watching and preview push.
///
/// The actors run on their own tokio runtime in a dedicated thread; the
/// calling thread stays free for the blocking HTTP accept loop.
pub fn spawn_actors(
    config: Arc<PadConfig>,
    ws_port: u16,
    shutdown_rx: Receiver<()>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime");

        rt.block_on(async {
            let coordinator = Coordinator::with_config(config)
                .with_shutdown_signal(shutdown_rx)
                .with_ws_port(ws_port);
            if let Err(e) = coordinator.run().await {
                log!("actor"; "error: {}", e);
            }
        });
    })
}

/// Wait for actor system to shutdown gracefully (max 2 seconds).
pub fn wait_for_shutdown(handle: JoinHandle<()>) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(Duration::from_millis(50));
    }
}
