//! Development server for the pad preview shell.
//!
//! Serves three things: the shell page at `/` (with the optional
//! `?code=` share-import landing), the embedded client script, and a
//! 404 for everything else. All pad state lives in the actor system;
//! the HTTP side only renders templates and forwards share imports.

mod lifecycle;
mod response;

use crate::{
    debug, log,
    share::{SHARE_PARAM, ShareToken},
};
use anyhow::Result;
use crossbeam::channel;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};
use tiny_http::{Request, Server};

/// Default WebSocket port for preview push
pub const DEFAULT_WS_PORT: u16 = 35729;

/// Port the preview socket really bound. Starts at the default and is
/// overwritten once the coordinator knows better (the default may have
/// been taken by another sandpad instance).
static ACTUAL_WS_PORT: AtomicU16 = AtomicU16::new(DEFAULT_WS_PORT);

/// Record the port the preview socket bound.
pub fn set_actual_ws_port(port: u16) {
    ACTUAL_WS_PORT.store(port, Ordering::Relaxed);
}

fn get_actual_ws_port() -> u16 {
    ACTUAL_WS_PORT.load(Ordering::Relaxed)
}

/// Serve the pad with live preview (blocking until shutdown).
pub fn run_serve() -> Result<()> {
    bind_server()?.run()
}

/// A listening socket that has not started handling requests yet.
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP socket and wire it into the Ctrl+C handler, leaving
/// the request loop for [`BoundServer::run`].
pub fn bind_server() -> Result<BoundServer> {
    let config = crate::config::cfg();
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    debug!("preview"; "ws://localhost:{}", DEFAULT_WS_PORT);

    // The Ctrl+C handler in main() unblocks this server and tells the
    // actors to wind down
    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    crate::core::register_server(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        addr,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Address the listener actually bound.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Spawn the actors and block in the request loop until Ctrl+C.
    ///
    /// The actor system flips the serving flag once the pad is loaded;
    /// until then requests get the self-refreshing holding page.
    pub fn run(self) -> Result<()> {
        let config = crate::config::cfg();
        let actor_handle =
            lifecycle::spawn_actors(Arc::clone(&config), DEFAULT_WS_PORT, self.shutdown_rx);
        run_request_loop(&self.server);
        lifecycle::wait_for_shutdown(actor_handle);
        Ok(())
    }
}

fn run_request_loop(server: &Server) {
    // A few workers so a slow shell fetch cannot stall preview.js
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        pool.spawn(move || {
            if let Err(e) = handle_request(request) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

fn handle_request(request: Request) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    // preview.js is embedded at build time, so it can be served before
    // the pad loads; the injected port is whatever really bound
    if request.url() == crate::embed::serve::PREVIEW_JS_URL {
        return response::respond_preview_js(request, get_actual_ws_port());
    }

    if !crate::core::is_serving() {
        return response::respond_loading(request);
    }

    // `GET /` and `GET /?code=…` both land on the shell
    let url = request.url();
    let (path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };

    if path == "/" {
        if let Some(query) = query
            && let Some(token) = extract_share_token(query)
        {
            return handle_share_import(request, &token);
        }
        return response::respond_shell(request, &crate::config::cfg());
    }

    response::respond_not_found(request)
}

/// Extract the share token value from a raw query string.
fn extract_share_token(query: &str) -> Option<String> {
    use percent_encoding::percent_decode_str;

    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == SHARE_PARAM).then(|| {
            percent_decode_str(value)
                .decode_utf8()
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
    })
}

/// Import a shared pad carried in `?code=`, then bounce the browser back
/// to a clean `/` so a reload doesn't re-import.
fn handle_share_import(request: Request, token: &str) -> Result<()> {
    match ShareToken::decode(token) {
        Ok(decoded) => {
            if let Some(tx) = crate::core::pad_channel() {
                let msg = crate::actor::PadMsg::ReplaceAll {
                    markup: decoded.html,
                    style: decoded.css,
                    script: decoded.js,
                };
                if tx.blocking_send(msg).is_err() {
                    log!("serve"; "pad actor unavailable, share import dropped");
                }
            } else {
                log!("serve"; "actors not running, share import dropped");
            }
            response::respond_redirect(request, "/")
        }
        Err(e) => {
            // A bad token is recoverable: keep the current pad and serve it
            log!("serve"; "ignoring invalid share token: {}", e);
            response::respond_shell(request, &crate::config::cfg())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_share_token() {
        assert_eq!(extract_share_token("code=abc123"), Some("abc123".into()));
        assert_eq!(
            extract_share_token("foo=1&code=abc&bar=2"),
            Some("abc".into())
        );
        assert_eq!(extract_share_token("foo=1"), None);
        assert_eq!(extract_share_token(""), None);
    }

    #[test]
    fn test_extract_share_token_percent_decoded() {
        // `+` and `=` from a standard-alphabet token survive the query trip
        assert_eq!(
            extract_share_token("code=eyJh%2BbiJ9%3D%3D"),
            Some("eyJh+biJ9==".into())
        );
    }

    #[test]
    fn test_extract_share_token_keeps_padding() {
        // split_once only splits at the first `=`, padding stays intact
        assert_eq!(extract_share_token("code=eyJoIn0="), Some("eyJoIn0=".into()));
    }
}
