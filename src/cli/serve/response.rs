//! HTTP response handlers.

use crate::config::PadConfig;
use crate::utils::mime;
use anyhow::Result;
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Shown while the actor system is still coming up; refreshes itself.
const STARTING_HTML: &str = "<!doctype html><html><head>\
<meta http-equiv=\"refresh\" content=\"1\"><title>sandpad</title>\
</head><body>starting</body></html>";

/// Respond with the preview shell page.
pub fn respond_shell(request: Request, config: &PadConfig) -> Result<()> {
    use crate::embed::serve::{SHELL_HTML, ShellVars};

    if request.method() == &Method::Head {
        return send_head(request, 200, mime::HTML);
    }

    let body = SHELL_HTML.render(&ShellVars::from_config(config));
    send_body(request, 200, mime::HTML, body.into_bytes())
}

/// Respond with preview.js from memory.
pub fn respond_preview_js(request: Request, ws_port: u16) -> Result<()> {
    use crate::embed::serve::{PREVIEW_JS, PreviewVars};

    let body = PREVIEW_JS.render(&PreviewVars { ws_port });
    send_body(request, 200, mime::JAVASCRIPT, body.into_bytes())
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, mime::PLAIN, b"404 Not Found".to_vec())
}

/// Respond with loading page (actors not ready).
pub fn respond_loading(request: Request) -> Result<()> {
    send_body(request, 200, mime::HTML, STARTING_HTML.as_bytes().to_vec())
}

/// Respond with 503, sent once shutdown has started.
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, mime::PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with 303 See Other.
pub fn respond_redirect(request: Request, location: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(303)).with_header(static_header("Location", location));
    Ok(request.respond(response)?)
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status))
        .with_header(static_header("Content-Type", content_type));
    Ok(request.respond(response)?)
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(static_header("Content-Type", content_type));
    Ok(request.respond(response)?)
}

// tiny_http rejects only non-ASCII header bytes, which these never carry
fn static_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
