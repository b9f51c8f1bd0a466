//! Pad Actor
//!
//! Owns the three source buffers and the render scheduler. Every other
//! part of serve mode talks to the pad through messages: the file
//! watcher reports disk changes, shells request run-state toggles and
//! resets, the HTTP layer injects imported share tokens.
//!
//! The actor is the only writer of buffer state, which is what makes
//! the scheduler's "exactly one push" guarantees hold: there is no
//! interleaving to reason about.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use super::messages::{PadMsg, WsMsg};
use crate::buffer::{BufferKind, BufferSet, PadPaths, PadTemplate};
use crate::compose::compose_set;
use crate::preview::PreviewHost;
use crate::schedule::{Decision, RunState, ScheduleEvent, Scheduler};

/// Pad Actor - owns buffers, scheduling and composition
pub struct PadActor<H: PreviewHost> {
    /// Channel to receive messages
    rx: mpsc::Receiver<PadMsg>,
    /// Channel to the WebSocket actor (run-state sync)
    ws_tx: mpsc::Sender<WsMsg>,
    /// The three source buffers
    buffers: BufferSet,
    /// Push gating and debounce
    scheduler: Scheduler,
    /// Where pad files live (refreshed on config reload)
    paths: PadPaths,
    /// Where composed documents go
    host: H,
}

impl<H: PreviewHost> PadActor<H> {
    pub fn new(
        rx: mpsc::Receiver<PadMsg>,
        ws_tx: mpsc::Sender<WsMsg>,
        host: H,
        buffers: BufferSet,
        paths: PadPaths,
        initial: RunState,
        debounce: Duration,
    ) -> Self {
        Self {
            rx,
            ws_tx,
            buffers,
            scheduler: Scheduler::new(initial, debounce),
            paths,
            host,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        // A shell connecting before any edit must have something to show
        if self.scheduler.run_state().is_running() {
            self.present();
        }

        loop {
            let sleep = self.scheduler.sleep_duration(Instant::now());
            tokio::select! {
                biased;
                msg = self.rx.recv() => {
                    let Some(msg) = msg else { break };
                    match msg {
                        PadMsg::FileChanged(kinds) => self.on_files_changed(kinds),
                        PadMsg::ConfigChanged => self.on_config_changed(),
                        PadMsg::SetRunning(running) => self.on_set_running(running),
                        PadMsg::Reset => self.on_reset(),
                        PadMsg::ReplaceAll {
                            markup,
                            style,
                            script,
                        } => self.on_replace_all(markup, style, script),
                        PadMsg::Shutdown => break,
                    }
                }
                _ = tokio::time::sleep(sleep) => {
                    self.flush_deadline(Instant::now());
                }
            }
        }

        crate::debug!("pad"; "shutting down");
    }

    /// Compose the current buffers and hand the document to the host.
    fn present(&mut self) {
        let document = compose_set(&self.buffers);
        crate::debug!("pad"; "presenting {} bytes", document.len());
        self.host.present(&document);
    }

    /// Push a deferred change once its trailing-edge deadline expires.
    fn flush_deadline(&mut self, now: Instant) {
        if self.scheduler.on_deadline(now) == Decision::Push {
            self.present();
            // The active marker tracks the last edited buffer, which is
            // all the scheduler remembers about a coalesced window
            crate::logger::status_success(&format!("pushed: {}", self.buffers.active()));
        }
    }

    /// Pad files changed on disk: re-read them and let the scheduler
    /// decide. Re-reads that find identical content are our own write
    /// echoes (reset, import) and dissolve here.
    fn on_files_changed(&mut self, kinds: Vec<BufferKind>) {
        let mut changed: Vec<BufferKind> = Vec::new();

        for kind in kinds {
            match self.buffers.reload_kind(&self.paths, kind) {
                Ok(true) => changed.push(kind),
                Ok(false) => {
                    crate::debug!("pad"; "{} unchanged on disk, skipping", kind);
                }
                Err(e) => {
                    crate::logger::status_error(
                        &format!("read failed: {}", self.paths.get(kind).display()),
                        &e.to_string(),
                    );
                }
            }
        }

        // Several files changing in one window (git checkout, sed across
        // the pad) count as one replacement, not an edit per file
        let event = match changed.len() {
            0 => return,
            1 => ScheduleEvent::BufferChanged,
            _ => ScheduleEvent::BulkReplaced,
        };

        let what: Vec<&str> = changed.iter().map(|k| k.label()).collect();
        let what = what.join("+");

        match self.scheduler.on_event(event, Instant::now()) {
            Decision::Push => {
                self.present();
                crate::logger::status_success(&format!("pushed: {what}"));
            }
            Decision::Defer => {
                crate::debug!("pad"; "deferred: {what}");
            }
            Decision::Skip => {
                crate::logger::status_unchanged(&format!("stopped, holding: {what}"));
            }
        }
    }

    /// sandpad.toml changed: reload it and re-read the pad files, since
    /// the file names themselves may have moved.
    fn on_config_changed(&mut self) {
        let old_sandbox = crate::config::cfg().preview.sandbox.clone();

        match crate::config::reload_config() {
            Ok(true) => {}
            Ok(false) => {
                crate::debug!("pad"; "config content unchanged");
                return;
            }
            Err(e) => {
                crate::logger::status_error("config reload failed", &format!("{e:#}"));
                return;
            }
        }

        let config = crate::config::cfg();
        self.paths = config.pad_paths();
        self.scheduler
            .set_debounce(Duration::from_millis(config.preview.debounce_ms));

        if config.preview.sandbox != old_sandbox {
            // The sandbox attribute is baked into the shell page
            crate::log!("serve"; "sandbox changed, reload the browser tab to apply");
        }

        match BufferSet::load(&self.paths) {
            Ok(loaded) => {
                let changed = self.buffers.replace_all(
                    loaded.content(BufferKind::Markup).to_string(),
                    loaded.content(BufferKind::Style).to_string(),
                    loaded.content(BufferKind::Script).to_string(),
                );
                crate::logger::status_success("config reloaded");
                if changed
                    && self
                        .scheduler
                        .on_event(ScheduleEvent::BulkReplaced, Instant::now())
                        == Decision::Push
                {
                    self.present();
                }
            }
            Err(e) => {
                crate::logger::status_error("config reload: pad read failed", &e.to_string());
            }
        }
    }

    /// Run-state toggle from a shell. The change is echoed back over the
    /// WebSocket so every connected shell's button stays in sync.
    fn on_set_running(&mut self, running: bool) {
        let next = RunState::from_running(running);
        let was = self.scheduler.run_state();

        let decision = self
            .scheduler
            .on_event(ScheduleEvent::SetRunState(next), Instant::now());

        if next != was {
            self.send_state(running);
            if next == RunState::Stopped {
                crate::logger::status_unchanged("stopped, edits hold until run");
            }
        }

        if decision == Decision::Push {
            self.present();
            crate::logger::status_success("running, pushed");
        }
    }

    /// Reset the pad to the starter template. One replacement, one push.
    fn on_reset(&mut self) {
        let template = PadTemplate::default_template();
        if !self.buffers.apply_template(template) {
            crate::logger::status_unchanged("already at the starter template");
            return;
        }

        // Pad files are the source of truth: materialize the reset so
        // the user's editor sees it too
        if let Err(e) = self.buffers.store(&self.paths) {
            crate::logger::status_error("reset: write failed", &e.to_string());
        }

        match self
            .scheduler
            .on_event(ScheduleEvent::BulkReplaced, Instant::now())
        {
            Decision::Push => {
                self.present();
                crate::logger::status_success("reset to starter template");
            }
            _ => {
                crate::logger::status_unchanged("reset saved, run to view");
            }
        }
    }

    /// Import a decoded share token: all three buffers replaced as one
    /// operation, mirrored to disk.
    fn on_replace_all(&mut self, markup: String, style: String, script: String) {
        if !self.buffers.replace_all(markup, style, script) {
            crate::debug!("pad"; "imported content identical, skipping");
            return;
        }

        if let Err(e) = self.buffers.store(&self.paths) {
            crate::logger::status_error("import: write failed", &e.to_string());
        }

        match self
            .scheduler
            .on_event(ScheduleEvent::BulkReplaced, Instant::now())
        {
            Decision::Push => {
                self.present();
                crate::logger::status_success("imported shared pad");
            }
            _ => {
                crate::logger::status_unchanged("imported shared pad, run to view");
            }
        }
    }

    fn send_state(&self, running: bool) {
        if self.ws_tx.try_send(WsMsg::RunState { running }).is_err() {
            crate::debug!("pad"; "state sync skipped, host offline");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::RecordingHost;
    use std::fs;
    use std::path::Path;

    fn test_paths(dir: &Path) -> PadPaths {
        PadPaths {
            markup: dir.join("index.html"),
            style: dir.join("styles.css"),
            script: dir.join("script.js"),
        }
    }

    fn test_actor(
        dir: &Path,
        initial: RunState,
        debounce: Duration,
    ) -> (PadActor<RecordingHost>, mpsc::Receiver<WsMsg>) {
        let (_pad_tx, pad_rx) = mpsc::channel(8);
        let (ws_tx, ws_rx) = mpsc::channel(8);

        let paths = test_paths(dir);
        let buffers = BufferSet::from_contents("<p>m</p>", "p {}", "console.log(0);");
        buffers.store(&paths).unwrap();

        let actor = PadActor::new(
            pad_rx,
            ws_tx,
            RecordingHost::new(),
            buffers,
            paths,
            initial,
            debounce,
        );
        (actor, ws_rx)
    }

    #[test]
    fn test_file_change_presents_once() {
        let dir = tempfile::tempdir().unwrap();
        let (mut actor, _ws) = test_actor(dir.path(), RunState::Running, Duration::ZERO);

        fs::write(dir.path().join("styles.css"), "p { color: red }").unwrap();
        actor.on_files_changed(vec![BufferKind::Style]);

        assert_eq!(actor.host.presented.len(), 1);
        assert!(actor.host.last().unwrap().contains("p { color: red }"));
    }

    #[test]
    fn test_own_write_echo_is_absorbed() {
        let dir = tempfile::tempdir().unwrap();
        let (mut actor, _ws) = test_actor(dir.path(), RunState::Running, Duration::ZERO);

        // Disk still matches the buffers: the change event dissolves
        actor.on_files_changed(vec![BufferKind::Markup, BufferKind::Style]);
        assert!(actor.host.presented.is_empty());
    }

    #[test]
    fn test_stopped_edits_resume_as_one_push() {
        let dir = tempfile::tempdir().unwrap();
        let (mut actor, _ws) = test_actor(dir.path(), RunState::Stopped, Duration::ZERO);

        fs::write(dir.path().join("index.html"), "<p>first</p>").unwrap();
        actor.on_files_changed(vec![BufferKind::Markup]);
        fs::write(dir.path().join("index.html"), "<p>second</p>").unwrap();
        actor.on_files_changed(vec![BufferKind::Markup]);

        assert!(actor.host.presented.is_empty());

        actor.on_set_running(true);

        // One push, reflecting the latest content only
        assert_eq!(actor.host.presented.len(), 1);
        assert!(actor.host.last().unwrap().contains("<p>second</p>"));
        assert!(!actor.host.last().unwrap().contains("<p>first</p>"));
    }

    #[test]
    fn test_resume_pushes_even_without_edits() {
        let dir = tempfile::tempdir().unwrap();
        let (mut actor, _ws) = test_actor(dir.path(), RunState::Stopped, Duration::ZERO);

        actor.on_set_running(true);
        assert_eq!(actor.host.presented.len(), 1);
    }

    #[test]
    fn test_toggle_echoes_state_once() {
        let dir = tempfile::tempdir().unwrap();
        let (mut actor, mut ws) = test_actor(dir.path(), RunState::Running, Duration::ZERO);

        actor.on_set_running(false);
        assert!(matches!(
            ws.try_recv(),
            Ok(WsMsg::RunState { running: false })
        ));

        // Same-state toggle: no echo, no push
        actor.on_set_running(false);
        assert!(ws.try_recv().is_err());
        assert!(actor.host.presented.is_empty());
    }

    #[test]
    fn test_reset_is_one_push_and_hits_disk() {
        let dir = tempfile::tempdir().unwrap();
        let (mut actor, _ws) = test_actor(dir.path(), RunState::Running, Duration::ZERO);

        actor.on_reset();

        assert_eq!(actor.host.presented.len(), 1);
        assert!(actor.host.last().unwrap().contains("Hello, World!"));

        let on_disk = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(on_disk.contains("Hello, World!"));
    }

    #[test]
    fn test_import_replaces_all_buffers_in_one_push() {
        let dir = tempfile::tempdir().unwrap();
        let (mut actor, _ws) = test_actor(dir.path(), RunState::Running, Duration::ZERO);

        actor.on_replace_all(
            "<h1>shared</h1>".into(),
            "h1 { color: blue }".into(),
            "console.log('shared');".into(),
        );

        assert_eq!(actor.host.presented.len(), 1);
        let doc = actor.host.last().unwrap();
        assert!(doc.contains("<h1>shared</h1>"));
        assert!(doc.contains("h1 { color: blue }"));
        assert!(doc.contains("console.log('shared');"));

        let css = fs::read_to_string(dir.path().join("styles.css")).unwrap();
        assert_eq!(css, "h1 { color: blue }");
    }

    #[test]
    fn test_multi_file_window_counts_as_one_push() {
        let dir = tempfile::tempdir().unwrap();
        // Debounce armed: a single-buffer edit would defer, but a
        // multi-file change is a replacement and pushes through
        let (mut actor, _ws) = test_actor(dir.path(), RunState::Running, Duration::from_millis(50));

        fs::write(dir.path().join("index.html"), "<p>x</p>").unwrap();
        fs::write(dir.path().join("styles.css"), "p { margin: 0 }").unwrap();
        actor.on_files_changed(vec![BufferKind::Markup, BufferKind::Style]);

        assert_eq!(actor.host.presented.len(), 1);
    }

    #[test]
    fn test_debounced_edit_waits_for_deadline() {
        let dir = tempfile::tempdir().unwrap();
        // A window far longer than any test-runner stall keeps the
        // injected-clock assertions deterministic
        let (mut actor, _ws) = test_actor(dir.path(), RunState::Running, Duration::from_secs(60));

        fs::write(dir.path().join("script.js"), "console.log(1);").unwrap();
        actor.on_files_changed(vec![BufferKind::Script]);
        assert!(actor.host.presented.is_empty());

        let now = Instant::now();
        actor.flush_deadline(now);
        assert!(actor.host.presented.is_empty());

        actor.flush_deadline(now + Duration::from_secs(120));
        assert_eq!(actor.host.presented.len(), 1);
        assert!(actor.host.last().unwrap().contains("console.log(1);"));
    }
}
