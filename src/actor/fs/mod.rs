//! Pad directory watcher.
//!
//! Turns raw notify events into debounced, classified change messages
//! for the PadActor. The watcher is created before anything else so no
//! edit can slip by while the rest of the system starts up.
//!
//! ```text
//! Watcher → Debouncer (pure timing) → classify (pad files?) → PadMsg
//! ```

use std::path::{Path, PathBuf};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashMap;
use tokio::sync::mpsc;

use super::messages::PadMsg;
use crate::buffer::{BufferKind, PadPaths};

// Pure timing and deduplication.
mod debouncer;

use debouncer::{ChangeKind, Debouncer};

/// Watches the pad directory and feeds the PadActor.
pub struct FsActor {
    /// Sync side of the notify bridge
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Dropping this stops the event stream
    watcher: RecommendedWatcher,
    /// PadActor inbox
    pad_tx: mpsc::Sender<PadMsg>,
    /// Timing and dedup state
    debouncer: Debouncer,
}

impl FsActor {
    /// Start watching `root` right away.
    ///
    /// Events buffer in the channel while the caller finishes wiring the
    /// rest of the actor system, so an edit made during startup is still
    /// seen once the loop runs.
    pub fn new(root: &Path, pad_tx: mpsc::Sender<PadMsg>) -> notify::Result<Self> {
        // notify delivers on a sync channel
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        // One recursive watch on the pad root covers the three pad files
        // and sandpad.toml; everything else is filtered out after the
        // debounce window.
        watcher.watch(root, RecursiveMode::Recursive)?;

        Ok(Self {
            notify_rx,
            watcher,
            pad_tx,
            debouncer: Debouncer::new(),
        })
    }

    /// Collect events until the PadActor goes away.
    pub async fn run(self) {
        let Self {
            notify_rx,
            // Keep the watcher alive for the whole loop
            watcher: _watcher,
            pad_tx,
            mut debouncer,
        } = self;

        let (async_tx, mut async_rx) = tokio::sync::mpsc::channel::<notify::Event>(64);

        // Bridge thread hops events from notify's sync channel into tokio
        std::thread::spawn(move || {
            for result in notify_rx.iter() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            return;
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                Some(event) = async_rx.recv() => debouncer.add_event(&event),
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    if flush_window(&mut debouncer, &pad_tx).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Flush one elapsed debounce window to the PadActor.
///
/// `Err` means the PadActor inbox is gone and the loop should end.
async fn flush_window(debouncer: &mut Debouncer, pad_tx: &mpsc::Sender<PadMsg>) -> Result<(), ()> {
    // Until the pad is loaded, leave events queued in the debouncer
    // rather than taking and dropping them
    if !crate::core::is_serving() {
        return Ok(());
    }

    let Some(raw_events) = debouncer.take_if_ready() else {
        return Ok(());
    };

    // Classify against the CURRENT config: pad file names can change
    // across a config reload
    let config = crate::config::cfg();
    let changes = classify(&raw_events, &config.pad_paths(), &config.config_path);

    if changes.config {
        // A config reload re-reads all pad files anyway, so per-buffer
        // events from the same window are redundant
        pad_tx.send(PadMsg::ConfigChanged).await.map_err(|_| ())?;
        return Ok(());
    }

    if !changes.kinds.is_empty() {
        pad_tx
            .send(PadMsg::FileChanged(changes.kinds))
            .await
            .map_err(|_| ())?;
    }

    Ok(())
}

/// Classified outcome of one debounce window.
#[derive(Debug, Default, PartialEq, Eq)]
struct PadChanges {
    /// Pad buffers whose backing file changed, in composition order
    kinds: Vec<BufferKind>,
    /// sandpad.toml changed
    config: bool,
}

/// Map raw path changes onto pad buffers and the config file.
///
/// Paths are compared after normalization on both sides; anything that
/// is neither a pad file nor the config is ignored (the pad directory
/// may hold arbitrary other files).
fn classify(
    changes: &FxHashMap<PathBuf, ChangeKind>,
    paths: &PadPaths,
    config_path: &Path,
) -> PadChanges {
    let mut result = PadChanges::default();

    for (path, kind) in changes {
        if path == config_path {
            result.config = true;
            continue;
        }

        match BufferKind::ALL.into_iter().find(|k| paths.get(*k) == path) {
            Some(buffer_kind) => {
                if !result.kinds.contains(&buffer_kind) {
                    result.kinds.push(buffer_kind);
                }
            }
            None => {
                crate::debug!("watch"; "ignoring {} ({})", path.display(), kind.label());
            }
        }
    }

    result.kinds.sort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad_paths() -> PadPaths {
        PadPaths {
            markup: PathBuf::from("/pad/index.html"),
            style: PathBuf::from("/pad/styles.css"),
            script: PathBuf::from("/pad/script.js"),
        }
    }

    fn changes(paths: &[&str]) -> FxHashMap<PathBuf, ChangeKind> {
        paths
            .iter()
            .map(|p| (PathBuf::from(p), ChangeKind::Modified))
            .collect()
    }

    #[test]
    fn test_classify_pad_files() {
        let result = classify(
            &changes(&["/pad/styles.css"]),
            &pad_paths(),
            Path::new("/pad/sandpad.toml"),
        );
        assert_eq!(result.kinds, vec![BufferKind::Style]);
        assert!(!result.config);
    }

    #[test]
    fn test_classify_ignores_unrelated_files() {
        let result = classify(
            &changes(&["/pad/notes.txt", "/pad/sub/other.js"]),
            &pad_paths(),
            Path::new("/pad/sandpad.toml"),
        );
        assert!(result.kinds.is_empty());
        assert!(!result.config);
    }

    #[test]
    fn test_classify_config_file() {
        let result = classify(
            &changes(&["/pad/sandpad.toml", "/pad/index.html"]),
            &pad_paths(),
            Path::new("/pad/sandpad.toml"),
        );
        assert!(result.config);
        // The pad file is still reported; the caller decides precedence
        assert_eq!(result.kinds, vec![BufferKind::Markup]);
    }

    #[test]
    fn test_classify_orders_by_composition() {
        let result = classify(
            &changes(&["/pad/script.js", "/pad/index.html", "/pad/styles.css"]),
            &pad_paths(),
            Path::new("/pad/sandpad.toml"),
        );
        assert_eq!(
            result.kinds,
            vec![BufferKind::Markup, BufferKind::Style, BufferKind::Script]
        );
    }
}
