//! Event dedup window for the pad watcher.
//!
//! Editors rarely produce one clean event per save; atomic writes show
//! up as create/remove/rename bursts. Everything landing within the
//! window collapses to one `ChangeKind` per path, anchored at the first
//! event so a burst cannot postpone the flush.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::utils::path::normalize_path;

pub(super) const DEBOUNCE_MS: u64 = 100;

/// What happened to a path within one debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Modified => "modified",
            ChangeKind::Removed => "removed",
        }
    }
}

/// Outcome of folding a new event into an existing entry.
enum Merge {
    /// First event wins; the window anchor stays put.
    Keep,
    Set(ChangeKind),
    Cancel,
}

/// Fold two events on the same path within one window.
///
/// A Removed followed by Created/Modified is an editor replacing the
/// file. A Created that gets Removed never really existed. Everything
/// else keeps the first kind.
fn merge(old: ChangeKind, new: ChangeKind) -> Merge {
    use ChangeKind::{Created, Modified, Removed};
    match (old, new) {
        (Removed, Created | Modified) => Merge::Set(new),
        (Modified, Removed) => Merge::Set(Removed),
        (Created, Removed) => Merge::Cancel,
        _ => Merge::Keep,
    }
}

/// Map a raw notify event to a change kind, or discard it.
fn classify(kind: notify::EventKind) -> Option<ChangeKind> {
    use notify::EventKind;
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Remove(_) => Some(ChangeKind::Removed),
        // Metadata-only changes (mtime, chmod) must not count as edits,
        // or touching a file would loop the preview forever
        EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        _ => None,
    }
}

/// Pure debouncer: only handles timing and event deduplication.
/// No business logic, no global state access.
pub(super) struct Debouncer {
    pub(super) changes: FxHashMap<PathBuf, ChangeKind>,
    pub(super) last_event: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new() -> Self {
        Self {
            changes: FxHashMap::default(),
            last_event: None,
        }
    }

    pub(super) fn add_event(&mut self, event: &notify::Event) {
        let Some(kind) = classify(event.kind) else {
            return;
        };

        crate::debug!("watch"; "raw notify: {:?} {:?}", event.kind, event.paths);

        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }
            let path = normalize_path(path);

            let op = match self.changes.get(&path) {
                Some(&existing) => merge(existing, kind),
                None => Merge::Set(kind),
            };
            match op {
                Merge::Keep => continue,
                Merge::Set(kind) => {
                    crate::debug!("watch"; "window {}: {}", kind.label(), path.display());
                    self.changes.insert(path, kind);
                }
                Merge::Cancel => {
                    crate::debug!("watch"; "created then removed, dropping {}", path.display());
                    self.changes.remove(&path);
                }
            }
            self.last_event = Some(Instant::now());
        }
    }

    /// Take the collected changes once the window elapsed.
    pub(super) fn take_if_ready(&mut self) -> Option<FxHashMap<PathBuf, ChangeKind>> {
        if !self.is_ready() {
            return None;
        }
        self.last_event = None;
        let changes = std::mem::take(&mut self.changes);
        (!changes.is_empty()).then_some(changes)
    }

    pub(super) fn is_ready(&self) -> bool {
        self.last_event
            .is_some_and(|anchor| anchor.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
            && !self.changes.is_empty()
    }

    /// Precise sleep duration until next possible ready time.
    pub(super) fn sleep_duration(&self) -> Duration {
        match self.last_event {
            Some(anchor) => Duration::from_millis(DEBOUNCE_MS)
                .saturating_sub(anchor.elapsed())
                .max(Duration::from_millis(1)),
            None => Duration::from_secs(86400),
        }
    }
}

/// Editor artifacts that must never count as pad edits.
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if name.starts_with('.') || name.ends_with('~') {
        return true;
    }
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
    )
}
