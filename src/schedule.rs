//! Render scheduling.
//!
//! Pure state machine deciding when a buffer change becomes a preview
//! push. No IO, no clocks of its own: callers pass `Instant::now()` in,
//! which keeps every transition testable without sleeping.
//!
//! The run state gates pushes:
//! - `Running`: changes push (immediately, or on a trailing-edge deadline
//!   when a debounce window is configured)
//! - `Stopped`: changes are recorded as dirty but nothing is pushed
//!
//! Leaving `Stopped` always produces exactly one push, whether or not
//! anything changed while stopped. Entering `Stopped` drops any pending
//! deferred push; the dirty flag survives so the eventual resume still
//! reflects those edits. An already-dispatched push is never recalled.

use std::time::{Duration, Instant};

/// Sleep this long when no deadline is armed.
const IDLE_SLEEP_SECS: u64 = 86400;

/// Whether buffer changes currently reach the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

impl RunState {
    pub fn is_running(self) -> bool {
        matches!(self, RunState::Running)
    }

    pub fn label(self) -> &'static str {
        match self {
            RunState::Running => "running",
            RunState::Stopped => "stopped",
        }
    }

    pub fn from_running(running: bool) -> Self {
        if running {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }
}

/// Something the scheduler reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleEvent {
    /// A single buffer's content changed.
    BufferChanged,
    /// All three buffers were replaced as one operation (reset, share
    /// token, template). Bypasses the debounce window.
    BulkReplaced,
    /// The run state was toggled.
    SetRunState(RunState),
}

/// What the caller should do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Compose and present the current buffers.
    Push,
    /// Change absorbed into the debounce window; a deadline is armed.
    Defer,
    /// Nothing to present.
    Skip,
}

/// The render scheduler.
pub struct Scheduler {
    run_state: RunState,
    /// Changes arrived while no push happened (only meaningful in Stopped).
    dirty: bool,
    debounce: Duration,
    /// Trailing-edge deadline for a deferred push. Only armed in Running.
    deadline: Option<Instant>,
}

impl Scheduler {
    pub fn new(initial: RunState, debounce: Duration) -> Self {
        Self {
            run_state: initial,
            dirty: false,
            debounce,
            deadline: None,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the debounce window (config hot-reload).
    ///
    /// An already-armed deadline keeps its old expiry; only later changes
    /// pick up the new window.
    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// Feed one event through the transition table.
    pub fn on_event(&mut self, event: ScheduleEvent, now: Instant) -> Decision {
        match event {
            ScheduleEvent::BufferChanged => match self.run_state {
                RunState::Stopped => {
                    self.dirty = true;
                    Decision::Skip
                }
                RunState::Running => {
                    if self.debounce.is_zero() {
                        self.mark_clean();
                        Decision::Push
                    } else {
                        // Trailing edge: every new change extends the window
                        self.dirty = true;
                        self.deadline = Some(now + self.debounce);
                        Decision::Defer
                    }
                }
            },
            ScheduleEvent::BulkReplaced => match self.run_state {
                RunState::Stopped => {
                    self.dirty = true;
                    Decision::Skip
                }
                RunState::Running => {
                    self.mark_clean();
                    Decision::Push
                }
            },
            ScheduleEvent::SetRunState(next) => {
                if next == self.run_state {
                    // Same-state toggle is a no-op
                    return Decision::Skip;
                }
                self.run_state = next;
                match next {
                    RunState::Stopped => {
                        // Keep dirty: resume must reflect edits made now
                        self.deadline = None;
                        Decision::Skip
                    }
                    RunState::Running => {
                        // Resume pushes unconditionally, exactly once
                        self.mark_clean();
                        Decision::Push
                    }
                }
            }
        }
    }

    /// Check whether an armed deadline has expired.
    pub fn on_deadline(&mut self, now: Instant) -> Decision {
        match self.deadline {
            Some(deadline) if now >= deadline && self.run_state.is_running() => {
                self.mark_clean();
                Decision::Push
            }
            _ => Decision::Skip,
        }
    }

    /// Precise sleep until the armed deadline, or effectively forever.
    pub fn sleep_duration(&self, now: Instant) -> Duration {
        match self.deadline {
            Some(deadline) => deadline
                .saturating_duration_since(now)
                .max(Duration::from_millis(1)),
            None => Duration::from_secs(IDLE_SLEEP_SECS),
        }
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.deadline = None;
    }
}
