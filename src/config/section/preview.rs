//! `[preview]` section configuration.
//!
//! Controls how composed documents reach the preview shell.
//!
//! # Example
//!
//! ```toml
//! [preview]
//! autorun = true                            # Start in the running state
//! debounce_ms = 0                           # Quiet window before a push (0 = push per change)
//! sandbox = ["scripts", "same-origin"]      # Iframe capability grants
//! ```

use serde::{Deserialize, Serialize};

use crate::sandbox::SandboxPolicy;

/// Preview pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Start in the running state. When false, the preview stays blank
    /// until the shell's Run toggle is pressed.
    pub autorun: bool,

    /// Quiet window between an edit and its push, in milliseconds.
    /// 0 pushes on every change.
    pub debounce_ms: u64,

    /// Capability grants for the preview iframe.
    pub sandbox: SandboxPolicy,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            autorun: true,
            debounce_ms: 0,
            sandbox: SandboxPolicy::baseline(),
        }
    }
}
