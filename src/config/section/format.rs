//! `[format]` section configuration.
//!
//! Formatter commands, one argv vector per buffer language. Commands run
//! as stdin/stdout filters over the buffer content. `$PAD_FILE` and
//! `$PAD_LANG` are replaced before execution.
//!
//! # Example
//!
//! ```toml
//! [format]
//! markup = ["prettier", "--stdin-filepath", "$PAD_FILE"]
//! style = ["prettier", "--stdin-filepath", "$PAD_FILE"]
//! script = ["prettier", "--stdin-filepath", "$PAD_FILE"]
//! ```
//!
//! An empty argv disables formatting for that buffer.

use serde::{Deserialize, Serialize};

use crate::buffer::BufferKind;

/// Per-language formatter commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Formatter argv for the markup buffer.
    pub markup: Vec<String>,

    /// Formatter argv for the style buffer.
    pub style: Vec<String>,

    /// Formatter argv for the script buffer.
    pub script: Vec<String>,
}

fn prettier_default() -> Vec<String> {
    vec![
        "prettier".into(),
        "--stdin-filepath".into(),
        "$PAD_FILE".into(),
    ]
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            markup: prettier_default(),
            style: prettier_default(),
            script: prettier_default(),
        }
    }
}

impl FormatConfig {
    /// Formatter argv configured for a buffer kind.
    pub fn command_for(&self, kind: BufferKind) -> &[String] {
        match kind {
            BufferKind::Markup => &self.markup,
            BufferKind::Style => &self.style,
            BufferKind::Script => &self.script,
        }
    }
}
