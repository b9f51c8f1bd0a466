//! `[pad]` section configuration.
//!
//! Identifies the pad and names its three source files.
//!
//! # Example
//!
//! ```toml
//! [pad]
//! title = "my pad"            # Shown in the shell tab and header
//! markup = "index.html"       # Markup buffer file, relative to the pad root
//! style = "styles.css"        # Style buffer file
//! script = "script.js"        # Script buffer file
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::buffer::BufferKind;

/// Pad identity and source file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PadSectionConfig {
    /// Pad title, shown in the shell tab and header.
    pub title: String,

    /// Markup buffer file, relative to the pad root.
    pub markup: PathBuf,

    /// Style buffer file, relative to the pad root.
    pub style: PathBuf,

    /// Script buffer file, relative to the pad root.
    pub script: PathBuf,
}

impl Default for PadSectionConfig {
    fn default() -> Self {
        Self {
            title: "sandpad".into(),
            markup: PathBuf::from(BufferKind::Markup.default_file_name()),
            style: PathBuf::from(BufferKind::Style.default_file_name()),
            script: PathBuf::from(BufferKind::Script.default_file_name()),
        }
    }
}

impl PadSectionConfig {
    /// File name configured for a buffer kind, before root resolution.
    pub fn file_for(&self, kind: BufferKind) -> &PathBuf {
        match kind {
            BufferKind::Markup => &self.markup,
            BufferKind::Style => &self.style,
            BufferKind::Script => &self.script,
        }
    }
}
