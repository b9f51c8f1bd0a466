//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sandpad.toml`:
//!
//! | Module    | TOML Section | Purpose                             |
//! |-----------|--------------|-------------------------------------|
//! | `pad`     | `[pad]`      | Pad title and source file names     |
//! | `serve`   | `[serve]`    | Development server                  |
//! | `preview` | `[preview]`  | Autorun, debounce, sandbox grants   |
//! | `format`  | `[format]`   | Per-language formatter commands     |

mod format;
mod pad;
mod preview;
mod serve;

// Re-export section configs
pub use format::FormatConfig;
pub use pad::PadSectionConfig;
pub use preview::PreviewConfig;
pub use serve::ServeConfig;
