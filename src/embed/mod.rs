//! Embedded static resources for sandpad.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `serve` - Preview shell assets (shell.html, preview.js)
//!
//! # Usage
//!
//! ```ignore
//! use embed::serve::{SHELL_HTML, ShellVars};
//!
//! let html = SHELL_HTML.render(&ShellVars::from_config(&config));
//! ```

mod template;

// Re-export core types
pub use template::{Template, TemplateVars};

pub mod serve {
    use std::borrow::Cow;

    use super::{Template, TemplateVars};
    use crate::config::PadConfig;

    /// URL the shell loads the client script from.
    pub const PREVIEW_JS_URL: &str = "/__sandpad/preview.js";

    /// Variables for shell.html.
    pub struct ShellVars {
        pub title: String,
        pub version: &'static str,
        pub sandbox_attr: String,
        pub running: bool,
    }

    impl ShellVars {
        /// Build shell variables from pad config.
        pub fn from_config(config: &PadConfig) -> Self {
            Self {
                title: config.pad.title.clone(),
                version: env!("CARGO_PKG_VERSION"),
                sandbox_attr: config.preview.sandbox.attr_value(),
                running: config.preview.autorun,
            }
        }
    }

    impl TemplateVars for ShellVars {
        fn substitutions(&self) -> Vec<(&'static str, Cow<'_, str>)> {
            vec![
                // Titles come from sandpad.toml, so escape before they
                // land in the page
                ("__SANDPAD_TITLE__", crate::utils::html::escape(&self.title)),
                ("__SANDPAD_VERSION__", Cow::Borrowed(self.version)),
                ("__SANDPAD_SANDBOX__", Cow::Borrowed(self.sandbox_attr.as_str())),
                (
                    "__SANDPAD_RUNNING__",
                    Cow::Borrowed(if self.running { "true" } else { "false" }),
                ),
            ]
        }
    }

    /// Preview shell page (CSS inlined at build time).
    pub const SHELL_HTML: Template<ShellVars> =
        Template::new(include_str!(concat!(env!("OUT_DIR"), "/shell.html")));

    /// Variables for preview.js.
    pub struct PreviewVars {
        pub ws_port: u16,
    }

    impl TemplateVars for PreviewVars {
        fn substitutions(&self) -> Vec<(&'static str, Cow<'_, str>)> {
            vec![("__SANDPAD_WS_PORT__", Cow::Owned(self.ws_port.to_string()))]
        }
    }

    /// Shell client script with WebSocket port injection (minified at
    /// build time).
    pub const PREVIEW_JS: Template<PreviewVars> =
        Template::new(include_str!(concat!(env!("OUT_DIR"), "/preview.min.js")));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_html_with_vars() {
        let vars = serve::ShellVars {
            title: "my pad".to_string(),
            version: "1.0.0",
            sandbox_attr: "allow-scripts allow-same-origin".to_string(),
            running: true,
        };
        let rendered = serve::SHELL_HTML.render(&vars);
        assert!(rendered.contains("my pad"));
        assert!(rendered.contains("1.0.0"));
        assert!(rendered.contains("allow-scripts allow-same-origin"));
        assert!(!rendered.contains("__SANDPAD_TITLE__"));
        assert!(!rendered.contains("__SANDPAD_VERSION__"));
        assert!(!rendered.contains("__SANDPAD_SANDBOX__"));
        assert!(!rendered.contains("__SANDPAD_RUNNING__"));
        // CSS was inlined at build time
        assert!(!rendered.contains("__SANDPAD_SHELL_CSS__"));
    }

    #[test]
    fn test_shell_html_escapes_title() {
        let vars = serve::ShellVars {
            title: "<script>alert(1)</script>".to_string(),
            version: "1.0.0",
            sandbox_attr: String::new(),
            running: false,
        };
        let rendered = serve::SHELL_HTML.render(&vars);
        assert!(!rendered.contains("<script>alert(1)</script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_preview_js_with_vars() {
        let vars = serve::PreviewVars { ws_port: 35729 };
        let rendered = serve::PREVIEW_JS.render(&vars);
        assert!(rendered.contains("35729"));
        assert!(!rendered.contains("__SANDPAD_WS_PORT__"));
    }

    #[test]
    fn test_shell_vars_from_config() {
        let config = crate::config::PadConfig::default();
        let vars = serve::ShellVars::from_config(&config);
        assert_eq!(vars.title, "sandpad");
        assert!(vars.running);
        assert!(vars.sandbox_attr.contains("allow-scripts"));
    }
}
