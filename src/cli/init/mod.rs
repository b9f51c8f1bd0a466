//! Pad initialization module.
//!
//! Creates a new pad directory with default configuration.
//!
//! # Module Structure
//!
//! - [`validate`]: Pre-initialization validation
//! - [`config`]: Configuration file generation

mod config;
mod validate;

use crate::{
    buffer::{BufferSet, PadTemplate},
    config::PadConfig,
    log, share,
};
use anyhow::{Context, Result, anyhow};
use std::fs;

pub use validate::InitMode;

/// Create a new pad with config and seed buffer files
///
/// # Steps
/// 1. Validate target directory
/// 2. Resolve the initial buffer contents
/// 3. Write sandpad.toml and ignore files
/// 4. Write the three buffer files
pub fn new_pad(
    pad_config: &PadConfig,
    has_name: bool,
    template: Option<&str>,
    from: Option<&str>,
) -> Result<()> {
    let root = pad_config.get_root();
    let mode = if has_name {
        InitMode::NewDir
    } else {
        InitMode::CurrentDir
    };

    if let Err(e) = mode.check_target(root) {
        log!("error"; "{}", e);
        std::process::exit(1);
    }

    // Resolve contents before touching the filesystem, so a bad template
    // name or share token leaves no half-created directory behind.
    let buffers = initial_buffers(template, from)?;

    if !root.exists() {
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create directory '{}'", root.display()))?;
    }

    let title = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sandpad".to_string());
    config::write_config(root, &title)?;
    config::write_ignore_files(root)?;

    buffers
        .store(&pad_config.pad_paths())
        .context("Failed to write pad files")?;

    log!("init"; "Pad initialized, run `sandpad serve` to open it");
    Ok(())
}

/// Pick the initial buffer contents: a share import, a named built-in
/// template, or the default starter.
fn initial_buffers(template: Option<&str>, from: Option<&str>) -> Result<BufferSet> {
    if let Some(input) = from {
        let token = share::token_from_input(input).context("Failed to decode share token")?;
        return Ok(BufferSet::from_contents(token.html, token.css, token.js));
    }

    let template = match template {
        Some(name) => PadTemplate::named(name).ok_or_else(|| {
            anyhow!(
                "Unknown template '{}'. Available templates: {}",
                name,
                PadTemplate::names()
            )
        })?,
        None => PadTemplate::default_template(),
    };
    Ok(BufferSet::from_template(template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferKind;

    #[test]
    fn test_default_template_buffers() {
        let set = initial_buffers(None, None).unwrap();
        assert!(set.content(BufferKind::Markup).contains("<h1>"));
        assert!(!set.content(BufferKind::Script).is_empty());
    }

    #[test]
    fn test_named_template() {
        let set = initial_buffers(Some("blank"), None).unwrap();
        assert!(set.content(BufferKind::Style).is_empty());
        assert!(set.content(BufferKind::Script).is_empty());
    }

    #[test]
    fn test_unknown_template_lists_names() {
        let err = initial_buffers(Some("nope"), None).unwrap_err();
        assert!(err.to_string().contains("starter"));
    }

    #[test]
    fn test_share_token_seeds_buffers() {
        let token = share::ShareToken {
            html: "<p>imported</p>".into(),
            css: String::new(),
            js: "console.log(1)".into(),
        };
        let set = initial_buffers(None, Some(&token.encode().unwrap())).unwrap();
        assert_eq!(set.content(BufferKind::Markup), "<p>imported</p>");
        assert_eq!(set.content(BufferKind::Script), "console.log(1)");
    }

    #[test]
    fn test_from_wins_over_template() {
        let token = share::ShareToken {
            html: "<p>x</p>".into(),
            css: String::new(),
            js: String::new(),
        };
        let set = initial_buffers(Some("starter"), Some(&token.encode().unwrap())).unwrap();
        assert_eq!(set.content(BufferKind::Markup), "<p>x</p>");
    }
}
