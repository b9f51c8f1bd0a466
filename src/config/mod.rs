//! Pad configuration management for `sandpad.toml`.
//!
//! Loading runs in a fixed order: find the config file (walking up from
//! cwd), parse it (warning on unknown fields), check the raw `[pad]`
//! file names, make every path absolute under the pad root, apply CLI
//! overrides, then validate the result.
//!
//! # Sections
//!
//! | Section     | Purpose                                      |
//! |-------------|----------------------------------------------|
//! | `[pad]`     | Pad title and the three source file names    |
//! | `[serve]`   | Development server (port, interface, watch)  |
//! | `[preview]` | Autorun, debounce window, sandbox grants     |
//! | `[format]`  | Per-language formatter commands              |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

// Re-export from section/
pub use section::{FormatConfig, PadSectionConfig, PreviewConfig, ServeConfig};

// Re-export from types/
pub use types::{ConfigError, cfg, init_config, reload_config};

use crate::{
    buffer::{BufferKind, PadPaths},
    cli::{Cli, Commands},
    log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sandpad.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PadConfig {
    /// CLI arguments, attached after parsing
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Where the config file was found
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Pad root, the config file's parent directory
    #[serde(skip)]
    pub root: PathBuf,

    /// Pad identity and source file names
    #[serde(default)]
    pub pad: PadSectionConfig,

    /// HTTP server interface, port and watch toggle
    #[serde(default)]
    pub serve: ServeConfig,

    /// Preview pipeline settings
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Formatter commands
    #[serde(default)]
    pub format: FormatConfig,
}

impl PadConfig {
    /// Load configuration from CLI arguments.
    ///
    /// For non-Init commands, searches upward from cwd to find the config
    /// file. The pad root is the config file's parent directory.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        // Init writes a fresh config, so it starts from defaults and
        // skips every validation that assumes a pad on disk
        if cli.is_init() {
            let mut config = Self::default();
            config.config_path = config_path;
            config.cli = Some(cli);
            config.finalize(cli);
            return Ok(config);
        }

        if !exists {
            log!(
                "error";
                "Config file '{}' not found. Run 'sandpad init' to create a new pad.",
                cli.config.display()
            );
            std::process::exit(1);
        }

        let mut config = Self::from_path(&config_path)?;

        // Raw paths must be checked before normalization makes them
        // absolute
        config.validate_paths()?;

        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Where the config file is (or would be) for this invocation.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to read the current directory")?;

        // Init knows exactly where the config will live; other commands
        // search upward so sandpad works from anywhere inside the pad
        match &cli.command {
            Commands::Init { name, .. } => {
                let dir = match name {
                    Some(name) => cwd.join(name),
                    None => cwd,
                };
                let path = dir.join(&cli.config);
                let exists = path.exists();
                Ok((path, exists))
            }
            _ => match find_config_file(&cli.config) {
                Some(path) => Ok((path, true)),
                None => Ok((cwd.join(&cli.config), false)),
            },
        }
    }

    /// Anchor all paths under the pad root and apply CLI overrides.
    fn finalize(&mut self, cli: &Cli) {
        let root = match &cli.command {
            Commands::Init { name, .. } => {
                let cwd = std::env::current_dir().unwrap_or_default();
                match name {
                    Some(name) => cwd.join(name),
                    None => cwd,
                }
            }
            _ => self
                .config_path
                .parent()
                .map_or_else(PathBuf::new, Path::to_path_buf),
        };

        // normalize_paths records the normalized root itself
        self.normalize_paths(&root);
        self.apply_command_options(cli);
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Read and parse the config file. Unknown fields (usually typos)
    /// stop the load unless the user confirms.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if ignored.is_empty() {
            return Ok(config);
        }

        Self::print_unknown_fields_warning(&ignored, path);
        if Self::prompt_continue()? {
            Ok(config)
        } else {
            bail!("Aborted due to unknown config fields")
        }
    }

    /// Parse TOML, recording every field serde had no use for.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |field: serde_ignored::Path| {
            ignored.push(field.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // Show only the file name; the config always sits at the pad root
        let name = path.file_name().unwrap_or(path.as_os_str());
        eprintln!();
        log!("warning"; "ignoring unknown fields in {}:", name.to_string_lossy());
        for field in fields {
            eprintln!("- {}", field);
        }
        eprintln!();
    }

    /// Ask on stderr; anything but an explicit yes declines.
    fn prompt_continue() -> Result<bool> {
        use std::io::{self, Write};

        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        Ok(matches!(
            input.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    /// Pad root directory.
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Replace the pad root.
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Resolved absolute locations of the three pad files.
    ///
    /// Only meaningful after `load()`: normalization has made the `[pad]`
    /// file names absolute under the pad root by then.
    pub fn pad_paths(&self) -> PadPaths {
        PadPaths {
            markup: self.pad.markup.clone(),
            style: self.pad.style.clone(),
            script: self.pad.script.clone(),
        }
    }

    // ========================================================================
    // cli overrides
    // ========================================================================

    /// Fold command-line flags into the parsed config. Flags win.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Serve {
                interface,
                port,
                watch,
            } => {
                if let Some(interface) = interface {
                    self.serve.interface = *interface;
                }
                if let Some(port) = port {
                    self.serve.port = *port;
                }
                if let Some(watch) = watch {
                    self.serve.watch = *watch;
                }
            }
            Commands::Init { .. } => {}
            // Fmt, Export and Share read the config as-is
            Commands::Fmt { .. } | Commands::Export { .. } | Commands::Share { .. } => {}
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Rewrite every stored path to an absolute one under `root`.
    fn normalize_paths(&mut self, root: &Path) {
        let root = crate::utils::path::normalize_path(root);
        self.set_root(&root);

        self.config_path = crate::utils::path::normalize_path(&self.config_path);

        // The three pad files live under the root
        self.pad.markup = crate::utils::path::normalize_path(&root.join(&self.pad.markup));
        self.pad.style = crate::utils::path::normalize_path(&root.join(&self.pad.style));
        self.pad.script = crate::utils::path::normalize_path(&root.join(&self.pad.script));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Check the raw `[pad]` file names as written in the TOML.
    ///
    /// This must run before `finalize()` because normalization makes every
    /// path absolute, after which an absolute path in the config can no
    /// longer be told apart from a normalized relative one.
    fn validate_paths(&self) -> Result<()> {
        for kind in BufferKind::ALL {
            let path = self.pad.file_for(kind);
            if path.as_os_str().is_empty() {
                bail!(ConfigError::Validation(format!(
                    "[pad] {} file name is empty",
                    kind
                )));
            }
            if path.is_absolute() {
                bail!(ConfigError::Validation(format!(
                    "[pad] {} must be relative to the pad root, got `{}`",
                    kind,
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Validate configuration for the current command.
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!(ConfigError::Validation("config file not found".into()));
        }

        // The three pad files must be distinct; a shared file would make
        // one edit count as several buffer changes
        if self.pad.markup == self.pad.style
            || self.pad.markup == self.pad.script
            || self.pad.style == self.pad.script
        {
            bail!(ConfigError::Validation(
                "[pad] markup, style and script must name three distinct files".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// test helpers
// ============================================================================

/// Parse a TOML snippet into a [`PadConfig`], panicking on unknown fields
/// so a typo in a test fixture fails loudly.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PadConfig {
    let (parsed, ignored) = PadConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "unknown fields in test config: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broken_toml_is_rejected() {
        // Unclosed bracket
        let result = PadConfig::from_str("[pad\ntitle = \"My Pad\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_root_accessors() {
        let mut config = PadConfig::default();
        // Empty until load() anchors it at the config file's directory
        assert_eq!(config.get_root(), Path::new(""));

        config.set_root(Path::new("/custom/path"));
        assert_eq!(config.get_root(), Path::new("/custom/path"));
    }

    #[test]
    fn test_pad_config_default() {
        let config = PadConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.pad.title, "sandpad");
        assert_eq!(config.serve.port, 5173);
        assert!(config.preview.autorun);
        assert_eq!(config.preview.debounce_ms, 0);
    }

    #[test]
    fn test_typo_sections_are_collected_not_fatal() {
        let content = "[pad]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = PadConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.pad.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_clean_config_reports_nothing_ignored() {
        let content = "[pad]\ntitle = \"Test\"";
        let (_, ignored) = PadConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_validate_rejects_shared_files() {
        let mut config = test_parse_config("[pad]\nstyle = \"index.html\"");
        config.config_path = std::env::temp_dir(); // exists, so only distinctness trips
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }

    #[test]
    fn test_validate_paths_rejects_absolute() {
        let config = test_parse_config("[pad]\nmarkup = \"/etc/index.html\"");
        assert!(config.validate_paths().is_err());
    }

    #[test]
    fn test_pad_paths_composition_order() {
        let config = test_parse_config("");
        let paths = config.pad_paths();
        assert_eq!(paths.get(BufferKind::Markup), Path::new("index.html"));
        assert_eq!(paths.get(BufferKind::Style), Path::new("styles.css"));
        assert_eq!(paths.get(BufferKind::Script), Path::new("script.js"));
    }
}
