//! Command-line surface, parsed by clap.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Sandpad live playground CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Color the output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: sandpad.toml)
    #[arg(short = 'C', long, default_value = "sandpad.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// One variant per sandpad command.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new pad from a template or a share token
    #[command(visible_alias = "i")]
    Init {
        /// Pad directory name/path (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Starter template name (starter, blank, canvas)
        #[arg(short, long, conflicts_with = "from")]
        template: Option<String>,

        /// Share URL or token to seed the pad from
        #[arg(short, long, value_name = "URL_OR_TOKEN")]
        from: Option<String>,
    },

    /// Serve the pad with live preview
    #[command(visible_alias = "s")]
    Serve {
        /// Interface to bind: 127.0.0.1, or 0.0.0.0 for the LAN
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port to serve on
        #[arg(short, long)]
        port: Option<u16>,

        /// Watch the pad files and push changes to connected shells
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Format pad buffers with the configured commands
    #[command(visible_alias = "f")]
    Fmt {
        /// Buffers to format (html, css, js). Omit for all three.
        #[arg(value_name = "KIND")]
        kinds: Vec<String>,

        /// Exit non-zero when a buffer is not already formatted,
        /// without rewriting anything
        #[arg(long)]
        check: bool,
    },

    /// Write the pad files to a directory
    #[command(visible_alias = "e")]
    Export {
        /// Output directory
        #[arg(short, long, default_value = "dist", value_hint = clap::ValueHint::DirPath)]
        out: PathBuf,

        /// Also write preview.html, the composed single document
        #[arg(short, long)]
        standalone: bool,
    },

    /// Print a share link for the current pad
    Share {
        /// Print an iframe embed snippet instead of the bare URL
        #[arg(short, long)]
        embed: bool,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_fmt(&self) -> bool {
        matches!(self.command, Commands::Fmt { .. })
    }
    pub const fn is_export(&self) -> bool {
        matches!(self.command, Commands::Export { .. })
    }
    pub const fn is_share(&self) -> bool {
        matches!(self.command, Commands::Share { .. })
    }
}
