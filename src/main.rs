//! Sandpad - a live HTML/CSS/JS playground served from local files.

#![allow(dead_code)]

mod actor;
mod buffer;
mod cli;
mod compose;
mod config;
mod core;
mod embed;
mod format;
mod logger;
mod preview;
mod sandbox;
mod schedule;
mod share;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{PadConfig, init_config};

fn main() -> Result<()> {
    // Install the Ctrl+C handler before anything can block
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        // owo-colors detects a TTY on its own
        ColorChoice::Auto => {}
    }

    logger::set_verbose(cli.verbose);

    let config = init_config(PadConfig::load(cli)?);

    match &cli.command {
        Commands::Init {
            name,
            template,
            from,
        } => cli::init::new_pad(&config, name.is_some(), template.as_deref(), from.as_deref()),
        Commands::Serve { .. } => cli::serve::run_serve(),
        Commands::Fmt { kinds, check } => cli::fmt::run_fmt(&config, kinds, *check),
        Commands::Export { out, standalone } => cli::export::run_export(&config, out, *standalone),
        Commands::Share { embed } => cli::share::run_share(&config, *embed),
    }
}
