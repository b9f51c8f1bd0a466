//! Subcommand implementations.

mod args;
pub mod export;
pub mod fmt;
pub mod init;
pub mod serve;
pub mod share;

pub use args::{Cli, Commands};
