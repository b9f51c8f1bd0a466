//! Errors raised while loading `sandpad.toml`.
//!
//! These surface through `anyhow` at the CLI boundary; the variants exist
//! so load failures name the file and stage that failed.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML in config file")]
    Toml(#[source] toml::de::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}
