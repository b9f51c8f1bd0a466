//! Share command - print a share URL for the current pad.
//!
//! The URL carries the entire pad in its `?code=` parameter, so it works
//! without any server-side storage. Output goes to stdout unadorned and
//! can be piped.

use anyhow::{Context, Result};

use crate::buffer::BufferSet;
use crate::config::PadConfig;
use crate::share::{self, ShareToken};

/// Run the share command
pub fn run_share(config: &PadConfig, embed: bool) -> Result<()> {
    let buffers = BufferSet::load(&config.pad_paths()).context("Failed to read pad files")?;
    let token = ShareToken::from_set(&buffers);
    let url =
        share::share_url(&config.serve.origin(), &token).context("Failed to encode share token")?;

    if embed {
        println!("{}", share::embed_snippet(&url));
    } else {
        println!("{url}");
    }
    Ok(())
}
