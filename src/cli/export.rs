//! Export command - write the pad to a directory.
//!
//! Produces the three source files under the output directory, in the
//! same shape a downloaded pad archive unpacks to. `--standalone` adds
//! `preview.html`, the composed document the preview itself executes,
//! for hosting the result without any tooling.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use crate::buffer::{BufferKind, BufferSet};
use crate::compose;
use crate::config::PadConfig;
use crate::log;

/// File name of the composed document written by `--standalone`.
const STANDALONE_FILE: &str = "preview.html";

/// Run the export command
pub fn run_export(config: &PadConfig, out: &Path, standalone: bool) -> Result<()> {
    let out = resolve_out_dir(config, out);
    if out.as_path() == config.get_root() {
        bail!("Output directory is the pad directory itself");
    }

    let buffers = BufferSet::load(&config.pad_paths()).context("Failed to read pad files")?;

    fs::create_dir_all(&out)
        .with_context(|| format!("Failed to create '{}'", out.display()))?;

    let mut written = 0usize;
    for kind in BufferKind::ALL {
        let path = out.join(kind.default_file_name());
        fs::write(&path, buffers.content(kind))
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        written += 1;
    }

    if standalone {
        let path = out.join(STANDALONE_FILE);
        fs::write(&path, compose::compose_set(&buffers))
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        written += 1;
    }

    log!("export"; "{} files written to {}", written, out.display());
    Ok(())
}

/// Resolve the output directory against the pad root.
///
/// A relative `--out` means "next to the pad", not "under whatever
/// directory the command happened to run from".
fn resolve_out_dir(config: &PadConfig, out: &Path) -> PathBuf {
    if out.is_absolute() {
        out.to_path_buf()
    } else {
        config.get_root().join(out)
    }
}
