//! Fmt command - run the configured formatters over the pad files.
//!
//! Each buffer file is piped through its formatter and rewritten in
//! place when the output differs. A formatter error leaves the file
//! untouched and is reported as a warning; under `--check` nothing is
//! written and a non-clean or failing pad exits with an error.

use anyhow::{Result, bail};
use std::fs;
use std::io;

use crate::buffer::BufferKind;
use crate::config::PadConfig;
use crate::format::{self, FormatError};
use crate::utils::plural::plural_s;
use crate::{debug, log};

/// Per-file outcome
enum FmtOutcome {
    /// Output matched the input
    Clean,
    /// Rewritten in place, or flagged under `--check`
    Changed,
    /// Nothing to do: no formatter configured, or the file is missing
    Skipped,
    /// Formatter error, file left untouched
    Failed,
}

/// Run the fmt command
pub fn run_fmt(config: &PadConfig, kinds: &[String], check: bool) -> Result<()> {
    let kinds = resolve_kinds(kinds)?;
    let paths = config.pad_paths();

    let mut changed = 0usize;
    let mut failed = 0usize;

    for kind in kinds {
        let path = paths.get(kind);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| kind.to_string());

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log!("fmt"; "{} missing, skipped", name);
                continue;
            }
            Err(e) => bail!("Failed to read '{}': {}", path.display(), e),
        };

        let outcome = match format::format_content(
            kind,
            &content,
            config.format.command_for(kind),
            &name,
        ) {
            Ok(formatted) if formatted == content => FmtOutcome::Clean,
            Ok(formatted) => {
                if check {
                    log!("fmt"; "{} would be reformatted", name);
                } else {
                    fs::write(path, formatted)
                        .map_err(|e| anyhow::anyhow!("Failed to write '{}': {}", path.display(), e))?;
                    log!("fmt"; "reformatted {}", name);
                }
                FmtOutcome::Changed
            }
            Err(FormatError::NotConfigured(_)) => {
                debug!("fmt"; "no formatter configured for {}", kind);
                FmtOutcome::Skipped
            }
            Err(e) => {
                log!("warning"; "{}", e);
                FmtOutcome::Failed
            }
        };

        match outcome {
            FmtOutcome::Clean => debug!("fmt"; "{} already formatted", name),
            FmtOutcome::Changed => changed += 1,
            FmtOutcome::Skipped | FmtOutcome::Failed => {
                if matches!(outcome, FmtOutcome::Failed) {
                    failed += 1;
                }
            }
        }
    }

    if check {
        if changed > 0 {
            bail!("{} file{} would be reformatted", changed, plural_s(changed));
        }
        if failed > 0 {
            bail!("{} formatter{} failed", failed, plural_s(failed));
        }
        log!("fmt"; "all files formatted");
    } else if changed == 0 && failed == 0 {
        log!("fmt"; "nothing to reformat");
    }

    Ok(())
}

// =============================================================================
// Argument resolution
// =============================================================================

/// Map CLI kind names to buffers, defaulting to all three.
fn resolve_kinds(kinds: &[String]) -> Result<Vec<BufferKind>> {
    if kinds.is_empty() {
        return Ok(BufferKind::ALL.to_vec());
    }

    let mut resolved = Vec::with_capacity(kinds.len());
    for name in kinds {
        match BufferKind::from_name(name) {
            Some(kind) if !resolved.contains(&kind) => resolved.push(kind),
            Some(_) => {}
            None => bail!(
                "Unknown buffer '{}'. Accepted names: html, css, js, markup, style, script",
                name
            ),
        }
    }
    Ok(resolved)
}
