//! The process-wide config handle.
//!
//! Readers get an `Arc` snapshot through `arc-swap` without locking, so
//! the serve hot path never waits on a config reload. Reloads first
//! compare a content hash of `sandpad.toml`: touching the file without
//! changing it is common (editors rewrite on save) and should not churn
//! the actor pipeline.

use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use anyhow::Result;
use arc_swap::ArcSwap;

use crate::config::PadConfig;
use crate::utils::hash::content_hash;

static CONFIG: LazyLock<ArcSwap<PadConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(PadConfig::default()));

/// Fingerprint of the `sandpad.toml` text the current config came from.
static LOADED_HASH: AtomicU64 = AtomicU64::new(0);

/// Snapshot of the current config.
#[inline]
pub fn cfg() -> Arc<PadConfig> {
    CONFIG.load_full()
}

/// Install the startup config and remember its file fingerprint.
pub fn init_config(config: PadConfig) -> Arc<PadConfig> {
    match fs::read_to_string(&config.config_path) {
        Ok(content) => LOADED_HASH.store(content_hash(&content), Ordering::Relaxed),
        // No file yet (init), nothing to fingerprint
        Err(_) => LOADED_HASH.store(0, Ordering::Relaxed),
    }

    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}

/// Re-read `sandpad.toml` and swap the global config if its text changed.
///
/// Returns `Ok(true)` when a new config was installed, `Ok(false)` when
/// the file content was identical to the loaded one.
pub fn reload_config() -> Result<bool> {
    let current = cfg();
    let cli = current.cli.expect("CLI should be set during initialization");

    let content = fs::read_to_string(&current.config_path)?;
    let fingerprint = content_hash(&content);
    if fingerprint == LOADED_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let reloaded = PadConfig::load(cli)?;
    CONFIG.store(Arc::new(reloaded));
    LOADED_HASH.store(fingerprint, Ordering::Relaxed);
    Ok(true)
}
