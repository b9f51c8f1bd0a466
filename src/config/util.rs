//! Config file discovery.

use std::path::{Path, PathBuf};

/// Locate `config_name` by walking up from the current directory.
///
/// An absolute `config_name` short-circuits the walk. Otherwise each
/// ancestor of cwd is tried in turn, so `sandpad serve` works from
/// anywhere inside a pad directory.
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    std::iter::successors(Some(cwd.as_path()), |dir| dir.parent())
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}
