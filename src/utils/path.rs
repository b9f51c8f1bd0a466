//! Path helpers.

use std::path::{Path, PathBuf};

/// Make `path` absolute without requiring it to exist.
///
/// Canonicalizes when possible, so a pad reached through a symlink
/// compares equal to its real location. Paths that do not exist yet are
/// anchored at cwd unchanged.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.is_absolute(), std::env::current_dir()) {
        (false, Ok(cwd)) => cwd.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_stays_absolute() {
        assert!(normalize_path(Path::new("/absolute/file.txt")).is_absolute());
    }

    #[test]
    fn test_relative_path_is_anchored() {
        let normalized = normalize_path(Path::new("missing/file.txt"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("missing/file.txt"));
    }
}
