//! Target directory checks that run before anything is written.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// How `sandpad init` was invoked, which decides what the target
/// directory is allowed to look like.
#[derive(Debug, Clone, Copy)]
pub enum InitMode {
    /// `sandpad init` - initialize in current directory (must be empty)
    CurrentDir,
    /// `sandpad init <name>` - create new subdirectory (must not exist)
    NewDir,
}

impl InitMode {
    /// Refuse targets that would clobber existing files.
    pub fn check_target(self, root: &Path) -> Result<()> {
        match self {
            Self::CurrentDir if !is_empty(root)? => bail!(
                "Current directory is not empty.\n\
                 Use `sandpad init <name>` to create in a new subdirectory."
            ),
            Self::NewDir if root.exists() => bail!(
                "Directory '{}' already exists.\n\
                 Choose a different name or remove the existing directory.",
                root.display()
            ),
            _ => Ok(()),
        }
    }
}

/// True when the directory has no entries or does not exist yet.
fn is_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    let mut entries = fs::read_dir(path)
        .with_context(|| format!("Failed to read directory '{}'", path.display()))?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_current_dir_mode_accepts_empty() {
        let temp = TempDir::new().unwrap();
        assert!(InitMode::CurrentDir.check_target(temp.path()).is_ok());
    }

    #[test]
    fn test_current_dir_mode_rejects_populated() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("file.txt"), "content").unwrap();
        assert!(InitMode::CurrentDir.check_target(temp.path()).is_err());
    }

    #[test]
    fn test_new_dir_mode_rejects_existing() {
        let temp = TempDir::new().unwrap();
        assert!(InitMode::NewDir.check_target(temp.path()).is_err());
    }

    #[test]
    fn test_new_dir_mode_accepts_fresh_name() {
        let temp = TempDir::new().unwrap();
        let new_path = temp.path().join("new_pad");
        assert!(InitMode::NewDir.check_target(&new_path).is_ok());
    }
}
