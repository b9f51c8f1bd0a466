//! sandpad.toml and ignore files for a fresh pad.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Default config filename
const CONFIG_FILE: &str = "sandpad.toml";

/// Both git and plain ripgrep-style ignore files are written
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Render the commented starter sandpad.toml.
pub fn generate_config_template(title: &str) -> String {
    let mut out = format!(
        "# sandpad.toml - created by sandpad v{}\n\n",
        env!("CARGO_PKG_VERSION")
    );

    // [pad] section
    out.push_str("[pad]\n");
    out.push_str(&format!("title = \"{}\"\n", toml_escape(title)));
    out.push_str("# The three buffer files, relative to this directory.\n");
    out.push_str("markup = \"index.html\"\n");
    out.push_str("style = \"styles.css\"\n");
    out.push_str("script = \"script.js\"\n\n");

    // [serve] section
    out.push_str("[serve]\n");
    out.push_str("interface = \"127.0.0.1\"  # Network interface to bind\n");
    out.push_str("port = 5173               # Port number\n");
    out.push_str("watch = true              # Push file edits to connected shells\n\n");

    // [preview] section
    out.push_str("[preview]\n");
    out.push_str("autorun = true            # Start in the running state\n");
    out.push_str("debounce_ms = 0           # Quiet window before a push, in milliseconds\n");
    out.push_str("sandbox = [\"scripts\", \"same-origin\"]  # Iframe capability grants\n\n");

    // [format] section
    out.push_str("[format]\n");
    out.push_str("# Formatter command per buffer, run as a stdin/stdout filter.\n");
    out.push_str("# $PAD_FILE and $PAD_LANG are substituted before execution;\n");
    out.push_str("# an empty list disables formatting for that buffer.\n");
    out.push_str("markup = [\"prettier\", \"--stdin-filepath\", \"$PAD_FILE\"]\n");
    out.push_str("style = [\"prettier\", \"--stdin-filepath\", \"$PAD_FILE\"]\n");
    out.push_str("script = [\"prettier\", \"--stdin-filepath\", \"$PAD_FILE\"]\n");

    out
}

/// Escape a string for use inside a TOML basic string.
fn toml_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Put the starter sandpad.toml in `root`.
pub fn write_config(root: &Path, title: &str) -> Result<()> {
    let content = generate_config_template(title);

    let path = root.join(CONFIG_FILE);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    Ok(())
}

/// Seed ignore files so `sandpad export` output and OS droppings stay
/// out of version control.
pub fn write_ignore_files(root: &Path) -> Result<()> {
    let patterns = ["/dist/", ".DS_Store"];
    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        // A file the user already has wins
        if !path.exists() {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_config_lands_in_root() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "my-pad").unwrap();

        let config_path = temp.path().join("sandpad.toml");
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[pad]"));
        assert!(content.contains("title = \"my-pad\""));
        assert!(content.contains("[preview]"));
    }

    #[test]
    fn test_generated_config_parses() {
        let content = generate_config_template("demo");
        let config = crate::config::PadConfig::from_str(&content).unwrap();
        assert_eq!(config.pad.title, "demo");
        assert_eq!(config.serve.port, 5173);
        assert!(config.preview.autorun);
    }

    #[test]
    fn test_title_escaped() {
        let content = generate_config_template("say \"hi\"");
        assert!(content.contains("title = \"say \\\"hi\\\"\""));
    }

    #[test]
    fn test_ignore_files_cover_export_dir() {
        let temp = TempDir::new().unwrap();
        write_ignore_files(temp.path()).unwrap();

        let gitignore = temp.path().join(".gitignore");
        assert!(gitignore.exists());

        let content = fs::read_to_string(&gitignore).unwrap();
        assert!(content.contains("/dist/"));
        assert!(content.contains(".DS_Store"));
    }

    #[test]
    fn test_existing_ignore_file_is_kept() {
        let temp = TempDir::new().unwrap();
        let gitignore = temp.path().join(".gitignore");
        fs::write(&gitignore, "custom content").unwrap();

        write_ignore_files(temp.path()).unwrap();

        let content = fs::read_to_string(&gitignore).unwrap();
        assert_eq!(content, "custom content");
    }
}
