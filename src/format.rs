//! External formatter integration.
//!
//! Formatters are configured per buffer language as argv vectors and run
//! as stdin/stdout filters: the buffer content goes in, the formatted
//! content comes out. `$PAD_FILE` and `$PAD_LANG` in arguments are
//! replaced before execution, so tools like prettier can infer a parser
//! from `--stdin-filepath $PAD_FILE`.
//!
//! A failing formatter never damages a buffer: on any error the caller
//! keeps the original content byte for byte. Empty output for non-empty
//! input counts as failure, since no formatter legitimately formats
//! something into nothing.

use std::io::Write;
use std::process::{Command, Stdio};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::buffer::BufferKind;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("no formatter configured for {0}")]
    NotConfigured(BufferKind),
    #[error("formatter `{0}` not found in PATH")]
    MissingTool(String),
    #[error("failed to run formatter `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("formatter `{command}` exited with {status}{detail}")]
    Failed {
        command: String,
        status: String,
        detail: String,
    },
    #[error("formatter `{0}` produced empty output for non-empty input")]
    EmptyOutput(String),
}

/// Build the `$PAD_*` variables available to formatter arguments.
fn pad_vars(kind: BufferKind, file_name: &str) -> FxHashMap<String, String> {
    let mut vars = FxHashMap::default();
    vars.insert("PAD_FILE".into(), file_name.into());
    vars.insert("PAD_LANG".into(), kind.label().into());
    vars
}

/// Resolve `$PAD_*` variables in command arguments.
///
/// Replaces occurrences of `$PAD_XXX` with actual values from the vars map.
pub fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in vars {
                let pattern = format!("${}", key);
                result = result.replace(&pattern, value);
            }
            result
        })
        .collect()
}

/// Run the configured formatter over one buffer's content.
///
/// Returns the formatted content. Every error path leaves the input
/// untouched; the caller decides whether an error is a warning (default)
/// or a failure (`--check`).
pub fn format_content(
    kind: BufferKind,
    content: &str,
    command: &[String],
    file_name: &str,
) -> Result<String, FormatError> {
    let Some(program) = command.first() else {
        return Err(FormatError::NotConfigured(kind));
    };

    // Preflight: a clear "not installed" beats a cryptic spawn error
    if which::which(program).is_err() {
        return Err(FormatError::MissingTool(program.clone()));
    }

    let vars = pad_vars(kind, file_name);
    let resolved = resolve_args(command, &vars);

    let mut child = Command::new(&resolved[0])
        .args(&resolved[1..])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| FormatError::Spawn {
            command: program.clone(),
            source,
        })?;

    // Feed stdin from a thread so a child that writes early can't
    // deadlock us on a full pipe
    let mut stdin = child.stdin.take().ok_or_else(|| FormatError::Spawn {
        command: program.clone(),
        source: std::io::Error::other("child stdin unavailable"),
    })?;
    let input = content.as_bytes().to_vec();
    let writer = std::thread::spawn(move || {
        let _ = stdin.write_all(&input);
    });

    let output = child.wait_with_output().map_err(|source| FormatError::Spawn {
        command: program.clone(),
        source,
    })?;
    let _ = writer.join();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.trim();
        return Err(FormatError::Failed {
            command: program.clone(),
            status: output.status.to_string(),
            detail: if detail.is_empty() {
                String::new()
            } else {
                format!(":\n{detail}")
            },
        });
    }

    if output.stdout.is_empty() && !content.is_empty() {
        return Err(FormatError::EmptyOutput(program.clone()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_args_replaces_vars() {
        let vars = pad_vars(BufferKind::Script, "script.js");
        let resolved = resolve_args(
            &args(&["prettier", "--stdin-filepath", "$PAD_FILE"]),
            &vars,
        );
        assert_eq!(resolved, args(&["prettier", "--stdin-filepath", "script.js"]));
    }

    #[test]
    fn test_resolve_args_multiple_vars_in_one_arg() {
        let vars = pad_vars(BufferKind::Style, "styles.css");
        let resolved = resolve_args(&args(&["$PAD_LANG:$PAD_FILE"]), &vars);
        assert_eq!(resolved[0], "css:styles.css");
    }

    #[test]
    fn test_resolve_args_no_vars() {
        let vars = FxHashMap::default();
        let command = args(&["echo", "hello"]);
        assert_eq!(resolve_args(&command, &vars), command);
    }

    #[test]
    fn test_empty_command_is_not_configured() {
        let err = format_content(BufferKind::Markup, "<p></p>", &[], "index.html").unwrap_err();
        assert!(matches!(err, FormatError::NotConfigured(BufferKind::Markup)));
    }

    #[test]
    fn test_missing_tool_is_reported() {
        let err = format_content(
            BufferKind::Markup,
            "<p></p>",
            &args(&["sandpad-no-such-formatter"]),
            "index.html",
        )
        .unwrap_err();
        assert!(matches!(err, FormatError::MissingTool(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_identity_formatter_round_trips() {
        let content = "body {\n  color: red;\n}\n";
        let formatted =
            format_content(BufferKind::Style, content, &args(&["cat"]), "styles.css").unwrap();
        assert_eq!(formatted, content);
    }

    #[cfg(unix)]
    #[test]
    fn test_transforming_formatter() {
        let formatted = format_content(
            BufferKind::Script,
            "let x = 1;",
            &args(&["tr", "a-z", "A-Z"]),
            "script.js",
        )
        .unwrap();
        assert_eq!(formatted, "LET X = 1;");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let err =
            format_content(BufferKind::Script, "x", &args(&["false"]), "script.js").unwrap_err();
        assert!(matches!(err, FormatError::Failed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_output_for_nonempty_input_is_failure() {
        let err =
            format_content(BufferKind::Script, "x", &args(&["true"]), "script.js").unwrap_err();
        assert!(matches!(err, FormatError::EmptyOutput(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_input_may_produce_empty_output() {
        let formatted =
            format_content(BufferKind::Script, "", &args(&["cat"]), "script.js").unwrap();
        assert_eq!(formatted, "");
    }
}
