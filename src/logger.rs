//! Terminal output: prefixed log lines and the serve status block.
//!
//! Two surfaces share stdout. `log!` prints plain prefixed lines that
//! scroll away. The status functions drive a single overwriting block
//! that serve mode updates on every push, so a busy edit session does
//! not flood the terminal.
//!
//! ```ignore
//! log!("serve"; "listening on http://{addr}");
//! logger::status_success("pushed: styles.css");
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::LazyLock,
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Record the `--verbose` flag; called once from main before any output.
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
    // Pin the status clock to startup rather than the first status line
    LazyLock::force(&STARTED);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// log macros
// ============================================================================

/// Print one prefixed line: `log!("serve"; "listening on {}", addr)`.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], but only prints when `--verbose` is set.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// prefixed lines
// ============================================================================

/// Write one `[module] message` line to stdout.
#[inline]
pub fn log(module: &str, message: &str) {
    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{} {message}", prefix_for(module)).ok();
    stdout.flush().ok();
}

/// Color the `[module]` prefix. Modules that appear constantly during a
/// serve session get stable colors so the eye can filter them.
#[inline]
fn prefix_for(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module {
        "serve" => prefix.bright_blue().bold().to_string(),
        "watch" => prefix.bright_green().bold().to_string(),
        "ws" => prefix.bright_magenta().bold().to_string(),
        "fmt" => prefix.bright_cyan().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.bright_yellow().bold().to_string(),
        _ => prefix.bright_white().bold().to_string(),
    }
}

// ============================================================================
// serve status line
// ============================================================================

/// Process start reference for status timestamps.
static STARTED: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Status timestamps show elapsed serve time instead of wall clock,
/// which keeps the display free of timezone handling.
fn elapsed_stamp() -> String {
    format_elapsed(STARTED.elapsed().as_secs())
}

fn format_elapsed(secs: u64) -> String {
    let (hours, minutes, seconds) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

fn line_count(message: &str) -> usize {
    message.matches('\n').count() + 1
}

/// Single-line status display for serve mode.
///
/// Each message overwrites the previous one, so the terminal shows only
/// the latest push result instead of one line per keystroke.
pub struct WatchStatus {
    /// Height of the block the next message must erase
    last_lines: usize,
}

/// Shared across serve-mode subsystems so watch, push and format phases
/// overwrite each other's block instead of stacking stale errors.
static WATCH_STATUS: Mutex<WatchStatus> = Mutex::new(WatchStatus::new());

impl WatchStatus {
    pub const fn new() -> Self {
        Self { last_lines: 0 }
    }

    /// A green ✓ line, for completed pushes.
    pub fn success(&mut self, message: &str) {
        self.display(Some(format!("{}", "✓".green())), message);
    }

    /// A dimmed line with no symbol, for no-op outcomes.
    pub fn unchanged(&mut self, message: &str) {
        self.display(None, &format!("{}", message.dimmed()));
    }

    /// A red ✗ line; `detail` (formatter stderr, IO error text) goes on
    /// the following lines when present.
    pub fn error(&mut self, summary: &str, detail: &str) {
        let message = match detail {
            "" => summary.to_string(),
            _ => format!("{summary}\n{detail}"),
        };
        self.display(Some(format!("{}", "✗".red())), &message);
    }

    /// Erase the previous block, print the new one, remember its height.
    ///
    /// Errors are tracked like every other message, so the next push
    /// wipes them once the pad is healthy again.
    fn display(&mut self, symbol: Option<String>, message: &str) {
        let mut stdout = stdout().lock();

        if self.last_lines > 0 {
            let lines = u16::try_from(self.last_lines).unwrap_or(u16::MAX);
            execute!(stdout, cursor::MoveUp(lines)).ok();
            execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
        }

        let stamp = format!("[{}]", elapsed_stamp()).dimmed().to_string();
        let mut line = format!("{stamp} ");
        if let Some(symbol) = symbol {
            line.push_str(&symbol);
            line.push(' ');
        }
        line.push_str(message);

        writeln!(stdout, "{line}").ok();
        stdout.flush().ok();

        self.last_lines = line_count(message);
    }
}

pub fn status_success(message: &str) {
    WATCH_STATUS.lock().success(message);
}

pub fn status_unchanged(message: &str) {
    WATCH_STATUS.lock().unchanged(message);
}

pub fn status_error(summary: &str, detail: &str) {
    WATCH_STATUS.lock().error(summary, detail);
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_status_has_nothing_to_clear() {
        let status = WatchStatus::new();
        assert_eq!(status.last_lines, 0);
    }

    #[test]
    fn test_format_elapsed_under_an_hour() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(65), "01:05");
        assert_eq!(format_elapsed(3599), "59:59");
    }

    #[test]
    fn test_format_elapsed_with_hours() {
        assert_eq!(format_elapsed(3600), "1:00:00");
        assert_eq!(format_elapsed(10861), "3:01:01");
    }

    #[test]
    fn test_line_count_single() {
        assert_eq!(line_count("pushed: styles.css"), 1);
    }

    #[test]
    fn test_line_count_error_with_detail() {
        // Typical error block: summary plus formatter stderr
        let message = "fmt failed: script.js\nerror: unexpected token\n  --> line 5";
        assert_eq!(line_count(message), 3);
    }
}
