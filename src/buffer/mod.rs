//! The pad's source buffers.
//!
//! A pad always has exactly three buffers: markup, style and script. Each
//! buffer mirrors one file on disk. The set is fixed; there is no notion of
//! adding or removing buffers, only editing their contents.

mod template;

pub use template::{PadTemplate, TEMPLATES};

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The three source languages a pad is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BufferKind {
    Markup,
    Style,
    Script,
}

impl BufferKind {
    /// All kinds in composition order (markup first, script last).
    pub const ALL: [BufferKind; 3] = [BufferKind::Markup, BufferKind::Style, BufferKind::Script];

    /// Short lowercase label used in logs and CLI output.
    pub const fn label(self) -> &'static str {
        match self {
            BufferKind::Markup => "html",
            BufferKind::Style => "css",
            BufferKind::Script => "js",
        }
    }

    /// File name a fresh pad uses for this buffer.
    pub const fn default_file_name(self) -> &'static str {
        match self {
            BufferKind::Markup => "index.html",
            BufferKind::Style => "styles.css",
            BufferKind::Script => "script.js",
        }
    }

    /// Parse a CLI buffer name. Accepts both the language label and the
    /// buffer role, so `sandpad fmt css` and `sandpad fmt style` both work.
    pub fn from_name(name: &str) -> Option<BufferKind> {
        match name.to_ascii_lowercase().as_str() {
            "html" | "markup" => Some(BufferKind::Markup),
            "css" | "style" => Some(BufferKind::Style),
            "js" | "script" => Some(BufferKind::Script),
            _ => None,
        }
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One editable source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    pub kind: BufferKind,
    content: String,
}

impl SourceBuffer {
    pub fn new(kind: BufferKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Resolved on-disk locations of the three pad files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadPaths {
    pub markup: PathBuf,
    pub style: PathBuf,
    pub script: PathBuf,
}

impl PadPaths {
    pub fn get(&self, kind: BufferKind) -> &Path {
        match kind {
            BufferKind::Markup => &self.markup,
            BufferKind::Style => &self.style,
            BufferKind::Script => &self.script,
        }
    }
}

/// The fixed set of three buffers plus the active-buffer marker.
///
/// "Active" is the buffer the user touched last. It is session state only
/// and never persisted; changing it has no effect on rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSet {
    markup: SourceBuffer,
    style: SourceBuffer,
    script: SourceBuffer,
    active: BufferKind,
}

impl BufferSet {
    /// Build a set from explicit contents.
    pub fn from_contents(
        markup: impl Into<String>,
        style: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            markup: SourceBuffer::new(BufferKind::Markup, markup),
            style: SourceBuffer::new(BufferKind::Style, style),
            script: SourceBuffer::new(BufferKind::Script, script),
            active: BufferKind::Markup,
        }
    }

    /// Build a set from a built-in template.
    pub fn from_template(template: &PadTemplate) -> Self {
        Self::from_contents(template.markup, template.style, template.script)
    }

    /// Read all three pad files.
    ///
    /// A missing file is not an error: the buffer starts empty and springs
    /// back to life when the file appears.
    pub fn load(paths: &PadPaths) -> io::Result<Self> {
        Ok(Self::from_contents(
            read_pad_file(&paths.markup)?,
            read_pad_file(&paths.style)?,
            read_pad_file(&paths.script)?,
        ))
    }

    /// Write all three buffers back to disk.
    pub fn store(&self, paths: &PadPaths) -> io::Result<()> {
        for kind in BufferKind::ALL {
            self.store_kind(paths, kind)?;
        }
        Ok(())
    }

    /// Write a single buffer back to disk.
    pub fn store_kind(&self, paths: &PadPaths, kind: BufferKind) -> io::Result<()> {
        fs::write(paths.get(kind), self.content(kind))
    }

    /// Re-read one buffer from disk.
    ///
    /// Returns `true` only when the loaded content differs from what the
    /// buffer already holds. This is what absorbs watcher echoes of our own
    /// writes: the content comparison makes them no-ops.
    pub fn reload_kind(&mut self, paths: &PadPaths, kind: BufferKind) -> io::Result<bool> {
        let content = read_pad_file(paths.get(kind))?;
        Ok(self.set_content(kind, content))
    }

    pub fn buffer(&self, kind: BufferKind) -> &SourceBuffer {
        match kind {
            BufferKind::Markup => &self.markup,
            BufferKind::Style => &self.style,
            BufferKind::Script => &self.script,
        }
    }

    pub fn content(&self, kind: BufferKind) -> &str {
        self.buffer(kind).content()
    }

    /// Replace one buffer's content.
    ///
    /// Returns `false` (and leaves the active marker alone) when the new
    /// content is identical to the current one.
    pub fn set_content(&mut self, kind: BufferKind, content: impl Into<String>) -> bool {
        let content = content.into();
        let buffer = match kind {
            BufferKind::Markup => &mut self.markup,
            BufferKind::Style => &mut self.style,
            BufferKind::Script => &mut self.script,
        };
        if buffer.content == content {
            return false;
        }
        buffer.content = content;
        self.active = kind;
        true
    }

    /// Replace all three buffers at once.
    ///
    /// This is a single operation, not three edits: callers treat it as one
    /// change no matter how many buffers actually differed. Returns `false`
    /// when nothing differed at all.
    pub fn replace_all(
        &mut self,
        markup: impl Into<String>,
        style: impl Into<String>,
        script: impl Into<String>,
    ) -> bool {
        let mut changed = false;
        let markup = markup.into();
        let style = style.into();
        let script = script.into();
        if self.markup.content != markup {
            self.markup.content = markup;
            changed = true;
        }
        if self.style.content != style {
            self.style.content = style;
            changed = true;
        }
        if self.script.content != script {
            self.script.content = script;
            changed = true;
        }
        changed
    }

    /// Replace all three buffers from a template.
    pub fn apply_template(&mut self, template: &PadTemplate) -> bool {
        self.replace_all(template.markup, template.style, template.script)
    }

    /// The buffer the user touched last.
    pub fn active(&self) -> BufferKind {
        self.active
    }

    pub fn set_active(&mut self, kind: BufferKind) {
        self.active = kind;
    }
}

impl Default for BufferSet {
    fn default() -> Self {
        Self::from_template(PadTemplate::default_template())
    }
}

/// Read a pad file, treating a missing file as empty content.
fn read_pad_file(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            crate::debug!("pad"; "{} missing, buffer starts empty", path.display());
            Ok(String::new())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_paths(dir: &Path) -> PadPaths {
        PadPaths {
            markup: dir.join("index.html"),
            style: dir.join("styles.css"),
            script: dir.join("script.js"),
        }
    }

    #[test]
    fn test_set_content_detects_no_change() {
        let mut set = BufferSet::from_contents("<p>hi</p>", "p {}", "");
        assert!(!set.set_content(BufferKind::Markup, "<p>hi</p>"));
        assert!(set.set_content(BufferKind::Markup, "<p>bye</p>"));
        assert_eq!(set.content(BufferKind::Markup), "<p>bye</p>");
    }

    #[test]
    fn test_set_content_marks_active() {
        let mut set = BufferSet::from_contents("", "", "");
        assert_eq!(set.active(), BufferKind::Markup);
        set.set_content(BufferKind::Script, "let x = 1;");
        assert_eq!(set.active(), BufferKind::Script);
        // An identical write is not an edit
        set.set_content(BufferKind::Style, "");
        assert_eq!(set.active(), BufferKind::Script);
    }

    #[test]
    fn test_replace_all_is_one_change() {
        let mut set = BufferSet::from_contents("a", "b", "c");
        assert!(set.replace_all("x", "y", "z"));
        assert_eq!(set.content(BufferKind::Markup), "x");
        assert_eq!(set.content(BufferKind::Style), "y");
        assert_eq!(set.content(BufferKind::Script), "z");
        // Identical replacement reports no change
        assert!(!set.replace_all("x", "y", "z"));
    }

    #[test]
    fn test_replace_all_partial_difference() {
        let mut set = BufferSet::from_contents("a", "b", "c");
        assert!(set.replace_all("a", "b", "changed"));
        assert_eq!(set.content(BufferKind::Script), "changed");
    }

    #[test]
    fn test_load_missing_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let paths = test_paths(dir.path());
        std::fs::write(&paths.markup, "<h1>only markup</h1>").unwrap();

        let set = BufferSet::load(&paths).unwrap();
        assert_eq!(set.content(BufferKind::Markup), "<h1>only markup</h1>");
        assert_eq!(set.content(BufferKind::Style), "");
        assert_eq!(set.content(BufferKind::Script), "");
    }

    #[test]
    fn test_store_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = test_paths(dir.path());

        let set = BufferSet::from_contents("<p>m</p>", "p { color: red }", "alert(1)");
        set.store(&paths).unwrap();

        let loaded = BufferSet::load(&paths).unwrap();
        assert_eq!(loaded.content(BufferKind::Markup), "<p>m</p>");
        assert_eq!(loaded.content(BufferKind::Style), "p { color: red }");
        assert_eq!(loaded.content(BufferKind::Script), "alert(1)");
    }

    #[test]
    fn test_reload_kind_absorbs_own_write() {
        let dir = tempfile::tempdir().unwrap();
        let paths = test_paths(dir.path());

        let mut set = BufferSet::from_contents("m", "s", "j");
        set.store(&paths).unwrap();

        // Disk content equals buffer content: reload reports no change
        assert!(!set.reload_kind(&paths, BufferKind::Style).unwrap());

        std::fs::write(&paths.style, "body { margin: 0 }").unwrap();
        assert!(set.reload_kind(&paths, BufferKind::Style).unwrap());
        assert_eq!(set.content(BufferKind::Style), "body { margin: 0 }");
    }

    #[test]
    fn test_apply_template() {
        let mut set = BufferSet::from_contents("", "", "");
        assert!(set.apply_template(PadTemplate::default_template()));
        assert!(set.content(BufferKind::Markup).contains("Hello, World!"));
        // Applying the same template again is a no-op
        assert!(!set.apply_template(PadTemplate::default_template()));
    }
}
