//! Document composition.
//!
//! Turns the three source buffers into one self-contained HTML document:
//! markup first, then the style buffer wrapped in `<style>`, then the
//! script buffer wrapped in `<script>`. Later definitions win under
//! standard cascade and script-order rules, so the injected style and
//! script take effect even when the markup carries its own.
//!
//! The buffers are embedded verbatim. In particular, a literal
//! `</style>` inside the style buffer or `</script>` inside the script
//! buffer terminates its block early; that document still gets presented
//! as-is. Composition never fails and never inspects the content.

use crate::buffer::{BufferKind, BufferSet};

/// Compose a full preview document from the three buffer contents.
///
/// Pure: same inputs, byte-identical output. Empty buffers still emit
/// their wrapper tags.
pub fn compose(markup: &str, style: &str, script: &str) -> String {
    let mut doc = String::with_capacity(
        markup.len() + style.len() + script.len() + "\n<style></style>\n<script></script>\n".len(),
    );
    doc.push_str(markup);
    doc.push_str("\n<style>");
    doc.push_str(style);
    doc.push_str("</style>\n<script>");
    doc.push_str(script);
    doc.push_str("</script>\n");
    doc
}

/// Compose the current state of a buffer set.
pub fn compose_set(set: &BufferSet) -> String {
    compose(
        set.content(BufferKind::Markup),
        set.content(BufferKind::Style),
        set.content(BufferKind::Script),
    )
}
