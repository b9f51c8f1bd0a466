//! HTML entity escaping.
//!
//! Used when interpolating pad metadata (titles, file names) into the
//! preview shell. Pad buffer content itself is never escaped; the composed
//! document embeds it verbatim.

use std::borrow::Cow;

fn needs_escape(c: char) -> bool {
    matches!(c, '<' | '>' | '&' | '"' | '\'')
}

/// Entity-escape the five characters HTML cannot carry literally.
///
/// Borrows the input unchanged when nothing needs escaping, which is the
/// common case for pad titles.
pub fn escape(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(needs_escape) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
