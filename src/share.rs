//! Share tokens and embed snippets.
//!
//! A share token is the base64 of the UTF-8 JSON object
//! `{"html":...,"css":...,"js":...}`, carried in the `code` query
//! parameter of a share URL. The standard alphabet is what we produce
//! (matching what `btoa` produces in a browser); decoding also accepts
//! the URL-safe alphabet and unpadded variants, plus the classic
//! query-string mangling of `+` into a space.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{BufferKind, BufferSet};

/// Query parameter carrying the token in a share URL.
pub const SHARE_PARAM: &str = "code";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("invalid share URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("share URL has no `{SHARE_PARAM}` parameter")]
    MissingParam,
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("share token is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("share token JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// The three buffer contents as carried inside a share token.
///
/// Field order matters: it is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareToken {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl ShareToken {
    pub fn from_set(set: &BufferSet) -> Self {
        Self {
            html: set.content(BufferKind::Markup).to_string(),
            css: set.content(BufferKind::Style).to_string(),
            js: set.content(BufferKind::Script).to_string(),
        }
    }

    /// Replace all buffers with the token's contents.
    ///
    /// One bulk operation; returns whether anything differed.
    pub fn apply_to(self, set: &mut BufferSet) -> bool {
        set.replace_all(self.html, self.css, self.js)
    }

    /// Encode into a token string (standard base64 alphabet, padded).
    pub fn encode(&self) -> Result<String, ShareError> {
        let json = serde_json::to_string(self)?;
        Ok(STANDARD.encode(json.as_bytes()))
    }

    /// Decode a bare token string.
    pub fn decode(token: &str) -> Result<Self, ShareError> {
        // Repair `+` that a query-string decoder turned into a space,
        // then drop real whitespace (tokens pasted from chat wrap).
        let cleaned: String = token
            .chars()
            .map(|c| if c == ' ' { '+' } else { c })
            .filter(|c| !c.is_whitespace())
            .collect();

        let bytes = decode_any_alphabet(&cleaned)?;
        let json = String::from_utf8(bytes)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Try the standard alphabet first, then the forgiving fallbacks.
fn decode_any_alphabet(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(s).or_else(|primary_err| {
        URL_SAFE
            .decode(s)
            .or_else(|_| STANDARD_NO_PAD.decode(s))
            .or_else(|_| URL_SAFE_NO_PAD.decode(s))
            .map_err(|_| primary_err)
    })
}

/// Build a share URL for the given origin.
pub fn share_url(origin: &str, token: &ShareToken) -> Result<String, ShareError> {
    let origin = origin.trim_end_matches('/');
    Ok(format!("{origin}?{SHARE_PARAM}={}", token.encode()?))
}

/// Build an embeddable iframe snippet pointing at a share URL.
pub fn embed_snippet(share_url: &str) -> String {
    format!(r#"<iframe src="{share_url}" width="100%" height="500" frameborder="0"></iframe>"#)
}

/// Accept either a bare token or a full share URL.
pub fn token_from_input(input: &str) -> Result<ShareToken, ShareError> {
    let trimmed = input.trim();
    if trimmed.contains("://") {
        let url = url::Url::parse(trimmed)?;
        let token = url
            .query_pairs()
            .find(|(key, _)| key == SHARE_PARAM)
            .map(|(_, value)| value.into_owned())
            .ok_or(ShareError::MissingParam)?;
        ShareToken::decode(&token)
    } else {
        ShareToken::decode(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // btoa(JSON.stringify({html:'<h1>Hi</h1>',css:'h1 { color: red; }',js:'console.log(1);'}))
    const BROWSER_TOKEN: &str = "eyJodG1sIjoiPGgxPkhpPC9oMT4iLCJjc3MiOiJoMSB7IGNvbG9yOiByZWQ7IH0iLCJqcyI6ImNvbnNvbGUubG9nKDEpOyJ9";

    // A token whose base64 contains `+` and trailing padding.
    // btoa(JSON.stringify({html:'<h1>?></h1>',css:'',js:"let x = '~~~';"}))
    const PLUS_TOKEN: &str =
        "eyJodG1sIjoiPGgxPj8+PC9oMT4iLCJjc3MiOiIiLCJqcyI6ImxldCB4ID0gJ35+fic7In0=";

    fn sample() -> ShareToken {
        ShareToken {
            html: "<h1>Hi</h1>".into(),
            css: "h1 { color: red; }".into(),
            js: "console.log(1);".into(),
        }
    }

    #[test]
    fn test_encode_matches_browser_btoa() {
        assert_eq!(sample().encode().unwrap(), BROWSER_TOKEN);
    }

    #[test]
    fn test_decode_browser_token() {
        let token = ShareToken::decode(BROWSER_TOKEN).unwrap();
        assert_eq!(token, sample());
    }

    #[test]
    fn test_round_trip() {
        let original = ShareToken {
            html: "<p>round</p>".into(),
            css: "p { margin: 0 }".into(),
            js: "let n = 42;".into(),
        };
        let decoded = ShareToken::decode(&original.encode().unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_repairs_plus_mangled_to_space() {
        let mangled = PLUS_TOKEN.replace('+', " ");
        let token = ShareToken::decode(&mangled).unwrap();
        assert_eq!(token.html, "<h1>?></h1>");
        assert_eq!(token.js, "let x = '~~~';");
    }

    #[test]
    fn test_decode_accepts_unpadded() {
        let unpadded = PLUS_TOKEN.trim_end_matches('=');
        let token = ShareToken::decode(unpadded).unwrap();
        assert_eq!(token.html, "<h1>?></h1>");
    }

    #[test]
    fn test_decode_accepts_url_safe_alphabet() {
        let url_safe = PLUS_TOKEN.replace('+', "-").replace('/', "_");
        let token = ShareToken::decode(&url_safe).unwrap();
        assert_eq!(token.html, "<h1>?></h1>");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(ShareToken::decode("!!not base64!!").is_err());
        // Valid base64 but not the expected JSON shape
        let not_json = STANDARD.encode(b"hello world");
        assert!(ShareToken::decode(&not_json).is_err());
    }

    #[test]
    fn test_share_url_shape() {
        let url = share_url("http://localhost:5173", &sample()).unwrap();
        assert_eq!(url, format!("http://localhost:5173?code={BROWSER_TOKEN}"));
    }

    #[test]
    fn test_share_url_strips_trailing_slash() {
        let url = share_url("http://localhost:5173/", &sample()).unwrap();
        assert!(url.starts_with("http://localhost:5173?code="));
    }

    #[test]
    fn test_embed_snippet_shape() {
        let snippet = embed_snippet("http://localhost:5173?code=abc");
        assert_eq!(
            snippet,
            r#"<iframe src="http://localhost:5173?code=abc" width="100%" height="500" frameborder="0"></iframe>"#
        );
    }

    #[test]
    fn test_token_from_full_url() {
        let url = format!("http://localhost:5173/?{SHARE_PARAM}={BROWSER_TOKEN}");
        let token = token_from_input(&url).unwrap();
        assert_eq!(token, sample());
    }

    #[test]
    fn test_token_from_url_with_plus_in_token() {
        // Url::query_pairs form-decodes `+` to space; decode() repairs it.
        let url = format!("http://localhost:5173/?{SHARE_PARAM}={PLUS_TOKEN}");
        let token = token_from_input(&url).unwrap();
        assert_eq!(token.html, "<h1>?></h1>");
    }

    #[test]
    fn test_token_from_url_missing_param() {
        let err = token_from_input("http://localhost:5173/?other=1").unwrap_err();
        assert!(matches!(err, ShareError::MissingParam));
    }

    #[test]
    fn test_apply_to_is_bulk() {
        let mut set = BufferSet::from_contents("a", "b", "c");
        let token = ShareToken {
            html: "x".into(),
            css: "y".into(),
            js: "z".into(),
        };
        assert!(token.apply_to(&mut set));
        assert_eq!(set.content(BufferKind::Markup), "x");
        assert_eq!(set.content(BufferKind::Style), "y");
        assert_eq!(set.content(BufferKind::Script), "z");
    }
}
