//! Content hashing for change detection.
//!
//! `FxHasher` is not cryptographic, which is fine here: the hash only
//! answers "did this file's text change since we last read it".

use std::hash::Hasher;

use rustc_hash::FxHasher;

/// Hash a file's text content to a 64-bit fingerprint.
pub fn content_hash(content: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(content.as_bytes());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_content_same_hash() {
        assert_eq!(content_hash("[pad]\n"), content_hash("[pad]\n"));
        assert_ne!(content_hash("[pad]\n"), content_hash("[serve]\n"));
    }
}
