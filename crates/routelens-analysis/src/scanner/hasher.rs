//! xxh3 content hashing for the analysis cache.

use xxhash_rust::xxh3::Xxh3;

/// Hash a file identifier together with its text.
///
/// Routes carry their file identifier, so identical text under two
/// identifiers must not share a cache entry.
pub fn hash_source(file: &str, text: &str) -> u64 {
    let mut hasher = Xxh3::new();
    hasher.update(file.as_bytes());
    hasher.update(&[0]);
    hasher.update(text.as_bytes());
    hasher.digest()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_part_of_key() {
        assert_ne!(hash_source("a.js", "app.get('/a')"), hash_source("a.js", "app.get('/b')"));
    }

    #[test]
    fn test_identifier_is_part_of_key() {
        assert_ne!(hash_source("a.js", "x"), hash_source("b.js", "x"));
        assert_ne!(hash_source("ab", "c"), hash_source("a", "bc"));
        assert_eq!(hash_source("a.js", "x"), hash_source("a.js", "x"));
    }
}
