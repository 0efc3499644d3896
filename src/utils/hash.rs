//! Checksums for diff chunk interning.

use xxhash_rust::xxh3::xxh3_64;

/// 64-bit xxh3 checksum of a byte slice.
///
/// Used to bucket text chunks; equal checksums do not imply equal content.
#[must_use]
pub fn content_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_is_stable_per_chunk() {
        let line = b"  \"status\": \"ok\",\n";
        assert_eq!(content_hash(line), content_hash(line));
        assert_ne!(content_hash(line), content_hash(b"  \"status\": \"ok\"\n"));
    }

    #[test]
    fn test_empty_chunk_hashes() {
        assert_eq!(content_hash(b""), xxh3_64(&[]));
    }
}
