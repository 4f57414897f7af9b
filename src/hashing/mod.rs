use blake3::Hasher;

#[inline]
pub fn hash_text(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// The first 8 bytes of the digest are enough for in-memory cache keys: with
/// 64 bits of entropy the birthday bound sits near 4.3 billion entries, far
/// beyond any realistic embedding cache. A collision costs a cache miss, not
/// corruption, because the cached vector is recomputed on mismatch downstream.
/// Use [`hash_text`] where full 256-bit identity is required.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Computes an embedding-cache key scoped to a model name.
///
/// The model participates in the hash so vectors produced by different models
/// never collide in a shared cache. The separator byte keeps `("ab", "c")`
/// and `("a", "bc")` distinct.
#[inline]
pub fn scoped_key(model: &str, text: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(model.as_bytes());
    hasher.update(b"|");
    hasher.update(text.as_bytes());

    let hash = hasher.finalize();
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}
