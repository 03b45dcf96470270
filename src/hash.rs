use std::f64::consts::PI;

use crate::numeric::fract;

/// Multiplier applied to the reciprocal of the running state.
const HASH_FACTOR: f64 = 1.123_928_502_3;

/// Positional string hash over `bytes`, continuing from `num`.
///
/// Bytes are consumed from last to first. The byte at 1-based position `i`
/// is weighted as if it sat at position `i + offset` of a longer string, so
/// hashing a suffix with `offset = prefix.len()` and then feeding the result
/// into the prefix reproduces the hash of the concatenation.
#[inline]
pub fn pseudohash_at(bytes: &[u8], offset: usize, mut num: f64) -> f64 {
    for i in (1..=bytes.len()).rev() {
        let byte = f64::from(bytes[i - 1]);
        let pos = (i + offset) as f64;
        num = fract(HASH_FACTOR / num * byte * PI + PI * pos);
    }
    num
}

/// Hash of a whole string, starting from the neutral state `1.0`.
#[inline]
pub fn pseudohash(s: &str) -> f64 {
    pseudohash_at(s.as_bytes(), 0, 1.0)
}

/// Continue a hash over `id` from a state produced by hashing whatever
/// follows `id` (typically the seed, see [`crate::Seed::pseudohash`]).
#[inline]
pub fn pseudohash_from(id: &str, num: f64) -> f64 {
    pseudohash_at(id.as_bytes(), 0, num)
}
