use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hash::pseudohash_at;

/// Characters a seed may contain, in successor order.
pub const SEED_CHARS: &[u8; 34] = b"123456789ABCDEFGHIJKLMNPQRSTUVWXYZ";

pub const MAX_SEED_LEN: usize = 8;

const RADIX: usize = SEED_CHARS.len();

const NOT_A_DIGIT: u8 = u8::MAX;

const DIGITS: [u8; 128] = build_digit_table();

const fn build_digit_table() -> [u8; 128] {
    let mut table = [NOT_A_DIGIT; 128];
    let mut i = 0;
    while i < RADIX {
        table[SEED_CHARS[i] as usize] = i as u8;
        i += 1;
    }
    table
}

#[inline]
fn digit(byte: u8) -> Option<usize> {
    match DIGITS.get(byte as usize) {
        Some(&d) if d != NOT_A_DIGIT => Some(d as usize),
        _ => None,
    }
}

/// Number of distinct seeds of exactly `len` characters.
#[inline]
const fn seeds_of_len(len: usize) -> u64 {
    (RADIX as u64).pow(len as u32)
}

/// Total number of seeds across all lengths.
pub const SEED_SPACE: u64 = {
    let mut total = 0u64;
    let mut len = 1;
    while len <= MAX_SEED_LEN {
        total += seeds_of_len(len);
        len += 1;
    }
    total
};

/// A run seed: 1 to 8 characters from [`SEED_CHARS`].
///
/// Seeds are totally ordered (shorter first, then by character rank with
/// the last character varying fastest); [`Seed::next`] walks that order and
/// [`Seed::id`] is the rank within it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed {
    // Bytes past `len` are always zero.
    bytes: [u8; MAX_SEED_LEN],
    len: u8,
}

impl Seed {
    /// The first seed of the order, `"1"`.
    #[inline]
    pub const fn first() -> Self {
        let mut bytes = [0u8; MAX_SEED_LEN];
        bytes[0] = SEED_CHARS[0];
        Self { bytes, len: 1 }
    }

    /// Seed at rank `id` in successor order.
    pub fn from_id(mut id: u64) -> Result<Self> {
        if id >= SEED_SPACE {
            return Err(Error::SeedIdOutOfRange(id));
        }
        let mut len = 1;
        while id >= seeds_of_len(len) {
            id -= seeds_of_len(len);
            len += 1;
        }
        let mut bytes = [0u8; MAX_SEED_LEN];
        for pos in (0..len).rev() {
            bytes[pos] = SEED_CHARS[(id % RADIX as u64) as usize];
            id /= RADIX as u64;
        }
        Ok(Self { bytes, len: len as u8 })
    }

    /// Rank of this seed in successor order.
    pub fn id(&self) -> u64 {
        let len = self.len();
        let shorter: u64 = (1..len).map(seeds_of_len).sum();
        let value = self
            .as_bytes()
            .iter()
            .fold(0u64, |acc, &b| acc * RADIX as u64 + digit(b).unwrap_or(0) as u64);
        shorter + value
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// Hash of the seed string as if `offset` characters preceded it.
    ///
    /// `pseudohash(0)` is the hash of the seed alone; `pseudohash(id.len())`
    /// is the state to continue with [`crate::pseudohash_from`] over `id`.
    #[inline]
    pub fn pseudohash(&self, offset: usize) -> f64 {
        pseudohash_at(self.as_bytes(), offset, 1.0)
    }

    /// Advance in place to the successor seed. `ZZZZZZZZ` wraps to `1`.
    pub fn next(&mut self) {
        let len = self.len();
        for pos in (0..len).rev() {
            let d = digit(self.bytes[pos]).unwrap_or(0);
            if d + 1 < RADIX {
                self.bytes[pos] = SEED_CHARS[d + 1];
                return;
            }
            self.bytes[pos] = SEED_CHARS[0];
        }
        // Every position carried: all characters are now the first one.
        if len < MAX_SEED_LEN {
            self.bytes[len] = SEED_CHARS[0];
            self.len += 1;
        } else {
            *self = Self::first();
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self::first()
    }
}

impl FromStr for Seed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let n = s.chars().count();
        if n == 0 || n > MAX_SEED_LEN {
            return Err(Error::InvalidSeedLength(n));
        }
        let mut bytes = [0u8; MAX_SEED_LEN];
        for (slot, ch) in bytes.iter_mut().zip(s.chars()) {
            let up = ch.to_ascii_uppercase();
            if !up.is_ascii() || digit(up as u8).is_none() {
                return Err(Error::InvalidSeedChar(ch));
            }
            *slot = up as u8;
        }
        Ok(Self { bytes, len: n as u8 })
    }
}

impl TryFrom<String> for Seed {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.to_string()
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.as_bytes() {
            f.write_char(char::from(b))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({self})")
    }
}

impl Ord for Seed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len
            .cmp(&other.len)
            .then_with(|| self.as_bytes().cmp(other.as_bytes()))
    }
}

impl PartialOrd for Seed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
