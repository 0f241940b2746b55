//! Hash Decoder
//!
//! Turns an opaque, hash-like "soul" string into a fixed 32-byte buffer
//! and four little-endian `u32` words.
//!
//! Decoding is total: it never fails. Recognised content-address
//! prefixes are stripped, the remainder is read as hex pairs, and
//! anything that is not a hex pair becomes a zero byte.
//!
//! ```text
//! "bafkrei" + "0a0b0c0d…"  →  [0x0a, 0x0b, 0x0c, 0x0d, …]  →  w0 = 0x0d0c0b0a
//! ```

use serde::Serialize;

/// Content-address prefixes stripped before hex decoding, tried in order.
pub const KNOWN_PREFIXES: [&str; 3] = ["bafkrei", "Qm", "phash:"];

/// Size of the decoded buffer in bytes
pub const DIGEST_LEN: usize = 32;

/// Number of hex characters that fill the buffer
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// A decoded soul: the 32-byte buffer behind a hash string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SoulDigest {
    bytes: [u8; DIGEST_LEN],
}

impl SoulDigest {
    /// Decode a hash string. Never fails.
    pub fn decode(soul: &str) -> Self {
        let hex = strip_known_prefix(soul).as_bytes();
        let mut bytes = [0u8; DIGEST_LEN];

        for (slot, pair) in bytes.iter_mut().zip(hex.chunks(2)) {
            *slot = parse_hex_pair(pair).unwrap_or(0);
        }

        Self { bytes }
    }

    /// Wrap an existing buffer.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self { bytes }
    }

    /// The raw 32-byte buffer.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.bytes
    }

    /// The four little-endian words at byte offsets 0, 4, 8 and 12.
    pub fn words(&self) -> [u32; 4] {
        let word = |offset: usize| {
            u32::from_le_bytes([
                self.bytes[offset],
                self.bytes[offset + 1],
                self.bytes[offset + 2],
                self.bytes[offset + 3],
            ])
        };
        [word(0), word(4), word(8), word(12)]
    }

    /// Whether every byte decoded to zero (empty or garbage input).
    pub fn is_void(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

/// Strip the first matching known prefix, if any.
pub fn strip_known_prefix(soul: &str) -> &str {
    KNOWN_PREFIXES
        .iter()
        .find_map(|prefix| soul.strip_prefix(prefix))
        .unwrap_or(soul)
}

/// Shorthand for `SoulDigest::decode(soul).words()`.
pub fn decode_words(soul: &str) -> [u32; 4] {
    SoulDigest::decode(soul).words()
}

// Both characters must be hex digits; a lone trailing character never parses.
fn parse_hex_pair(pair: &[u8]) -> Option<u8> {
    match pair {
        [hi, lo] => Some(hex_nibble(*hi)? << 4 | hex_nibble(*lo)?),
        _ => None,
    }
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
