//! crates/checksums/src/strong/mod.rs
//!
//! Strong checksum tier.
//!
//! A [`StrongChecksum`] is the MD4 digest of a block rendered with the
//! standard padded base64 alphabet, so every value is exactly
//! [`StrongChecksum::ENCODED_LEN`] printable bytes. The same type is used for
//! per-block confirmation and for whole-buffer equality checks.

mod md4;

pub use self::md4::Md4;

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Encoded strong checksum of a byte range.
#[derive(Clone, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrongChecksum {
    encoded: Vec<u8>,
}

impl StrongChecksum {
    /// Length of the base64 rendering of a 16-byte digest.
    pub const ENCODED_LEN: usize = 24;

    /// Computes the strong checksum of `data`.
    ///
    /// ```
    /// use checksums::StrongChecksum;
    ///
    /// let empty = StrongChecksum::compute(b"");
    /// assert_eq!(empty.as_str(), "MdbP4NFq6TG3PFnX4MCJwA==");
    /// ```
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        let raw = Md4::digest(data);
        Self {
            encoded: STANDARD.encode(raw).into_bytes(),
        }
    }

    /// Wraps an already-encoded value received from a peer.
    ///
    /// The bytes are kept as-is; comparison stays byte-for-byte.
    #[must_use]
    pub fn from_encoded(encoded: impl Into<Vec<u8>>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }

    /// Returns the encoded bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// Returns the encoded value as text, or an empty string if a peer supplied
    /// bytes that are not valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.encoded).unwrap_or_default()
    }

    /// Consumes the checksum and returns the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.encoded
    }

    /// Compares against another checksum byte-for-byte.
    #[inline]
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        compare_bytes(&self.encoded, &other.encoded)
    }
}

impl fmt::Debug for StrongChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StrongChecksum").field(&self.as_str()).finish()
    }
}

impl fmt::Display for StrongChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<[u8]> for StrongChecksum {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Reports whether two byte strings have equal length and equal contents.
#[inline]
#[must_use]
pub fn compare_bytes(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len() && left == right
}
