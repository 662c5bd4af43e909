use super::checksum::RollingChecksum;

/// Snapshot of a [`RollingChecksum`] state.
///
/// `sum1` is the plain byte sum (`a`) and `sum2` the position-weighted sum
/// (`b`). Both are already truncated to 16 bits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollingDigest {
    s1: u16,
    s2: u16,
    len: usize,
}

impl RollingDigest {
    /// Digest of an empty window.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Creates a digest from individual components.
    #[must_use]
    pub const fn new(sum1: u16, sum2: u16, len: usize) -> Self {
        Self {
            s1: sum1,
            s2: sum2,
            len,
        }
    }

    /// Computes the digest of `window` in one pass.
    #[must_use]
    pub fn from_bytes(window: &[u8]) -> Self {
        let mut checksum = RollingChecksum::new();
        checksum.update_from_block(window);
        checksum.digest()
    }

    /// Returns the first checksum component (sum of bytes).
    #[inline]
    #[must_use]
    pub const fn sum1(&self) -> u16 {
        self.s1
    }

    /// Returns the second checksum component (position-weighted sum).
    #[inline]
    #[must_use]
    pub const fn sum2(&self) -> u16 {
        self.s2
    }

    /// Returns the number of bytes that contributed to the digest.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Reports whether the digest covers no bytes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the 32-bit lookup key `sum1 << 16 | sum2`.
    ///
    /// The key is a positional concatenation used to group equal (or
    /// colliding) weak sums; it carries no more entropy than the two halves.
    ///
    /// ```
    /// use checksums::RollingDigest;
    ///
    /// let digest = RollingDigest::new(0x1234, 0xabcd, 8);
    /// assert_eq!(digest.key(), 0x1234_abcd);
    /// ```
    #[inline]
    #[must_use]
    pub const fn key(&self) -> u32 {
        ((self.s1 as u32) << 16) | (self.s2 as u32)
    }
}

impl_from_owned_and_ref!(RollingChecksum => RollingDigest, digest);
