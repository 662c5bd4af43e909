//! crates/signature/src/block.rs
//!
//! Individual checksum table entry.

use checksums::{RollingDigest, StrongChecksum};

/// Weak and strong checksum of one block, tagged with its position in the table.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckSumEntry {
    order: usize,
    rolling: RollingDigest,
    strong: StrongChecksum,
}

impl CheckSumEntry {
    /// Creates an entry from its components.
    #[must_use]
    pub const fn new(order: usize, rolling: RollingDigest, strong: StrongChecksum) -> Self {
        Self {
            order,
            rolling,
            strong,
        }
    }

    /// Returns the zero-based position of the block within its table.
    #[inline]
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    /// Returns the weak checksum digest.
    #[inline]
    #[must_use]
    pub const fn rolling(&self) -> RollingDigest {
        self.rolling
    }

    /// Returns the 16-bit byte sum (`a`).
    #[inline]
    #[must_use]
    pub const fn sum1(&self) -> u16 {
        self.rolling.sum1()
    }

    /// Returns the 16-bit weighted sum (`b`).
    #[inline]
    #[must_use]
    pub const fn sum2(&self) -> u16 {
        self.rolling.sum2()
    }

    /// Returns the lookup key used to group weak sums.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> u32 {
        self.rolling.key()
    }

    /// Returns the strong checksum of the (padded) block.
    #[inline]
    #[must_use]
    pub const fn strong(&self) -> &StrongChecksum {
        &self.strong
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_expose_components() {
        let rolling = RollingDigest::from_bytes(b"test");
        let strong = StrongChecksum::compute(b"test");
        let entry = CheckSumEntry::new(42, rolling, strong.clone());
        assert_eq!(entry.order(), 42);
        assert_eq!(entry.rolling(), rolling);
        assert_eq!(entry.sum1(), rolling.sum1());
        assert_eq!(entry.sum2(), rolling.sum2());
        assert_eq!(entry.key(), rolling.key());
        assert_eq!(entry.strong(), &strong);
    }

    #[test]
    fn clone_is_equal() {
        let entry = CheckSumEntry::new(
            1,
            RollingDigest::from_bytes(b"abc"),
            StrongChecksum::compute(b"abc"),
        );
        assert_eq!(entry.clone(), entry);
        assert!(format!("{entry:?}").contains("CheckSumEntry"));
    }
}
