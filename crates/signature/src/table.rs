//! crates/signature/src/table.rs
//!
//! Block checksum table generation.

#[cfg(feature = "tracing")]
use tracing::instrument;

use checksums::{RollingDigest, StrongChecksum};

use crate::block::CheckSumEntry;
use crate::block_size::BlockLength;
use crate::window::padded_window;

/// Ordered weak/strong checksums for one `(buffer, block length)` pairing.
///
/// The table holds exactly `ceil(len / block_length)` entries with orders
/// `0..len`, and is empty for an empty buffer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BlockChecksumTable {
    entries: Vec<CheckSumEntry>,
}

impl BlockChecksumTable {
    /// Builds the table for `buffer` sequentially.
    ///
    /// The final block is zero-padded to `block_length` before hashing.
    ///
    /// ```
    /// use signature::{BlockChecksumTable, BlockLength};
    ///
    /// let data = vec![7u8; (1 << 16) + 64];
    /// let table = BlockChecksumTable::build(&data, BlockLength::normalized(256));
    /// assert_eq!(table.len(), 257);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(buffer), fields(buffer_len = buffer.len(), block_length = block_length.get()), name = "build_checksum_table"))]
    #[must_use]
    pub fn build(buffer: &[u8], block_length: BlockLength) -> Self {
        let block_len = block_length.get();
        let entries = (0..block_length.block_count(buffer.len()))
            .map(|order| checksum_block(buffer, order, block_len))
            .collect();
        Self { entries }
    }

    /// Wraps entries received from a peer.
    ///
    /// The entries are kept in the given order; callers are expected to pass a
    /// table produced by [`build`](Self::build) on the other side.
    #[must_use]
    pub const fn from_entries(entries: Vec<CheckSumEntry>) -> Self {
        Self { entries }
    }

    /// Returns the entries in table order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[CheckSumEntry] {
        &self.entries
    }

    /// Consumes the table and returns its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<CheckSumEntry> {
        self.entries
    }

    /// Returns the number of blocks described by the table.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the table has no blocks.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry for `order`, if present.
    #[must_use]
    pub fn get(&self, order: usize) -> Option<&CheckSumEntry> {
        self.entries.get(order)
    }

    /// Iterates over the entries in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, CheckSumEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a BlockChecksumTable {
    type Item = &'a CheckSumEntry;
    type IntoIter = std::slice::Iter<'a, CheckSumEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Computes the entry for the block at `order`.
pub(crate) fn checksum_block(buffer: &[u8], order: usize, block_len: usize) -> CheckSumEntry {
    let window = padded_window(buffer, order.saturating_mul(block_len), block_len);
    CheckSumEntry::new(
        order,
        RollingDigest::from_bytes(&window),
        StrongChecksum::compute(&window),
    )
}
