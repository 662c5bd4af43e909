//! crates/match/src/result.rs
//!
//! Outcome types produced by a scan.

/// A confirmed correspondence between a source offset and a target block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SameChunk {
    source_offset: usize,
    target_order: usize,
}

impl SameChunk {
    /// Creates a chunk binding `source_offset` to the target block `target_order`.
    #[must_use]
    pub const fn new(source_offset: usize, target_order: usize) -> Self {
        Self {
            source_offset,
            target_order,
        }
    }

    /// Byte offset of the matching window in the source buffer.
    #[inline]
    #[must_use]
    pub const fn source_offset(&self) -> usize {
        self.source_offset
    }

    /// Order of the matched block in the target's table.
    #[inline]
    #[must_use]
    pub const fn target_order(&self) -> usize {
        self.target_order
    }
}

/// Result of reconciling a source buffer against a target table.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchResult {
    /// Whole-buffer strong checksums are equal; nothing needs to move.
    Identical,
    /// The peers use different block lengths, so weak sums are not comparable.
    ///
    /// The source must adopt `target_block_length` and negotiate again.
    NeedsReset {
        /// Block length of the target's table.
        target_block_length: usize,
        /// Block length currently configured on the source.
        source_block_length: usize,
    },
    /// Block-level comparison result.
    Delta {
        /// Matched windows sorted by target order; orders may repeat.
        same_chunks: Vec<SameChunk>,
        /// Target orders without a match, strictly ascending.
        missing_orders: Vec<usize>,
    },
}

impl MatchResult {
    /// Reports whether the identity shortcut applied.
    #[must_use]
    pub const fn is_identical(&self) -> bool {
        matches!(self, Self::Identical)
    }

    /// Reports whether the source has to reconfigure its block length.
    #[must_use]
    pub const fn needs_reset(&self) -> bool {
        matches!(self, Self::NeedsReset { .. })
    }

    /// Matched chunks; empty unless this is a [`MatchResult::Delta`].
    #[must_use]
    pub fn same_chunks(&self) -> &[SameChunk] {
        match self {
            Self::Delta { same_chunks, .. } => same_chunks,
            _ => &[],
        }
    }

    /// Missing target orders; empty unless this is a [`MatchResult::Delta`].
    #[must_use]
    pub fn missing_orders(&self) -> &[usize] {
        match self {
            Self::Delta { missing_orders, .. } => missing_orders,
            _ => &[],
        }
    }

    /// Splits a delta result into its chunk and order lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<SameChunk>, Vec<usize>) {
        match self {
            Self::Delta {
                same_chunks,
                missing_orders,
            } => (same_chunks, missing_orders),
            _ => (Vec::new(), Vec::new()),
        }
    }
}

/// Counters gathered while scanning.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchStats {
    /// Window positions whose weak key was looked up.
    pub windows_scanned: u64,
    /// Lookups that returned at least one candidate.
    pub weak_hits: u64,
    /// Weak hits confirmed by a strong checksum.
    pub strong_confirmations: u64,
    /// Weak hits rejected by every candidate's strong checksum.
    pub false_positives: u64,
    /// Unpadded source bytes covered by accepted windows.
    pub matched_bytes: u64,
}

/// Lists the orders in `0..block_count` not covered by `same_chunks`.
///
/// `same_chunks` must be sorted by target order. Repeated orders are covered
/// once; orders at or beyond `block_count` are ignored.
///
/// ```
/// use matching::{SameChunk, missing_orders};
///
/// let same = [SameChunk::new(0, 1), SameChunk::new(512, 1), SameChunk::new(256, 3)];
/// assert_eq!(missing_orders(&same, 5), [0, 2, 4]);
/// ```
#[must_use]
pub fn missing_orders(same_chunks: &[SameChunk], block_count: usize) -> Vec<usize> {
    let mut missing = Vec::new();
    let mut cursor = 0usize;
    for chunk in same_chunks {
        let order = chunk.target_order();
        while cursor < order.min(block_count) {
            missing.push(cursor);
            cursor += 1;
        }
        if cursor == order {
            cursor += 1;
        }
    }
    missing.extend(cursor..block_count);
    missing
}
