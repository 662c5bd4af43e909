//! crates/engine/src/boundary.rs
//!
//! Plain structures exchanged between a source and a target.
//!
//! How these cross a process or network boundary is up to the transport; with
//! the `serde` feature they derive `Serialize` and `Deserialize`.

use checksums::StrongChecksum;
use matching::{Matcher, SameChunk};
use signature::BlockChecksumTable;

/// Everything a source needs to scan against a target.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Properties {
    /// Block length the table was built with.
    pub block_length: usize,
    /// Strong checksum of the whole target buffer.
    pub total_strong: StrongChecksum,
    /// Per-block checksums of the target buffer.
    pub table: BlockChecksumTable,
}

impl Properties {
    /// Returns a matcher bound to these properties.
    #[must_use]
    pub const fn matcher(&self) -> Matcher<'_> {
        Matcher::new(self.block_length, &self.total_strong, &self.table)
    }

    /// Bytes a peer spends receiving the table: four weak bytes plus the
    /// encoded strong checksum per entry.
    #[must_use]
    pub fn table_overhead(&self) -> u64 {
        self.table
            .iter()
            .map(|entry| 4 + entry.strong().as_bytes().len() as u64)
            .sum()
    }
}

/// Orders a source asks the target to send.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DiffRequest(pub Vec<usize>);

impl DiffRequest {
    /// Requested orders.
    #[must_use]
    pub fn orders(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for DiffRequest {
    fn from(orders: Vec<usize>) -> Self {
        Self(orders)
    }
}

/// Exact, unpadded bytes of one target block.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffChunk {
    /// Order of the block in the target's table.
    pub order: usize,
    /// Natural bytes of the block.
    pub data: Vec<u8>,
}

/// Target's answer to a [`DiffRequest`].
///
/// `block_length` and `total_strong` let the requester confirm the target has
/// not changed since it fetched [`Properties`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffResponse {
    /// Block length the chunks were cut with.
    pub block_length: usize,
    /// Current strong checksum of the whole target buffer.
    pub total_strong: StrongChecksum,
    /// Chunks for the requested orders that exist in the current table.
    pub diff_chunks: Vec<DiffChunk>,
}

impl DiffResponse {
    /// Total payload bytes carried by the chunks.
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.diff_chunks.iter().map(|chunk| chunk.data.len()).sum()
    }
}

/// Input for rebuilding a source buffer.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReassembleRequest {
    /// Block length the match and the diff were computed with.
    pub block_length: usize,
    /// Blocks to copy from the local buffer.
    pub same_chunks: Vec<SameChunk>,
    /// Blocks received from the target.
    pub diff_chunks: Vec<DiffChunk>,
}
