//! crates/signature/src/parallel.rs
//!
//! Parallel checksum table generation using rayon.
//!
//! Blocks are independent, so each entry can be computed on any worker. The
//! resulting table is identical to the sequential one because rayon's indexed
//! `collect` preserves order.

use rayon::prelude::*;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::block_size::BlockLength;
use crate::table::{BlockChecksumTable, checksum_block};

/// Block count above which [`build_auto`] switches to the parallel path.
pub const PARALLEL_BLOCK_THRESHOLD: usize = 64;

/// Builds the checksum table for `buffer` using all rayon workers.
#[cfg_attr(feature = "tracing", instrument(skip(buffer), fields(buffer_len = buffer.len(), block_length = block_length.get()), name = "build_checksum_table_parallel"))]
#[must_use]
pub fn build_parallel(buffer: &[u8], block_length: BlockLength) -> BlockChecksumTable {
    let block_len = block_length.get();
    let entries = (0..block_length.block_count(buffer.len()))
        .into_par_iter()
        .map(|order| checksum_block(buffer, order, block_len))
        .collect();
    BlockChecksumTable::from_entries(entries)
}

/// Builds the checksum table, going parallel for buffers with many blocks.
#[must_use]
pub fn build_auto(buffer: &[u8], block_length: BlockLength) -> BlockChecksumTable {
    if block_length.block_count(buffer.len()) > PARALLEL_BLOCK_THRESHOLD {
        build_parallel(buffer, block_length)
    } else {
        BlockChecksumTable::build(buffer, block_length)
    }
}
