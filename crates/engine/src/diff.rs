//! crates/engine/src/diff.rs
//!
//! Cuts requested blocks out of an authoritative buffer.

use logging::debug_log;
use signature::{BlockLength, natural_block};

use crate::boundary::DiffChunk;

/// Returns the natural bytes of each requested block of `buffer`.
///
/// Chunks come back in request order. The final block is clipped to the end
/// of the buffer, never padded. Orders outside the buffer's table are
/// skipped; the requester notices the gap when it reassembles.
///
/// ```
/// use engine::extract_diff;
/// use signature::BlockLength;
///
/// let data = vec![1u8; 300];
/// let chunks = extract_diff(&data, BlockLength::normalized(128), &[2, 0, 7]);
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].order, 2);
/// assert_eq!(chunks[0].data.len(), 44);
/// assert_eq!(chunks[1].data.len(), 128);
/// ```
#[must_use]
pub fn extract_diff(buffer: &[u8], block_length: BlockLength, orders: &[usize]) -> Vec<DiffChunk> {
    let block_count = block_length.block_count(buffer.len());
    let block_len = block_length.get();

    let chunks: Vec<DiffChunk> = orders
        .iter()
        .filter(|order| **order < block_count)
        .map(|&order| DiffChunk {
            order,
            data: natural_block(buffer, block_length.offset_of(order), block_len).to_vec(),
        })
        .collect();

    if chunks.len() != orders.len() {
        debug_log!(
            Send,
            1,
            "skipped {} orders outside a table of {} blocks",
            orders.len() - chunks.len(),
            block_count
        );
    }
    debug_log!(Send, 2, "extracted {} diff chunks", chunks.len());
    chunks
}
