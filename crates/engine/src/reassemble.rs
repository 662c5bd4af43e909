//! crates/engine/src/reassemble.rs
//!
//! Rebuilds a buffer from local matches and transferred blocks.

use checksums::StrongChecksum;
use logging::debug_log;
use matching::SameChunk;
use signature::{BlockLength, natural_block};

use crate::boundary::DiffChunk;
use crate::error::ReassembleFailure;

/// Result of a reassembly request that passed its preconditions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReassembleOutcome {
    /// The new buffer replaced the old one.
    Committed {
        /// Length of the new buffer.
        length: usize,
        /// Strong checksum of the new buffer.
        total_strong: StrongChecksum,
    },
    /// Nothing was changed; the caller must renegotiate.
    Rejected(ReassembleFailure),
}

impl ReassembleOutcome {
    /// Reports whether the new buffer was committed.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Returns the failure of a rejected request.
    #[must_use]
    pub const fn failure(&self) -> Option<&ReassembleFailure> {
        match self {
            Self::Rejected(failure) => Some(failure),
            Self::Committed { .. } => None,
        }
    }
}

/// Concatenates blocks in target order.
///
/// Orders `0..=max` are walked, where `max` is the highest order in either
/// list. A same chunk takes precedence over a diff chunk for the same order;
/// when several same chunks share an order the one with the lowest source
/// offset is used. Same chunks copy the natural bytes at their offset in
/// `source`, clipped to the end of the buffer. Empty lists produce an empty
/// buffer.
///
/// ```
/// use engine::{DiffChunk, reassemble_chunks};
/// use matching::SameChunk;
/// use signature::BlockLength;
///
/// let source = vec![b'a'; 64];
/// let rebuilt = reassemble_chunks(
///     &source,
///     BlockLength::normalized(64),
///     &[SameChunk::new(0, 1)],
///     &[DiffChunk { order: 0, data: b"head".to_vec() }],
/// )
/// .unwrap();
/// assert_eq!(&rebuilt[..4], b"head");
/// assert_eq!(rebuilt.len(), 68);
/// ```
///
/// # Errors
///
/// [`ReassembleFailure::MissingOrder`] for the first order with no data and
/// [`ReassembleFailure::SourceOutOfRange`] for a same chunk starting past the
/// end of `source`.
pub fn reassemble_chunks(
    source: &[u8],
    block_length: BlockLength,
    same_chunks: &[SameChunk],
    diff_chunks: &[DiffChunk],
) -> Result<Vec<u8>, ReassembleFailure> {
    let mut same: Vec<&SameChunk> = same_chunks.iter().collect();
    same.sort_by_key(|chunk| (chunk.target_order(), chunk.source_offset()));
    let mut diff: Vec<&DiffChunk> = diff_chunks.iter().collect();
    diff.sort_by_key(|chunk| chunk.order);

    let max_order = match (same.last(), diff.last()) {
        (None, None) => return Ok(Vec::new()),
        (Some(s), None) => s.target_order(),
        (None, Some(d)) => d.order,
        (Some(s), Some(d)) => s.target_order().max(d.order),
    };

    let block_len = block_length.get();
    // Orders come from the peer; size the buffer from bytes actually present.
    let available = diff
        .iter()
        .fold(source.len(), |total, chunk| total.saturating_add(chunk.data.len()));
    let walked = max_order
        .checked_add(1)
        .and_then(|orders| orders.checked_mul(block_len))
        .unwrap_or(usize::MAX);
    let mut rebuilt = Vec::with_capacity(available.min(walked));
    let mut same_iter = same.into_iter().peekable();
    let mut diff_iter = diff.into_iter().peekable();

    for order in 0..=max_order {
        while same_iter.next_if(|chunk| chunk.target_order() < order).is_some() {}
        while diff_iter.next_if(|chunk| chunk.order < order).is_some() {}

        if let Some(chunk) = same_iter.next_if(|chunk| chunk.target_order() == order) {
            let offset = chunk.source_offset();
            if offset >= source.len() {
                return Err(ReassembleFailure::SourceOutOfRange { order, offset });
            }
            rebuilt.extend_from_slice(natural_block(source, offset, block_len));
        } else if let Some(chunk) = diff_iter.next_if(|chunk| chunk.order == order) {
            rebuilt.extend_from_slice(&chunk.data);
        } else {
            debug_log!(Recv, 1, "order {} has neither a local match nor a diff", order);
            return Err(ReassembleFailure::MissingOrder { order });
        }
    }

    debug_log!(
        Recv,
        2,
        "reassembled {} orders into {} bytes",
        max_order + 1,
        rebuilt.len()
    );
    Ok(rebuilt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> BlockLength {
        BlockLength::normalized(64)
    }

    fn diff(order: usize, data: &[u8]) -> DiffChunk {
        DiffChunk {
            order,
            data: data.to_vec(),
        }
    }

    #[test]
    fn empty_request_builds_empty_buffer() {
        assert_eq!(reassemble_chunks(b"abc", block(), &[], &[]), Ok(Vec::new()));
    }

    #[test]
    fn interleaves_local_and_transferred_blocks() {
        let source: Vec<u8> = (0..128u8).collect();
        let rebuilt = reassemble_chunks(
            &source,
            block(),
            &[SameChunk::new(64, 0), SameChunk::new(0, 2)],
            &[diff(1, b"middle")],
        )
        .expect("complete");
        let mut expected = source[64..128].to_vec();
        expected.extend_from_slice(b"middle");
        expected.extend_from_slice(&source[0..64]);
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn same_chunk_near_end_is_clipped_not_padded() {
        let source = vec![9u8; 100];
        let rebuilt = reassemble_chunks(&source, block(), &[SameChunk::new(64, 0)], &[])
            .expect("complete");
        assert_eq!(rebuilt, vec![9u8; 36]);
    }

    #[test]
    fn far_order_without_coverage_is_a_gap_not_an_allocation() {
        let result = reassemble_chunks(b"abc", block(), &[], &[diff(usize::MAX / 2, b"x")]);
        assert_eq!(result, Err(ReassembleFailure::MissingOrder { order: 0 }));

        let result = reassemble_chunks(
            b"abc",
            block(),
            &[SameChunk::new(0, usize::MAX)],
            &[diff(0, b"head")],
        );
        assert_eq!(result, Err(ReassembleFailure::MissingOrder { order: 1 }));
    }

    #[test]
    fn gap_is_reported_with_its_order() {
        let result = reassemble_chunks(
            &[0u8; 64],
            block(),
            &[SameChunk::new(0, 0)],
            &[diff(2, b"tail")],
        );
        assert_eq!(result, Err(ReassembleFailure::MissingOrder { order: 1 }));
    }

    #[test]
    fn duplicate_same_orders_use_first_offset() {
        let source: Vec<u8> = (0..192u8).collect();
        let rebuilt = reassemble_chunks(
            &source,
            block(),
            &[SameChunk::new(128, 0), SameChunk::new(64, 0)],
            &[],
        )
        .expect("complete");
        assert_eq!(rebuilt, &source[64..128]);
    }

    #[test]
    fn same_chunk_past_end_is_rejected() {
        let result = reassemble_chunks(&[1u8; 10], block(), &[SameChunk::new(64, 0)], &[]);
        assert_eq!(
            result,
            Err(ReassembleFailure::SourceOutOfRange {
                order: 0,
                offset: 64
            })
        );
    }

    #[test]
    fn outcome_accessors() {
        let committed = ReassembleOutcome::Committed {
            length: 3,
            total_strong: StrongChecksum::compute(b"abc"),
        };
        assert!(committed.is_committed());
        assert!(committed.failure().is_none());

        let rejected = ReassembleOutcome::Rejected(ReassembleFailure::MissingOrder { order: 0 });
        assert!(!rejected.is_committed());
        assert!(rejected.failure().is_some());
    }
}
