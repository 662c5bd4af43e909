//! crates/match/src/scan.rs
//!
//! Greedy rolling scan of a source buffer against a target table.

use checksums::{RollingChecksum, RollingError, StrongChecksum};
use logging::debug_log;
use signature::{BlockChecksumTable, MAX_BLOCK_LENGTH, padded_window};
use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::index::WeakIndex;
use crate::result::{MatchResult, MatchStats, SameChunk, missing_orders};

/// Precondition violations reported by [`Matcher::scan`].
///
/// These indicate an invalid invocation rather than a protocol event and must
/// not be retried.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum MatchError {
    /// One side supplied a zero block length, or both agreed on one above
    /// [`MAX_BLOCK_LENGTH`].
    #[error("invalid block length (target {target}, source {source_len})")]
    InvalidBlockLength {
        /// Block length of the target's table.
        target: usize,
        /// Block length configured on the source.
        source_len: usize,
    },
    /// The rolling checksum could not be advanced.
    #[error(transparent)]
    Rolling(#[from] RollingError),
}

/// Reconciles source buffers against one target's checksum table.
#[derive(Clone, Copy, Debug)]
pub struct Matcher<'a> {
    block_length: usize,
    total_strong: &'a StrongChecksum,
    table: &'a BlockChecksumTable,
}

impl<'a> Matcher<'a> {
    /// Creates a matcher for the target described by its block length,
    /// whole-buffer strong checksum and block table.
    #[must_use]
    pub const fn new(
        block_length: usize,
        total_strong: &'a StrongChecksum,
        table: &'a BlockChecksumTable,
    ) -> Self {
        Self {
            block_length,
            total_strong,
            table,
        }
    }

    /// Block length of the target's table.
    #[must_use]
    pub const fn block_length(&self) -> usize {
        self.block_length
    }

    /// Scans `source` and reports which target blocks it already contains.
    ///
    /// Equal whole-buffer checksums short-circuit to
    /// [`MatchResult::Identical`]; differing block lengths yield
    /// [`MatchResult::NeedsReset`] without scanning. Otherwise a window of the
    /// target's block length slides over `source`. On a confirmed match the
    /// window jumps a full block and the weak sum is recomputed from scratch;
    /// on a miss it advances one byte with the O(1) rolling update. Windows
    /// running past the end of `source` are zero-padded.
    ///
    /// The first candidate (in table order) whose strong checksum matches is
    /// taken, so duplicate-content blocks bind to the lowest order.
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidBlockLength`] when either block length is zero, or
    /// when both are equal and above [`MAX_BLOCK_LENGTH`].
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(source_len = source.len(), block_length = self.block_length), name = "match_scan"))]
    pub fn scan(
        &self,
        source: &[u8],
        source_total: &StrongChecksum,
        source_block_length: usize,
    ) -> Result<(MatchResult, MatchStats), MatchError> {
        if self.block_length == 0 || source_block_length == 0 {
            return Err(MatchError::InvalidBlockLength {
                target: self.block_length,
                source_len: source_block_length,
            });
        }

        let mut stats = MatchStats::default();

        if self.total_strong.matches(source_total) {
            debug_log!(Match, 1, "identical content, skipping scan");
            return Ok((MatchResult::Identical, stats));
        }

        if self.block_length != source_block_length {
            debug_log!(
                Match,
                1,
                "block length mismatch: target {} source {}",
                self.block_length,
                source_block_length
            );
            return Ok((
                MatchResult::NeedsReset {
                    target_block_length: self.block_length,
                    source_block_length,
                },
                stats,
            ));
        }

        if self.block_length > MAX_BLOCK_LENGTH {
            return Err(MatchError::InvalidBlockLength {
                target: self.block_length,
                source_len: source_block_length,
            });
        }

        let index = WeakIndex::build(self.table);
        let mut same_chunks = if index.is_empty() {
            Vec::new()
        } else {
            self.scan_windows(source, &index, &mut stats)?
        };

        same_chunks.sort_by_key(SameChunk::target_order);
        let missing = missing_orders(&same_chunks, self.table.len());

        debug_log!(
            Match,
            1,
            "scanned {} windows: {} matched, {} missing, {} false positives",
            stats.windows_scanned,
            same_chunks.len(),
            missing.len(),
            stats.false_positives
        );
        #[cfg(feature = "tracing")]
        logging::trace_match!(
            windows = stats.windows_scanned,
            weak_hits = stats.weak_hits,
            false_positives = stats.false_positives,
            "scan complete"
        );

        Ok((
            MatchResult::Delta {
                same_chunks,
                missing_orders: missing,
            },
            stats,
        ))
    }

    fn scan_windows(
        &self,
        source: &[u8],
        index: &WeakIndex<'_>,
        stats: &mut MatchStats,
    ) -> Result<Vec<SameChunk>, MatchError> {
        let block_len = self.block_length;
        let byte_at = |offset: usize| source.get(offset).copied().unwrap_or(0);

        let mut same_chunks = Vec::new();
        let mut rolling = RollingChecksum::new();
        let mut begin = 0usize;
        let mut seeded = false;

        while begin < source.len() {
            if !seeded {
                rolling.update_from_block(&padded_window(source, begin, block_len));
                seeded = true;
            }

            stats.windows_scanned += 1;
            let candidates = index.candidates(rolling.key());

            if !candidates.is_empty() {
                stats.weak_hits += 1;
                let strong = StrongChecksum::compute(&padded_window(source, begin, block_len));
                if let Some(entry) = candidates.iter().find(|entry| entry.strong().matches(&strong)) {
                    stats.strong_confirmations += 1;
                    let natural = block_len.min(source.len() - begin);
                    stats.matched_bytes += natural as u64;
                    debug_log!(
                        Match,
                        3,
                        "offset {} matches target order {}",
                        begin,
                        entry.order()
                    );
                    same_chunks.push(SameChunk::new(begin, entry.order()));
                    begin = begin.saturating_add(block_len);
                    seeded = false;
                    continue;
                }
                stats.false_positives += 1;
            }

            rolling.advance(byte_at(begin + 1), byte_at(begin + block_len))?;
            begin += 1;
        }

        Ok(same_chunks)
    }
}
