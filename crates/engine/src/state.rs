//! crates/engine/src/state.rs
//!
//! Lock-guarded buffer plus the checksums derived from it.

use checksums::StrongChecksum;
use logging::{debug_log, info_log};
use matching::{MatchResult, MatchStats};
use parking_lot::RwLock;
use signature::{BlockChecksumTable, BlockLength, build_auto};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::boundary::{DiffRequest, DiffResponse, Properties, ReassembleRequest};
use crate::diff::extract_diff;
use crate::error::{PreconditionError, ReassembleFailure};
use crate::reassemble::{ReassembleOutcome, reassemble_chunks};

#[derive(Debug)]
struct Inner {
    data: Vec<u8>,
    total_strong: StrongChecksum,
    block_length: BlockLength,
    table: BlockChecksumTable,
    table_stale: bool,
}

impl Inner {
    fn refresh_table(&mut self) {
        self.table = build_auto(&self.data, self.block_length);
        self.table_stale = false;
        debug_log!(
            Deltasum,
            2,
            "rebuilt table: {} blocks of {} bytes",
            self.table.len(),
            self.block_length
        );
    }

    fn commit(&mut self, data: Vec<u8>) {
        self.total_strong = StrongChecksum::compute(&data);
        self.data = data;
        self.refresh_table();
    }
}

/// One peer's content together with its whole-buffer and per-block checksums.
///
/// Readers (properties, data, matching, diff extraction) share the lock;
/// writers (`set_data`, `set_block_length`, `reassemble`) take it exclusively.
/// Every accessor returns an owned copy, so nothing handed out aliases the
/// internal buffer.
///
/// ```
/// use engine::FileState;
///
/// let state = FileState::new(16);
/// assert_eq!(state.block_length(), 256);
///
/// state.set_data(vec![3u8; 1000], true);
/// assert_eq!(state.properties().table.len(), 4);
/// assert_eq!(state.data().len(), 1000);
/// ```
#[derive(Debug)]
pub struct FileState {
    inner: RwLock<Inner>,
}

impl FileState {
    /// Creates an empty state. Requests below the floor use the default length.
    #[must_use]
    pub fn new(block_length: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                data: Vec::new(),
                total_strong: StrongChecksum::compute(&[]),
                block_length: BlockLength::normalized(block_length),
                table: BlockChecksumTable::default(),
                table_stale: false,
            }),
        }
    }

    /// Creates a state holding `data` with a freshly built table.
    #[must_use]
    pub fn with_data(block_length: usize, data: impl Into<Vec<u8>>) -> Self {
        let state = Self::new(block_length);
        state.set_data(data, true);
        state
    }

    /// Replaces the buffer.
    ///
    /// The whole-buffer checksum is always recomputed. With `compute_table`
    /// false the block table is left stale until [`recompute_table`] runs.
    ///
    /// [`recompute_table`]: Self::recompute_table
    pub fn set_data(&self, data: impl Into<Vec<u8>>, compute_table: bool) {
        let data = data.into();
        let total_strong = StrongChecksum::compute(&data);
        let mut inner = self.inner.write();
        inner.data = data;
        inner.total_strong = total_strong;
        if compute_table {
            inner.refresh_table();
        } else {
            inner.table_stale = true;
        }
        info_log!(
            Misc,
            2,
            "buffer replaced: {} bytes, table {}",
            inner.data.len(),
            if inner.table_stale { "stale" } else { "current" }
        );
    }

    /// Rebuilds the block table for the current buffer.
    pub fn recompute_table(&self) {
        self.inner.write().refresh_table();
    }

    /// Changes the block length, rebuilding the table when it changes.
    ///
    /// Non-zero requests below the floor use the default length.
    ///
    /// # Errors
    ///
    /// [`PreconditionError::ZeroBlockLength`] when `block_length` is zero.
    pub fn set_block_length(&self, block_length: usize) -> Result<(), PreconditionError> {
        let block_length = BlockLength::new(block_length)?;
        let mut inner = self.inner.write();
        if inner.block_length == block_length {
            return Ok(());
        }
        debug_log!(
            Deltasum,
            1,
            "block length {} -> {}",
            inner.block_length,
            block_length
        );
        #[cfg(feature = "tracing")]
        logging::trace_deltasum!(
            from = inner.block_length.get(),
            to = block_length.get(),
            "block length changed"
        );
        inner.block_length = block_length;
        inner.refresh_table();
        Ok(())
    }

    /// Configured block length.
    #[must_use]
    pub fn block_length(&self) -> usize {
        self.inner.read().block_length.get()
    }

    /// Strong checksum of the whole buffer.
    #[must_use]
    pub fn total_strong(&self) -> StrongChecksum {
        self.inner.read().total_strong.clone()
    }

    /// Buffer length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().data.len()
    }

    /// Reports whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().data.is_empty()
    }

    /// Copy of the buffer.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.inner.read().data.clone()
    }

    /// Copy of the block length, whole-buffer checksum and table.
    #[must_use]
    pub fn properties(&self) -> Properties {
        let inner = self.inner.read();
        Properties {
            block_length: inner.block_length.get(),
            total_strong: inner.total_strong.clone(),
            table: inner.table.clone(),
        }
    }

    /// Reports whether the table was skipped by the last `set_data`.
    #[must_use]
    pub fn is_table_stale(&self) -> bool {
        self.inner.read().table_stale
    }

    /// Scans this buffer, as the source, against `target`.
    ///
    /// # Errors
    ///
    /// [`PreconditionError::ZeroBlockLength`] when `target` carries a zero
    /// block length.
    pub fn match_against(&self, target: &Properties) -> Result<MatchResult, PreconditionError> {
        self.match_against_with_stats(target).map(|(result, _)| result)
    }

    /// Same as [`match_against`](Self::match_against), also returning scan counters.
    ///
    /// # Errors
    ///
    /// See [`match_against`](Self::match_against).
    #[cfg_attr(feature = "tracing", instrument(skip_all, name = "file_state_match"))]
    pub fn match_against_with_stats(
        &self,
        target: &Properties,
    ) -> Result<(MatchResult, MatchStats), PreconditionError> {
        let inner = self.inner.read();
        let outcome = target.matcher().scan(
            &inner.data,
            &inner.total_strong,
            inner.block_length.get(),
        )?;
        Ok(outcome)
    }

    /// Serves requested blocks, as the target.
    ///
    /// The response carries the current block length and whole-buffer
    /// checksum so the requester can detect a change since it negotiated.
    #[must_use]
    pub fn diff_chunks(&self, request: &DiffRequest) -> DiffResponse {
        let inner = self.inner.read();
        DiffResponse {
            block_length: inner.block_length.get(),
            total_strong: inner.total_strong.clone(),
            diff_chunks: extract_diff(&inner.data, inner.block_length, request.orders()),
        }
    }

    /// Rebuilds this buffer, as the source, from local matches and diff chunks.
    ///
    /// Either the whole new buffer is committed, with its checksum and table
    /// recomputed, or nothing changes and the outcome says why.
    ///
    /// # Errors
    ///
    /// [`PreconditionError::ZeroBlockLength`] when the request's block length
    /// is zero.
    #[cfg_attr(feature = "tracing", instrument(skip_all, name = "file_state_reassemble"))]
    pub fn reassemble(
        &self,
        request: ReassembleRequest,
    ) -> Result<ReassembleOutcome, PreconditionError> {
        if request.block_length == 0 {
            return Err(PreconditionError::ZeroBlockLength);
        }

        let mut inner = self.inner.write();
        let expected = inner.block_length.get();
        if request.block_length != expected {
            debug_log!(
                Recv,
                1,
                "rejecting reassembly: local block length {} request {}",
                expected,
                request.block_length
            );
            return Ok(ReassembleOutcome::Rejected(
                ReassembleFailure::BlockLengthMismatch {
                    expected,
                    actual: request.block_length,
                },
            ));
        }

        let rebuilt = match reassemble_chunks(
            &inner.data,
            inner.block_length,
            &request.same_chunks,
            &request.diff_chunks,
        ) {
            Ok(rebuilt) => rebuilt,
            Err(failure) => return Ok(ReassembleOutcome::Rejected(failure)),
        };

        inner.commit(rebuilt);
        debug_log!(Recv, 1, "committed {} bytes", inner.data.len());
        #[cfg(feature = "tracing")]
        logging::trace_recv!(length = inner.data.len(), "reassembly committed");
        Ok(ReassembleOutcome::Committed {
            length: inner.data.len(),
            total_strong: inner.total_strong.clone(),
        })
    }
}

impl Default for FileState {
    fn default() -> Self {
        Self::new(signature::DEFAULT_BLOCK_LENGTH)
    }
}
