//! crates/transfer/src/session.rs
//!
//! Drives a source [`FileState`] onto a [`TargetPeer`].
//!
//! The two round trips (properties then diff) are not atomic against changes
//! on either side. Every protocol signal moves the machine to
//! [`NegotiationState::Restart`], which applies its corrective action and
//! starts over from [`NegotiationState::Negotiating`].

use checksums::StrongChecksum;
use engine::{DiffRequest, DiffResponse, FileState, ReassembleOutcome, ReassembleRequest};
use logging::{debug_log, info_log};
use matching::{MatchResult, MatchStats, SameChunk};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::SessionError;
use crate::peer::TargetPeer;
use crate::state::{NegotiationState, RestartReason};
use crate::stats::{SyncReport, TransferStats};

/// Default bound on restarts within one session.
pub const DEFAULT_MAX_RESTARTS: u32 = 4;

/// Tunables for a [`Session`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionOptions {
    /// Restarts allowed before the session gives up.
    pub max_restarts: u32,
    /// Fail with [`SessionError::Unverified`] when the converged source does
    /// not hash to the target's advertised checksum.
    pub require_verified: bool,
}

impl SessionOptions {
    /// Returns options with `max_restarts` replaced.
    #[must_use]
    pub const fn with_max_restarts(mut self, max_restarts: u32) -> Self {
        self.max_restarts = max_restarts;
        self
    }

    /// Returns options with `require_verified` replaced.
    #[must_use]
    pub const fn with_require_verified(mut self, require_verified: bool) -> Self {
        self.require_verified = require_verified;
        self
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_restarts: DEFAULT_MAX_RESTARTS,
            require_verified: true,
        }
    }
}

/// What the first round trip established.
#[derive(Debug)]
struct Negotiated {
    block_length: usize,
    total_strong: StrongChecksum,
    same_chunks: Vec<SameChunk>,
    missing_orders: Vec<usize>,
}

/// One synchronization of a source onto a target.
///
/// ```
/// use engine::FileState;
/// use transfer::{Session, SessionOptions};
///
/// let target = FileState::with_data(256, b"new content".repeat(100));
/// let source = FileState::with_data(256, b"old content".repeat(90));
///
/// let report = Session::new(&source, &target, SessionOptions::default())
///     .run()
///     .unwrap();
/// assert!(report.verified);
/// assert_eq!(source.data(), target.data());
/// ```
#[derive(Debug)]
pub struct Session<'a, T> {
    source: &'a FileState,
    target: T,
    options: SessionOptions,
    state: NegotiationState,
    negotiated: Option<Negotiated>,
    diff: Option<DiffResponse>,
    stats: TransferStats,
    scan: MatchStats,
    advertised: Option<StrongChecksum>,
}

impl<'a, T: TargetPeer> Session<'a, T> {
    /// Creates a session in [`NegotiationState::Negotiating`].
    pub fn new(source: &'a FileState, target: T, options: SessionOptions) -> Self {
        Self {
            source,
            target,
            options,
            state: NegotiationState::Negotiating,
            negotiated: None,
            diff: None,
            stats: TransferStats::default(),
            scan: MatchStats::default(),
            advertised: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &NegotiationState {
        &self.state
    }

    /// Totals so far.
    #[must_use]
    pub const fn stats(&self) -> &TransferStats {
        &self.stats
    }

    /// Steps until convergence.
    ///
    /// # Errors
    ///
    /// [`SessionError::Precondition`] for invalid engine calls and
    /// [`SessionError::RestartLimit`] when restarts exceed
    /// [`SessionOptions::max_restarts`], and [`SessionError::Unverified`] when
    /// [`SessionOptions::require_verified`] is set and the committed source
    /// does not hash to the target's advertised checksum.
    #[cfg_attr(feature = "tracing", instrument(skip_all, name = "sync_session"))]
    pub fn run(mut self) -> Result<SyncReport, SessionError> {
        while !self.state.is_converged() {
            self.step()?;
        }

        let total_strong = self.source.total_strong();
        let verified = self
            .advertised
            .as_ref()
            .is_some_and(|advertised| advertised.matches(&total_strong));
        if !verified {
            debug_log!(Proto, 1, "converged buffer does not match the target checksum");
            if self.options.require_verified {
                return Err(SessionError::Unverified {
                    length: self.source.len(),
                    expected: self.advertised.unwrap_or_else(|| StrongChecksum::compute(&[])),
                    actual: total_strong,
                });
            }
        }
        info_log!(
            Stats,
            1,
            "converged: {} bytes, {} blocks matched, {} transferred ({} bytes), {} restarts",
            self.stats.target_length,
            self.stats.blocks_matched,
            self.stats.blocks_transferred,
            self.stats.transferred_bytes,
            self.stats.restarts
        );
        #[cfg(feature = "tracing")]
        logging::trace_stats!(
            target_length = self.stats.target_length,
            transferred_bytes = self.stats.transferred_bytes,
            checksum_overhead = self.stats.checksum_overhead,
            restarts = self.stats.restarts,
            "session converged"
        );
        Ok(SyncReport {
            stats: self.stats,
            scan: self.scan,
            total_strong,
            verified,
        })
    }

    /// Performs one transition and returns the new state.
    ///
    /// Stepping a converged session leaves it converged.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn step(&mut self) -> Result<&NegotiationState, SessionError> {
        match self.state.clone() {
            NegotiationState::Negotiating => self.negotiate()?,
            NegotiationState::AwaitingDiff => self.fetch_diff(),
            NegotiationState::Reconstructing => self.reconstruct()?,
            NegotiationState::Restart(reason) => self.restart(&reason)?,
            NegotiationState::Converged => {}
        }
        info_log!(Progress, 1, "session state: {:?}", self.state);
        Ok(&self.state)
    }

    /// First round trip: fetch the target's properties and scan against them.
    ///
    /// # Errors
    ///
    /// [`SessionError::Precondition`] when the target advertises a zero block
    /// length.
    pub fn negotiate(&mut self) -> Result<(), SessionError> {
        let props = self.target.properties();
        self.stats.checksum_overhead += props.table_overhead();
        self.advertised = Some(props.total_strong.clone());

        let (result, scan) = self.source.match_against_with_stats(&props)?;
        self.scan = scan;

        self.state = match result {
            MatchResult::Identical => {
                debug_log!(Proto, 1, "identical content");
                self.stats.identical = true;
                self.stats.target_length = self.source.len();
                NegotiationState::Converged
            }
            MatchResult::NeedsReset {
                target_block_length,
                source_block_length,
            } => NegotiationState::Restart(RestartReason::BlockLengthChanged {
                from: source_block_length,
                to: target_block_length,
            }),
            MatchResult::Delta {
                same_chunks,
                missing_orders,
            } => {
                debug_log!(
                    Proto,
                    2,
                    "negotiated: {} matched, {} missing",
                    same_chunks.len(),
                    missing_orders.len()
                );
                self.negotiated = Some(Negotiated {
                    block_length: props.block_length,
                    total_strong: props.total_strong,
                    same_chunks,
                    missing_orders,
                });
                NegotiationState::AwaitingDiff
            }
        };
        Ok(())
    }

    /// Second round trip: fetch the missing blocks and check the target has
    /// not changed in between.
    pub fn fetch_diff(&mut self) {
        let Some(negotiated) = self.negotiated.as_ref() else {
            self.state = NegotiationState::Negotiating;
            return;
        };

        let response = self
            .target
            .diff_chunks(&DiffRequest(negotiated.missing_orders.clone()));
        self.stats.transferred_bytes += response.payload_len() as u64;

        if response.block_length != negotiated.block_length
            || !response.total_strong.matches(&negotiated.total_strong)
        {
            self.state = NegotiationState::Restart(RestartReason::StaleTarget);
            return;
        }

        debug_log!(
            Proto,
            2,
            "received {} diff chunks ({} bytes)",
            response.diff_chunks.len(),
            response.payload_len()
        );
        self.diff = Some(response);
        self.state = NegotiationState::Reconstructing;
    }

    /// Rebuilds the source from the negotiated matches and received blocks.
    ///
    /// # Errors
    ///
    /// [`SessionError::Precondition`] when the negotiated block length is zero.
    pub fn reconstruct(&mut self) -> Result<(), SessionError> {
        let (Some(negotiated), Some(diff)) = (self.negotiated.take(), self.diff.take()) else {
            self.state = NegotiationState::Negotiating;
            return Ok(());
        };

        let blocks_matched = distinct_orders(&negotiated.same_chunks);
        let blocks_transferred = diff.diff_chunks.len();
        let outcome = self.source.reassemble(ReassembleRequest {
            block_length: diff.block_length,
            same_chunks: negotiated.same_chunks,
            diff_chunks: diff.diff_chunks,
        })?;

        self.state = match outcome {
            ReassembleOutcome::Committed { length, .. } => {
                self.stats.target_length = length;
                self.stats.blocks_matched = blocks_matched;
                self.stats.blocks_transferred = blocks_transferred;
                NegotiationState::Converged
            }
            ReassembleOutcome::Rejected(failure) => {
                NegotiationState::Restart(RestartReason::ReassemblyFailed(failure))
            }
        };
        Ok(())
    }

    fn restart(&mut self, reason: &RestartReason) -> Result<(), SessionError> {
        self.stats.restarts += 1;
        debug_log!(Proto, 1, "restart {}: {}", self.stats.restarts, reason);
        #[cfg(feature = "tracing")]
        logging::trace_proto!(restarts = self.stats.restarts, %reason, "restarting negotiation");
        if self.stats.restarts > self.options.max_restarts {
            return Err(SessionError::RestartLimit {
                restarts: self.stats.restarts,
            });
        }

        if let RestartReason::BlockLengthChanged { to, .. } = reason {
            self.source.set_block_length(*to)?;
        }
        self.negotiated = None;
        self.diff = None;
        self.state = NegotiationState::Negotiating;
        Ok(())
    }
}

fn distinct_orders(same_chunks: &[SameChunk]) -> usize {
    let mut count = 0;
    let mut last = None;
    for chunk in same_chunks {
        if last != Some(chunk.target_order()) {
            count += 1;
            last = Some(chunk.target_order());
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn sample(len: usize, seed: u64) -> Vec<u8> {
        let mut data = vec![0u8; len];
        StdRng::seed_from_u64(seed).fill(&mut data[..]);
        data
    }

    #[test]
    fn default_options_allow_four_restarts() {
        assert_eq!(SessionOptions::default().max_restarts, 4);
        assert_eq!(SessionOptions::default().with_max_restarts(1).max_restarts, 1);
    }

    #[test]
    fn verification_is_required_by_default() {
        assert!(SessionOptions::default().require_verified);
        assert!(!SessionOptions::default().with_require_verified(false).require_verified);
    }

    #[test]
    fn identical_content_converges_in_one_step() {
        let target = FileState::with_data(256, sample(1000, 1));
        let source = FileState::with_data(256, sample(1000, 1));
        let mut session = Session::new(&source, &target, SessionOptions::default());

        assert_eq!(session.step(), Ok(&NegotiationState::Converged));
        assert_eq!(session.step(), Ok(&NegotiationState::Converged));
        let report = session.run().expect("converged");
        assert!(report.stats.identical);
        assert!(report.verified);
        assert_eq!(report.stats.transferred_bytes, 0);
        assert_eq!(report.stats.target_length, 1000);
    }

    #[test]
    fn steps_walk_through_every_state() {
        let target = FileState::with_data(64, sample(640, 2));
        let mut stale = sample(640, 2);
        stale[100] ^= 1;
        let source = FileState::with_data(64, stale);
        let mut session = Session::new(&source, &target, SessionOptions::default());

        assert_eq!(session.step(), Ok(&NegotiationState::AwaitingDiff));
        assert_eq!(session.step(), Ok(&NegotiationState::Reconstructing));
        assert_eq!(session.step(), Ok(&NegotiationState::Converged));
        assert_eq!(session.stats().blocks_transferred, 1);
        assert_eq!(session.stats().blocks_matched, 9);
        assert_eq!(session.stats().transferred_bytes, 64);
        assert_eq!(source.data(), target.data());
    }

    #[test]
    fn block_length_mismatch_restarts_once() {
        let target = FileState::with_data(512, sample(5000, 3));
        let source = FileState::with_data(256, sample(4000, 3));
        let mut session = Session::new(&source, &target, SessionOptions::default());

        assert_eq!(
            session.step(),
            Ok(&NegotiationState::Restart(RestartReason::BlockLengthChanged {
                from: 256,
                to: 512
            }))
        );
        assert_eq!(session.step(), Ok(&NegotiationState::Negotiating));
        assert_eq!(source.block_length(), 512);

        let report = session.run().expect("converges");
        assert_eq!(report.stats.restarts, 1);
        assert!(report.verified);
        assert_eq!(source.data(), target.data());
    }

    #[test]
    fn zero_restarts_allowed_fails_on_first_signal() {
        let target = FileState::with_data(512, sample(600, 4));
        let source = FileState::with_data(256, sample(600, 5));
        let error = Session::new(&source, &target, SessionOptions::default().with_max_restarts(0))
            .run()
            .expect_err("restart needed");
        assert_eq!(error, SessionError::RestartLimit { restarts: 1 });
    }

    #[test]
    fn each_step_reports_progress() {
        let mut config = logging::VerbosityConfig::default();
        config.info.progress = 1;
        logging::init(config);
        logging::drain_events();

        let target = FileState::with_data(256, sample(1000, 6));
        let source = FileState::with_data(256, sample(1000, 6));
        let mut session = Session::new(&source, &target, SessionOptions::default());
        assert_eq!(session.step(), Ok(&NegotiationState::Converged));

        let progress: Vec<String> = logging::drain_events()
            .into_iter()
            .filter(|event| {
                matches!(
                    event,
                    logging::DiagnosticEvent::Info {
                        flag: logging::InfoFlag::Progress,
                        ..
                    }
                )
            })
            .map(|event| event.message().to_string())
            .collect();
        assert_eq!(progress, ["session state: Converged"]);
        logging::init(logging::VerbosityConfig::default());
    }

    #[test]
    fn distinct_orders_counts_repeats_once() {
        let chunks = [
            SameChunk::new(0, 0),
            SameChunk::new(64, 0),
            SameChunk::new(128, 2),
        ];
        assert_eq!(distinct_orders(&chunks), 2);
        assert_eq!(distinct_orders(&[]), 0);
    }
}
