//! crates/transfer/src/stats.rs
//!
//! Counters reported when a session converges.

use checksums::StrongChecksum;
use matching::MatchStats;

/// Totals for one session, accumulated across restarts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferStats {
    /// The identity shortcut applied and no blocks moved.
    pub identical: bool,
    /// Number of restarts taken before converging.
    pub restarts: u32,
    /// Length of the converged buffer.
    pub target_length: usize,
    /// Target orders served from the source's own buffer.
    pub blocks_matched: usize,
    /// Target orders received from the target.
    pub blocks_transferred: usize,
    /// Diff payload bytes received, restarts included.
    pub transferred_bytes: u64,
    /// Checksum table bytes received, restarts included.
    pub checksum_overhead: u64,
}

impl TransferStats {
    /// Total bytes that crossed from target to source.
    #[must_use]
    pub const fn total_received(&self) -> u64 {
        self.transferred_bytes + self.checksum_overhead
    }
}

/// Outcome of a converged session.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncReport {
    /// Session totals.
    pub stats: TransferStats,
    /// Counters from the last scan; zero when the scan was skipped.
    pub scan: MatchStats,
    /// Strong checksum of the source after convergence.
    pub total_strong: StrongChecksum,
    /// Whether `total_strong` equals the checksum the target advertised.
    pub verified: bool,
}
