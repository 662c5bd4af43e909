//! crates/transfer/src/state.rs
//!
//! States of the negotiation machine.

use std::fmt;

use engine::ReassembleFailure;

/// Where a [`Session`](crate::Session) currently is.
///
/// ```text
/// Negotiating ──identical──────────────────────────────▶ Converged
///      │ delta                                              ▲
///      ▼                                                    │ committed
/// AwaitingDiff ──diff fetched──▶ Reconstructing ────────────┘
///      │ stale                        │ rejected
///      ▼                              ▼
///   Restart(reason) ◀──────────────────
///      │ corrective action
///      └──────────▶ Negotiating
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NegotiationState {
    /// Fetch the target's properties and scan against them.
    Negotiating,
    /// Ask the target for the missing blocks.
    AwaitingDiff,
    /// Rebuild the source from matches and received blocks.
    Reconstructing,
    /// The source holds the target's content.
    Converged,
    /// Partial results were discarded; negotiation starts over.
    Restart(RestartReason),
}

impl NegotiationState {
    /// Reports whether the machine has reached [`NegotiationState::Converged`].
    #[must_use]
    pub const fn is_converged(&self) -> bool {
        matches!(self, Self::Converged)
    }
}

/// Protocol signal that forced a restart.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RestartReason {
    /// The peers used different block lengths; the source adopts `to`.
    BlockLengthChanged {
        /// Source block length before the restart.
        from: usize,
        /// Target block length the source switches to.
        to: usize,
    },
    /// The target changed between fetching properties and fetching the diff.
    StaleTarget,
    /// The source could not rebuild its buffer from the negotiated data.
    ReassemblyFailed(ReassembleFailure),
}

impl fmt::Display for RestartReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockLengthChanged { from, to } => {
                write!(f, "block length changed from {from} to {to}")
            }
            Self::StaleTarget => f.write_str("target changed during negotiation"),
            Self::ReassemblyFailed(failure) => write!(f, "reassembly failed: {failure}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_converged_is_terminal() {
        assert!(NegotiationState::Converged.is_converged());
        assert!(!NegotiationState::Negotiating.is_converged());
        assert!(!NegotiationState::Restart(RestartReason::StaleTarget).is_converged());
    }

    #[test]
    fn reasons_render() {
        let reason = RestartReason::BlockLengthChanged { from: 256, to: 1024 };
        assert_eq!(reason.to_string(), "block length changed from 256 to 1024");
        let reason = RestartReason::ReassemblyFailed(ReassembleFailure::MissingOrder { order: 4 });
        assert!(reason.to_string().contains("order 4"));
    }
}
