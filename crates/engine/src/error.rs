//! crates/engine/src/error.rs
//!
//! Error and signal types for the engine crate.
//!
//! [`PreconditionError`] is returned through `Err` and means the call itself
//! was invalid. [`ReassembleFailure`] is a protocol signal: it travels inside
//! an `Ok` value and tells the driver to restart negotiation.

use checksums::RollingError;
use matching::MatchError;
use signature::BlockLengthError;
use thiserror::Error;

/// Invalid invocation; never retried.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PreconditionError {
    /// A zero block length was supplied where a configured one is required.
    #[error("block length must be non-zero")]
    ZeroBlockLength,
    /// A block length above [`signature::MAX_BLOCK_LENGTH`] was supplied.
    #[error("block length {requested} exceeds the maximum of {}", signature::MAX_BLOCK_LENGTH)]
    BlockLengthTooLarge {
        /// Rejected length.
        requested: usize,
    },
    /// The rolling checksum rejected an update during a scan.
    #[error("rolling checksum failure: {0}")]
    Checksum(#[from] RollingError),
}

impl From<BlockLengthError> for PreconditionError {
    fn from(error: BlockLengthError) -> Self {
        match error {
            BlockLengthError::Zero => Self::ZeroBlockLength,
            BlockLengthError::TooLarge { requested } => Self::BlockLengthTooLarge { requested },
        }
    }
}

impl From<MatchError> for PreconditionError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::InvalidBlockLength { target, source_len }
                if target != 0 && source_len != 0 =>
            {
                Self::BlockLengthTooLarge {
                    requested: target.max(source_len),
                }
            }
            MatchError::InvalidBlockLength { .. } => Self::ZeroBlockLength,
            MatchError::Rolling(inner) => Self::Checksum(inner),
        }
    }
}

/// Structural reasons a reassembly request cannot be committed.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReassembleFailure {
    /// The request was built for a different block length than the local one.
    #[error("block length changed: local {expected}, request {actual}")]
    BlockLengthMismatch {
        /// Block length configured locally.
        expected: usize,
        /// Block length carried by the request.
        actual: usize,
    },
    /// No same chunk or diff chunk covers `order`.
    #[error("no data for order {order}")]
    MissingOrder {
        /// First uncovered order.
        order: usize,
    },
    /// A same chunk points past the end of the local buffer.
    #[error("same chunk for order {order} starts at {offset}, past the local buffer")]
    SourceOutOfRange {
        /// Order the chunk claims to cover.
        order: usize,
        /// Offending source offset.
        offset: usize,
    },
}
