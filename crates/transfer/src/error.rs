//! crates/transfer/src/error.rs

use checksums::StrongChecksum;
use engine::PreconditionError;
use thiserror::Error;

/// Reasons a session stops without converging.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SessionError {
    /// An engine call was invalid.
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    /// The session restarted more often than allowed.
    #[error("gave up after {restarts} restarts")]
    RestartLimit {
        /// Restarts taken, including the one that exceeded the limit.
        restarts: u32,
    },
    /// The source committed, but its checksum differs from the one the
    /// target advertised.
    #[error("converged to {length} bytes that do not match the target checksum")]
    Unverified {
        /// Length of the committed source buffer.
        length: usize,
        /// Checksum the target advertised.
        expected: StrongChecksum,
        /// Checksum of the committed source buffer.
        actual: StrongChecksum,
    },
}
