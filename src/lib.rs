#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `blocksync` keeps a stale in-memory buffer (the source) in step with an
//! authoritative one (the target) while moving only the blocks that differ.
//! The target publishes a table of per-block weak and strong checksums; the
//! source slides a rolling window over its own bytes to find blocks it
//! already holds, asks for the rest, and rebuilds its buffer in one commit.
//!
//! This crate re-exports the workspace members:
//!
//! | Module        | Contents                                             |
//! |---------------|------------------------------------------------------|
//! | [`checksums`] | rolling weak checksum and base64 MD4 strong checksum |
//! | [`signature`] | block length policy and block checksum tables        |
//! | [`matching`]  | weak index and the rolling scan                      |
//! | [`engine`]    | shared file state, diff extraction, reassembly       |
//! | [`transfer`]  | negotiation state machine and session statistics     |
//! | [`logging`]   | flag-based verbosity and the tracing bridge          |
//!
//! The most common types are also available at the crate root.
//!
//! # Examples
//!
//! ```
//! use blocksync::{FileState, Session, SessionOptions};
//!
//! let target = FileState::with_data(256, b"The quick brown fox ".repeat(200));
//! let source = FileState::with_data(256, b"The quick brown fox ".repeat(150));
//!
//! let report = Session::new(&source, &target, SessionOptions::default())
//!     .run()
//!     .expect("converges");
//! assert!(report.verified);
//! assert_eq!(source.data(), target.data());
//! ```

pub use checksums;
pub use engine;
pub use logging;
pub use matching;
pub use signature;
pub use transfer;

pub use checksums::{RollingChecksum, RollingDigest, StrongChecksum};
pub use engine::{
    DiffChunk, DiffRequest, DiffResponse, FileState, PreconditionError, Properties,
    ReassembleFailure, ReassembleOutcome, ReassembleRequest,
};
pub use matching::{MatchResult, Matcher, SameChunk};
pub use signature::{
    BlockChecksumTable, BlockLength, DEFAULT_BLOCK_LENGTH, MAX_BLOCK_LENGTH, MIN_BLOCK_LENGTH,
};
pub use transfer::{
    NegotiationState, RestartReason, Session, SessionError, SessionOptions, SyncReport,
    TargetPeer, TransferStats,
};

/// Runs a [`Session`] with default options.
///
/// # Errors
///
/// See [`Session::run`].
pub fn synchronize<T: TargetPeer>(source: &FileState, target: T) -> Result<SyncReport, SessionError> {
    Session::new(source, target, SessionOptions::default()).run()
}
