#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` owns the mutable side of block synchronization. A [`FileState`]
//! holds one peer's buffer behind a reader/writer lock together with its
//! whole-buffer strong checksum and block table, and exposes the three
//! operations a negotiation needs:
//!
//! - [`FileState::match_against`] scans the buffer, acting as the source,
//!   against a target's [`Properties`].
//! - [`FileState::diff_chunks`] serves the blocks a source is missing, acting
//!   as the target.
//! - [`FileState::reassemble`] rebuilds the buffer from local matches and
//!   received blocks, committing all of it or none of it.
//!
//! The algorithms behind the last two are also available as the lock-free
//! functions [`extract_diff`] and [`reassemble_chunks`].
//!
//! # Errors
//!
//! Invalid calls, such as a zero block length, return
//! [`PreconditionError`]. Conditions a negotiation recovers from by
//! restarting are values: [`matching::MatchResult::NeedsReset`] and
//! [`ReassembleOutcome::Rejected`].

mod boundary;
mod diff;
mod error;
mod reassemble;
mod state;

pub use boundary::{DiffChunk, DiffRequest, DiffResponse, Properties, ReassembleRequest};
pub use diff::extract_diff;
pub use error::{PreconditionError, ReassembleFailure};
pub use reassemble::{ReassembleOutcome, reassemble_chunks};
pub use state::FileState;
