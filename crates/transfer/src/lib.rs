#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `transfer` converges a source [`engine::FileState`] onto a target through
//! two round trips: the target's [`engine::Properties`] first, then the
//! blocks the source could not find locally. [`Session`] runs that exchange
//! as an explicit [`NegotiationState`] machine.
//!
//! The target sits behind the [`TargetPeer`] trait. `FileState` implements it
//! directly for in-process use, and so do `&T` and `Arc<T>`.
//!
//! # Restarts
//!
//! Three conditions discard partial work and negotiate again:
//!
//! - the peers disagree on block length, after which the source adopts the
//!   target's;
//! - the target's checksum or block length changed between the two round
//!   trips;
//! - reassembly was rejected.
//!
//! [`SessionOptions::max_restarts`] bounds how often this may happen before
//! [`SessionError::RestartLimit`] is returned.

mod error;
mod peer;
mod session;
mod state;
mod stats;

pub use error::SessionError;
pub use peer::TargetPeer;
pub use session::{DEFAULT_MAX_RESTARTS, Session, SessionOptions};
pub use state::{NegotiationState, RestartReason};
pub use stats::{SyncReport, TransferStats};
