#![deny(unsafe_code)]

//! Rolling block matching for delta synchronization.
//!
//! A source that holds a stale copy of some content receives the target's
//! block table and scans its own buffer against it:
//!
//! - [`WeakIndex`] groups the target's entries by weak key, keeping collisions.
//! - [`Matcher`] slides a block-sized window over the source, using the weak
//!   key as a pre-filter and the strong checksum as confirmation.
//! - [`MatchResult`] reports either the identity shortcut, a block-length
//!   mismatch, or the matched chunks and the target orders still missing.
//!
//! ```
//! use checksums::StrongChecksum;
//! use matching::Matcher;
//! use signature::{BlockChecksumTable, BlockLength};
//!
//! let target: Vec<u8> = (0..1024u32).map(|i| (i * 7 % 251) as u8).collect();
//! let table = BlockChecksumTable::build(&target, BlockLength::normalized(256));
//! let total = StrongChecksum::compute(&target);
//!
//! let source = &target[..512];
//! let (result, _stats) = Matcher::new(256, &total, &table)
//!     .scan(source, &StrongChecksum::compute(source), 256)
//!     .unwrap();
//! assert_eq!(result.missing_orders(), [2, 3]);
//! ```
//!
//! # See also
//!
//! - [`signature`] for table construction.

mod index;
mod result;
mod scan;

pub use index::WeakIndex;
pub use result::{MatchResult, MatchStats, SameChunk, missing_orders};
pub use scan::{MatchError, Matcher};
