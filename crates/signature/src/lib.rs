#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `signature` partitions a buffer into consecutive fixed-length blocks and
//! computes a weak/strong checksum pair for each of them. The resulting
//! [`BlockChecksumTable`] is what a target hands to a source so the source can
//! find which blocks it already holds.
//!
//! # Invariants
//!
//! - A table built for a buffer of `len` bytes holds `ceil(len / block)`
//!   entries with contiguous orders starting at zero; an empty buffer yields
//!   an empty table.
//! - The final short block is zero-padded to the full block length before
//!   either checksum is computed. [`padded_window`] applies the same rule for
//!   windows scanned near the end of a buffer; [`natural_block`] returns the
//!   unpadded bytes used for transfer.
//! - Block lengths below [`MIN_BLOCK_LENGTH`] are raised to
//!   [`DEFAULT_BLOCK_LENGTH`]; zero is reported as [`BlockLengthError::Zero`]
//!   where a configured length is required, and lengths above
//!   [`MAX_BLOCK_LENGTH`] as [`BlockLengthError::TooLarge`].
//!
//! # See also
//!
//! - [`checksums`] for the weak and strong checksum primitives.

mod block;
pub mod block_size;
pub mod parallel;
mod table;
mod window;

pub use block::CheckSumEntry;
pub use block_size::{
    BlockLength, BlockLengthError, DEFAULT_BLOCK_LENGTH, MAX_BLOCK_LENGTH, MIN_BLOCK_LENGTH,
};
pub use parallel::{build_auto, build_parallel};
pub use table::BlockChecksumTable;
pub use window::{natural_block, padded_window};
