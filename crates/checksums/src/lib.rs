#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `checksums` provides the two checksum tiers used by block-level delta
//! synchronization:
//!
//! - [`RollingChecksum`] is the cheap two-accumulator weak checksum. It can be
//!   seeded over a window and then slid one byte at a time in O(1).
//! - [`StrongChecksum`] is an MD4 digest rendered as base64 so it can be
//!   compared byte-for-byte and carried by any transport unchanged.
//!
//! # Examples
//!
//! ```
//! use checksums::{RollingChecksum, StrongChecksum};
//!
//! let data = b"ABCDE";
//! let mut rolling = RollingChecksum::new();
//! rolling.update_from_block(&data[0..3]);
//! rolling.roll(data[0], data[3]).unwrap();
//!
//! let mut fresh = RollingChecksum::new();
//! fresh.update_from_block(&data[1..4]);
//! assert_eq!(rolling.digest(), fresh.digest());
//!
//! let strong = StrongChecksum::compute(b"ABC");
//! assert_eq!(strong.as_bytes().len(), StrongChecksum::ENCODED_LEN);
//! ```

mod rolling;
pub mod strong;

pub use rolling::{RollingChecksum, RollingDigest, RollingError};
pub use strong::{StrongChecksum, compare_bytes};
