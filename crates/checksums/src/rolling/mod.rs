//! crates/checksums/src/rolling/mod.rs
//!
//! Rolling checksum used to shortlist candidate blocks.
//!
//! The checksum keeps two 16-bit accumulators over a window `w[0..n)`:
//! `a = Σ w[i]` and `b = Σ (n - i) * w[i]`. Sliding the window by one byte
//! only needs the outgoing and incoming bytes, which keeps a full scan of a
//! buffer linear in its length.

/// Implements `From` for both the owned and the borrowed source type.
macro_rules! impl_from_owned_and_ref {
    ($source:ty => $target:ty, $method:ident) => {
        impl From<$source> for $target {
            #[inline]
            fn from(value: $source) -> Self {
                value.$method()
            }
        }

        impl From<&$source> for $target {
            #[inline]
            fn from(value: &$source) -> Self {
                value.$method()
            }
        }
    };
}

mod checksum;
mod digest;
mod error;

pub use checksum::RollingChecksum;
pub use digest::RollingDigest;
pub use error::RollingError;

#[cfg(test)]
mod tests;
