//! crates/signature/src/block_size.rs
//!
//! Configured block length with an enforced floor and ceiling.
//!
//! Every table is built for exactly one block length. Requests below
//! [`MIN_BLOCK_LENGTH`] are raised to [`DEFAULT_BLOCK_LENGTH`] instead of being
//! rejected. A zero length, or one above [`MAX_BLOCK_LENGTH`], supplied where a
//! configured length is required is treated as a caller bug.
//!
//! ```
//! use signature::{BlockLength, DEFAULT_BLOCK_LENGTH};
//!
//! assert_eq!(BlockLength::normalized(16).get(), DEFAULT_BLOCK_LENGTH);
//! assert_eq!(BlockLength::normalized(512).get(), 512);
//!
//! let block = BlockLength::new(256).unwrap();
//! assert_eq!(block.block_count(65_600), 257);
//! assert_eq!(block.natural_len(65_600, 256), 64);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

use thiserror::Error;

/// Smallest block length accepted as-is.
pub const MIN_BLOCK_LENGTH: usize = 1 << 6;

/// Block length substituted for requests below [`MIN_BLOCK_LENGTH`].
pub const DEFAULT_BLOCK_LENGTH: usize = 1 << 8;

/// Largest block length a table is built for.
///
/// Padded windows are materialized at this size, so a peer cannot make the
/// local side allocate more than this per block.
pub const MAX_BLOCK_LENGTH: usize = 1 << 17;

/// Raised when a configured block length is out of range.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum BlockLengthError {
    /// The caller passed a block length of zero.
    #[error("invalid block length: 0")]
    Zero,
    /// The caller passed a block length above [`MAX_BLOCK_LENGTH`].
    #[error("block length {requested} exceeds the maximum of {MAX_BLOCK_LENGTH}")]
    TooLarge {
        /// Rejected length.
        requested: usize,
    },
}

/// Block length used to partition a buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BlockLength(NonZeroUsize);

impl BlockLength {
    /// The default block length.
    pub const DEFAULT: Self = match NonZeroUsize::new(DEFAULT_BLOCK_LENGTH) {
        Some(value) => Self(value),
        None => panic!("default block length is non-zero"),
    };

    /// Returns `requested`, or the default when it falls below the floor.
    ///
    /// Zero is below the floor, so this never fails. Requests above the
    /// ceiling are clamped to [`MAX_BLOCK_LENGTH`].
    #[must_use]
    pub const fn normalized(requested: usize) -> Self {
        if requested < MIN_BLOCK_LENGTH {
            return Self::DEFAULT;
        }
        let requested = if requested > MAX_BLOCK_LENGTH {
            MAX_BLOCK_LENGTH
        } else {
            requested
        };
        match NonZeroUsize::new(requested) {
            Some(value) => Self(value),
            None => Self::DEFAULT,
        }
    }

    /// Validates a configured block length.
    ///
    /// # Errors
    ///
    /// Returns [`BlockLengthError::Zero`] when `requested` is zero and
    /// [`BlockLengthError::TooLarge`] above [`MAX_BLOCK_LENGTH`]. Non-zero
    /// values below the floor are raised to the default.
    pub const fn new(requested: usize) -> Result<Self, BlockLengthError> {
        if requested == 0 {
            return Err(BlockLengthError::Zero);
        }
        if requested > MAX_BLOCK_LENGTH {
            return Err(BlockLengthError::TooLarge { requested });
        }
        Ok(Self::normalized(requested))
    }

    /// Returns the block length in bytes.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Number of blocks needed to cover `buffer_len` bytes.
    #[inline]
    #[must_use]
    pub const fn block_count(self, buffer_len: usize) -> usize {
        buffer_len.div_ceil(self.get())
    }

    /// Byte offset of the block at `order`, saturating on overflow.
    #[inline]
    #[must_use]
    pub const fn offset_of(self, order: usize) -> usize {
        order.saturating_mul(self.get())
    }

    /// Unpadded length of the block at `order` in a buffer of `buffer_len` bytes.
    ///
    /// Zero when `order` lies past the end of the buffer.
    #[must_use]
    pub const fn natural_len(self, buffer_len: usize, order: usize) -> usize {
        let start = self.offset_of(order);
        if start >= buffer_len {
            return 0;
        }
        let remaining = buffer_len - start;
        if remaining < self.get() {
            remaining
        } else {
            self.get()
        }
    }
}

impl Default for BlockLength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BlockLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl From<BlockLength> for usize {
    fn from(value: BlockLength) -> Self {
        value.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_floor_uses_default() {
        for requested in [0, 1, 32, MIN_BLOCK_LENGTH - 1] {
            assert_eq!(BlockLength::normalized(requested).get(), DEFAULT_BLOCK_LENGTH);
        }
    }

    #[test]
    fn floor_and_above_are_kept() {
        assert_eq!(BlockLength::normalized(MIN_BLOCK_LENGTH).get(), MIN_BLOCK_LENGTH);
        assert_eq!(BlockLength::normalized(700).get(), 700);
    }

    #[test]
    fn new_rejects_zero() {
        assert_eq!(BlockLength::new(0), Err(BlockLengthError::Zero));
        assert_eq!(BlockLength::new(8).map(BlockLength::get), Ok(DEFAULT_BLOCK_LENGTH));
        assert_eq!(BlockLength::new(512).map(BlockLength::get), Ok(512));
    }

    #[test]
    fn ceiling_is_enforced() {
        assert_eq!(BlockLength::new(MAX_BLOCK_LENGTH).map(BlockLength::get), Ok(MAX_BLOCK_LENGTH));
        assert_eq!(
            BlockLength::new(1 << 40),
            Err(BlockLengthError::TooLarge { requested: 1 << 40 })
        );
        assert_eq!(BlockLength::normalized(usize::MAX).get(), MAX_BLOCK_LENGTH);
    }

    #[test]
    fn block_count_rounds_up() {
        let block = BlockLength::normalized(256);
        assert_eq!(block.block_count(0), 0);
        assert_eq!(block.block_count(1), 1);
        assert_eq!(block.block_count(256), 1);
        assert_eq!(block.block_count(257), 2);
        assert_eq!(block.block_count((1 << 16) + 64), 257);
    }

    #[test]
    fn natural_len_clips_last_block() {
        let block = BlockLength::normalized(100);
        assert_eq!(block.natural_len(250, 0), 100);
        assert_eq!(block.natural_len(250, 1), 100);
        assert_eq!(block.natural_len(250, 2), 50);
        assert_eq!(block.natural_len(250, 3), 0);
        assert_eq!(block.natural_len(250, usize::MAX), 0);
    }

    #[test]
    fn default_and_display() {
        assert_eq!(BlockLength::default(), BlockLength::DEFAULT);
        assert_eq!(BlockLength::normalized(1024).to_string(), "1024");
        assert_eq!(usize::from(BlockLength::normalized(1024)), 1024);
    }

    #[test]
    fn error_message_names_zero() {
        assert!(BlockLengthError::Zero.to_string().contains('0'));
    }
}
