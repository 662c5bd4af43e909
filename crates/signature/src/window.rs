//! crates/signature/src/window.rs
//!
//! Window slicing helpers.
//!
//! Checksums are always computed over exactly one block length of bytes; a
//! window that runs past the end of the buffer is right-padded with zeros.
//! Bytes handed out for transfer or reconstruction are never padded.

use std::borrow::Cow;

/// Returns the `block_len` bytes starting at `start`, zero-padded at the end of `buffer`.
///
/// Borrows when the window lies entirely inside the buffer.
///
/// ```
/// use signature::padded_window;
///
/// assert_eq!(&*padded_window(b"abcdef", 4, 4), b"ef\0\0");
/// assert_eq!(&*padded_window(b"abcdef", 0, 4), b"abcd");
/// ```
#[must_use]
pub fn padded_window(buffer: &[u8], start: usize, block_len: usize) -> Cow<'_, [u8]> {
    let tail = buffer.get(start..).unwrap_or_default();
    if tail.len() >= block_len {
        return Cow::Borrowed(&tail[..block_len]);
    }
    let mut padded = Vec::with_capacity(block_len);
    padded.extend_from_slice(tail);
    padded.resize(block_len, 0);
    Cow::Owned(padded)
}

/// Returns up to `block_len` bytes starting at `start`, clipped to the buffer.
///
/// ```
/// use signature::natural_block;
///
/// assert_eq!(natural_block(b"abcdef", 4, 4), b"ef");
/// assert!(natural_block(b"abcdef", 9, 4).is_empty());
/// ```
#[must_use]
pub fn natural_block(buffer: &[u8], start: usize, block_len: usize) -> &[u8] {
    let tail = buffer.get(start..).unwrap_or_default();
    &tail[..tail.len().min(block_len)]
}
