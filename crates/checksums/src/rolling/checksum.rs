use super::digest::RollingDigest;
use super::error::RollingError;

/// Two-accumulator rolling checksum used as the weak matching tier.
///
/// `s1` accumulates the byte sum and `s2` the sum of running prefix sums, which
/// equals `Σ (n - i) * w[i]` over a window of `n` bytes. Both components are
/// truncated to 16 bits after every update.
///
/// Besides the explicit [`roll`](Self::roll), the checksum remembers the byte
/// that will leave the window on the next step. [`advance`](Self::advance)
/// consumes that byte and records the caller-supplied replacement, which lets a
/// scanner slide across a buffer while only ever naming the new first byte and
/// the incoming byte.
#[doc(alias = "rsum")]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RollingChecksum {
    s1: u32,
    s2: u32,
    len: usize,
    outgoing: Option<u8>,
}

impl RollingChecksum {
    /// Creates a new rolling checksum with zeroed state.
    ///
    /// ```
    /// use checksums::RollingChecksum;
    ///
    /// let checksum = RollingChecksum::new();
    /// assert!(checksum.is_empty());
    /// assert_eq!(checksum.len(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            s1: 0,
            s2: 0,
            len: 0,
            outgoing: None,
        }
    }

    /// Resets the checksum back to its initial state.
    pub const fn reset(&mut self) {
        self.s1 = 0;
        self.s2 = 0;
        self.len = 0;
        self.outgoing = None;
    }

    /// Returns the number of bytes in the current window.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no bytes have been observed yet.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the byte that [`advance`](Self::advance) will remove next.
    #[inline]
    #[must_use]
    pub const fn pending_outgoing(&self) -> Option<u8> {
        self.outgoing
    }

    /// Appends `chunk` to the window.
    pub fn update(&mut self, chunk: &[u8]) {
        let Some(&first) = chunk.first() else {
            return;
        };
        if self.len == 0 {
            self.outgoing = Some(first);
        }

        let mut s1 = self.s1;
        let mut s2 = self.s2;

        let mut iter = chunk.chunks_exact(4);
        for block in &mut iter {
            s1 = s1.wrapping_add(u32::from(block[0]));
            s2 = s2.wrapping_add(s1);

            s1 = s1.wrapping_add(u32::from(block[1]));
            s2 = s2.wrapping_add(s1);

            s1 = s1.wrapping_add(u32::from(block[2]));
            s2 = s2.wrapping_add(s1);

            s1 = s1.wrapping_add(u32::from(block[3]));
            s2 = s2.wrapping_add(s1);
        }

        for &byte in iter.remainder() {
            s1 = s1.wrapping_add(u32::from(byte));
            s2 = s2.wrapping_add(s1);
        }

        self.s1 = s1 & 0xffff;
        self.s2 = s2 & 0xffff;
        self.len = self.len.saturating_add(chunk.len());
    }

    /// Clears the state and seeds it with `block`.
    ///
    /// The first byte of `block` becomes the pending outgoing byte.
    pub fn update_from_block(&mut self, block: &[u8]) {
        self.reset();
        self.update(block);
    }

    #[inline]
    fn window_len_u32(&self) -> Result<u32, RollingError> {
        if self.len == 0 {
            return Err(RollingError::EmptyWindow);
        }
        u32::try_from(self.len).map_err(|_| RollingError::WindowTooLarge { len: self.len })
    }

    /// Rolls the checksum by removing `outgoing` and appending `incoming`.
    ///
    /// The window length stays constant. Because the caller names the outgoing
    /// byte explicitly, the pending outgoing byte is forgotten afterwards.
    ///
    /// ```
    /// use checksums::RollingChecksum;
    ///
    /// let data = b"ABCDE";
    /// let mut rolling = RollingChecksum::new();
    /// rolling.update(&data[0..3]);
    /// rolling.roll(data[0], data[3]).unwrap();
    ///
    /// let mut fresh = RollingChecksum::new();
    /// fresh.update(&data[1..4]);
    /// assert_eq!(rolling.key(), fresh.key());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RollingError::EmptyWindow`] if no bytes have been processed and
    /// [`RollingError::WindowTooLarge`] if the window does not fit in 32 bits.
    #[inline]
    pub fn roll(&mut self, outgoing: u8, incoming: u8) -> Result<(), RollingError> {
        let window_len = self.window_len_u32()?;

        let out = u32::from(outgoing);
        let inn = u32::from(incoming);

        let new_s1 = self.s1.wrapping_sub(out).wrapping_add(inn) & 0xffff;
        let new_s2 = self
            .s2
            .wrapping_sub(window_len.wrapping_mul(out))
            .wrapping_add(new_s1)
            & 0xffff;

        self.s1 = new_s1;
        self.s2 = new_s2;
        self.outgoing = None;
        Ok(())
    }

    /// Slides the window by one byte using the recorded outgoing byte.
    ///
    /// `incoming` is the byte entering at the end of the window and
    /// `next_outgoing` is the byte that will leave on the following step, that
    /// is, the first byte of the window after this update.
    ///
    /// ```
    /// use checksums::RollingChecksum;
    ///
    /// let data = b"rolling window";
    /// let mut rolling = RollingChecksum::new();
    /// rolling.update_from_block(&data[0..4]);
    /// for start in 1..=data.len() - 4 {
    ///     rolling.advance(data[start], data[start + 3]).unwrap();
    /// }
    /// assert_eq!(rolling.digest(), checksums::RollingDigest::from_bytes(&data[10..]));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RollingError::UnknownOutgoing`] when the window was not seeded
    /// through [`update`](Self::update) or a previous `advance`, and the errors
    /// of [`roll`](Self::roll) otherwise.
    #[inline]
    pub fn advance(&mut self, next_outgoing: u8, incoming: u8) -> Result<(), RollingError> {
        if self.len == 0 {
            return Err(RollingError::EmptyWindow);
        }
        let outgoing = self.outgoing.ok_or(RollingError::UnknownOutgoing)?;
        self.roll(outgoing, incoming)?;
        self.outgoing = Some(next_outgoing);
        Ok(())
    }

    /// Returns the 32-bit lookup key, see [`RollingDigest::key`].
    #[inline]
    #[must_use]
    pub const fn key(&self) -> u32 {
        (self.s1 << 16) | self.s2
    }

    /// Returns the current state as a structured digest.
    #[must_use]
    pub const fn digest(&self) -> RollingDigest {
        RollingDigest::new(self.s1 as u16, self.s2 as u16, self.len)
    }

    #[cfg(test)]
    pub(crate) const fn force_state(&mut self, s1: u32, s2: u32, len: usize) {
        self.s1 = s1;
        self.s2 = s2;
        self.len = len;
    }
}
