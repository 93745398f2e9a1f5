//! Mirrored ring buffer shared by every filter.
//!
//! History holds `2 * nn` samples and each write lands at both `i` and
//! `i + nn`, so the `nn` samples starting at the cursor are always one
//! contiguous slice. The cursor moves backwards, which puts the newest
//! sample at offset 0 of the window and the sample `j` steps older at
//! offset `j`.

use crate::simd::SimdReal;

/// Write position in `[0, nn)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(usize);

impl Cursor {
    #[inline(always)]
    pub fn get(self) -> usize {
        self.0
    }

    /// Step to the slot that receives the next sample: `i <- (i + nn - 1) mod nn`.
    #[inline(always)]
    pub fn advance(&mut self, nn: usize) -> usize {
        self.0 = if self.0 == 0 { nn - 1 } else { self.0 - 1 };
        self.0
    }
}

#[derive(Debug)]
pub struct MirroredHistory<T> {
    buf: Vec<T>,
}

impl<T: SimdReal> MirroredHistory<T> {
    /// Zero-filled history for a window of `nn` samples.
    pub fn new(nn: usize) -> Self {
        Self {
            buf: vec![T::zero(); 2 * nn],
        }
    }

    #[inline(always)]
    pub fn write(&mut self, i: usize, nn: usize, value: T) {
        self.buf[i] = value;
        self.buf[i + nn] = value;
    }

    /// The `nn` samples starting at `i`, newest first.
    #[inline(always)]
    pub fn window(&self, i: usize, nn: usize) -> &[T] {
        &self.buf[i..i + nn]
    }

    /// Zero every slot, padding included.
    pub fn clear(&mut self) {
        self.buf.fill(T::zero());
    }
}
